pub mod camera;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod controller;
mod error;
pub mod guide;
pub mod state;
pub mod still;
pub mod webview;

pub use camera::{Camera, CameraFeed, FrameStream};
pub use controller::{CaptureController, CaptureSnapshot};
pub use error::CaptureError;
pub use guide::{CropRect, FractionalRect, OverlayGuide};
pub use state::{CaptureSession, CaptureStage, CapturedImage, CapturedShots, ShotLabel};
pub use still::{capture_still, DEFAULT_JPEG_QUALITY};
pub use webview::{decode_frame, WebviewCamera, WebviewStream};
