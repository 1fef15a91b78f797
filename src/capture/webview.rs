use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::RgbaImage;
use tokio_util::sync::CancellationToken;

use super::{Camera, CaptureError, FrameStream};

const ENABLE_LOGS: bool = true;
use crate::{log_info, log_warn};

/// Camera whose device lives in the webview. The frontend reports the
/// permission outcome of `getUserMedia` and pushes frames while a stream is
/// open; the backend only ever sees decoded frames.
#[derive(Clone, Default)]
pub struct WebviewCamera {
    inner: Arc<Mutex<WebviewState>>,
}

#[derive(Default)]
struct WebviewState {
    permission: bool,
    latest: Option<RgbaImage>,
    active: Option<CancellationToken>,
}

impl WebviewCamera {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, WebviewState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Records the permission result. Revoking permission ends any open
    /// stream.
    pub fn set_permission(&self, granted: bool) {
        let mut state = self.state();
        state.permission = granted;
        if !granted {
            if let Some(token) = state.active.take() {
                token.cancel();
                log_warn!("Camera permission revoked while a stream was open");
            }
            state.latest = None;
        }
    }

    pub fn has_permission(&self) -> bool {
        self.state().permission
    }

    pub fn is_streaming(&self) -> bool {
        self.state()
            .active
            .as_ref()
            .is_some_and(|token| !token.is_cancelled())
    }

    /// Stores a frame for the open stream. Returns `false` when no stream is
    /// open, telling the frontend to stop sending.
    pub fn push_frame(&self, frame: RgbaImage) -> bool {
        let mut state = self.state();
        let streaming = state
            .active
            .as_ref()
            .is_some_and(|token| !token.is_cancelled());
        if streaming {
            state.latest = Some(frame);
        }
        streaming
    }

    /// Accepts a `data:image/...;base64,` URL or bare base64 image data.
    pub fn push_encoded_frame(&self, data: &str) -> Result<bool, CaptureError> {
        let frame = decode_frame(data)?;
        Ok(self.push_frame(frame))
    }
}

pub fn decode_frame(data: &str) -> Result<RgbaImage, CaptureError> {
    let payload = match data.split_once(',') {
        Some((header, payload)) if header.starts_with("data:") => payload,
        _ => data,
    };

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|err| CaptureError::InvalidFrame(err.to_string()))?;
    let image = image::load_from_memory(&bytes)
        .map_err(|err| CaptureError::InvalidFrame(err.to_string()))?;
    Ok(image.to_rgba8())
}

impl Camera for WebviewCamera {
    type Stream = WebviewStream;

    async fn acquire(&self) -> Result<WebviewStream, CaptureError> {
        let mut state = self.state();
        if !state.permission {
            return Err(CaptureError::CameraUnavailable);
        }

        if let Some(previous) = state.active.take() {
            previous.cancel();
        }
        let token = CancellationToken::new();
        state.active = Some(token.clone());
        state.latest = None;
        log_info!("Webview camera stream opened");

        Ok(WebviewStream {
            camera: self.clone(),
            token,
        })
    }
}

pub struct WebviewStream {
    camera: WebviewCamera,
    token: CancellationToken,
}

impl FrameStream for WebviewStream {
    fn latest_frame(&mut self) -> Result<RgbaImage, CaptureError> {
        if self.token.is_cancelled() {
            return Err(CaptureError::CameraUnavailable);
        }
        self.camera
            .state()
            .latest
            .clone()
            .ok_or(CaptureError::NoFrame)
    }

    fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }

    fn stop(&mut self) {
        if self.token.is_cancelled() {
            return;
        }
        self.token.cancel();

        let mut state = self.camera.state();
        if state
            .active
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
        {
            state.active = None;
            state.latest = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn frame(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 255]))
    }

    #[tokio::test]
    async fn acquire_requires_permission() {
        let camera = WebviewCamera::new();
        assert!(matches!(
            camera.acquire().await,
            Err(CaptureError::CameraUnavailable)
        ));

        camera.set_permission(true);
        assert!(camera.acquire().await.is_ok());
    }

    #[tokio::test]
    async fn frames_are_kept_only_while_streaming() {
        let camera = WebviewCamera::new();
        camera.set_permission(true);
        assert!(!camera.push_frame(frame(4, 4)));

        let mut stream = camera.acquire().await.unwrap();
        assert!(matches!(stream.latest_frame(), Err(CaptureError::NoFrame)));

        assert!(camera.push_frame(frame(4, 4)));
        assert_eq!(stream.latest_frame().unwrap().dimensions(), (4, 4));

        stream.stop();
        assert!(!camera.is_streaming());
        assert!(!camera.push_frame(frame(4, 4)));
    }

    #[tokio::test]
    async fn revoking_permission_ends_the_stream() {
        let camera = WebviewCamera::new();
        camera.set_permission(true);
        let mut stream = camera.acquire().await.unwrap();
        camera.push_frame(frame(2, 2));

        camera.set_permission(false);
        assert!(matches!(
            stream.latest_frame(),
            Err(CaptureError::CameraUnavailable)
        ));
    }

    #[tokio::test]
    async fn stopping_a_stale_stream_keeps_the_new_one() {
        let camera = WebviewCamera::new();
        camera.set_permission(true);
        let mut old = camera.acquire().await.unwrap();
        let _new = camera.acquire().await.unwrap();

        old.stop();
        assert!(camera.is_streaming());
    }

    #[test]
    fn decodes_data_urls_and_bare_base64() {
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(frame(3, 2))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let encoded = STANDARD.encode(&png);

        let from_url = decode_frame(&format!("data:image/png;base64,{encoded}")).unwrap();
        assert_eq!(from_url.dimensions(), (3, 2));
        assert_eq!(decode_frame(&encoded).unwrap().dimensions(), (3, 2));
        assert!(matches!(
            decode_frame("data:image/png;base64,!!!"),
            Err(CaptureError::InvalidFrame(_))
        ));
    }
}
