//! Scoped camera acquisition.
//!
//! A [`Camera`] hands out a live [`FrameStream`]; the controller wraps it in a
//! [`CameraFeed`] tied to one capture stage. Dropping the feed stops the
//! stream, so every way of leaving a stage releases the device.

use std::future::Future;

use image::RgbaImage;
use log::debug;

use super::{CaptureError, ShotLabel};

pub trait Camera: Send + Sync {
    type Stream: FrameStream;

    /// Opens a live feed. Fails with [`CaptureError::CameraUnavailable`] when
    /// permission is denied or no device exists.
    fn acquire(&self) -> impl Future<Output = Result<Self::Stream, CaptureError>> + Send;
}

pub trait FrameStream: Send {
    fn latest_frame(&mut self) -> Result<RgbaImage, CaptureError>;

    /// `false` once the stream has ended, whether stopped here or by the
    /// device side.
    fn is_live(&self) -> bool;

    fn stop(&mut self);
}

pub struct CameraFeed<S: FrameStream> {
    stream: S,
    stage: ShotLabel,
}

impl<S: FrameStream> CameraFeed<S> {
    pub fn new(stream: S, stage: ShotLabel) -> Self {
        debug!("Camera feed opened for {stage} shot");
        Self { stream, stage }
    }

    pub fn stage(&self) -> ShotLabel {
        self.stage
    }

    pub fn latest_frame(&mut self) -> Result<RgbaImage, CaptureError> {
        self.stream.latest_frame()
    }

    pub fn is_live(&self) -> bool {
        self.stream.is_live()
    }
}

impl<S: FrameStream> Drop for CameraFeed<S> {
    fn drop(&mut self) {
        self.stream.stop();
        debug!("Camera feed released for {} shot", self.stage);
    }
}
