use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use serde::Serialize;

use super::{
    capture_still, Camera, CameraFeed, CaptureError, CaptureSession, CaptureStage, CapturedShots,
    OverlayGuide, ShotLabel,
};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptureSnapshot {
    pub stage: CaptureStage,
    pub retake_target: Option<ShotLabel>,
    pub captured: Vec<ShotLabel>,
    pub missing: Vec<ShotLabel>,
    pub instructions: String,
    pub camera_open: bool,
}

/// Drives a [`CaptureSession`] against a camera, holding at most one live
/// feed, and only for the stage that opened it.
pub struct CaptureController<C: Camera> {
    camera: C,
    session: CaptureSession,
    feed: Option<CameraFeed<C::Stream>>,
    jpeg_quality: u8,
}

impl<C: Camera> CaptureController<C> {
    pub fn new(camera: C, jpeg_quality: u8) -> Self {
        Self {
            camera,
            session: CaptureSession::new(),
            feed: None,
            jpeg_quality,
        }
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    pub fn session(&self) -> &CaptureSession {
        &self.session
    }

    pub fn is_camera_open(&self) -> bool {
        self.feed.as_ref().is_some_and(|feed| feed.is_live())
    }

    /// Opens the camera for `stage`. A no-op when a live feed for that stage
    /// is already open; a feed that ended underneath us is reopened.
    pub async fn start_capture(&mut self, stage: ShotLabel) -> Result<(), CaptureError> {
        self.session.ensure_active(stage)?;

        if self
            .feed
            .as_ref()
            .is_some_and(|feed| feed.stage() == stage && feed.is_live())
        {
            return Ok(());
        }
        self.release_feed();

        let stream = self.camera.acquire().await?;
        self.feed = Some(CameraFeed::new(stream, stage));
        Ok(())
    }

    /// Takes the still for `stage` from the live feed and advances the
    /// session. On any failure the session is left as it was.
    pub fn capture(
        &mut self,
        stage: ShotLabel,
        auto_crop: bool,
    ) -> Result<CaptureStage, CaptureError> {
        self.session.ensure_active(stage)?;

        let feed = self
            .feed
            .as_mut()
            .filter(|feed| feed.stage() == stage)
            .ok_or(CaptureError::CameraUnavailable)?;
        let frame = feed.latest_frame()?;

        let still = capture_still(
            &frame,
            OverlayGuide::for_shot(stage),
            auto_crop,
            self.jpeg_quality,
        )?;
        debug!(
            "Captured {stage} still {}x{} ({} bytes)",
            still.width,
            still.height,
            still.bytes.len()
        );

        let next = self.session.record(stage, still)?;
        self.release_feed();
        Ok(next)
    }

    pub fn retake(&mut self, stage: ShotLabel) -> Result<CaptureStage, CaptureError> {
        let next = self.session.retake(stage)?;
        self.release_feed();
        Ok(next)
    }

    pub fn submit(&mut self) -> Result<CapturedShots, CaptureError> {
        let shots = self.session.submit()?;
        self.release_feed();
        Ok(shots)
    }

    /// Leaves the flow: the feed is released and captured shots discarded.
    pub fn cancel(&mut self) {
        self.release_feed();
        self.session = CaptureSession::new();
    }

    /// The captured still for `label` as a data URL, for the review grid.
    pub fn preview(&self, label: ShotLabel) -> Option<String> {
        self.session.image(label).map(|image| {
            format!(
                "data:{};base64,{}",
                image.mime_type,
                STANDARD.encode(&image.bytes)
            )
        })
    }

    pub fn snapshot(&self) -> CaptureSnapshot {
        let missing = self.session.missing();
        let captured = ShotLabel::ALL
            .into_iter()
            .filter(|label| !missing.contains(label))
            .collect();

        CaptureSnapshot {
            stage: self.session.stage(),
            retake_target: self.session.retake_target(),
            captured,
            missing,
            instructions: self.session.instructions(),
            camera_open: self.is_camera_open(),
        }
    }

    fn release_feed(&mut self) {
        self.feed = None;
    }
}
