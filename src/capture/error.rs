use thiserror::Error;

use super::ShotLabel;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Could not access camera. Please check permissions.")]
    CameraUnavailable,
    #[error("Missing {} shot(s) before submission", join_labels(.missing))]
    IncompleteCapture { missing: Vec<ShotLabel> },
    #[error("Cannot capture the {requested} shot while the {active} step is active")]
    StageMismatch {
        requested: ShotLabel,
        active: &'static str,
    },
    #[error("Retake and submit are only available from review")]
    NotInReview,
    #[error("No camera frame received yet")]
    NoFrame,
    #[error("Captured frame is empty")]
    EmptyFrame,
    #[error("Frame data could not be decoded: {0}")]
    InvalidFrame(String),
    #[error("Failed to encode captured image: {0}")]
    Encode(#[from] image::ImageError),
}

fn join_labels(labels: &[ShotLabel]) -> String {
    labels
        .iter()
        .map(|label| label.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
