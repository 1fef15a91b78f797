use std::fmt;

use serde::{Deserialize, Serialize};

use super::CaptureError;

/// One of the three photographs taken per shirt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ShotLabel {
    Front,
    Back,
    Label,
}

impl ShotLabel {
    pub const ALL: [ShotLabel; 3] = [ShotLabel::Front, ShotLabel::Back, ShotLabel::Label];

    pub fn as_str(&self) -> &'static str {
        match self {
            ShotLabel::Front => "front",
            ShotLabel::Back => "back",
            ShotLabel::Label => "label",
        }
    }
}

impl fmt::Display for ShotLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CaptureStage {
    Front,
    Back,
    Label,
    Review,
}

impl Default for CaptureStage {
    fn default() -> Self {
        CaptureStage::Front
    }
}

impl CaptureStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureStage::Front => "front",
            CaptureStage::Back => "back",
            CaptureStage::Label => "label",
            CaptureStage::Review => "review",
        }
    }

    /// The shot this stage photographs; `None` for review.
    pub fn shot(&self) -> Option<ShotLabel> {
        match self {
            CaptureStage::Front => Some(ShotLabel::Front),
            CaptureStage::Back => Some(ShotLabel::Back),
            CaptureStage::Label => Some(ShotLabel::Label),
            CaptureStage::Review => None,
        }
    }

    fn next(&self) -> CaptureStage {
        match self {
            CaptureStage::Front => CaptureStage::Back,
            CaptureStage::Back => CaptureStage::Label,
            CaptureStage::Label | CaptureStage::Review => CaptureStage::Review,
        }
    }
}

impl From<ShotLabel> for CaptureStage {
    fn from(label: ShotLabel) -> Self {
        match label {
            ShotLabel::Front => CaptureStage::Front,
            ShotLabel::Back => CaptureStage::Back,
            ShotLabel::Label => CaptureStage::Label,
        }
    }
}

/// An encoded still, ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub mime_type: &'static str,
}

/// The three stills handed to the uploader on submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedShots {
    pub front: CapturedImage,
    pub back: CapturedImage,
    pub label: CapturedImage,
}

impl CapturedShots {
    pub fn get(&self, label: ShotLabel) -> &CapturedImage {
        match label {
            ShotLabel::Front => &self.front,
            ShotLabel::Back => &self.back,
            ShotLabel::Label => &self.label,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct ShotSlots {
    front: Option<CapturedImage>,
    back: Option<CapturedImage>,
    label: Option<CapturedImage>,
}

impl ShotSlots {
    fn get(&self, label: ShotLabel) -> Option<&CapturedImage> {
        match label {
            ShotLabel::Front => self.front.as_ref(),
            ShotLabel::Back => self.back.as_ref(),
            ShotLabel::Label => self.label.as_ref(),
        }
    }

    fn slot_mut(&mut self, label: ShotLabel) -> &mut Option<CapturedImage> {
        match label {
            ShotLabel::Front => &mut self.front,
            ShotLabel::Back => &mut self.back,
            ShotLabel::Label => &mut self.label,
        }
    }
}

/// Guided three-shot capture: front, back and label in that order, then a
/// review step from which any single shot can be retaken.
///
/// Pure state; camera handling lives in [`super::CaptureController`].
#[derive(Debug, Clone, Default)]
pub struct CaptureSession {
    slots: ShotSlots,
    stage: CaptureStage,
    retake: Option<ShotLabel>,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> CaptureStage {
        self.stage
    }

    pub fn retake_target(&self) -> Option<ShotLabel> {
        self.retake
    }

    pub fn image(&self, label: ShotLabel) -> Option<&CapturedImage> {
        self.slots.get(label)
    }

    pub fn missing(&self) -> Vec<ShotLabel> {
        ShotLabel::ALL
            .into_iter()
            .filter(|label| self.slots.get(*label).is_none())
            .collect()
    }

    /// Stores a still for the active shot and moves on: to the next stage in
    /// the first pass, straight back to review while retaking.
    pub fn record(
        &mut self,
        label: ShotLabel,
        image: CapturedImage,
    ) -> Result<CaptureStage, CaptureError> {
        self.ensure_active(label)?;

        *self.slots.slot_mut(label) = Some(image);

        self.stage = if self.retake.take().is_some() {
            CaptureStage::Review
        } else {
            self.stage.next()
        };

        Ok(self.stage)
    }

    /// Re-enters the stage for `label`. Other slots are left as they are.
    pub fn retake(&mut self, label: ShotLabel) -> Result<CaptureStage, CaptureError> {
        if self.stage != CaptureStage::Review {
            return Err(CaptureError::NotInReview);
        }

        self.retake = Some(label);
        self.stage = label.into();
        Ok(self.stage)
    }

    /// Hands off the three stills and resets the session.
    pub fn submit(&mut self) -> Result<CapturedShots, CaptureError> {
        if self.stage != CaptureStage::Review || self.retake.is_some() {
            return Err(CaptureError::NotInReview);
        }

        let missing = self.missing();
        if !missing.is_empty() {
            return Err(CaptureError::IncompleteCapture { missing });
        }

        let slots = std::mem::take(&mut self.slots);
        *self = Self::default();

        match (slots.front, slots.back, slots.label) {
            (Some(front), Some(back), Some(label)) => Ok(CapturedShots { front, back, label }),
            _ => Err(CaptureError::IncompleteCapture {
                missing: ShotLabel::ALL.to_vec(),
            }),
        }
    }

    /// The shot a capture may currently be recorded for.
    pub fn active_shot(&self) -> Option<ShotLabel> {
        self.stage.shot()
    }

    pub(crate) fn ensure_active(&self, label: ShotLabel) -> Result<(), CaptureError> {
        match self.active_shot() {
            Some(active) if active == label => Ok(()),
            _ => Err(CaptureError::StageMismatch {
                requested: label,
                active: self.stage.as_str(),
            }),
        }
    }

    pub fn instructions(&self) -> String {
        if let Some(label) = self.retake {
            return format!("Retaking {label} shot");
        }

        match self.stage {
            CaptureStage::Front => "Align the front of the shirt within the outline".into(),
            CaptureStage::Back => "Now capture the back of the shirt".into(),
            CaptureStage::Label => "Finally, take a clear photo of the label".into(),
            CaptureStage::Review => "Review your images before submitting".into(),
        }
    }
}
