//! Overlay guides drawn over the live camera feed, and the crop rectangles
//! they imply.

use serde::Serialize;

use super::ShotLabel;

/// A rectangle expressed as fractions of the frame, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FractionalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayGuide {
    pub name: ShotLabel,
    pub crop: FractionalRect,
    /// Outline in a 200x200 SVG viewBox.
    pub outline_path: &'static str,
    pub instructions: &'static str,
}

const SHIRT_OUTLINE: &str = "M 60,20 L 140,20 C 145,20 150,25 150,30 L 150,50 L 160,60 L 160,70 \
     L 150,80 L 150,180 L 50,180 L 50,80 L 40,70 L 40,60 L 50,50 L 50,30 C 50,25 55,20 60,20 Z";

const LABEL_OUTLINE: &str = "M 65,55 L 135,55 L 135,145 L 100,145 L 95,150 L 90,145 L 65,145 Z";

pub const FRONT_GUIDE: OverlayGuide = OverlayGuide {
    name: ShotLabel::Front,
    crop: FractionalRect {
        x: 0.25,
        y: 0.10,
        width: 0.55,
        height: 0.80,
    },
    outline_path: SHIRT_OUTLINE,
    instructions: "Position the front of shirt within the outline",
};

pub const BACK_GUIDE: OverlayGuide = OverlayGuide {
    name: ShotLabel::Back,
    crop: FractionalRect {
        x: 0.25,
        y: 0.10,
        width: 0.55,
        height: 0.80,
    },
    outline_path: SHIRT_OUTLINE,
    instructions: "Position the back of shirt within the outline",
};

pub const LABEL_GUIDE: OverlayGuide = OverlayGuide {
    name: ShotLabel::Label,
    crop: FractionalRect {
        x: 0.32,
        y: 0.28,
        width: 0.35,
        height: 0.45,
    },
    outline_path: LABEL_OUTLINE,
    instructions: "Center the label in the outline",
};

impl OverlayGuide {
    pub fn for_shot(label: ShotLabel) -> &'static OverlayGuide {
        match label {
            ShotLabel::Front => &FRONT_GUIDE,
            ShotLabel::Back => &BACK_GUIDE,
            ShotLabel::Label => &LABEL_GUIDE,
        }
    }

    /// Pixel rectangle for a `frame_width` x `frame_height` frame. Each
    /// component is floored; the result never extends past the frame.
    pub fn crop_rect(&self, frame_width: u32, frame_height: u32) -> CropRect {
        let x = scale(frame_width, self.crop.x).min(frame_width);
        let y = scale(frame_height, self.crop.y).min(frame_height);
        let width = scale(frame_width, self.crop.width).min(frame_width - x);
        let height = scale(frame_height, self.crop.height).min(frame_height - y);

        CropRect {
            x,
            y,
            width,
            height,
        }
    }
}

fn scale(dimension: u32, fraction: f64) -> u32 {
    let fraction = fraction.clamp(0.0, 1.0);
    (f64::from(dimension) * fraction).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_guide_on_1000_by_800() {
        let rect = FRONT_GUIDE.crop_rect(1000, 800);
        assert_eq!(
            rect,
            CropRect {
                x: 250,
                y: 80,
                width: 550,
                height: 640
            }
        );
    }

    #[test]
    fn label_guide_floors_each_component() {
        let rect = LABEL_GUIDE.crop_rect(1280, 720);
        // 1280 * 0.32 = 409.6, 720 * 0.28 = 201.6, 1280 * 0.35 = 448, 720 * 0.45 = 324
        assert_eq!(
            rect,
            CropRect {
                x: 409,
                y: 201,
                width: 448,
                height: 324
            }
        );
    }

    #[test]
    fn every_guide_stays_inside_the_frame() {
        for label in ShotLabel::ALL {
            for (w, h) in [(1, 1), (3, 7), (640, 480), (1920, 1080)] {
                let rect = OverlayGuide::for_shot(label).crop_rect(w, h);
                assert!(rect.x + rect.width <= w);
                assert!(rect.y + rect.height <= h);
            }
        }
    }

    #[test]
    fn guides_are_looked_up_by_shot() {
        assert_eq!(OverlayGuide::for_shot(ShotLabel::Back).name, ShotLabel::Back);
        assert_eq!(
            OverlayGuide::for_shot(ShotLabel::Label).outline_path,
            LABEL_OUTLINE
        );
    }
}
