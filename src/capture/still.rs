use std::io::Cursor;

use image::{codecs::jpeg::JpegEncoder, imageops, DynamicImage, RgbaImage};

use super::{CaptureError, CapturedImage, OverlayGuide};

pub const DEFAULT_JPEG_QUALITY: u8 = 92;

/// Turns one camera frame into an encoded still.
///
/// With `auto_crop` the still is cut to the guide's rectangle; otherwise the
/// full frame is kept. Encoding is deterministic: the same frame, guide and
/// quality always produce the same bytes.
pub fn capture_still(
    frame: &RgbaImage,
    guide: &OverlayGuide,
    auto_crop: bool,
    quality: u8,
) -> Result<CapturedImage, CaptureError> {
    let (frame_width, frame_height) = frame.dimensions();
    if frame_width == 0 || frame_height == 0 {
        return Err(CaptureError::EmptyFrame);
    }

    let still = if auto_crop {
        let rect = guide.crop_rect(frame_width, frame_height);
        if rect.width == 0 || rect.height == 0 {
            return Err(CaptureError::EmptyFrame);
        }
        imageops::crop_imm(frame, rect.x, rect.y, rect.width, rect.height).to_image()
    } else {
        frame.clone()
    };

    encode_jpeg(still, quality)
}

fn encode_jpeg(still: RgbaImage, quality: u8) -> Result<CapturedImage, CaptureError> {
    let (width, height) = still.dimensions();
    let rgb = DynamicImage::ImageRgba8(still).to_rgb8();

    let mut bytes = Vec::new();
    {
        let mut encoder =
            JpegEncoder::new_with_quality(Cursor::new(&mut bytes), quality.clamp(1, 100));
        encoder.encode_image(&rgb)?;
    }

    Ok(CapturedImage {
        bytes,
        width,
        height,
        mime_type: "image/jpeg",
    })
}
