use std::io::Cursor;

use crate::foundation::error::{PicEditError, PicEditResult};

/// Decode encoded image bytes (any format the `image` crate recognizes) into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> PicEditResult<image::RgbaImage> {
    if bytes.is_empty() {
        return Err(PicEditError::decode("image bytes are empty"));
    }
    let reader = image::ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| PicEditError::decode(format!("sniff image format: {e}")))?;
    if reader.format().is_none() {
        return Err(PicEditError::decode("unrecognized image format"));
    }
    let dyn_img = reader
        .decode()
        .map_err(|e| PicEditError::decode(e.to_string()))?;
    Ok(dyn_img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
