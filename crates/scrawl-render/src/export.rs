//! PNG encoding of straight-alpha RGBA8 buffers.

use scrawl_core::error::ExportError;

/// Encode `rgba` (row-major, 4 bytes per pixel, straight alpha) as PNG.
///
/// Output is deterministic: the same buffer always encodes to the same
/// bytes.
///
/// # Errors
/// - `EmptyCanvas` when either dimension is zero.
/// - `BufferSize` when `rgba` does not hold exactly `width × height` pixels.
/// - `Encode` when the encoder itself fails.
pub fn encode_png(width: u32, height: u32, rgba: &[u8]) -> Result<Vec<u8>, ExportError> {
    if width == 0 || height == 0 {
        return Err(ExportError::EmptyCanvas { width, height });
    }
    let expected = width as usize * height as usize * 4;
    if rgba.len() != expected {
        return Err(ExportError::BufferSize {
            expected,
            actual: rgba.len(),
        });
    }

    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().map_err(encode_err)?;
        writer.write_image_data(rgba).map_err(encode_err)?;
        writer.finish().map_err(encode_err)?;
    }
    log::debug!("encoded {width}x{height} png, {} bytes", buf.len());
    Ok(buf)
}

fn encode_err(e: png::EncodingError) -> ExportError {
    ExportError::Encode(e.to_string())
}
