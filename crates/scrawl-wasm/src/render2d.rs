//! Canvas2D blitting.
//!
//! The raster is authoritative; the `<canvas>` only mirrors it. Regions are
//! copied with `putImageData`, which replaces pixels instead of compositing,
//! so cleared areas really become transparent on screen.

use scrawl_render::{PixelRect, Raster};
use wasm_bindgen::{Clamped, JsValue};
use web_sys::{CanvasRenderingContext2d, ImageData};

/// Copy `rect` of `raster` to the same position on `ctx`.
pub fn blit(
    ctx: &CanvasRenderingContext2d,
    raster: &Raster,
    rect: PixelRect,
) -> Result<(), JsValue> {
    if rect.width == 0 || rect.height == 0 {
        return Ok(());
    }
    let data = raster.region_rgba(rect.x, rect.y, rect.width, rect.height);
    let image =
        ImageData::new_with_u8_clamped_array_and_sh(Clamped(&data), rect.width, rect.height)?;
    ctx.put_image_data(&image, rect.x as f64, rect.y as f64)
}

/// Copy the whole raster.
pub fn blit_all(ctx: &CanvasRenderingContext2d, raster: &Raster) -> Result<(), JsValue> {
    blit(ctx, raster, PixelRect::full(raster.width(), raster.height()))
}
