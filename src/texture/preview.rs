use image::RgbaImage;

use crate::layout::side::Side;

/// Texels of `texture` covered by `side`'s placement, as a standalone image.
///
/// UV space grows upwards while image rows grow downwards, so the block's top row is taken
/// from the top of the side's UV rectangle. The block is clipped to the texture; a degenerate
/// block yields an empty image.
pub fn side_preview(texture: &RgbaImage, side: &Side) -> RgbaImage {
    let (tw, th) = texture.dimensions();
    let uv = side.uv_rect();

    let to_texels = |v: f64, n: u32| -> u32 {
        (v * f64::from(n) + 1e-6).floor().clamp(0.0, f64::from(n)) as u32
    };
    let x0 = to_texels(uv.origin.x, tw);
    let y0 = to_texels(1.0 - uv.origin.y - uv.size.height, th);
    let w = to_texels(uv.size.width, tw).min(tw - x0);
    let h = to_texels(uv.size.height, th).min(th - y0);

    if w == 0 || h == 0 {
        return RgbaImage::new(0, 0);
    }
    image::imageops::crop_imm(texture, x0, y0, w, h).to_image()
}

#[cfg(test)]
#[path = "../../tests/unit/texture/preview.rs"]
mod tests;
