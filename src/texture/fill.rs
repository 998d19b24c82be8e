use std::io::Cursor;

use anyhow::Context as _;
use image::RgbaImage;

use crate::{
    foundation::core::Rgba8,
    foundation::error::{UnwrapError, UnwrapResult},
};

/// Procedural fill used for freshly generated target textures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FillKind {
    /// Uniform `a`.
    Solid,
    /// `a` on the left to `b` on the right.
    GradientH,
    /// `a` on the top row to `b` on the bottom row.
    GradientV,
    /// Alternating texels, `a` where `x + y` is even.
    #[default]
    Checker,
}

/// Generate a `width` x `height` texture filled according to `kind`.
pub fn generate_fill_texture(
    width: u32,
    height: u32,
    kind: FillKind,
    a: Rgba8,
    b: Rgba8,
) -> UnwrapResult<RgbaImage> {
    if width == 0 || height == 0 {
        return Err(UnwrapError::invalid_argument(format!(
            "texture dimensions must be > 0, got {width}x{height}"
        )));
    }

    let ramp = |i: u32, n: u32| -> f64 {
        if n <= 1 {
            0.0
        } else {
            f64::from(i) / f64::from(n - 1)
        }
    };

    let img = RgbaImage::from_fn(width, height, |x, y| {
        let c = match kind {
            FillKind::Solid => a,
            FillKind::GradientH => a.lerp(b, ramp(x, width)),
            FillKind::GradientV => a.lerp(b, ramp(y, height)),
            FillKind::Checker => {
                if (x + y) % 2 == 0 {
                    a
                } else {
                    b
                }
            }
        };
        image::Rgba(c.to_array())
    });
    Ok(img)
}

/// Encode a texture as PNG bytes for the host to persist.
pub fn encode_png(img: &RgbaImage) -> UnwrapResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode texture as png")?;
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/texture/fill.rs"]
mod tests;
