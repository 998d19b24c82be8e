use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::{Rgba8, Vec3},
    foundation::error::{UnwrapError, UnwrapResult},
    layout::side::{SideId, UvRect},
    texture::fill::FillKind,
};

/// Largest accepted pixel scale.
pub const MAX_PIXEL_SCALE: f64 = 0.1;

/// Which UV set of the target mesh receives generated coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum UvChannel {
    /// First UV set.
    #[default]
    Primary,
    /// Second UV set.
    Secondary,
}

/// Dimensions of a texture bound as the layout target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TextureInfo {
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
}

impl TextureInfo {
    /// Validate and build texture dimensions.
    pub fn new(width: u32, height: u32) -> UnwrapResult<Self> {
        if width == 0 || height == 0 {
            return Err(UnwrapError::invalid_argument(
                "texture width/height must be > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// User-facing settings of a layout session.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Draw grid lines over the canvas.
    pub show_grid: bool,
    /// Snap dragged sides to grid lines.
    pub snap_to_grid: bool,
    /// Regenerate target UVs after every edit.
    pub auto_update_target_uv: bool,
    /// Destination UV set.
    pub uv_channel: UvChannel,
    /// Texture width in texels, used for canvas aspect and texel alignment.
    pub texture_width: u32,
    /// Texture height in texels.
    pub texture_height: u32,
    /// Texels per mesh unit, in `(0, 0.1]`.
    pub pixel_scale: f64,
    /// Fill used by texture generation.
    pub generate_texture_type: FillKind,
    /// Fill colors `[a, b]`.
    pub fill_colors: [Rgba8; 2],
    /// Canvas zoom factor.
    pub zoom: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            show_grid: true,
            snap_to_grid: true,
            auto_update_target_uv: true,
            uv_channel: UvChannel::Primary,
            texture_width: 64,
            texture_height: 64,
            pixel_scale: 0.01,
            generate_texture_type: FillKind::Checker,
            fill_colors: [Rgba8::new(200, 200, 200, 255), Rgba8::new(90, 90, 90, 255)],
            zoom: 1.0,
        }
    }
}

impl LayoutConfig {
    /// Reject non-positive texture dimensions, pixel scale outside `(0, 0.1]`, and bad zoom.
    pub fn validate(&self) -> UnwrapResult<()> {
        TextureInfo::new(self.texture_width, self.texture_height)?;
        validate_pixel_scale(self.pixel_scale)?;
        if !(self.zoom.is_finite() && self.zoom > 0.0) {
            return Err(UnwrapError::invalid_argument("zoom must be > 0"));
        }
        Ok(())
    }
}

pub(crate) fn validate_pixel_scale(pixel_scale: f64) -> UnwrapResult<()> {
    if !(pixel_scale > 0.0 && pixel_scale <= MAX_PIXEL_SCALE) {
        return Err(UnwrapError::invalid_argument(format!(
            "pixel_scale must be in (0, {MAX_PIXEL_SCALE}], got {pixel_scale}"
        )));
    }
    Ok(())
}

/// Persisted placement and orientation of one side.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SideState {
    /// Face this record belongs to.
    pub side: SideId,
    /// Placement as fractions of the canvas.
    pub uv: UvRect,
    /// Quarter turns, `0..4`.
    #[serde(default)]
    pub rotation: u8,
    /// U reflection.
    #[serde(default)]
    pub mirrored: bool,
    /// Drag lock.
    #[serde(default)]
    pub locked: bool,
}

/// Snapshot of a whole session, sufficient to rebuild the layout for any canvas size.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutState {
    /// Session settings.
    #[serde(default)]
    pub config: LayoutConfig,
    /// Per-side records; sides missing here keep their current placement on restore.
    pub sides: Vec<SideState>,
    /// Scale vector applied to the target.
    #[serde(default)]
    pub scale: Vec3,
}

impl LayoutState {
    /// Check config ranges, rotation steps, and side uniqueness.
    pub fn validate(&self) -> UnwrapResult<()> {
        self.config.validate()?;

        let mut seen = [false; 6];
        for s in &self.sides {
            if std::mem::replace(&mut seen[s.side.index()], true) {
                return Err(UnwrapError::invalid_argument(format!(
                    "side '{}' appears more than once",
                    s.side
                )));
            }
            if s.rotation > 3 {
                return Err(UnwrapError::invalid_argument(format!(
                    "side '{}' has rotation {} (expected 0..=3)",
                    s.side, s.rotation
                )));
            }
        }

        let finite = [self.scale.x, self.scale.y, self.scale.z]
            .iter()
            .all(|v| v.is_finite());
        if !finite {
            return Err(UnwrapError::invalid_argument("scale must be finite"));
        }
        Ok(())
    }

    /// Parse and validate JSON state.
    pub fn from_json_str(s: &str) -> UnwrapResult<Self> {
        let state: LayoutState =
            serde_json::from_str(s).map_err(|e| UnwrapError::serde(e.to_string()))?;
        state.validate()?;
        Ok(state)
    }

    /// Serialize as pretty JSON.
    pub fn to_json_string(&self) -> UnwrapResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| UnwrapError::serde(e.to_string()))
    }

    /// Read and validate a JSON state file.
    pub fn from_path(path: &Path) -> UnwrapResult<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read layout state '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Write the state as pretty JSON, creating parent directories.
    pub fn write_to_path(&self, path: &Path) -> UnwrapResult<()> {
        let json = self.to_json_string()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create state dir '{}'", parent.display()))?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("write layout state '{}'", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/state.rs"]
mod tests;
