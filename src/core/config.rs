//! Editor configuration: tunable settings and the per-event edit context.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::voxel::block::{BlockKind, DrillAxis, Rotation};

/// Default block color (the palette's blue).
pub const DEFAULT_COLOR: &str = "#3b82f6";

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Tunable editor settings. Every field has a default, so a settings file
/// only needs to name what it overrides.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Max pointer travel (pixels) between down and up for a click.
    pub click_threshold_px: f32,
    /// Crossing selection picks blocks projected within this many pixels
    /// of the drag rectangle.
    pub touch_threshold_px: f32,
    /// Max number of undo steps kept. `None` = unlimited.
    pub history_limit: Option<usize>,
    /// Half-size of the pickable ground square centered at the origin.
    pub ground_half_extent: f32,
    /// Radius of a drilled opening, in block units.
    pub hole_radius: f32,
    /// Color used when an imported block carries none.
    pub default_color: String,
    /// Polygon brush: lower bound on |normal.y| for a ramp (prism) block.
    pub ramp_min: f32,
    /// Polygon brush: upper bound on |normal.y| for a ramp (prism) block.
    pub ramp_max: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            click_threshold_px: 5.0,
            touch_threshold_px: 40.0,
            history_limit: None,
            ground_half_extent: 1000.0,
            hole_radius: 0.35,
            default_color: DEFAULT_COLOR.to_string(),
            ramp_min: 0.3,
            ramp_max: 0.9,
        }
    }
}

impl EditorSettings {
    /// Load settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings as pretty JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Reject settings the editor cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(self.click_threshold_px >= 0.0) {
            return Err(Error::Config(format!(
                "click_threshold_px must be >= 0, got {}", self.click_threshold_px
            )));
        }
        if !(self.touch_threshold_px >= 0.0) {
            return Err(Error::Config(format!(
                "touch_threshold_px must be >= 0, got {}", self.touch_threshold_px
            )));
        }
        if self.history_limit == Some(0) {
            return Err(Error::Config("history_limit must be at least 1".into()));
        }
        if !(self.hole_radius > 0.0 && self.hole_radius < 0.5) {
            return Err(Error::Config(format!(
                "hole_radius must be in (0, 0.5), got {}", self.hole_radius
            )));
        }
        if !(self.ramp_min < self.ramp_max) {
            return Err(Error::Config(format!(
                "ramp_min ({}) must be below ramp_max ({})", self.ramp_min, self.ramp_max
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Edit context
// ---------------------------------------------------------------------------

/// Solid or hollow generation for the box and disc brushes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Fill {
    #[default]
    Solid,
    Hollow,
}

/// The user's current choices, passed by value into every editor event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditContext {
    pub color: String,
    pub kind: BlockKind,
    pub rotation: Rotation,
    pub fill: Fill,
    pub drill_axis: DrillAxis,
}

impl Default for EditContext {
    fn default() -> Self {
        Self {
            color: DEFAULT_COLOR.to_string(),
            kind: BlockKind::Cube,
            rotation: Rotation::R0,
            fill: Fill::Solid,
            drill_axis: DrillAxis::X,
        }
    }
}

impl EditContext {
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: BlockKind) -> Self {
        self.kind = kind;
        self
    }

    #[must_use]
    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Fill) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn with_drill_axis(mut self, axis: DrillAxis) -> Self {
        self.drill_axis = axis;
        self
    }

    /// The same context with the rotation advanced a quarter turn.
    #[must_use]
    pub fn rotated(self) -> Self {
        let next = self.rotation.next();
        self.with_rotation(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_validate() {
        assert!(EditorSettings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_settings_file() {
        let settings: EditorSettings =
            serde_json::from_str(r#"{ "touch_threshold_px": 12.5 }"#).unwrap();
        assert_eq!(settings.touch_threshold_px, 12.5);
        assert_eq!(settings.click_threshold_px, 5.0);
        assert_eq!(settings.default_color, DEFAULT_COLOR);
    }

    #[test]
    fn test_settings_roundtrip_file() {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("nested").join("settings.json");

        let settings = EditorSettings {
            history_limit: Some(20),
            ..EditorSettings::default()
        };
        settings.save(&path).expect("save failed");

        let loaded = EditorSettings::load(&path).expect("load failed");
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let settings = EditorSettings {
            ramp_min: 0.9,
            ramp_max: 0.3,
            ..EditorSettings::default()
        };
        assert!(matches!(settings.validate(), Err(Error::Config(_))));

        let settings = EditorSettings {
            history_limit: Some(0),
            ..EditorSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_context_rotated_wraps() {
        let ctx = EditContext::default().with_rotation(Rotation::R3);
        assert_eq!(ctx.rotated().rotation, Rotation::R0);
        assert_eq!(EditContext::default().rotated().rotation, Rotation::R1);
    }
}
