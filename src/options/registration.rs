use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::color::Palette;

/// How parts are tinted when registered.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Keep the asset's colours.
    None,
    /// Evenly spaced hues.
    #[default]
    Palette,
    /// Independent random colour per part.
    Random,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Parts", inline)]
#[serde(default)]
/// Part registration parameters.
pub struct RegistrationOptions {
    /// Tint applied to each registered mesh.
    #[schemars(title = "Part Colors")]
    pub color_mode: ColorMode,
    /// Number of palette hues before they repeat.
    #[schemars(skip)]
    pub palette_size: u32,
    /// Palette saturation.
    #[schemars(title = "Saturation", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub saturation: f32,
    /// Palette lightness.
    #[schemars(title = "Lightness", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub lightness: f32,
    /// Upper bound of the random per-part float phase.
    #[schemars(skip)]
    pub float_phase_range: f32,
}

impl RegistrationOptions {
    /// Palette described by these options.
    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette {
            size: self.palette_size,
            saturation: self.saturation,
            lightness: self.lightness,
        }
    }
}

impl Default for RegistrationOptions {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            color_mode: ColorMode::Palette,
            palette_size: palette.size,
            saturation: palette.saturation,
            lightness: palette.lightness,
            float_phase_range: 100.0,
        }
    }
}
