use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::scene::MarkerStyle;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Highlight", inline)]
#[serde(default)]
/// Appearance of the selection marker.
pub struct HighlightOptions {
    /// Marker sphere radius in model units.
    #[schemars(title = "Marker Size", range(min = 0.005, max = 0.5), extend("step" = 0.005))]
    pub marker_radius: f32,
    /// Sphere tessellation.
    #[schemars(skip)]
    pub marker_segments: u32,
    /// Marker RGB colour.
    #[schemars(skip)]
    pub marker_color: [f32; 3],
}

impl HighlightOptions {
    /// Marker style handed to the scene graph.
    #[must_use]
    pub fn marker_style(&self) -> MarkerStyle {
        MarkerStyle {
            radius: self.marker_radius,
            segments: self.marker_segments,
            color: self.marker_color,
        }
    }
}

impl Default for HighlightOptions {
    fn default() -> Self {
        let style = MarkerStyle::default();
        Self {
            marker_radius: style.radius,
            marker_segments: style.segments,
            marker_color: style.color,
        }
    }
}
