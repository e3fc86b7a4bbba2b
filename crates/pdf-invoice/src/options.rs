use crate::constants::{DEFAULT_PAGE_HEIGHT_MM, DEFAULT_PAGE_WIDTH_MM};
use crate::format::NumberFormat;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub number_format: NumberFormat,
    /// Document title written by the renderer
    pub title: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            page_width_mm: DEFAULT_PAGE_WIDTH_MM,
            page_height_mm: DEFAULT_PAGE_HEIGHT_MM,
            number_format: NumberFormat::default(),
            title: "Invoice".to_string(),
        }
    }
}
