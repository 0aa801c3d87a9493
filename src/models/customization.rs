// src/models/customization.rs

use serde::{Deserialize, Serialize};

/// Visual styling for a rendered collage
/// DOCUMENTATION: Value object owned by its project, never addressed on its own.
/// Every field is optional on input and falls back to the values below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customization {
    pub border_color: String,
    pub background_color: String,
    pub spacing: i32,
    pub text: String,
    pub text_color: String,
    pub text_size: i32,
    /// Free text, the client understands "top" and "bottom"
    pub text_position: String,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            border_color: "#ffffff".to_string(),
            background_color: "#ffffff".to_string(),
            spacing: 10,
            text: String::new(),
            text_color: "#000000".to_string(),
            text_size: 16,
            text_position: "bottom".to_string(),
        }
    }
}
