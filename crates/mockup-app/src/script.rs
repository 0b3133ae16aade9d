//! Recorded editor sessions replayed by the host loop.
//!
//! A script stands in for a live event source: each step is either a UI
//! action (toolbar button, file pick, view tab) or a raw input event.

use kurbo::{Point, Size};
use mockup_core::catalog::{Product, View};
use mockup_core::input::InputEvent;
use mockup_core::mapper::SurfaceGeometry;
use serde::Deserialize;
use std::path::PathBuf;

/// Where the drawing surface sits on screen.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Display {
    /// Top-left corner in client coordinates.
    #[serde(default)]
    pub origin: Point,
    /// On-screen size.
    pub size: Size,
}

impl Display {
    pub fn geometry(&self, internal_size: Size) -> SurfaceGeometry {
        SurfaceGeometry::new(self.origin, self.size, internal_size)
    }
}

/// One replayed action.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    AddText { text: String },
    /// Pick a file for a new image layer. Relative paths resolve against the script.
    UploadImage {
        path: PathBuf,
        #[serde(default)]
        media_type: Option<String>,
    },
    SelectProduct { product: Product },
    SelectView { view: View },
    /// Change where the surface is displayed; applies to later input.
    Resize { display: Display },
    Input { event: InputEvent },
    DoubleClick { position: Point },
    ClearView,
    /// Edit the selected text layer.
    SetText {
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        color: Option<String>,
    },
    ExportAll,
    Summary,
}

/// A replayable session.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Script {
    /// Initial display placement; identity when absent.
    #[serde(default)]
    pub display: Option<Display>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_script() {
        let script = Script::from_json(
            r##"{
                "display": { "origin": { "x": 10.0, "y": 20.0 }, "size": { "width": 300.0, "height": 300.0 } },
                "steps": [
                    { "step": "add_text", "text": "HELLO" },
                    { "step": "select_product", "product": "cap" },
                    { "step": "select_view", "view": "left" },
                    { "step": "input", "event": { "type": "pointer_down", "position": { "x": 1.0, "y": 2.0 } } },
                    { "step": "set_text", "color": "#ff0000" },
                    { "step": "clear_view" },
                    { "step": "export_all" }
                ]
            }"##,
        )
        .unwrap();

        assert_eq!(script.steps.len(), 7);
        assert_eq!(script.steps[1], Step::SelectProduct { product: Product::Cap });
        assert_eq!(
            script.steps[4],
            Step::SetText {
                text: None,
                color: Some("#ff0000".to_string())
            }
        );
        let geometry = script.display.unwrap().geometry(Size::new(600.0, 600.0));
        assert_eq!(geometry.to_surface(Point::new(10.0, 20.0)), Point::ZERO);
    }

    #[test]
    fn test_unknown_step_rejected() {
        assert!(Script::from_json(r#"{ "steps": [{ "step": "rotate" }] }"#).is_err());
    }
}
