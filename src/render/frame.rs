use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{GridStyle, LinePrimitive, TextPrimitive};
use crate::scene::{NodeShape, Scene};

/// Backend-agnostic snapshot of the separator scene for one draw pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    /// Materializes every attached, visible primitive of `scene`.
    ///
    /// Opacity is folded into the paint alpha; fully transparent primitives
    /// are skipped.
    #[must_use]
    pub fn from_scene(viewport: Viewport, scene: &Scene, style: &GridStyle) -> Self {
        let mut frame = Self::new(viewport);
        for (_, node) in scene.nodes() {
            if !node.attached || node.opacity <= 0.0 {
                continue;
            }
            match &node.shape {
                NodeShape::Line(geometry) => frame.lines.push(LinePrimitive::new(
                    *geometry,
                    style.line_width_px,
                    style.line_color.faded(node.opacity),
                )),
                NodeShape::Label(label) => frame.texts.push(TextPrimitive::new(
                    label.text.clone(),
                    label.left,
                    label.top,
                    style.label_font_size_px,
                    style.label_color.faded(node.opacity),
                )),
            }
        }
        frame
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidData(format!(
                "invalid viewport: width={}, height={}",
                self.viewport.width, self.viewport.height
            )));
        }

        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.texts.is_empty()
    }
}
