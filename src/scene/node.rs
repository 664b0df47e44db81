use serde::{Deserialize, Serialize};

use crate::core::{AxisDirection, LabelSize};

/// Opaque handle to one visual primitive owned by a [`super::Scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrimitiveId(u64);

impl PrimitiveId {
    #[must_use]
    pub(super) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Endpoints of a grid line in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LineGeometry {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl LineGeometry {
    #[must_use]
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Line perpendicular to `direction`, located at `along_px` and spanning
    /// `cross_span`.
    #[must_use]
    pub fn across(direction: AxisDirection, along_px: f64, cross_span: (f64, f64)) -> Self {
        let (start, end) = cross_span;
        match direction {
            AxisDirection::Y => Self::new(start, along_px, end, along_px),
            AxisDirection::X => Self::new(along_px, start, along_px, end),
        }
    }

    #[must_use]
    pub fn get(&self, property: AnimatedProperty) -> Option<f64> {
        match property {
            AnimatedProperty::LineX1 => Some(self.x1),
            AnimatedProperty::LineY1 => Some(self.y1),
            AnimatedProperty::LineX2 => Some(self.x2),
            AnimatedProperty::LineY2 => Some(self.y2),
            _ => None,
        }
    }

    fn slot_mut(&mut self, property: AnimatedProperty) -> Option<&mut f64> {
        match property {
            AnimatedProperty::LineX1 => Some(&mut self.x1),
            AnimatedProperty::LineY1 => Some(&mut self.y1),
            AnimatedProperty::LineX2 => Some(&mut self.x2),
            AnimatedProperty::LineY2 => Some(&mut self.y2),
            _ => None,
        }
    }
}

/// Text label with its canvas position and measured size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelNode {
    pub text: String,
    pub left: f64,
    pub top: f64,
    pub size: LabelSize,
}

/// Scalar properties that can be set directly or animated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimatedProperty {
    LineX1,
    LineY1,
    LineX2,
    LineY2,
    LabelLeft,
    LabelTop,
    Opacity,
}

impl AnimatedProperty {
    /// Line endpoints that move when a separator slides along `direction`.
    #[must_use]
    pub const fn line_along(direction: AxisDirection) -> [Self; 2] {
        match direction {
            AxisDirection::Y => [Self::LineY1, Self::LineY2],
            AxisDirection::X => [Self::LineX1, Self::LineX2],
        }
    }

    /// Line endpoints pinned to the plot-area edges for `direction`.
    #[must_use]
    pub const fn line_cross(direction: AxisDirection) -> [Self; 2] {
        Self::line_along(direction.other())
    }

    /// Label coordinate centered on the separator pixel.
    #[must_use]
    pub const fn label_along(direction: AxisDirection) -> Self {
        match direction {
            AxisDirection::Y => Self::LabelTop,
            AxisDirection::X => Self::LabelLeft,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeShape {
    Line(LineGeometry),
    Label(LabelNode),
}

/// One primitive as stored by the scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    pub shape: NodeShape,
    pub opacity: f64,
    /// Whether the primitive is part of the render tree.
    pub attached: bool,
    /// Bumped whenever an owner reclaims the primitive; pending render tasks
    /// captured against an older revision are discarded.
    pub revision: u64,
}

impl SceneNode {
    pub(super) fn new(shape: NodeShape) -> Self {
        Self {
            shape,
            opacity: 1.0,
            attached: true,
            revision: 0,
        }
    }

    #[must_use]
    pub fn property(&self, property: AnimatedProperty) -> Option<f64> {
        match (&self.shape, property) {
            (_, AnimatedProperty::Opacity) => Some(self.opacity),
            (NodeShape::Line(line), _) => line.get(property),
            (NodeShape::Label(label), AnimatedProperty::LabelLeft) => Some(label.left),
            (NodeShape::Label(label), AnimatedProperty::LabelTop) => Some(label.top),
            (NodeShape::Label(_), _) => None,
        }
    }

    /// Writes `value` when `property` applies to this node's shape.
    pub(super) fn set_property(&mut self, property: AnimatedProperty, value: f64) -> bool {
        let slot = match (&mut self.shape, property) {
            (_, AnimatedProperty::Opacity) => &mut self.opacity,
            (NodeShape::Line(line), _) => match line.slot_mut(property) {
                Some(slot) => slot,
                None => return false,
            },
            (NodeShape::Label(label), AnimatedProperty::LabelLeft) => &mut label.left,
            (NodeShape::Label(label), AnimatedProperty::LabelTop) => &mut label.top,
            (NodeShape::Label(_), _) => return false,
        };
        *slot = value;
        true
    }
}
