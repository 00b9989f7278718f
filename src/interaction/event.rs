//! Pointer events as delivered by the host.

use serde::{Deserialize, Serialize};

use crate::core::ElementId;

/// Absolute pointer coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pointer event kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Click,
    DoubleClick,
}

/// A pointer event.
///
/// `target` is the innermost element under the pointer, as chosen by the
/// host's hit-testing (which skips elements whose style disables pointer
/// events, such as the cards being dragged).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub target: ElementId,
    pub at: Point,
}

impl PointerEvent {
    #[must_use]
    pub fn new(kind: PointerKind, target: ElementId, x: f64, y: f64) -> Self {
        Self {
            kind,
            target,
            at: Point::new(x, y),
        }
    }

    #[must_use]
    pub fn down(target: ElementId, x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, target, x, y)
    }

    #[must_use]
    pub fn move_to(target: ElementId, x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, target, x, y)
    }

    #[must_use]
    pub fn up(target: ElementId, x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, target, x, y)
    }

    #[must_use]
    pub fn click(target: ElementId) -> Self {
        Self::new(PointerKind::Click, target, 0.0, 0.0)
    }

    #[must_use]
    pub fn double_click(target: ElementId) -> Self {
        Self::new(PointerKind::DoubleClick, target, 0.0, 0.0)
    }
}
