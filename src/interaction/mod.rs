//! Pointer-driven interaction.
//!
//! The host delivers [`PointerEvent`]s; a [`DragEngine`] resolves them
//! against a [`Table`](crate::zones::Table) by walking from the event
//! target up through the components that own its ancestors.

mod engine;
mod event;

pub use engine::{ActiveDrag, DragEngine, DragState, DRAGGING, DROP_OK, DROP_TARGET};
pub use event::{Point, PointerEvent, PointerKind};
