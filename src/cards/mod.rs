//! Leaf cards.
//!
//! A card is a target with no children. By default a card is inert; games
//! attach behaviour through [`Component`]. Two reusable behaviours are
//! provided here:
//!
//! - [`Draggable`]: the card offers itself when a drag starts on it
//! - [`Pinned`]: once placed, the card refuses to move or be removed

use std::rc::Rc;

use smallvec::smallvec;

use crate::components::{Component, ComponentId, ComponentKind, DragSet};
use crate::core::ElementId;
use crate::zones::Table;

impl Table {
    /// Create a card over `element`.
    pub fn create_card(
        &mut self,
        element: ElementId,
        behavior: impl Component + 'static,
    ) -> ComponentId {
        self.spawn(element, ComponentKind::Card, Rc::new(behavior))
    }
}

/// Card behaviour that drags itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct Draggable;

impl Component for Draggable {
    fn drag(&self, _table: &Table, me: ComponentId) -> DragSet {
        smallvec![me]
    }
}

/// Card behaviour that stays wherever it is first placed.
#[derive(Clone, Copy, Debug, Default)]
pub struct Pinned;

impl Component for Pinned {
    fn can_set_location(
        &self,
        table: &Table,
        me: ComponentId,
        _location: Option<ComponentId>,
    ) -> bool {
        table.location(me).is_none()
    }
}
