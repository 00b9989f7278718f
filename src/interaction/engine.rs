//! Drag-and-drop state machine.
//!
//! ```text
//!            down on draggable                move (re-query drop)
//!   Idle ───────────────────────────▶ Dragging ◀───────┐
//!    ▲                                   │  └───────────┘
//!    └────── up (commit or abandon) ─────┘
//! ```
//!
//! A new pointer-down on something draggable always resets a drag still in
//! flight before starting over, so there is never more than one drag.
//! Drop queries are read-only; the commit they return runs on pointer-up,
//! after every drag marker has been cleared.

use crate::components::{Commit, ComponentId, DragSet};
use crate::core::ElementId;
use crate::zones::Table;

use super::event::{Point, PointerEvent, PointerKind};

/// Class on dragged elements (and the body) while a drag is active.
pub const DRAGGING: &str = "dragging";
/// Class on dragged elements (and the body) while over a valid drop.
pub const DROP_OK: &str = "drop-ok";
/// Class on the element that would receive the current drop.
pub const DROP_TARGET: &str = "drop-target";

/// z-index applied to dragged elements.
const LIFTED: i32 = 1;

/// An active drag.
pub struct ActiveDrag {
    items: DragSet,
    origin: Point,
    candidate: Option<ElementId>,
    commit: Option<Commit>,
}

impl std::fmt::Debug for ActiveDrag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveDrag")
            .field("items", &self.items)
            .field("origin", &self.origin)
            .field("candidate", &self.candidate)
            .field("commit", &self.commit.is_some())
            .finish()
    }
}

/// Engine state.
#[derive(Debug, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(ActiveDrag),
}

/// Turns pointer events into drags, drops and clicks on a [`Table`].
///
/// ## Usage
///
/// ```
/// use card_table::cards::Draggable;
/// use card_table::components::Inert;
/// use card_table::interaction::{DragEngine, PointerEvent};
/// use card_table::zones::{Position, Table};
///
/// let mut table = Table::new();
/// let area_el = table.document_mut().create("area");
/// let area = table.create_area(area_el, Inert);
/// let card_el = table.document_mut().create("card");
/// let card = table.create_card(card_el, Draggable);
/// table.add(area, card, Position::End);
///
/// let mut engine = DragEngine::new();
/// engine.handle(&mut table, &PointerEvent::down(card_el, 10.0, 10.0));
/// assert_eq!(engine.dragging(), &[card]);
///
/// // Nothing accepts the drop, so releasing abandons the drag.
/// assert!(!engine.handle(&mut table, &PointerEvent::up(area_el, 40.0, 10.0)));
/// assert!(!engine.is_dragging());
/// ```
#[derive(Debug, Default)]
pub struct DragEngine {
    state: DragState,
}

impl DragEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Components being dragged. Empty when idle.
    #[must_use]
    pub fn dragging(&self) -> &[ComponentId] {
        match &self.state {
            DragState::Dragging(drag) => drag.items.as_slice(),
            DragState::Idle => &[],
        }
    }

    /// Element of the component currently accepting the drop.
    #[must_use]
    pub fn drop_target(&self) -> Option<ElementId> {
        match &self.state {
            DragState::Dragging(drag) => drag.candidate,
            DragState::Idle => None,
        }
    }

    /// Whether releasing now would run a commit.
    #[must_use]
    pub fn has_commit(&self) -> bool {
        matches!(&self.state, DragState::Dragging(drag) if drag.commit.is_some())
    }

    /// Dispatch any pointer event. Returns whether it did anything.
    pub fn handle(&mut self, table: &mut Table, event: &PointerEvent) -> bool {
        match event.kind {
            PointerKind::Down => self.pointer_down(table, event.target, event.at),
            PointerKind::Move => self.pointer_move(table, event.target, event.at),
            PointerKind::Up => self.pointer_up(table),
            PointerKind::Click => self.click(table, event.target),
            PointerKind::DoubleClick => self.double_click(table, event.target),
        }
    }

    /// Start a drag on the innermost component under `target` that offers
    /// something to drag. Returns `false`, changing nothing, if none does.
    pub fn pointer_down(&mut self, table: &mut Table, target: ElementId, at: Point) -> bool {
        let mut items = DragSet::new();
        for id in table.components_from(target) {
            if let Some(behavior) = table.behavior(id) {
                items = behavior.drag(table, id);
                if !items.is_empty() {
                    break;
                }
            }
        }
        if items.is_empty() {
            return false;
        }

        self.reset(table);
        for &item in &items {
            let Some(element) = table.element(item) else {
                continue;
            };
            let doc = table.document_mut();
            if let Some(style) = doc.style_mut(element) {
                style.pointer_events = false;
                style.z_index = LIFTED;
            }
            doc.add_class(element, DRAGGING);
        }
        let body = table.document().body();
        table.document_mut().add_class(body, DRAGGING);
        tracing::debug!(items = ?items, x = at.x, y = at.y, "drag started");
        self.state = DragState::Dragging(ActiveDrag {
            items,
            origin: at,
            candidate: None,
            commit: None,
        });
        true
    }

    /// Follow the pointer: re-query the drop target if the pointer is over a
    /// different element, move the dragged elements, update markers.
    pub fn pointer_move(&mut self, table: &mut Table, target: ElementId, at: Point) -> bool {
        let DragState::Dragging(drag) = &mut self.state else {
            return false;
        };
        if let Some(previous) = drag.candidate {
            table.document_mut().remove_class(previous, DROP_TARGET);
        }
        if drag.candidate != Some(target) {
            drag.candidate = None;
            drag.commit = None;
            for id in table.components_from(target) {
                let Some(behavior) = table.behavior(id) else {
                    continue;
                };
                if let Some(commit) = behavior.drop_action(table, id, &drag.items) {
                    drag.candidate = table.element(id);
                    drag.commit = Some(commit);
                    break;
                }
            }
        }

        let ok = drag.commit.is_some();
        let (dx, dy) = (at.x - drag.origin.x, at.y - drag.origin.y);
        for &item in &drag.items {
            let Some(element) = table.element(item) else {
                continue;
            };
            let doc = table.document_mut();
            if let Some(style) = doc.style_mut(element) {
                style.left = dx;
                style.top = dy;
            }
            doc.toggle_class(element, DROP_OK, ok);
        }
        let body = table.document().body();
        table.document_mut().toggle_class(body, DROP_OK, ok);
        if let Some(candidate) = drag.candidate.filter(|_| ok) {
            table.document_mut().add_class(candidate, DROP_TARGET);
        }
        true
    }

    /// Finish the drag. Markers are cleared first, then the pending commit
    /// (if any) runs. Returns whether a commit ran.
    pub fn pointer_up(&mut self, table: &mut Table) -> bool {
        let DragState::Dragging(drag) = &mut self.state else {
            return false;
        };
        let commit = drag.commit.take();
        self.reset(table);
        match commit {
            Some(commit) => {
                commit(table);
                tracing::debug!("drop committed");
                true
            }
            None => {
                tracing::debug!("drag abandoned");
                false
            }
        }
    }

    /// Offer a click to each component from `target` upwards until one
    /// handles it.
    pub fn click(&mut self, table: &mut Table, target: ElementId) -> bool {
        for id in table.components_from(target) {
            if let Some(behavior) = table.behavior(id) {
                if behavior.click(table, id) {
                    return true;
                }
            }
        }
        false
    }

    /// Offer a double click to each component from `target` upwards until
    /// one handles it. Independent of any drag in progress.
    pub fn double_click(&mut self, table: &mut Table, target: ElementId) -> bool {
        for id in table.components_from(target) {
            if let Some(behavior) = table.behavior(id) {
                if behavior.dbl_click(table, id) {
                    return true;
                }
            }
        }
        false
    }

    /// Drop any drag in progress and clear every marker it set.
    pub fn reset(&mut self, table: &mut Table) {
        let DragState::Dragging(drag) = std::mem::take(&mut self.state) else {
            return;
        };
        for &item in &drag.items {
            let Some(element) = table.element(item) else {
                continue;
            };
            let doc = table.document_mut();
            if let Some(style) = doc.style_mut(element) {
                style.left = 0.0;
                style.top = 0.0;
                style.z_index = 0;
                style.pointer_events = true;
            }
            doc.remove_class(element, DRAGGING);
            doc.remove_class(element, DROP_OK);
        }
        let doc = table.document_mut();
        let body = doc.body();
        doc.remove_class(body, DRAGGING);
        doc.remove_class(body, DROP_OK);
        if let Some(candidate) = drag.candidate {
            doc.remove_class(candidate, DROP_TARGET);
        }
    }
}
