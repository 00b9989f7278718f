//! Ordered-container transfer protocol.
//!
//! A target is either unplaced or owned by exactly one location, and its
//! element sits in that location's visual container at the same index as in
//! the logical children list. `add` and `remove` are the only operations that
//! change ownership, and both are atomic: every check runs, and the visual
//! move is attempted, before any logical state changes.
//!
//! Re-parenting is a single `add`: the target is detached from its previous
//! location as part of the same call, and that location's `post_remove` hook
//! runs last so cascading clean-up (a group collapsing) sees a consistent
//! tree.

use serde::{Deserialize, Serialize};

use crate::components::ComponentId;
use crate::core::TableRng;

use super::{LocationHooks, Table};

/// Where to insert a target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    /// After the last child.
    #[default]
    End,
    /// Immediately before this child, which must belong to the location.
    Before(ComponentId),
    /// At this index; must be at most the child count.
    Index(usize),
}

impl From<ComponentId> for Position {
    fn from(child: ComponentId) -> Self {
        Self::Before(child)
    }
}

impl From<usize> for Position {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<Option<ComponentId>> for Position {
    fn from(child: Option<ComponentId>) -> Self {
        child.map_or(Self::End, Self::Before)
    }
}

impl Table {
    fn hooks(&self, location: ComponentId) -> Option<&'static LocationHooks> {
        self.kind(location).and_then(LocationHooks::for_kind)
    }

    /// Resolve a position against the current children of `location`.
    #[must_use]
    pub fn resolve_position(&self, location: ComponentId, position: Position) -> Option<usize> {
        let children = self.children(location);
        match position {
            Position::End => Some(children.len()),
            Position::Before(child) => children.iter().position(|&c| c == child),
            Position::Index(i) => (i <= children.len()).then_some(i),
        }
    }

    /// Would `location` admit `target` at `index`? Variant policy first, then
    /// the location's behaviour.
    #[must_use]
    pub fn can_add(&self, location: ComponentId, target: ComponentId, index: usize) -> bool {
        let Some(hooks) = self.hooks(location) else {
            return false;
        };
        (hooks.can_add)(self, location, target, index)
            && self
                .behavior(location)
                .is_some_and(|b| b.can_add(self, location, target, index))
    }

    /// Would `location` release `target`?
    #[must_use]
    pub fn can_remove(&self, location: ComponentId, target: ComponentId) -> bool {
        let Some(hooks) = self.hooks(location) else {
            return false;
        };
        (hooks.can_remove)(self, location, target)
            && self
                .behavior(location)
                .is_some_and(|b| b.can_remove(self, location, target))
    }

    /// Does `target` accept being moved to `location` (`None` = removal)?
    fn accepts_location(&self, target: ComponentId, location: Option<ComponentId>) -> bool {
        self.behavior(target)
            .is_some_and(|b| b.can_set_location(self, target, location))
    }

    /// Place `target` in `location` at `position`, detaching it from any
    /// previous location.
    ///
    /// Returns `false`, with nothing changed, when the position does not
    /// resolve, the location refuses the target, or the target refuses the
    /// location. Adding to the location that already owns the target moves
    /// it within the list; the index is resolved before the move.
    pub fn add(
        &mut self,
        location: ComponentId,
        target: ComponentId,
        position: impl Into<Position>,
    ) -> bool {
        let position = position.into();
        let Some(hooks) = self.hooks(location) else {
            return false;
        };
        if target == location || !self.is_target(target) {
            return false;
        }
        let Some(index) = self.resolve_position(location, position) else {
            tracing::trace!(%location, %target, ?position, "position does not resolve");
            return false;
        };
        let previous = self.location(target);
        if !self.can_add(location, target, index)
            || !self.accepts_location(target, Some(location))
        {
            tracing::trace!(%location, %target, index, "add vetoed");
            return false;
        }

        let mut siblings = self.children(location).to_vec();
        let mut at = index;
        if previous == Some(location) {
            if let Some(old) = siblings.iter().position(|&c| c == target) {
                siblings.remove(old);
                if old < at {
                    at -= 1;
                }
            }
        }

        let Some(element) = self.element(target) else {
            return false;
        };
        let before = siblings.get(at).and_then(|&next| self.element(next));
        let moved = match before {
            Some(before) => (hooks.insert_before_element)(self, location, element, before),
            None => (hooks.append_child_element)(self, location, element),
        };
        if let Err(err) = moved {
            tracing::warn!(%location, %target, %err, "visual insert failed");
            return false;
        }

        if let Some(prev) = previous {
            if let Some(node) = self.node_mut(prev) {
                node.children.retain(|&c| c != target);
            }
        }
        siblings.insert(at, target);
        if let Some(node) = self.node_mut(location) {
            node.children = siblings;
        }
        if let Some(node) = self.node_mut(target) {
            node.location = Some(location);
        }
        if let Some(prev) = previous.filter(|&p| p != location) {
            self.post_remove(prev, target);
        }
        true
    }

    /// Take `target` out of `location`, leaving it unplaced.
    ///
    /// Returns `false`, with nothing changed, if `location` does not own the
    /// target or either side vetoes.
    pub fn remove(&mut self, location: ComponentId, target: ComponentId) -> bool {
        let Some(hooks) = self.hooks(location) else {
            return false;
        };
        if self.location(target) != Some(location)
            || !self.can_remove(location, target)
            || !self.accepts_location(target, None)
        {
            tracing::trace!(%location, %target, "remove vetoed");
            return false;
        }
        let Some(index) = self.children(location).iter().position(|&c| c == target) else {
            return false;
        };
        let Some(element) = self.element(target) else {
            return false;
        };
        if let Err(err) = (hooks.remove_child_element)(self, location, element) {
            tracing::warn!(%location, %target, %err, "visual remove failed");
            return false;
        }
        if let Some(node) = self.node_mut(location) {
            node.children.remove(index);
        }
        if let Some(node) = self.node_mut(target) {
            node.location = None;
        }
        self.post_remove(location, target);
        true
    }

    /// Clean-up run after `target` has left `location`, either through
    /// `remove` or as the detach half of an `add` elsewhere. The location's
    /// behaviour goes first; the variant's clean-up may discard the location.
    pub fn post_remove(&mut self, location: ComponentId, target: ComponentId) {
        if let Some(behavior) = self.behavior(location) {
            behavior.post_remove(self, location, target);
        }
        if let Some(hooks) = self.hooks(location) {
            (hooks.post_remove)(self, location, target);
        }
    }

    /// Shuffle the children of `location`, moving elements to match.
    pub fn shuffle(&mut self, location: ComponentId, rng: &mut TableRng) -> bool {
        let Some(hooks) = self.hooks(location) else {
            return false;
        };
        let original = self.children(location).to_vec();
        let mut order = original.clone();
        rng.shuffle(&mut order);
        if order == original {
            return true;
        }
        if !self.reorder_elements(hooks, location, &order) {
            // Put the elements back the way the list still says.
            self.reorder_elements(hooks, location, &original);
            return false;
        }
        if let Some(node) = self.node_mut(location) {
            node.children = order;
        }
        true
    }

    fn reorder_elements(
        &mut self,
        hooks: &LocationHooks,
        location: ComponentId,
        order: &[ComponentId],
    ) -> bool {
        for &child in order {
            let Some(element) = self.element(child) else {
                return false;
            };
            if let Err(err) = (hooks.append_child_element)(self, location, element) {
                tracing::warn!(%location, %child, %err, "reorder failed");
                return false;
            }
        }
        true
    }
}
