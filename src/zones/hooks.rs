//! Per-variant location strategy.
//!
//! The ordered-container algorithm lives in one place (`location.rs`). What
//! differs between an area, a stack and a group is only where child elements
//! go, which targets are admitted, and what clean-up follows a removal. Each
//! variant supplies those as a `LocationHooks` table.

use crate::components::{ComponentId, ComponentKind, GroupPolicy};
use crate::core::{ElementId, Result};

use super::Table;

/// Appends `child` to the location's visual container.
pub type AppendFn = fn(&mut Table, ComponentId, ElementId) -> Result<()>;
/// Inserts `child` before `before` in the location's visual container.
pub type InsertBeforeFn = fn(&mut Table, ComponentId, ElementId, ElementId) -> Result<()>;
/// Removes `child` from the location's visual container.
pub type RemoveFn = fn(&mut Table, ComponentId, ElementId) -> Result<()>;
/// Admission check for `(location, target, index)`. Must not mutate.
pub type CanAddFn = fn(&Table, ComponentId, ComponentId, usize) -> bool;
/// Removal check for `(location, target)`. Must not mutate.
pub type CanRemoveFn = fn(&Table, ComponentId, ComponentId) -> bool;
/// Clean-up after `target` has left `location`.
pub type PostRemoveFn = fn(&mut Table, ComponentId, ComponentId);

/// Strategy table for one location variant.
#[derive(Clone, Copy, Debug)]
pub struct LocationHooks {
    pub append_child_element: AppendFn,
    pub insert_before_element: InsertBeforeFn,
    pub remove_child_element: RemoveFn,
    pub can_add: CanAddFn,
    pub can_remove: CanRemoveFn,
    pub post_remove: PostRemoveFn,
}

impl LocationHooks {
    /// Vanilla ordered container: children live directly in the element.
    pub const AREA: Self = Self {
        append_child_element: append_to_element,
        insert_before_element: insert_into_element,
        remove_child_element: remove_from_element,
        can_add: admit_any,
        can_remove: release_any,
        post_remove: no_cleanup,
    };

    /// Hooks for a component kind, or `None` if it is not a location.
    #[must_use]
    pub fn for_kind(kind: &ComponentKind) -> Option<&'static Self> {
        match kind {
            ComponentKind::Area => Some(&Self::AREA),
            ComponentKind::Stack(_) => Some(&Self::STACK),
            ComponentKind::Group(GroupPolicy::Manual) => Some(&Self::GROUP),
            ComponentKind::Group(GroupPolicy::Collapsible) => Some(&Self::COLLAPSIBLE_GROUP),
            ComponentKind::Card => None,
        }
    }
}

fn append_to_element(table: &mut Table, location: ComponentId, child: ElementId) -> Result<()> {
    let parent = table.require_element(location)?;
    table.doc.append_child(parent, child)
}

fn insert_into_element(
    table: &mut Table,
    location: ComponentId,
    child: ElementId,
    before: ElementId,
) -> Result<()> {
    let parent = table.require_element(location)?;
    table.doc.insert_before(parent, child, before)
}

fn remove_from_element(table: &mut Table, location: ComponentId, child: ElementId) -> Result<()> {
    let parent = table.require_element(location)?;
    table.doc.remove_child(parent, child)
}

fn admit_any(_: &Table, _: ComponentId, _: ComponentId, _: usize) -> bool {
    true
}

fn release_any(_: &Table, _: ComponentId, _: ComponentId) -> bool {
    true
}

fn no_cleanup(_: &mut Table, _: ComponentId, _: ComponentId) {}
