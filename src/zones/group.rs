//! Card groups.
//!
//! A group is both a location and a target: it holds cards and sits in some
//! other location like a card would. Groups only admit cards, so they never
//! nest. Collapsing a group moves each child into the group's own location
//! just before the group, then takes the group out.

use crate::components::{ComponentId, ComponentKind, GroupPolicy};

use super::{LocationHooks, Position, Table};

impl LocationHooks {
    /// Only cards may join a group.
    pub const GROUP: Self = Self {
        can_add: admit_cards,
        ..Self::AREA
    };

    /// A group that collapses once a removal leaves it with one child or none.
    /// If that empties and detaches it, the group is discarded.
    pub const COLLAPSIBLE_GROUP: Self = Self {
        post_remove: collapse_when_sparse,
        ..Self::GROUP
    };
}

fn admit_cards(table: &Table, _group: ComponentId, target: ComponentId, _index: usize) -> bool {
    table.kind(target).is_some_and(ComponentKind::is_card)
}

fn collapse_when_sparse(table: &mut Table, group: ComponentId, _target: ComponentId) {
    let collapsing = table.node(group).is_some_and(|n| n.collapsing);
    if collapsing || table.children(group).len() > 1 {
        return;
    }
    let placed = table.location(group).is_some();
    table.collapse(group);
    // A placed group that dissolved completely is gone for good.
    if placed && table.location(group).is_none() && table.discard(group) {
        tracing::debug!(%group, "dissolved group discarded");
    }
}

impl Table {
    /// Dissolve a group into its location.
    ///
    /// Each child is offered to the group's location, just before the group,
    /// once; a child that is refused stays in the group. The group then
    /// removes itself from its location. Returns `true` if the group is no
    /// longer placed afterwards.
    pub fn collapse(&mut self, group: ComponentId) -> bool {
        if !self.kind(group).is_some_and(ComponentKind::is_group) {
            return false;
        }
        let Some(parent) = self.location(group) else {
            return true;
        };
        if let Some(node) = self.node_mut(group) {
            node.collapsing = true;
        }

        let mut i = 0;
        let mut rehomed = 0;
        while let Some(&child) = self.children(group).get(i) {
            if self.add(parent, child, Position::Before(group)) {
                rehomed += 1;
            } else {
                i += 1;
            }
        }
        let detached = match self.location(group) {
            Some(owner) => self.remove(owner, group),
            None => true,
        };

        if let Some(node) = self.node_mut(group) {
            node.collapsing = false;
        }
        tracing::debug!(%group, %parent, rehomed, kept = i, detached, "group collapsed");
        detached
    }

    /// Is this a group that dissolves itself when sparse?
    #[must_use]
    pub fn is_collapsible(&self, group: ComponentId) -> bool {
        matches!(self.kind(group), Some(ComponentKind::Group(GroupPolicy::Collapsible)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Component, Inert};

    struct Board {
        table: Table,
        area: ComponentId,
    }

    impl Board {
        fn new() -> Self {
            let mut table = Table::new();
            let e = table.document_mut().create("area");
            let area = table.create_area(e, Inert);
            Self { table, area }
        }

        fn card(&mut self) -> ComponentId {
            let e = self.table.document_mut().create("card");
            self.table.create_card(e, Inert)
        }

        fn group(&mut self, collapsible: bool) -> ComponentId {
            let e = self.table.document_mut().create("group");
            let g = if collapsible {
                self.table.create_collapsible_group(e, Inert)
            } else {
                self.table.create_group(e, Inert)
            };
            assert!(self.table.add(self.area, g, Position::End));
            g
        }
    }

    #[test]
    fn test_groups_do_not_nest() {
        let mut b = Board::new();
        let outer = b.group(false);
        let inner = b.group(false);
        assert!(!b.table.add(outer, inner, Position::End));
        assert_eq!(b.table.location(inner), Some(b.area));
    }

    #[test]
    fn test_manual_collapse_rehomes_in_place() {
        let mut b = Board::new();
        let first = b.card();
        assert!(b.table.add(b.area, first, Position::End));
        let g = b.group(false);
        let last = b.card();
        assert!(b.table.add(b.area, last, Position::End));

        let (x, y) = (b.card(), b.card());
        assert!(b.table.add(g, x, Position::End));
        assert!(b.table.add(g, y, Position::End));
        assert_eq!(b.table.children(b.area), &[first, g, last]);

        // Removing one card from a manual group does not collapse it.
        assert!(b.table.add(b.area, y, Position::End));
        assert_eq!(b.table.location(g), Some(b.area));

        assert!(b.table.collapse(g));
        assert_eq!(b.table.children(b.area), &[first, x, last, y]);
        assert_eq!(b.table.location(g), None);
        assert!(b.table.children(g).is_empty());
    }

    #[test]
    fn test_collapsible_group_dissolves_on_last_pair() {
        let mut b = Board::new();
        let g = b.group(true);
        let (c1, c2) = (b.card(), b.card());
        assert!(b.table.add(g, c1, Position::End));
        assert!(b.table.add(g, c2, Position::End));

        let g_el = b.table.element(g).unwrap();

        assert!(b.table.remove(g, c1));

        assert_eq!(b.table.location(g), None);
        assert_eq!(b.table.location(c2), Some(b.area));
        assert_eq!(b.table.children(b.area), &[c2]);
        assert_eq!(b.table.location(c1), None);

        // Dissolved groups are reclaimed.
        assert_eq!(b.table.kind(g), None);
        assert!(!b.table.document().is_live(g_el));
        assert_eq!(b.table.component_at(g_el), None);
    }

    #[test]
    fn test_unplaced_collapsible_group_is_kept() {
        let mut b = Board::new();
        let e = b.table.document_mut().create("group");
        let g = b.table.create_collapsible_group(e, Inert);
        let c = b.card();
        assert!(b.table.add(g, c, Position::End));
        assert!(b.table.remove(g, c));

        assert!(b.table.kind(g).is_some());
        assert!(b.table.add(g, c, Position::End));
    }

    #[test]
    fn test_form_and_dissolve_does_not_grow() {
        let mut b = Board::new();
        let (x, y) = (b.card(), b.card());
        assert!(b.table.add(b.area, x, Position::End));
        assert!(b.table.add(b.area, y, Position::End));
        let components = b.table.len();
        let elements = b.table.document().len();

        for _ in 0..50 {
            let g = b.group(true);
            assert!(b.table.add(g, x, Position::End));
            assert!(b.table.add(g, y, Position::End));
            assert!(b.table.add(b.area, y, Position::End));
            assert_eq!(b.table.children(b.area), &[x, y]);
        }
        assert_eq!(b.table.len(), components);
        assert_eq!(b.table.document().len(), elements);
        assert_eq!(b.table.registry().len(), components);
    }

    #[test]
    fn test_collapsible_group_collapses_when_dragged_from() {
        let mut b = Board::new();
        let g = b.group(true);
        let (c1, c2, c3) = (b.card(), b.card(), b.card());
        for c in [c1, c2, c3] {
            assert!(b.table.add(g, c, Position::End));
        }

        // Three to two: still a group.
        assert!(b.table.add(b.area, c1, Position::End));
        assert_eq!(b.table.location(g), Some(b.area));

        // Two to one: collapses.
        assert!(b.table.add(b.area, c2, Position::End));
        assert_eq!(b.table.location(g), None);
        assert_eq!(b.table.children(b.area), &[c3, c1, c2]);
    }

    struct Stuck;

    impl Component for Stuck {
        fn can_set_location(&self, table: &Table, me: ComponentId, _: Option<ComponentId>) -> bool {
            table.location(me).is_none()
        }
    }

    #[test]
    fn test_refused_child_is_skipped() {
        let mut b = Board::new();
        let g = b.group(false);
        let e = b.table.document_mut().create("card");
        let stuck = b.table.create_card(e, Stuck);
        let free = b.card();
        assert!(b.table.add(g, stuck, Position::End));
        assert!(b.table.add(g, free, Position::End));

        assert!(b.table.collapse(g));
        assert_eq!(b.table.children(b.area), &[free]);
        assert_eq!(b.table.children(g), &[stuck]);
        assert_eq!(b.table.location(stuck), Some(g));
    }

    #[test]
    fn test_unplaced_group_collapse_is_noop() {
        let mut b = Board::new();
        let e = b.table.document_mut().create("group");
        let g = b.table.create_group(e, Inert);
        let c = b.card();
        assert!(b.table.add(g, c, Position::End));

        assert!(b.table.collapse(g));
        assert_eq!(b.table.children(g), &[c]);
        assert!(!b.table.collapse(b.area));
    }
}
