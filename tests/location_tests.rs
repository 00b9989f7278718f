//! Ordered-container protocol tests.
//!
//! These exercise `add`/`remove` across locations of every variant and check
//! that the logical child lists and the element tree never disagree.

use std::cell::Cell;
use std::rc::Rc;

use card_table::components::{Component, ComponentId, Inert};
use card_table::core::{ElementId, StackConfig};
use card_table::template::TemplateSet;
use card_table::zones::{Position, Table};

struct Fixture {
    table: Table,
    templates: TemplateSet,
}

impl Fixture {
    fn new() -> Self {
        let mut table = Table::new();
        let templates = TemplateSet::standard(table.document_mut()).unwrap();
        Self { table, templates }
    }

    fn element(&mut self, name: &str) -> ElementId {
        self.templates.instantiate(self.table.document_mut(), name).unwrap()
    }

    fn area(&mut self) -> ComponentId {
        let e = self.element("area");
        self.table.create_area(e, Inert)
    }

    fn card(&mut self) -> ComponentId {
        let e = self.element("card");
        self.table.create_card(e, Inert)
    }

    fn stack(&mut self, config: StackConfig) -> ComponentId {
        let e = self.element("stack");
        self.table.create_stack(e, config, Inert).unwrap()
    }

    /// Elements under `holder`, mapped back to components.
    fn visual_order(&self, holder: ElementId) -> Vec<ComponentId> {
        let doc = self.table.document();
        doc.children(holder)
            .iter()
            .filter_map(|&e| self.table.component_at(e))
            .collect()
    }
}

/// Counts how often a location is asked to release a child.
struct CountingRemovals(Rc<Cell<usize>>);

impl Component for CountingRemovals {
    fn can_remove(&self, _table: &Table, _me: ComponentId, _target: ComponentId) -> bool {
        self.0.set(self.0.get() + 1);
        true
    }
}

/// Counts clean-ups run after a child leaves.
struct CountingCleanups(Rc<Cell<usize>>);

impl Component for CountingCleanups {
    fn post_remove(&self, _table: &mut Table, _me: ComponentId, _target: ComponentId) {
        self.0.set(self.0.get() + 1);
    }
}

#[test]
fn test_insert_before_reference() {
    let mut f = Fixture::new();
    let area = f.area();
    let a = f.card();
    let b = f.card();

    assert!(f.table.add(area, a, Position::End));
    assert!(f.table.add(area, b, a));
    assert_eq!(f.table.children(area), &[b, a]);

    let area_el = f.table.element(area).unwrap();
    assert_eq!(f.visual_order(area_el), vec![b, a]);
}

#[test]
fn test_sparse_collapsible_group_dissolves() {
    let mut f = Fixture::new();
    let area = f.area();
    let before = f.card();
    let g = f.element("group");
    let group = f.table.create_collapsible_group(g, Inert);
    let c1 = f.card();
    let c2 = f.card();

    f.table.add(area, before, Position::End);
    f.table.add(area, group, Position::End);
    f.table.add(group, c1, Position::End);
    f.table.add(group, c2, Position::End);
    assert!(f.table.remove(group, c1));

    assert_eq!(f.table.location(group), None);
    assert_eq!(f.table.location(c2), Some(area));
    assert_eq!(f.table.children(area), &[before, c2]);
    assert!(f.table.children(group).is_empty());

    let area_el = f.table.element(area).unwrap();
    assert_eq!(f.visual_order(area_el), vec![before, c2]);
    assert_eq!(f.table.document().parent(g), None);
}

#[test]
fn test_face_down_stack_never_peeks() {
    let mut f = Fixture::new();
    let stack = f.stack(StackConfig::new().face_down());
    let stack_el = f.table.element(stack).unwrap();

    for _ in 0..3 {
        let card = f.card();
        assert!(f.table.add(stack, card, Position::End));
    }
    let doc = f.table.document();
    assert!(doc.find_by_class(stack_el, "top").is_empty());
    let height = doc.find_by_class(stack_el, "height");
    assert_eq!(height.len(), 1);
    assert_eq!(doc.text(height[0]), "3");
}

#[test]
fn test_face_up_stack_peeks_at_last_card() {
    let mut f = Fixture::new();
    let stack = f.stack(StackConfig::new());
    let area = f.area();
    let a = f.card();
    let b = f.card();
    let a_el = f.table.element(a).unwrap();
    let b_el = f.table.element(b).unwrap();
    f.table.document_mut().set_text(a_el, "A");
    f.table.document_mut().set_text(b_el, "B");

    f.table.add(stack, a, Position::End);
    f.table.add(stack, b, Position::End);
    assert_eq!(f.table.top_card(stack), Some(b));

    let stack_el = f.table.element(stack).unwrap();
    let top = f.table.document().find_by_class(stack_el, "top")[0];
    let peek = f.table.document().children(top)[0];
    assert_eq!(f.table.document().text(peek), "B");
    // The copy is only a picture of the card.
    assert_eq!(f.table.component_at(peek), None);

    // Moving the top card elsewhere refreshes the peek.
    assert!(f.table.add(area, b, Position::End));
    let top = f.table.document().find_by_class(stack_el, "top")[0];
    let peek = f.table.document().children(top)[0];
    assert_eq!(f.table.document().text(peek), "A");
}

#[test]
fn test_out_of_range_index_rejected() {
    let mut f = Fixture::new();
    let area = f.area();
    let a = f.card();
    let b = f.card();
    let extra = f.card();
    f.table.add(area, a, Position::End);
    f.table.add(area, b, Position::End);

    assert!(!f.table.add(area, extra, 5usize));
    assert_eq!(f.table.children(area), &[a, b]);
    assert_eq!(f.table.location(extra), None);

    // The end of the list is still a valid index.
    assert!(f.table.add(area, extra, 2usize));
    assert_eq!(f.table.children(area), &[a, b, extra]);
}

#[test]
fn test_reparent_skips_old_location_veto() {
    let mut f = Fixture::new();
    let removals = Rc::new(Cell::new(0));
    let e = f.element("area");
    let from = f.table.create_area(e, CountingRemovals(Rc::clone(&removals)));
    let to = f.area();
    let card = f.card();

    f.table.add(from, card, Position::End);
    assert!(f.table.add(to, card, Position::End));

    // Moving never asks the old location for permission.
    assert_eq!(removals.get(), 0);
    assert!(f.table.children(from).is_empty());
    assert_eq!(f.table.children(to), &[card]);

    let from_el = f.table.element(from).unwrap();
    let to_el = f.table.element(to).unwrap();
    assert!(f.table.document().children(from_el).is_empty());
    assert_eq!(f.visual_order(to_el), vec![card]);

    assert!(f.table.remove(to, card));
    assert_eq!(f.table.location(card), None);
}

#[test]
fn test_card_moves_between_stacks() {
    let mut f = Fixture::new();
    let left = f.stack(StackConfig::new());
    let right = f.stack(StackConfig::new().without_height());
    let cards: Vec<ComponentId> = (0..4).map(|_| f.card()).collect();
    for &card in &cards {
        f.table.add(left, card, Position::End);
    }

    assert!(f.table.add(right, cards[3], Position::End));
    assert!(f.table.add(right, cards[0], Position::Before(cards[3])));
    assert_eq!(f.table.children(left), &[cards[1], cards[2]]);
    assert_eq!(f.table.children(right), &[cards[0], cards[3]]);

    let left_el = f.table.element(left).unwrap();
    let height = f.table.document().find_by_class(left_el, "height")[0];
    assert_eq!(f.table.document().text(height), "2");
    let right_el = f.table.element(right).unwrap();
    assert!(f.table.document().find_by_class(right_el, "height").is_empty());
}

#[test]
fn test_groups_do_not_nest() {
    let mut f = Fixture::new();
    let g = f.element("group");
    let outer = f.table.create_group(g, Inert);
    let g = f.element("group");
    let inner = f.table.create_group(g, Inert);

    assert!(!f.table.add(outer, inner, Position::End));
    assert!(f.table.children(outer).is_empty());
}

#[test]
fn test_reparent_cleans_up_once() {
    let mut f = Fixture::new();
    let (from_count, to_count) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
    let e = f.element("area");
    let from = f.table.create_area(e, CountingCleanups(Rc::clone(&from_count)));
    let e = f.element("area");
    let to = f.table.create_area(e, CountingCleanups(Rc::clone(&to_count)));
    let (card, other) = (f.card(), f.card());
    f.table.add(from, card, Position::End);
    f.table.add(from, other, Position::End);

    assert!(f.table.add(to, card, Position::End));
    assert_eq!(from_count.get(), 1);
    assert_eq!(to_count.get(), 0);

    // Reordering within a location is not a departure.
    assert!(f.table.add(from, other, Position::Index(0)));
    assert_eq!(from_count.get(), 1);

    // A refused move runs nothing.
    assert!(!f.table.add(to, other, 7usize));
    assert_eq!(from_count.get(), 1);

    assert!(f.table.remove(to, card));
    assert_eq!(to_count.get(), 1);
    assert_eq!(from_count.get(), 1);
}

#[test]
fn test_reparent_out_of_group_cleans_up_per_departure() {
    let mut f = Fixture::new();
    let (parent_count, group_count) = (Rc::new(Cell::new(0)), Rc::new(Cell::new(0)));
    let e = f.element("area");
    let parent = f.table.create_area(e, CountingCleanups(Rc::clone(&parent_count)));
    let other = f.area();
    let g = f.element("group");
    let group = f.table.create_collapsible_group(g, CountingCleanups(Rc::clone(&group_count)));
    let (c1, c2) = (f.card(), f.card());
    f.table.add(parent, group, Position::End);
    f.table.add(group, c1, Position::End);
    f.table.add(group, c2, Position::End);

    assert!(f.table.add(other, c1, Position::End));

    // c1 leaving, then c2 re-homed by the collapse.
    assert_eq!(group_count.get(), 2);
    // The group itself leaving.
    assert_eq!(parent_count.get(), 1);
    assert_eq!(f.table.children(parent), &[c2]);
    assert_eq!(f.table.children(other), &[c1]);
}

#[test]
fn test_stack_height_tracks_each_departure() {
    let mut f = Fixture::new();
    let stack = f.stack(StackConfig::new());
    let area = f.area();
    let cards: Vec<ComponentId> = (0..3).map(|_| f.card()).collect();
    for &card in &cards {
        f.table.add(stack, card, Position::End);
    }
    let stack_el = f.table.element(stack).unwrap();
    let height = f.table.document().find_by_class(stack_el, "height")[0];

    for (moved, &card) in cards.iter().enumerate() {
        assert!(f.table.add(area, card, Position::End));
        let left = (cards.len() - moved - 1).to_string();
        assert_eq!(f.table.document().text(height), left);
    }
}
