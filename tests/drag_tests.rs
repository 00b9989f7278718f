//! Drag engine tests driven through the sandbox table.

use std::cell::Cell;
use std::rc::Rc;

use card_table::components::{Commit, Component, ComponentId, Inert};
use card_table::games::sandbox::{Sandbox, SandboxBuilder};
use card_table::core::StackConfig;
use card_table::interaction::{DragEngine, PointerEvent, DRAGGING, DROP_OK, DROP_TARGET};
use card_table::zones::{Position, Table};

fn body(sandbox: &Sandbox) -> card_table::core::ElementId {
    sandbox.table().document().body()
}

#[test]
fn test_pointer_down_on_nothing_draggable() {
    let mut sandbox = Sandbox::new().unwrap();
    let card = sandbox.lay_out("A").unwrap();
    let area_el = sandbox.element(sandbox.area()).unwrap();

    assert!(!sandbox.dispatch(&PointerEvent::down(area_el, 1.0, 1.0)));
    assert!(sandbox.engine().dragging().is_empty());
    assert!(!sandbox.dispatch(&PointerEvent::move_to(area_el, 9.0, 9.0)));
    assert!(!sandbox.dispatch(&PointerEvent::up(area_el, 9.0, 9.0)));
    assert_eq!(sandbox.table().children(sandbox.area()), &[card]);
    assert!(!sandbox.table().document().has_class(body(&sandbox), DRAGGING));
}

#[test]
fn test_drop_from_pile_onto_card_groups() {
    let mut sandbox = SandboxBuilder::new().pile(StackConfig::new().face_down()).build().unwrap();
    let a = sandbox.lay_out("A").unwrap();
    let top = sandbox.deal("X").unwrap();
    let pile_el = sandbox.element(sandbox.pile()).unwrap();
    let a_el = sandbox.element(a).unwrap();

    assert!(sandbox.dispatch(&PointerEvent::down(pile_el, 0.0, 0.0)));
    assert_eq!(sandbox.engine().dragging(), &[top]);
    assert!(sandbox.table().document().has_class(body(&sandbox), DRAGGING));

    sandbox.dispatch(&PointerEvent::move_to(a_el, 50.0, 20.0));
    assert!(sandbox.engine().has_commit());
    assert!(sandbox.table().document().has_class(a_el, DROP_TARGET));
    assert!(sandbox.table().document().has_class(body(&sandbox), DROP_OK));
    // Nothing has moved yet.
    assert_eq!(sandbox.table().location(top), Some(sandbox.pile()));
    assert_eq!(sandbox.table().children(sandbox.area()), &[a]);

    assert!(sandbox.dispatch(&PointerEvent::up(a_el, 50.0, 20.0)));
    let table = sandbox.table();
    let group = table.location(a).unwrap();
    assert_eq!(table.children(group), &[a, top]);
    assert_eq!(table.children(sandbox.area()), &[group]);
    assert!(table.children(sandbox.pile()).is_empty());
    assert!(!table.document().has_class(a_el, DROP_TARGET));
    assert!(!table.document().has_class(body(&sandbox), DRAGGING));
    assert!(!table.document().has_class(body(&sandbox), DROP_OK));
}

#[test]
fn test_moving_off_target_clears_candidate() {
    let mut sandbox = Sandbox::new().unwrap();
    let a = sandbox.lay_out("A").unwrap();
    let b = sandbox.lay_out("B").unwrap();
    let a_el = sandbox.element(a).unwrap();
    let b_el = sandbox.element(b).unwrap();
    let outside = body(&sandbox);

    sandbox.dispatch(&PointerEvent::down(b_el, 0.0, 0.0));
    sandbox.dispatch(&PointerEvent::move_to(a_el, 5.0, 0.0));
    assert_eq!(sandbox.engine().drop_target(), Some(a_el));

    sandbox.dispatch(&PointerEvent::move_to(outside, 500.0, 0.0));
    assert_eq!(sandbox.engine().drop_target(), None);
    assert!(!sandbox.table().document().has_class(a_el, DROP_TARGET));
    assert!(!sandbox.table().document().has_class(b_el, DROP_OK));

    assert!(!sandbox.dispatch(&PointerEvent::up(outside, 500.0, 0.0)));
    assert_eq!(sandbox.table().children(sandbox.area()), &[a, b]);
}

#[test]
fn test_second_pointer_down_resets_first_drag() {
    let mut sandbox = Sandbox::new().unwrap();
    let a = sandbox.lay_out("A").unwrap();
    let b = sandbox.lay_out("B").unwrap();
    let a_el = sandbox.element(a).unwrap();
    let b_el = sandbox.element(b).unwrap();

    sandbox.dispatch(&PointerEvent::down(a_el, 0.0, 0.0));
    sandbox.dispatch(&PointerEvent::move_to(b_el, 40.0, 0.0));
    sandbox.dispatch(&PointerEvent::down(b_el, 0.0, 0.0));

    assert_eq!(sandbox.engine().dragging(), &[b]);
    let doc = sandbox.table().document();
    assert!(!doc.has_class(a_el, DRAGGING));
    assert!(doc.style(a_el).unwrap().pointer_events);
    assert_eq!(doc.style(a_el).unwrap().left, 0.0);
    assert!(!doc.has_class(b_el, DROP_TARGET));
    assert!(doc.has_class(b_el, DRAGGING));
}

#[test]
fn test_double_click_dissolves_group() {
    let mut sandbox = Sandbox::new().unwrap();
    let a = sandbox.lay_out("A").unwrap();
    let b = sandbox.lay_out("B").unwrap();
    let c = sandbox.lay_out("C").unwrap();
    let a_el = sandbox.element(a).unwrap();
    for card in [b, c] {
        let el = sandbox.element(card).unwrap();
        sandbox.dispatch(&PointerEvent::down(el, 0.0, 0.0));
        sandbox.dispatch(&PointerEvent::move_to(a_el, 0.0, 0.0));
        sandbox.dispatch(&PointerEvent::up(a_el, 0.0, 0.0));
    }
    let group = sandbox.table().location(a).unwrap();
    assert_eq!(sandbox.table().children(group), &[a, b, c]);

    // Cards ignore double clicks, so the group handles it.
    assert!(sandbox.dispatch(&PointerEvent::double_click(a_el)));
    assert_eq!(sandbox.table().children(sandbox.area()), &[a, b, c]);
    assert_eq!(sandbox.table().location(group), None);
}

/// Accepts anything and counts how often it was asked.
struct Watching(Rc<Cell<usize>>);

impl Component for Watching {
    fn drop_action(
        &self,
        _table: &Table,
        me: ComponentId,
        dragging: &[ComponentId],
    ) -> Option<Commit> {
        self.0.set(self.0.get() + 1);
        let items = dragging.to_vec();
        Some(Box::new(move |table: &mut Table| {
            for item in items {
                table.add(me, item, Position::End);
            }
        }))
    }
}

struct Handle;

impl Component for Handle {
    fn drag(&self, _table: &Table, me: ComponentId) -> card_table::components::DragSet {
        smallvec::smallvec![me]
    }

    fn dbl_click(&self, table: &mut Table, me: ComponentId) -> bool {
        table.element(me).is_some()
    }
}

#[test]
fn test_drop_is_queried_once_per_target() {
    let asked = Rc::new(Cell::new(0));
    let mut table = Table::new();
    let body = table.document().body();
    let home_el = table.document_mut().create("area");
    let dest_el = table.document_mut().create("area");
    table.document_mut().append_child(body, home_el).unwrap();
    table.document_mut().append_child(body, dest_el).unwrap();
    let home = table.create_area(home_el, Inert);
    let dest = table.create_area(dest_el, Watching(Rc::clone(&asked)));
    let card_el = table.document_mut().create("card");
    let card = table.create_card(card_el, Handle);
    table.add(home, card, Position::End);

    let mut engine = DragEngine::new();
    engine.handle(&mut table, &PointerEvent::down(card_el, 0.0, 0.0));
    for x in 1..5 {
        engine.handle(&mut table, &PointerEvent::move_to(dest_el, f64::from(x), 0.0));
    }
    assert_eq!(asked.get(), 1);
    assert_eq!(table.location(card), Some(home));

    assert!(engine.handle(&mut table, &PointerEvent::up(dest_el, 4.0, 0.0)));
    assert_eq!(table.location(card), Some(dest));

    // Double clicks stop at the first component that handles them.
    assert!(engine.handle(&mut table, &PointerEvent::double_click(card_el)));
}
