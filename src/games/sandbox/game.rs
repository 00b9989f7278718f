//! Sandbox table implementation.

use std::cell::RefCell;
use std::rc::Rc;

use smallvec::smallvec;

use crate::components::{Commit, Component, ComponentId, ComponentKind, DragSet};
use crate::core::{ElementId, Result, StackConfig, TableRng};
use crate::interaction::{DragEngine, PointerEvent};
use crate::template::{Present, TemplateSet};
use crate::zones::{Position, Table};

/// Class toggled on a card's element by clicking it.
pub const FLIPPED: &str = "flipped";

fn all_cards(table: &Table, items: &[ComponentId]) -> bool {
    !items.is_empty() && items.iter().all(|&id| table.kind(id).is_some_and(ComponentKind::is_card))
}

/// Collapse `group` and reclaim it if that left it empty and unplaced.
fn dissolve(table: &mut Table, group: ComponentId) -> bool {
    if !table.collapse(group) {
        return false;
    }
    if table.children(group).is_empty() {
        table.discard(group);
    }
    true
}

fn move_all(location: ComponentId, items: &[ComponentId]) -> Commit {
    let items = items.to_vec();
    Box::new(move |table: &mut Table| {
        for item in items {
            if !table.add(location, item, Position::End) {
                tracing::debug!(%location, %item, "drop refused");
            }
        }
    })
}

/// A sandbox card.
#[derive(Clone, Debug)]
pub struct SandboxCard {
    templates: Rc<TemplateSet>,
}

impl SandboxCard {
    #[must_use]
    pub fn new(templates: Rc<TemplateSet>) -> Self {
        Self { templates }
    }
}

impl Component for SandboxCard {
    fn click(&self, table: &mut Table, me: ComponentId) -> bool {
        let Some(element) = table.element(me) else {
            return false;
        };
        let flipped = table.document().has_class(element, FLIPPED);
        table.document_mut().toggle_class(element, FLIPPED, !flipped);
        true
    }

    fn drag(&self, _table: &Table, me: ComponentId) -> DragSet {
        smallvec![me]
    }

    fn drop_action(
        &self,
        table: &Table,
        me: ComponentId,
        dragging: &[ComponentId],
    ) -> Option<Commit> {
        if !all_cards(table, dragging) || dragging.contains(&me) {
            return None;
        }
        let location = table.location(me)?;
        match table.kind(location)? {
            ComponentKind::Group(_) => Some(move_all(location, dragging)),
            ComponentKind::Area => {
                let templates = Rc::clone(&self.templates);
                let items = dragging.to_vec();
                Some(Box::new(move |table: &mut Table| {
                    let element = match templates.instantiate(table.document_mut(), "group") {
                        Ok(element) => element,
                        Err(err) => {
                            tracing::warn!(%err, "cannot build group");
                            return;
                        }
                    };
                    let group = table.create_collapsible_group(element, SandboxGroup);
                    if !table.add(location, group, Position::Before(me)) {
                        table.discard(group);
                        return;
                    }
                    if !table.add(group, me, Position::End) {
                        dissolve(table, group);
                        return;
                    }
                    for item in items {
                        table.add(group, item, Position::End);
                    }
                    // Nothing joined: dissolve again.
                    if table.children(group).len() <= 1 {
                        dissolve(table, group);
                    }
                }))
            }
            // Cards in a pile leave drops to the pile.
            _ => None,
        }
    }
}

/// A sandbox group: accepts cards, dissolves on double click.
#[derive(Clone, Copy, Debug, Default)]
pub struct SandboxGroup;

impl Component for SandboxGroup {
    fn dbl_click(&self, table: &mut Table, me: ComponentId) -> bool {
        dissolve(table, me)
    }

    fn drag(&self, _table: &Table, me: ComponentId) -> DragSet {
        smallvec![me]
    }

    fn drop_action(
        &self,
        table: &Table,
        me: ComponentId,
        dragging: &[ComponentId],
    ) -> Option<Commit> {
        all_cards(table, dragging).then(|| move_all(me, dragging))
    }
}

/// The open play area: accepts anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct SandboxArea;

impl Component for SandboxArea {
    fn drop_action(
        &self,
        table: &Table,
        me: ComponentId,
        dragging: &[ComponentId],
    ) -> Option<Commit> {
        dragging
            .iter()
            .all(|&id| table.is_target(id))
            .then(|| move_all(me, dragging))
    }
}

/// The pile: offers its top card, accepts cards, shuffles on double click.
#[derive(Debug)]
pub struct SandboxPile {
    rng: RefCell<TableRng>,
}

impl SandboxPile {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: RefCell::new(TableRng::new(seed)),
        }
    }
}

impl Component for SandboxPile {
    fn dbl_click(&self, table: &mut Table, me: ComponentId) -> bool {
        let mut rng = self.rng.borrow_mut();
        table.shuffle(me, &mut rng)
    }

    fn drag(&self, table: &Table, me: ComponentId) -> DragSet {
        table.top_card(me).into_iter().collect()
    }

    fn drop_action(
        &self,
        table: &Table,
        me: ComponentId,
        dragging: &[ComponentId],
    ) -> Option<Commit> {
        all_cards(table, dragging).then(|| move_all(me, dragging))
    }
}

/// Sandbox state: the table plus the engine driving it.
pub struct Sandbox {
    table: Table,
    engine: DragEngine,
    templates: Rc<TemplateSet>,
    area: ComponentId,
    pile: ComponentId,
}

impl std::fmt::Debug for Sandbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sandbox")
            .field("area", &self.area)
            .field("pile", &self.pile)
            .field("components", &self.table.len())
            .field("engine", &self.engine)
            .finish()
    }
}

/// Builder for creating a Sandbox.
#[derive(Clone, Debug, Default)]
pub struct SandboxBuilder {
    seed: u64,
    pile: StackConfig,
}

impl SandboxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed for pile shuffles.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn pile(mut self, config: StackConfig) -> Self {
        self.pile = config;
        self
    }

    /// Build on a fresh table with the standard templates.
    pub fn build(self) -> Result<Sandbox> {
        let mut table = Table::new();
        let templates = TemplateSet::standard(table.document_mut())?;
        self.build_with(table, &Present::ready(templates))
    }

    /// Build on `table`, whose document holds the prototypes in `templates`.
    /// Fails if the templates never loaded or lack an `area` or `stack`.
    pub fn build_with(self, mut table: Table, templates: &Present<TemplateSet>) -> Result<Sandbox> {
        let templates = Rc::new(templates.get()?.clone());
        let body = table.document().body();

        let area_el = templates.instantiate(table.document_mut(), "area")?;
        let pile_el = templates.instantiate(table.document_mut(), "stack")?;
        table.document_mut().append_child(body, area_el)?;
        table.document_mut().append_child(body, pile_el)?;

        let area = table.create_area(area_el, SandboxArea);
        let pile = table.create_stack(pile_el, self.pile, SandboxPile::new(self.seed))?;
        tracing::info!(%area, %pile, seed = self.seed, "sandbox ready");
        Ok(Sandbox {
            table,
            engine: DragEngine::new(),
            templates,
            area,
            pile,
        })
    }
}

impl Sandbox {
    /// A sandbox with default settings.
    pub fn new() -> Result<Self> {
        SandboxBuilder::new().build()
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut Table {
        &mut self.table
    }

    #[must_use]
    pub fn engine(&self) -> &DragEngine {
        &self.engine
    }

    #[must_use]
    pub fn area(&self) -> ComponentId {
        self.area
    }

    #[must_use]
    pub fn pile(&self) -> ComponentId {
        self.pile
    }

    /// Element of a component, for building events.
    #[must_use]
    pub fn element(&self, id: ComponentId) -> Option<ElementId> {
        self.table.element(id)
    }

    /// Create an unplaced card showing `label`.
    pub fn new_card(&mut self, label: &str) -> Result<ComponentId> {
        let element = self.templates.instantiate(self.table.document_mut(), "card")?;
        self.table.document_mut().set_text(element, label);
        Ok(self.table.create_card(element, SandboxCard::new(Rc::clone(&self.templates))))
    }

    /// Create a card on top of the pile.
    pub fn deal(&mut self, label: &str) -> Result<ComponentId> {
        let card = self.new_card(label)?;
        self.table.add(self.pile, card, Position::End);
        Ok(card)
    }

    /// Create a card at the end of the area.
    pub fn lay_out(&mut self, label: &str) -> Result<ComponentId> {
        let card = self.new_card(label)?;
        self.table.add(self.area, card, Position::End);
        Ok(card)
    }

    /// Feed a pointer event to the engine.
    pub fn dispatch(&mut self, event: &PointerEvent) -> bool {
        self.engine.handle(&mut self.table, event)
    }
}
