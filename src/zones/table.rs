//! The component arena.
//!
//! A `Table` owns the element [`Document`], the [`ComponentRegistry`] and
//! one record per component. Components refer to each other by
//! [`ComponentId`]; the location/children links are the logical ownership
//! graph, and the element tree is kept in step with it by the transfer
//! protocol in `location.rs`.

use std::rc::Rc;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::components::{Component, ComponentId, ComponentKind, ComponentRegistry, GroupPolicy};
use crate::core::{Document, ElementId, Result, TableError};

pub(crate) struct Node {
    pub(crate) element: ElementId,
    pub(crate) kind: ComponentKind,
    pub(crate) behavior: Rc<dyn Component>,
    pub(crate) location: Option<ComponentId>,
    pub(crate) children: Vec<ComponentId>,
    /// Set while a group is re-homing its children.
    pub(crate) collapsing: bool,
}

/// Components, their elements, and the ownership links between them.
///
/// ## Usage
///
/// ```
/// use card_table::components::Inert;
/// use card_table::zones::{Position, Table};
///
/// let mut table = Table::new();
/// let area_el = table.document_mut().create("area");
/// let area = table.create_area(area_el, Inert);
///
/// let a = table.document_mut().create("card");
/// let a = table.create_card(a, Inert);
/// let b = table.document_mut().create("card");
/// let b = table.create_card(b, Inert);
///
/// assert!(table.add(area, a, Position::End));
/// assert!(table.add(area, b, a));
/// assert_eq!(table.children(area), &[b, a]);
/// ```
#[derive(Default)]
pub struct Table {
    pub(crate) doc: Document,
    pub(crate) registry: ComponentRegistry,
    pub(crate) nodes: FxHashMap<ComponentId, Node>,
    next_id: u32,
}

impl std::fmt::Debug for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("components", &self.nodes.len())
            .field("elements", &self.doc.len())
            .finish()
    }
}

impl Table {
    /// Create an empty table with a fresh document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a table over an existing document (e.g. one holding templates).
    #[must_use]
    pub fn with_document(doc: Document) -> Self {
        Self {
            doc,
            registry: ComponentRegistry::new(),
            nodes: FxHashMap::default(),
            next_id: 0,
        }
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    /// Direct access to the element tree, for building elements and styling.
    /// Elements owned by components should be moved through `add`/`remove`.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub(crate) fn spawn(
        &mut self,
        element: ElementId,
        kind: ComponentKind,
        behavior: Rc<dyn Component>,
    ) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node {
            element,
            kind,
            behavior,
            location: None,
            children: Vec::new(),
            collapsing: false,
        });
        self.registry.register(&self.doc, element, id);
        id
    }

    /// Create a plain area over `element`.
    pub fn create_area(
        &mut self,
        element: ElementId,
        behavior: impl Component + 'static,
    ) -> ComponentId {
        self.spawn(element, ComponentKind::Area, Rc::new(behavior))
    }

    /// Create a group that only collapses when asked.
    pub fn create_group(
        &mut self,
        element: ElementId,
        behavior: impl Component + 'static,
    ) -> ComponentId {
        self.spawn(element, ComponentKind::Group(GroupPolicy::Manual), Rc::new(behavior))
    }

    /// Create a group that collapses once it is down to one child.
    pub fn create_collapsible_group(
        &mut self,
        element: ElementId,
        behavior: impl Component + 'static,
    ) -> ComponentId {
        self.spawn(element, ComponentKind::Group(GroupPolicy::Collapsible), Rc::new(behavior))
    }

    pub(crate) fn node(&self, id: ComponentId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub(crate) fn node_mut(&mut self, id: ComponentId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Number of live components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn kind(&self, id: ComponentId) -> Option<&ComponentKind> {
        self.node(id).map(|n| &n.kind)
    }

    /// The element a component owns.
    #[must_use]
    pub fn element(&self, id: ComponentId) -> Option<ElementId> {
        self.node(id).map(|n| n.element)
    }

    pub(crate) fn require_element(&self, id: ComponentId) -> Result<ElementId> {
        self.element(id).ok_or(TableError::UnknownComponent(id.0))
    }

    /// The location currently owning a target.
    #[must_use]
    pub fn location(&self, id: ComponentId) -> Option<ComponentId> {
        self.node(id)?.location
    }

    /// Children of a location, in order. Empty for anything else.
    #[must_use]
    pub fn children(&self, id: ComponentId) -> &[ComponentId] {
        self.node(id).map_or(&[], |n| n.children.as_slice())
    }

    #[must_use]
    pub fn is_target(&self, id: ComponentId) -> bool {
        self.kind(id).is_some_and(ComponentKind::is_target)
    }

    #[must_use]
    pub fn is_location(&self, id: ComponentId) -> bool {
        self.kind(id).is_some_and(ComponentKind::is_location)
    }

    /// Shared handle to a component's behaviour, so hooks can be called
    /// while the table is borrowed mutably.
    #[must_use]
    pub fn behavior(&self, id: ComponentId) -> Option<Rc<dyn Component>> {
        self.node(id).map(|n| Rc::clone(&n.behavior))
    }

    /// Component owning exactly this element.
    #[must_use]
    pub fn component_at(&self, element: ElementId) -> Option<ComponentId> {
        self.registry.get(&self.doc, element)
    }

    /// Components found walking from `element` up through its visual
    /// parents, innermost first.
    #[must_use]
    pub fn components_from(&self, element: ElementId) -> SmallVec<[ComponentId; 8]> {
        self.doc
            .ancestors(element)
            .filter_map(|e| self.registry.get(&self.doc, e))
            .collect()
    }

    /// The single descendant of `element` with class `class`.
    ///
    /// Zero or several matches is a wiring error.
    pub fn child(&self, element: ElementId, class: &str) -> Result<ElementId> {
        let found = self.doc.find_by_class(element, class);
        match found.as_slice() {
            [only] => Ok(*only),
            [] => Err(TableError::MissingChild(class.to_string())),
            _ => Err(TableError::AmbiguousChild {
                class: class.to_string(),
                count: found.len(),
            }),
        }
    }

    /// Destroy an unplaced component: its record, its element subtree and
    /// the registry entries under it. Ids are never reused.
    ///
    /// Returns `false`, changing nothing, if the component is still owned by
    /// a location or still holds children of its own.
    pub fn discard(&mut self, id: ComponentId) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        if node.location.is_some() || !node.children.is_empty() {
            tracing::trace!(%id, "discard refused");
            return false;
        }
        let element = node.element;
        self.nodes.remove(&id);
        for gone in self.doc.discard(element) {
            self.registry.forget(gone);
        }
        true
    }
}
