//! Element to component lookup.
//!
//! The engine resolves a raw pointer event by walking up the element tree
//! and asking the registry which component, if any, owns each element.
//! Keys are generational element ids, so an entry for a discarded element
//! never resolves again even before it is pruned.

use rustc_hash::FxHashMap;

use crate::core::{Document, ElementId};

use super::ComponentId;

/// Registry of element ownership.
///
/// Last writer wins: registering an element twice replaces the owner.
#[derive(Clone, Debug, Default)]
pub struct ComponentRegistry {
    owners: FxHashMap<ElementId, ComponentId>,
}

impl ComponentRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate `element` with `component`.
    ///
    /// An element that is not live in `doc` is not a valid key: the failure
    /// is logged and the component stays unreachable by hit-testing.
    pub fn register(&mut self, doc: &Document, element: ElementId, component: ComponentId) -> bool {
        if !doc.is_live(element) {
            tracing::warn!(%element, %component, "invalid registry key");
            return false;
        }
        self.owners.insert(element, component);
        true
    }

    /// Owner of `element`, if it is registered and still live.
    #[must_use]
    pub fn get(&self, doc: &Document, element: ElementId) -> Option<ComponentId> {
        if !doc.is_live(element) {
            return None;
        }
        self.owners.get(&element).copied()
    }

    /// Drop the entry for `element`.
    pub fn forget(&mut self, element: ElementId) -> Option<ComponentId> {
        self.owners.remove(&element)
    }

    /// Drop every entry whose element is no longer live. Returns how many.
    pub fn prune(&mut self, doc: &Document) -> usize {
        let before = self.owners.len();
        self.owners.retain(|&element, _| doc.is_live(element));
        before - self.owners.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}
