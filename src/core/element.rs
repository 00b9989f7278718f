//! Headless visual element tree.
//!
//! The `Document` is the projection of the logical container graph that a
//! renderer (or a browser binding) displays. It mirrors the small part of the
//! DOM the table needs: ordered children, a class set per element, a text
//! payload and the inline style a drag manipulates.
//!
//! ## Identity
//!
//! Elements live in a generational arena. Discarding an element bumps its
//! slot's generation, so an `ElementId` held anywhere else (a registry key, a
//! cached drop target) simply stops resolving instead of pointing at a reused
//! slot.
//!
//! ```
//! use card_table::core::Document;
//!
//! let mut doc = Document::new();
//! let area = doc.create("area");
//! let card = doc.create("card");
//! doc.append_child(doc.body(), area).unwrap();
//! doc.append_child(area, card).unwrap();
//!
//! assert_eq!(doc.parent(card), Some(area));
//! assert_eq!(doc.ancestors(card).collect::<Vec<_>>(), vec![card, area, doc.body()]);
//!
//! doc.discard(area);
//! assert!(!doc.is_live(card));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::error::{Result, TableError};

/// Identifier of an element in a [`Document`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId {
    index: u32,
    generation: u32,
}

impl ElementId {
    /// Slot index in the arena.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Generation of the slot when this id was issued.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Element({}v{})", self.index, self.generation)
    }
}

/// Inline style an interaction may change on an element.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Style {
    /// Horizontal offset from the laid-out position.
    pub left: f64,
    /// Vertical offset from the laid-out position.
    pub top: f64,
    pub z_index: i32,
    /// Whether the element can be the target of pointer events.
    pub pointer_events: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            z_index: 0,
            pointer_events: true,
        }
    }
}

#[derive(Clone, Debug)]
struct ElementData {
    name: String,
    classes: SmallVec<[String; 4]>,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    text: String,
    style: Style,
}

#[derive(Clone, Debug)]
struct Slot {
    generation: u32,
    data: Option<ElementData>,
}

/// Arena of elements forming a tree under a single `body` root.
#[derive(Clone, Debug)]
pub struct Document {
    slots: Vec<Slot>,
    free: Vec<u32>,
    body: ElementId,
    live: usize,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document containing only the `body` root.
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self {
            slots: Vec::new(),
            free: Vec::new(),
            body: ElementId { index: 0, generation: 0 },
            live: 0,
        };
        doc.body = doc.create("body");
        doc
    }

    /// The root element. Body-level drag markers are set here.
    #[must_use]
    pub fn body(&self) -> ElementId {
        self.body
    }

    /// Create a detached element. `name` becomes its primary class.
    pub fn create(&mut self, name: impl Into<String>) -> ElementId {
        let name = name.into();
        let mut classes = SmallVec::new();
        if !name.is_empty() {
            classes.push(name.clone());
        }
        let data = ElementData {
            name,
            classes,
            parent: None,
            children: Vec::new(),
            text: String::new(),
            style: Style::default(),
        };
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.data = Some(data);
            ElementId { index, generation: slot.generation }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot { generation: 0, data: Some(data) });
            ElementId { index, generation: 0 }
        }
    }

    /// Number of live elements, including `body`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    /// Always false: the body is never discarded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Check whether `id` still refers to an element.
    #[must_use]
    pub fn is_live(&self, id: ElementId) -> bool {
        self.data(id).is_some()
    }

    fn data(&self, id: ElementId) -> Option<&ElementData> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.data.as_ref()
    }

    fn data_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.data.as_mut()
    }

    fn live_data(&self, id: ElementId) -> Result<&ElementData> {
        self.data(id).ok_or(TableError::StaleElement(id))
    }

    /// Primary class (template name) of an element.
    #[must_use]
    pub fn name(&self, id: ElementId) -> Option<&str> {
        self.data(id).map(|d| d.name.as_str())
    }

    #[must_use]
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.data(id)?.parent
    }

    /// Children in visual order. Empty for a stale id.
    #[must_use]
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.data(id).map_or(&[], |d| d.children.as_slice())
    }

    /// Walk from `id` up through its visual parents, starting with `id` itself.
    pub fn ancestors(&self, id: ElementId) -> impl Iterator<Item = ElementId> + '_ {
        std::iter::successors(Some(id).filter(|&e| self.is_live(e)), move |&e| self.parent(e))
    }

    /// Check whether `node` is `ancestor` or lies beneath it.
    #[must_use]
    pub fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        self.ancestors(node).any(|e| e == ancestor)
    }

    fn check_insert(&self, parent: ElementId, child: ElementId) -> Result<()> {
        self.live_data(parent)?;
        self.live_data(child)?;
        if self.contains(child, parent) {
            return Err(TableError::HierarchyCycle { parent, child });
        }
        Ok(())
    }

    /// Append `child` as the last child of `parent`, moving it out of any
    /// previous parent.
    pub fn append_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.check_insert(parent, child)?;
        self.detach(child);
        if let Some(data) = self.data_mut(parent) {
            data.children.push(child);
        }
        if let Some(data) = self.data_mut(child) {
            data.parent = Some(parent);
        }
        Ok(())
    }

    /// Insert `child` immediately before `before`, which must be a child of
    /// `parent`. Moves `child` out of any previous parent.
    pub fn insert_before(
        &mut self,
        parent: ElementId,
        child: ElementId,
        before: ElementId,
    ) -> Result<()> {
        self.check_insert(parent, child)?;
        if self.parent(before) != Some(parent) {
            return Err(TableError::NotAChild { parent, child: before });
        }
        if before == child {
            return Ok(());
        }
        self.detach(child);
        if let Some(data) = self.data_mut(parent) {
            let pos = data
                .children
                .iter()
                .position(|&e| e == before)
                .unwrap_or(data.children.len());
            data.children.insert(pos, child);
        }
        if let Some(data) = self.data_mut(child) {
            data.parent = Some(parent);
        }
        Ok(())
    }

    /// Remove `child` from `parent`. The child stays live, unparented.
    pub fn remove_child(&mut self, parent: ElementId, child: ElementId) -> Result<()> {
        self.live_data(parent)?;
        if self.parent(child) != Some(parent) {
            return Err(TableError::NotAChild { parent, child });
        }
        self.detach(child);
        Ok(())
    }

    /// Take an element out of its parent, if it has one.
    pub fn detach(&mut self, id: ElementId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(data) = self.data_mut(parent) {
            data.children.retain(|&e| e != id);
        }
        if let Some(data) = self.data_mut(id) {
            data.parent = None;
        }
    }

    /// Detached deep copy of an element and its subtree.
    pub fn deep_clone(&mut self, id: ElementId) -> Result<ElementId> {
        let source = self.live_data(id)?.clone();
        let copy = self.create(String::new());
        if let Some(data) = self.data_mut(copy) {
            data.name = source.name;
            data.classes = source.classes;
            data.text = source.text;
            data.style = source.style;
        }
        for child in source.children {
            let child_copy = self.deep_clone(child)?;
            self.append_child(copy, child_copy)?;
        }
        Ok(copy)
    }

    /// Destroy an element and its subtree. Returns every id invalidated.
    pub fn discard(&mut self, id: ElementId) -> Vec<ElementId> {
        if !self.is_live(id) || id == self.body {
            return Vec::new();
        }
        self.detach(id);
        let mut discarded = Vec::new();
        let mut pending = vec![id];
        while let Some(next) = pending.pop() {
            let slot = &mut self.slots[next.index as usize];
            if let Some(data) = slot.data.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(next.index);
                self.live -= 1;
                pending.extend(data.children);
                discarded.push(next);
            }
        }
        discarded
    }

    /// Descendants of `root` (excluding `root`) carrying `class`, in
    /// document order.
    #[must_use]
    pub fn find_by_class(&self, root: ElementId, class: &str) -> Vec<ElementId> {
        let mut found = Vec::new();
        let mut pending: Vec<ElementId> = self.children(root).iter().rev().copied().collect();
        while let Some(next) = pending.pop() {
            if self.has_class(next, class) {
                found.push(next);
            }
            pending.extend(self.children(next).iter().rev().copied());
        }
        found
    }

    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.data(id).is_some_and(|d| d.classes.iter().any(|c| c == class))
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        if let Some(data) = self.data_mut(id) {
            if !data.classes.iter().any(|c| c == class) {
                data.classes.push(class.to_string());
            }
        }
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        if let Some(data) = self.data_mut(id) {
            data.classes.retain(|c| c != class);
        }
    }

    /// Add `class` when `on`, remove it otherwise.
    pub fn toggle_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    #[must_use]
    pub fn text(&self, id: ElementId) -> &str {
        self.data(id).map_or("", |d| d.text.as_str())
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(data) = self.data_mut(id) {
            data.text = text.into();
        }
    }

    #[must_use]
    pub fn style(&self, id: ElementId) -> Option<&Style> {
        self.data(id).map(|d| &d.style)
    }

    pub fn style_mut(&mut self, id: ElementId) -> Option<&mut Style> {
        self.data_mut(id).map(|d| &mut d.style)
    }
}
