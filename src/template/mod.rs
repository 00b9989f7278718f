//! Element templates.
//!
//! Components are built over elements cloned from prototypes. A template set
//! is read from a root element whose children are the prototypes, keyed by
//! their primary class name. Loading happens before any component exists;
//! [`Present`] carries the loaded set to the code that builds the table.

mod present;

pub use present::Present;

use rustc_hash::FxHashMap;

use crate::core::{Document, ElementId, Result, TableError};

/// Prototype elements by name.
///
/// ```
/// use card_table::core::Document;
/// use card_table::template::TemplateSet;
///
/// let mut doc = Document::new();
/// let templates = TemplateSet::standard(&mut doc).unwrap();
/// let stack = templates.instantiate(&mut doc, "stack").unwrap();
/// assert_eq!(doc.find_by_class(stack, "top").len(), 1);
/// assert!(templates.instantiate(&mut doc, "dragon").is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TemplateSet {
    prototypes: FxHashMap<String, ElementId>,
}

impl TemplateSet {
    /// Index the children of `root` by primary class name. A later child
    /// with the same name replaces an earlier one.
    #[must_use]
    pub fn from_element(doc: &Document, root: ElementId) -> Self {
        let prototypes = doc
            .children(root)
            .iter()
            .filter_map(|&child| doc.name(child).map(|name| (name.to_string(), child)))
            .collect();
        Self { prototypes }
    }

    /// The built-in prototypes: `card`, `group`, `area`, and `stack` with its
    /// `top`, `contents` and `height` parts.
    pub fn standard(doc: &mut Document) -> Result<Self> {
        let root = doc.create("templates");
        for name in ["card", "group", "area"] {
            let e = doc.create(name);
            doc.append_child(root, e)?;
        }
        let stack = doc.create("stack");
        for part in ["top", "contents", "height"] {
            let e = doc.create(part);
            doc.append_child(stack, e)?;
        }
        doc.append_child(root, stack)?;
        Ok(Self::from_element(doc, root))
    }

    /// Deep-clone the prototype called `name`.
    pub fn instantiate(&self, doc: &mut Document, name: &str) -> Result<ElementId> {
        let prototype = self
            .prototypes
            .get(name)
            .copied()
            .ok_or_else(|| TableError::UnknownTemplate(name.to_string()))?;
        doc.deep_clone(prototype)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.prototypes.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prototypes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prototypes.is_empty()
    }
}
