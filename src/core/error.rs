//! Error types for table construction and element tree manipulation.
//!
//! Policy rejections (a location refusing a card, a card refusing to move)
//! are *not* errors: those operations return `false`. `TableError` covers
//! wiring mistakes that should halt startup, and tree operations that would
//! corrupt the element hierarchy.

use thiserror::Error;

use super::element::ElementId;

/// Unified result type for the crate.
pub type Result<T> = std::result::Result<T, TableError>;

/// Errors surfaced by the element tree, constructors and resource loading.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("missing expected child `{0}`")]
    MissingChild(String),
    #[error("ambiguous child `{class}` ({count} matches)")]
    AmbiguousChild { class: String, count: usize },
    #[error("unknown component {0}")]
    UnknownComponent(u32),
    #[error("{0} has been discarded")]
    StaleElement(ElementId),
    #[error("{child} is not a child of {parent}")]
    NotAChild { parent: ElementId, child: ElementId },
    #[error("inserting {child} under {parent} would create a cycle")]
    HierarchyCycle { parent: ElementId, child: ElementId },
    #[error("no such template: `{0}`")]
    UnknownTemplate(String),
    #[error("never resolved")]
    NeverResolved,
    #[error("load failed: {0}")]
    LoadFailed(String),
}
