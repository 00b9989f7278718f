//! Component capabilities.
//!
//! Every interactive object on the table is a component: it owns one element
//! and answers the engine's questions (can you be dragged, what happens if
//! something is dropped on you). The structural capabilities are fixed by the
//! variant tag:
//!
//! | Kind               | Target | Location |
//! |--------------------|--------|----------|
//! | `Area`             |        | yes      |
//! | `Stack`            |        | yes      |
//! | `Group`            | yes    | yes      |
//! | `Card`             | yes    |          |
//!
//! Game-specific behaviour is supplied through the [`Component`] trait, whose
//! methods all have inert defaults.
//!
//! ## Key Types
//!
//! - `ComponentId`: Handle into a [`Table`]
//! - `ComponentKind`: Closed set of variants
//! - `Component`: Behaviour hooks (click, drag, drop, vetoes)
//! - `ComponentRegistry`: Element to component lookup

pub mod registry;

pub use registry::ComponentRegistry;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{ElementId, StackConfig};
use crate::zones::Table;

/// Handle of a component in a [`Table`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

impl ComponentId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Component({})", self.0)
    }
}

/// Sub-elements of a stack, resolved once at construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StackParts {
    /// Slot showing a copy of the top card. `None` when face-down.
    pub top: Option<ElementId>,
    /// Holds the child elements. Detached from the stack when not inspectable.
    pub contents: ElementId,
    /// Card count indicator. `None` when disabled.
    pub height: Option<ElementId>,
    pub config: StackConfig,
}

/// Whether a group dissolves itself once it is down to one child.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroupPolicy {
    /// Only collapses when asked to.
    Manual,
    /// Collapses after any removal that leaves at most one child.
    Collapsible,
}

/// The closed set of component variants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ComponentKind {
    /// Plain ordered container (a region of the table, a hand).
    Area,
    /// Pile with optional top-card peek, contents and height display.
    Stack(StackParts),
    /// Nestable container of cards.
    Group(GroupPolicy),
    /// Leaf object.
    Card,
}

impl ComponentKind {
    /// Can this component be owned by a location?
    #[must_use]
    pub fn is_target(&self) -> bool {
        matches!(self, Self::Group(_) | Self::Card)
    }

    /// Does this component own an ordered list of targets?
    #[must_use]
    pub fn is_location(&self) -> bool {
        !matches!(self, Self::Card)
    }

    #[must_use]
    pub fn is_card(&self) -> bool {
        matches!(self, Self::Card)
    }

    #[must_use]
    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }

    /// Stack sub-elements, if this is a stack.
    #[must_use]
    pub fn stack_parts(&self) -> Option<&StackParts> {
        match self {
            Self::Stack(parts) => Some(parts),
            _ => None,
        }
    }

    /// Short variant name for diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Area => "area",
            Self::Stack(_) => "stack",
            Self::Group(GroupPolicy::Manual) => "group",
            Self::Group(GroupPolicy::Collapsible) => "collapsible-group",
            Self::Card => "card",
        }
    }
}

/// Deferred action returned by a drop query, run only when the drag is
/// released over the component that produced it.
pub type Commit = Box<dyn FnOnce(&mut Table)>;

/// Components offered for dragging. Almost always zero or one.
pub type DragSet = SmallVec<[ComponentId; 4]>;

/// Behaviour hooks for a component.
///
/// Queries take `&Table` and therefore cannot change the tree; anything a
/// drop should do goes into the returned [`Commit`]. Click handlers run with
/// `&mut Table` and return `true` when they handled the event, which stops
/// the engine from asking the component's visual ancestors.
///
/// ```
/// use card_table::components::{Commit, Component, ComponentId, DragSet};
/// use card_table::zones::Table;
/// use smallvec::smallvec;
///
/// struct Token;
///
/// impl Component for Token {
///     fn drag(&self, _table: &Table, me: ComponentId) -> DragSet {
///         smallvec![me]
///     }
/// }
/// ```
pub trait Component {
    /// Single click. Return `true` if handled.
    fn click(&self, _table: &mut Table, _me: ComponentId) -> bool {
        false
    }

    /// Double click. Return `true` if handled.
    fn dbl_click(&self, _table: &mut Table, _me: ComponentId) -> bool {
        false
    }

    /// Components to pick up when a drag starts on this component.
    /// Empty means "not draggable here", and the engine keeps walking up.
    fn drag(&self, _table: &Table, _me: ComponentId) -> DragSet {
        DragSet::new()
    }

    /// What should happen if `dragging` were released over this component.
    /// `None` rejects the drop here.
    fn drop_action(
        &self,
        _table: &Table,
        _me: ComponentId,
        _dragging: &[ComponentId],
    ) -> Option<Commit> {
        None
    }

    /// Veto for targets: may this component move to `location`
    /// (`None` means removal)?
    fn can_set_location(
        &self,
        _table: &Table,
        _me: ComponentId,
        _location: Option<ComponentId>,
    ) -> bool {
        true
    }

    /// Extra admission policy for locations, checked after the variant's own.
    fn can_add(
        &self,
        _table: &Table,
        _me: ComponentId,
        _target: ComponentId,
        _index: usize,
    ) -> bool {
        true
    }

    /// Extra removal policy for locations, checked after the variant's own.
    fn can_remove(&self, _table: &Table, _me: ComponentId, _target: ComponentId) -> bool {
        true
    }

    /// Runs once each time `target` leaves this location, before the
    /// variant's own clean-up.
    fn post_remove(&self, _table: &mut Table, _me: ComponentId, _target: ComponentId) {}
}

/// Behaviour with every hook left at its default.
#[derive(Clone, Copy, Debug, Default)]
pub struct Inert;

impl Component for Inert {}
