//! # card-table
//!
//! Headless core of an interactive card table: components placed in ordered
//! containers, mirrored into a visual element tree, and moved around by a
//! pointer-driven drag engine.
//!
//! ## Design Principles
//!
//! 1. **Two trees, one truth**: Every location keeps an ordered list of its
//!    children and the element tree always shows the same order. Changes are
//!    atomic: a refused `add` or `remove` leaves both untouched.
//!
//! 2. **Closed variants, open behaviour**: Areas, stacks, groups and cards
//!    are a fixed set; games customise them through the `Component` trait.
//!
//! 3. **Queries never mutate**: Drag and drop questions take `&Table`. A drop
//!    returns a commit closure that runs only when the pointer is released.
//!
//! ## Architecture
//!
//! - **Arena ownership**: A `Table` owns every component and the `Document`
//!   holding their elements. Components refer to each other by id.
//!
//! - **Weak association**: The registry maps live elements to components;
//!   a discarded element never resolves again.
//!
//! ## Modules
//!
//! - `core`: Element tree, errors, RNG, stack configuration
//! - `components`: Component ids, variants, behaviour trait, registry
//! - `zones`: The table and its location protocol (area, stack, group)
//! - `cards`: Card creation and stock card behaviours
//! - `template`: Prototype elements and deferred loading
//! - `interaction`: Pointer events and the drag engine
//! - `games`: Ready-made tables

pub mod core;
pub mod components;
pub mod zones;
pub mod cards;
pub mod template;
pub mod interaction;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Document, ElementId, Style,
    StackConfig,
    Result, TableError,
    TableRng, TableRngState,
};

pub use crate::components::{
    Commit, Component, ComponentId, ComponentKind, ComponentRegistry,
    DragSet, GroupPolicy, Inert, StackParts,
};

pub use crate::zones::{LocationHooks, Position, Table};

pub use crate::cards::{Draggable, Pinned};

pub use crate::template::{Present, TemplateSet};

pub use crate::interaction::{
    DragEngine, DragState, PointerEvent, PointerKind, Point,
    DRAGGING, DROP_OK, DROP_TARGET,
};
