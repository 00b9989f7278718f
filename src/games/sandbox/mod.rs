//! A free-form card sandbox for exercising the table.
//!
//! One open area and one pile:
//! - Cards can be dragged anywhere; clicking a card flips it
//! - Dropping a card on a card in the area makes a collapsible group of the two
//! - Dropping a card on a grouped card joins that group
//! - Double-clicking a group dissolves it
//! - The pile offers its top card for dragging; double-clicking shuffles it

mod game;

pub use game::{
    Sandbox, SandboxArea, SandboxBuilder, SandboxCard, SandboxGroup, SandboxPile, FLIPPED,
};
