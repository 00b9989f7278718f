//! Core types: element identity and tree, configuration, errors, RNG.
//!
//! Nothing here knows about cards or containers. The element tree is the
//! visual projection that the container layer keeps in sync.

pub mod element;
pub mod config;
pub mod error;
pub mod rng;

pub use element::{Document, ElementId, Style};
pub use config::StackConfig;
pub use error::{Result, TableError};
pub use rng::{TableRng, TableRngState};
