//! Construction-time configuration.
//!
//! A stack is configured once, when it is built. Each disabled flag removes
//! the matching sub-element from the stack's element entirely rather than
//! hiding it, so a stylesheet never has to know which options were chosen.

use serde::{Deserialize, Serialize};

/// Rendering options for a card stack.
///
/// ```
/// use card_table::core::StackConfig;
///
/// let deck = StackConfig::new().face_down().sealed();
/// assert!(!deck.face_up);
/// assert!(!deck.inspectable);
/// assert!(deck.show_height);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackConfig {
    /// Show a copy of the top card in the stack's "top" slot.
    pub face_up: bool,

    /// Keep the "contents" element in the stack so players can look through it.
    pub inspectable: bool,

    /// Keep the "height" element, which shows how many cards are in the stack.
    pub show_height: bool,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            face_up: true,
            inspectable: true,
            show_height: true,
        }
    }
}

impl StackConfig {
    /// All display options enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hide the top card (like a draw pile).
    #[must_use]
    pub fn face_down(mut self) -> Self {
        self.face_up = false;
        self
    }

    /// Prevent inspecting the contents.
    #[must_use]
    pub fn sealed(mut self) -> Self {
        self.inspectable = false;
        self
    }

    /// Drop the height indicator.
    #[must_use]
    pub fn without_height(mut self) -> Self {
        self.show_height = false;
        self
    }
}
