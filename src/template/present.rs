//! One-shot values that become available later.
//!
//! Resources such as templates are loaded once, before the table is built.
//! Reading a `Present` before it resolves is an error that is distinct from
//! a load that failed.

use crate::core::{Result, TableError};

#[derive(Clone, Debug)]
enum State<T> {
    Pending,
    Ready(T),
    Failed(String),
}

/// A value that is resolved or failed exactly once.
///
/// ```
/// use card_table::core::TableError;
/// use card_table::template::Present;
///
/// let mut templates: Present<u32> = Present::pending();
/// assert_eq!(templates.get(), Err(TableError::NeverResolved));
/// templates.resolve(3);
/// assert_eq!(templates.get(), Ok(&3));
/// ```
#[derive(Clone, Debug)]
pub struct Present<T> {
    state: State<T>,
}

impl<T> Default for Present<T> {
    fn default() -> Self {
        Self::pending()
    }
}

impl<T> Present<T> {
    /// Not yet resolved.
    #[must_use]
    pub fn pending() -> Self {
        Self { state: State::Pending }
    }

    /// Already resolved with `value`.
    #[must_use]
    pub fn ready(value: T) -> Self {
        Self { state: State::Ready(value) }
    }

    /// Resolve with `value`. Ignored once settled.
    pub fn resolve(&mut self, value: T) -> bool {
        if !matches!(self.state, State::Pending) {
            return false;
        }
        self.state = State::Ready(value);
        true
    }

    /// Record a load failure. Ignored once settled.
    pub fn fail(&mut self, reason: impl Into<String>) -> bool {
        if !matches!(self.state, State::Pending) {
            return false;
        }
        self.state = State::Failed(reason.into());
        true
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        matches!(self.state, State::Ready(_))
    }

    /// The resolved value.
    pub fn get(&self) -> Result<&T> {
        match &self.state {
            State::Ready(value) => Ok(value),
            State::Pending => Err(TableError::NeverResolved),
            State::Failed(reason) => Err(TableError::LoadFailed(reason.clone())),
        }
    }
}
