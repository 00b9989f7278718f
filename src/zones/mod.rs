//! Locations and the ordered-container protocol.
//!
//! ## Key Types
//!
//! - `Table`: Component arena owning the element tree and registry
//! - `Position`: Insertion position for `Table::add`
//! - `LocationHooks`: Per-variant visual and policy strategy
//!
//! Variants:
//! - **Area**: vanilla ordered container
//! - **Stack**: children in an inner `contents` element, with top-card peek
//!   and height display
//! - **Group**: admits only cards; may collapse into its own location

mod group;
mod hooks;
mod location;
mod stack;
mod table;

pub use hooks::LocationHooks;
pub use location::Position;
pub use table::Table;
