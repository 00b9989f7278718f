//! Ready-made tables built from the component library.

pub mod sandbox;
