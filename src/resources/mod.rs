//! Filesystem primitives used by the link engine.
//!
//! [`symlink::SymlinkResource`] inspects and creates a single link;
//! [`helpers::fs`] holds the directory, move, and removal helpers shared by
//! the classifier and the engine.
pub mod helpers;
pub mod symlink;

pub use symlink::{Occupant, SymlinkResource};
