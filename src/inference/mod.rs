//! Inference layer primitives.
//!
//! Each step inspects an immutable view of the live statements and stages
//! what it found; the knowledge base applies the staged results afterwards.
//! Nothing here mutates a statement while iterating over the collection.

mod prune;
mod resolution;
mod subsume;

pub use prune::prune;
pub use resolution::{scan, Resolution};
pub use subsume::{derive, Subsumption};
