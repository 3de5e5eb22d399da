//! Weft Graph Storage
//!
//! This crate provides the in-memory atom store with indexed access:
//! - Node and link storage with structural deduplication
//! - Type index: Find atoms by type
//! - Incoming index: Find links that contain an atom
//! - Truth value storage

mod graph;
mod index;

pub use graph::*;
