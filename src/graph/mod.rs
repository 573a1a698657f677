//! Graph construction and representation
//!
//! This module provides efficient graph building and storage
//! for the unit similarity graph, and the centrality ranker on top of it.

pub mod builder;
pub mod csr;
pub mod ranker;
