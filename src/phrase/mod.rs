//! Phrase extraction components
//!
//! This module provides noun phrase detection over annotated tokens and the
//! document-level keyphrase set.

pub mod chunker;
pub mod keyphrases;
