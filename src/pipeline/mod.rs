//! Pipeline orchestration
//!
//! The runner composes the stages, the observer hooks into stage
//! boundaries, artifacts carry the public result, and validation checks a
//! configuration before anything is compiled.

pub mod artifacts;
pub mod observer;
pub mod runner;
pub mod validation;
