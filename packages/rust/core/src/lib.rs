//! Core pipeline orchestration for vaultsite.
//!
//! This crate ties together the paper fetcher, markdown rendering and the
//! vault link graph into the end-to-end `build_site` workflow.

pub mod assembler;
pub mod pipeline;
pub mod viewer;
