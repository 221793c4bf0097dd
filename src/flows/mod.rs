//! Flows module - Multi-step workflows
//!
//! - paginate: fetch and merge every page of a search

pub mod paginate;
