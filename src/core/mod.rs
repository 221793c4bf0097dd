//! Core module - Contains the fundamental data structures and utilities
//!
//! This module provides:
//! - Search options, page requests and page results
//! - The ordered hit store that accumulates results across pages
//! - Snippet parsing (HTML table fragment -> highlighted lines)
//! - Terminal styling and rendering (text/json)
//! - Error types

pub mod error;
pub mod hits;
pub mod model;
pub mod render;
pub mod snippet;
pub mod style;
pub mod util;
