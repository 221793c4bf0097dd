//! Backends module - Remote search API integrations
//!
//! Provides:
//! - grep_app: paged client for the grep.app search API

pub mod grep_app;
