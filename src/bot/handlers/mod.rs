//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for categories, product types, staff, and model numbers
pub mod autocomplete;
