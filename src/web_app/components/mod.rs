// web_app/components/mod.rs - UI components module
//
// This module contains all Leptos UI components for the application.
//
// Structure:
// - common.rs: Reusable atomic components (Loading, EntityLink, Badge, etc.)
// - search.rs: The search box with its suggestion dropdown
// - table.rs: Sort headers, pagination, and facet toggles for list tables

pub mod common;
pub mod search;
pub mod table;

// Re-export commonly used components for convenience
pub use common::*;
pub use search::*;
pub use table::*;
