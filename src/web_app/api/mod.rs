// web_app/api/mod.rs - API module for server-side logic
//
// This module contains database query functions and helpers
// for the web application.

pub mod db;
pub mod queries;
pub mod schema;
