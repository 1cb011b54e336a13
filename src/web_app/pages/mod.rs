// web_app/pages/mod.rs - Page components module
//
// This module contains page-level Leptos components:
// - ListRolesPage: Searchable list of every role
// - RoleAuditPage: One role's membership history
//
// Both pages drive their tables through `list_binding`.

pub mod list_binding;
pub mod role_audit;
pub mod roles;

// Re-export page components
pub use role_audit::RoleAuditPage;
pub use roles::ListRolesPage;
