// web_app/app.rs - Root application component
//
// This is the entry point for the Leptos application.
// It sets up routing and the component tree.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;

use crate::web_app::components::NotFoundNotice;
use crate::web_app::pages::{ListRolesPage, RoleAuditPage};

/// Root application component
///
/// Sets up:
/// - Meta tags
/// - Router with the role list and role audit routes
#[component]
pub fn App() -> impl IntoView {
    // Provide meta context for <Title>, <Meta>, etc.
    provide_meta_context();

    view! {
        <Title text="Role Audit" />
        <Meta name="description" content="Browse roles and their membership history" />
        <Meta name="viewport" content="width=device-width, initial-scale=1" />

        <Stylesheet id="leptos" href="/pkg/role_audit_web.css" />

        <Router>
            <main class="min-h-screen bg-gray-50 font-sans text-gray-900">
                <Routes fallback=|| view! { <NotFoundNotice /> }>
                    <Route path=path!("/") view=ListRolesPage />
                    <Route path=path!("/roles") view=ListRolesPage />
                    <Route path=path!("/roles/:id") view=RoleAuditPage />
                    <Route path=path!("/roles/:id/audit") view=RoleAuditPage />
                </Routes>
            </main>
        </Router>
    }
}
