// lib.rs - Root module for the role_audit_web library
//
// The library holds the whole web application. The view-state engine and
// the shared model compile without features; the Leptos UI, server
// functions, and database layer are gated behind `ssr` / `hydrate`.

pub mod web_app;

/// WASM entry point: hydrate the server-rendered markup
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    leptos::mount::hydrate_body(web_app::App);
}
