// web_app/state/mod.rs - View-state reconciliation engine
//
// Keeps a paginated, sortable, filterable, searchable list view in sync
// with its URL query string. Compiled without any feature so it can be
// exercised by plain unit tests, with no Leptos runtime.
//
// - params: the URL-backed, versioned parameter store
// - view: typed decode/encode of the store
// - intent: user intents and their reset rules
// - fetch: last-query-wins tracking and Loading/Ready/Failed state
// - suggest: autocomplete lookups keyed by raw input
// - controller: ties the above together for one list page

pub mod controller;
pub mod fetch;
pub mod intent;
pub mod params;
pub mod suggest;
pub mod view;

pub use controller::{ListController, ListOptions, ResultTicket};
pub use fetch::{FetchError, FetchState, RequestTracker, ResultSlot, Ticket};
pub use intent::{reconcile, Intent};
pub use params::{ParamStore, QueryParams};
pub use suggest::SuggestionState;
pub use view::{Facet, FacetFilters, PageSize, SortColumn, SortDirection, ViewState};
