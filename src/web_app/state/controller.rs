// web_app/state/controller.rs - One list page's reconciliation engine
//
// Owns the parameter store, the decoded view, and both fetchers. The page
// component feeds it URL changes, user intents, and fetch responses; it
// answers with the query string to write back, the requests to issue, and
// whether to redirect.

use super::fetch::{FetchError, FetchState, ResultSlot, Ticket};
use super::intent::{reconcile, Intent};
use super::params::ParamStore;
use super::suggest::SuggestionState;
use super::view::{SortColumn, ViewState};
use crate::web_app::model::ResultPage;

/// Per-page behavior switches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Jump straight to the detail view when a committed search matches once.
    pub redirect_single_match: bool,
}

impl ListOptions {
    pub fn role_list() -> Self {
        ListOptions {
            redirect_single_match: true,
        }
    }

    pub fn role_audit() -> Self {
        ListOptions {
            redirect_single_match: false,
        }
    }
}

pub type ResultTicket<S> = Ticket<ViewState<S>>;

/// `S` is the sort column set, `T` the row type, `U` the suggestion type.
#[derive(Clone, Debug)]
pub struct ListController<S, T, U = T> {
    store: ParamStore,
    view: ViewState<S>,
    options: ListOptions,
    results: ResultSlot<ViewState<S>, ResultPage<T>>,
    suggestions: SuggestionState<U>,
    redirected: Option<u64>,
}

impl<S: SortColumn, T: Clone, U> ListController<S, T, U> {
    pub fn new(search: &str, options: ListOptions) -> Self {
        let store = ParamStore::from_search(search);
        let view = ViewState::decode(store.params());
        let mut suggestions = SuggestionState::new();
        suggestions.seed(view.search_query.as_deref());
        ListController {
            store,
            view,
            options,
            results: ResultSlot::new(),
            suggestions,
            redirected: None,
        }
    }

    pub fn view(&self) -> &ViewState<S> {
        &self.view
    }

    pub fn store(&self) -> &ParamStore {
        &self.store
    }

    pub fn options(&self) -> ListOptions {
        self.options
    }

    pub fn query_string(&self) -> String {
        self.store.to_query_string()
    }

    /// Apply a user intent. Returns the new query string to write to the
    /// URL (replacing the history entry), or `None` if nothing changed.
    pub fn dispatch(&mut self, intent: Intent<S>) -> Option<String> {
        if !reconcile(&mut self.store, intent) {
            return None;
        }
        self.rederive();
        Some(self.store.to_query_string())
    }

    /// Adopt a URL-driven change. Returns whether the view may have changed.
    pub fn sync_from_url(&mut self, search: &str) -> bool {
        if !self.store.sync_from_url(search) {
            return false;
        }
        self.rederive();
        self.suggestions.seed(self.view.search_query.as_deref());
        true
    }

    fn rederive(&mut self) {
        self.view = ViewState::decode(self.store.params());
    }

    /// Ticket for the result request the current view needs, if it has not
    /// been issued yet.
    pub fn begin_fetch(&mut self) -> Option<ResultTicket<S>> {
        self.results.begin(self.view.clone())
    }

    pub fn complete_fetch(
        &mut self,
        ticket: ResultTicket<S>,
        outcome: Result<ResultPage<T>, FetchError>,
    ) -> bool {
        self.results.complete(ticket, outcome)
    }

    pub fn results(&self) -> &FetchState<ResultPage<T>> {
        self.results.state()
    }

    pub fn rows(&self) -> &[T] {
        self.results
            .state()
            .ready()
            .map(|page| page.results.as_slice())
            .unwrap_or_default()
    }

    pub fn total(&self) -> u64 {
        self.results.state().ready().map_or(0, |page| page.total)
    }

    pub fn is_refreshing(&self) -> bool {
        self.results.is_refreshing()
    }

    /// Blank rows that keep the table height stable on a short last page.
    pub fn filler_rows(&self) -> usize {
        (self.view.page_size.get() as usize).saturating_sub(self.rows().len())
    }

    pub fn search_input(&self) -> &str {
        self.suggestions.input()
    }

    pub fn set_search_input(&mut self, text: &str) {
        self.suggestions.set_input(text);
    }

    pub fn begin_suggestions(&mut self) -> Option<Ticket<String>> {
        self.suggestions.begin()
    }

    pub fn complete_suggestions(
        &mut self,
        ticket: Ticket<String>,
        outcome: Result<ResultPage<U>, FetchError>,
    ) -> bool {
        self.suggestions.complete(ticket, outcome)
    }

    pub fn suggestions(&self) -> &[U] {
        self.suggestions.options()
    }

    /// The single matching row to redirect to, at most once per response.
    ///
    /// Checked against the current view, so a response that arrives after
    /// the search was cleared or changed never redirects.
    pub fn take_redirect(&mut self) -> Option<T> {
        if !self.options.redirect_single_match || self.view.search_query.is_none() {
            return None;
        }
        let loaded = self.results.loaded()?;
        if loaded.key() != &self.view || self.redirected == Some(loaded.id()) {
            return None;
        }
        let target = self.results.state().ready()?.single()?.clone();
        self.redirected = Some(loaded.id());
        tracing::info!(query = ?self.view.search_query, "single search match, redirecting");
        Some(target)
    }
}
