// web_app/pages/list_binding.rs - Wires a ListController into the page
//
// The controller is plain data; this module puts it in a signal and runs
// the three effects every list page needs:
// - URL changes (back/forward, links) are adopted into the store
// - a changed view issues a result request, answered in the background
// - changed search text issues a suggestion request
// Intents go through `dispatch`, which writes the new query string back
// to the address bar without adding a history entry.

use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_location, use_navigate};
use leptos_router::NavigateOptions;

use crate::web_app::model::{ResultPage, SuggestionQuery};
use crate::web_app::state::{
    FetchError, Intent, ListController, ListOptions, SortColumn, SuggestionState, ViewState,
};

/// Handle on one page's reactive list state
pub struct ListBinding<S: Send + Sync + 'static, T: 'static, U: 'static> {
    pub controller: RwSignal<ListController<S, T, U>>,
    /// The decoded view; only notifies on actual change
    pub view: Memo<ViewState<S>>,
    pending_url: RwSignal<Option<String>>,
}

impl<S: Send + Sync + 'static, T: 'static, U: 'static> Clone for ListBinding<S, T, U> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: Send + Sync + 'static, T: 'static, U: 'static> Copy for ListBinding<S, T, U> {}

impl<S, T, U> ListBinding<S, T, U>
where
    S: SortColumn,
    T: Clone + Send + Sync + 'static,
    U: Send + Sync + 'static,
{
    pub fn dispatch(&self, intent: Intent<S>) {
        let mut next = None;
        self.controller.update(|c| next = c.dispatch(intent));
        if next.is_some() {
            self.pending_url.set(next);
        }
    }

    pub fn set_search_input(&self, text: String) {
        self.controller.update(|c| c.set_search_input(&text));
    }

    /// Callback form of `dispatch` for component props
    pub fn intent_callback<A: 'static>(
        &self,
        intent: impl Fn(A) -> Intent<S> + Send + Sync + 'static,
    ) -> Callback<A> {
        let binding = *self;
        Callback::new(move |arg| binding.dispatch(intent(arg)))
    }
}

/// Create the controller for the current URL and start its effects.
///
/// `fetch` answers result requests, `suggest` answers suggestion requests;
/// both are usually server functions.
pub fn use_list_binding<S, T, U, F, Fut, G, GFut>(
    options: ListOptions,
    fetch: F,
    suggest: G,
) -> ListBinding<S, T, U>
where
    S: SortColumn,
    T: Clone + Send + Sync + 'static,
    U: Send + Sync + 'static,
    F: Fn(ViewState<S>) -> Fut + Clone + 'static,
    Fut: Future<Output = Result<ResultPage<T>, ServerFnError>> + 'static,
    G: Fn(SuggestionQuery) -> GFut + Clone + 'static,
    GFut: Future<Output = Result<ResultPage<U>, ServerFnError>> + 'static,
{
    let location = use_location();
    let navigate = use_navigate();

    let initial = location.search.get_untracked();
    let controller = RwSignal::new(ListController::<S, T, U>::new(&initial, options));
    let view = Memo::new(move |_| controller.with(|c| c.view().clone()));
    let search_input = Memo::new(move |_| controller.with(|c| c.search_input().to_string()));
    let pending_url = RwSignal::new(None::<String>);

    // URL -> store
    Effect::new(move |_| {
        let search = location.search.get();
        controller.maybe_update(|c| c.sync_from_url(&search));
    });

    // store -> URL
    Effect::new(move |_| {
        if let Some(query) = pending_url.get() {
            let path = location.pathname.get_untracked();
            navigate(
                &with_query(&path, &query),
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    // Result fetcher: last query wins, stale rows stay up while refreshing
    Effect::new(move |_| {
        view.track();
        let mut issued = None;
        controller.update(|c| issued = c.begin_fetch());
        let Some(ticket) = issued else {
            return;
        };

        let fetch = fetch.clone();
        spawn_local(async move {
            let outcome = fetch(ticket.key().clone()).await.map_err(FetchError::from);
            controller.update(|c| {
                c.complete_fetch(ticket, outcome);
            });
        });
    });

    // Suggestion fetcher, keyed by the raw input only
    Effect::new(move |_| {
        search_input.track();
        let mut issued = None;
        controller.update(|c| issued = c.begin_suggestions());
        let Some(ticket) = issued else {
            return;
        };

        let request = SuggestionState::<U>::request(&ticket);
        let suggest = suggest.clone();
        spawn_local(async move {
            let outcome = suggest(request).await.map_err(FetchError::from);
            controller.update(|c| {
                c.complete_suggestions(ticket, outcome);
            });
        });
    });

    ListBinding {
        controller,
        view,
        pending_url,
    }
}

fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}
