// web_app/state/intent.rs - User intents and the reset rules they carry
//
// Every handler turns one intent into exactly one `ParamStore::update`, so
// fetchers never observe a half-applied change such as a new page size
// with the old page index.

use super::params::{ParamStore, QueryParams};
use super::view::{bool_param, Facet, PageSize, SortColumn, SortDirection, ViewState};
use super::view::{ORDER_BY, ORDER_DESC, PAGE, PER_PAGE, SEARCH};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent<S> {
    /// Column header click
    ToggleSort(S),
    ChangePage(u32),
    /// Changing density also returns to the first page
    ChangePageSize(PageSize),
    /// `None` clears the filter; `Some` filters and returns to the first page
    CommitSearch(Option<String>),
    /// `None` is the "both" position of the toggle group
    ToggleFacet(Facet, Option<bool>),
}

/// Apply one intent to the store. Returns whether the parameters changed.
pub fn reconcile<S: SortColumn>(store: &mut ParamStore, intent: Intent<S>) -> bool {
    tracing::debug!(?intent, "applying list intent");
    match intent {
        Intent::ToggleSort(column) => {
            let current = ViewState::<S>::decode(store.params());
            let direction = if current.sort_field == column {
                current.sort_direction.flipped()
            } else {
                SortDirection::Descending
            };
            store.update(|params| {
                params.set(ORDER_BY, column.as_param());
                params.set(ORDER_DESC, bool_param(direction.is_descending()));
            })
        }
        Intent::ChangePage(page) => store.update(|params| set_page(params, page)),
        Intent::ChangePageSize(size) => store.update(|params| {
            set_page(params, 0);
            params.set(PER_PAGE, &size.get().to_string());
        }),
        Intent::CommitSearch(None) => store.update(|params| {
            params.remove(SEARCH);
        }),
        Intent::CommitSearch(Some(query)) => store.update(|params| {
            set_page(params, 0);
            params.set(SEARCH, &query);
        }),
        Intent::ToggleFacet(facet, None) => store.update(|params| {
            params.remove(facet.key());
        }),
        Intent::ToggleFacet(facet, Some(value)) => {
            store.update(|params| params.set(facet.key(), bool_param(value)))
        }
    }
}

fn set_page(params: &mut QueryParams, page: u32) {
    params.set(PAGE, &page.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web_app::model::AuditOrderBy;

    fn view(store: &ParamStore) -> ViewState<AuditOrderBy> {
        ViewState::decode(store.params())
    }

    #[test]
    fn test_sort_toggle_on_active_column_flips() {
        let mut store = ParamStore::default();
        assert!(reconcile(&mut store, Intent::ToggleSort(AuditOrderBy::CreatedAt)));
        assert_eq!(view(&store).sort_direction, SortDirection::Ascending);
        reconcile(&mut store, Intent::ToggleSort(AuditOrderBy::CreatedAt));
        assert_eq!(view(&store).sort_direction, SortDirection::Descending);
    }

    #[test]
    fn test_sort_toggle_keeps_page() {
        let mut store = ParamStore::from_search("page=3");
        reconcile(&mut store, Intent::ToggleSort(AuditOrderBy::EndedAt));
        assert_eq!(view(&store).page_index, 3);
    }

    #[test]
    fn test_facet_toggle_keeps_page() {
        let mut store = ParamStore::from_search("page=3");
        reconcile::<AuditOrderBy>(&mut store, Intent::ToggleFacet(Facet::Active, Some(false)));
        assert_eq!(store.get("active"), Some("false"));
        assert_eq!(view(&store).page_index, 3);

        reconcile::<AuditOrderBy>(&mut store, Intent::ToggleFacet(Facet::Active, None));
        assert!(!store.params().contains_key("active"));
    }

    #[test]
    fn test_clearing_search_leaves_page_alone() {
        let mut store = ParamStore::from_search("q=ops&page=2");
        reconcile::<AuditOrderBy>(&mut store, Intent::CommitSearch(None));
        assert!(!store.params().contains_key("q"));
        assert_eq!(store.get("page"), Some("2"));
    }

    #[test]
    fn test_each_intent_is_one_version() {
        let mut store = ParamStore::from_search("page=2&per_page=20&q=x");
        let before = store.version();
        reconcile::<AuditOrderBy>(&mut store, Intent::ChangePageSize(PageSize::new(5).unwrap()));
        assert_eq!(store.version(), before + 1);
        reconcile::<AuditOrderBy>(&mut store, Intent::CommitSearch(Some("y".to_string())));
        assert_eq!(store.version(), before + 2);
    }
}
