// tests/reconcile_tests.rs - Intents and their reset rules
//
// Each intent must land as exactly one store update, and only the intents
// that can strand the user on an out-of-range page reset the page index.

use role_audit_web::web_app::model::AuditOrderBy;
use role_audit_web::web_app::state::{
    reconcile, Facet, Intent, PageSize, ParamStore, SortDirection, ViewState,
};

fn store(search: &str) -> ParamStore {
    ParamStore::from_search(search)
}

fn view(store: &ParamStore) -> ViewState<AuditOrderBy> {
    ViewState::decode(store.params())
}

fn apply(store: &mut ParamStore, intent: Intent<AuditOrderBy>) -> bool {
    reconcile(store, intent)
}

fn size(rows: u32) -> PageSize {
    PageSize::new(rows).unwrap()
}

#[test]
fn test_sort_toggle_is_a_two_cycle() {
    for &column in &[AuditOrderBy::Moniker, AuditOrderBy::CreatedAt, AuditOrderBy::EndedAt] {
        let mut store = store("");
        apply(&mut store, Intent::ToggleSort(column));
        let first = view(&store).sort_direction;
        apply(&mut store, Intent::ToggleSort(column));
        apply(&mut store, Intent::ToggleSort(column));
        assert_eq!(view(&store).sort_direction, first, "column {:?}", column);
    }

    // From the default, toggling the active column twice restores it.
    let mut store = store("");
    let original = view(&store).sort_direction;
    apply(&mut store, Intent::ToggleSort(AuditOrderBy::CreatedAt));
    apply(&mut store, Intent::ToggleSort(AuditOrderBy::CreatedAt));
    assert_eq!(view(&store).sort_direction, original);
}

#[test]
fn test_sort_toggle_on_new_column_starts_descending() {
    let starts = ["", "order_by=moniker&order_desc=false", "order_by=moniker&order_desc=true"];
    for search in starts {
        let mut store = store(search);
        apply(&mut store, Intent::ToggleSort(AuditOrderBy::EndedAt));
        let view = view(&store);
        assert_eq!(view.sort_field, AuditOrderBy::EndedAt, "from {}", search);
        assert_eq!(view.sort_direction, SortDirection::Descending, "from {}", search);
    }
}

#[test]
fn test_sort_toggle_keeps_page() {
    let mut store = store("page=3");
    apply(&mut store, Intent::ToggleSort(AuditOrderBy::Moniker));
    assert_eq!(view(&store).page_index, 3);
}

#[test]
fn test_page_change_touches_only_page() {
    let mut store = store("q=eng&active=true&per_page=10");
    apply(&mut store, Intent::ChangePage(2));
    let view = view(&store);
    assert_eq!(view.page_index, 2);
    assert_eq!(view.search_query.as_deref(), Some("eng"));
    assert_eq!(view.facets.get(Facet::Active), Some(true));
    assert_eq!(view.page_size.get(), 10);
}

#[test]
fn test_page_size_change_always_resets_page() {
    for page in [0, 1, 2, 7, 250] {
        for rows in PageSize::ALLOWED {
            let mut store = store(&format!("page={page}&per_page=20"));
            apply(&mut store, Intent::ChangePageSize(size(rows)));
            let view = view(&store);
            assert_eq!(view.page_index, 0, "page {} -> size {}", page, rows);
            assert_eq!(view.page_size.get(), rows);
        }
    }
}

#[test]
fn test_page_size_scenario_is_one_update() {
    let mut store = store("page=2&per_page=20");
    let before = store.version();

    assert!(apply(&mut store, Intent::ChangePageSize(size(10))));

    assert_eq!(store.version(), before + 1);
    let view = view(&store);
    assert_eq!(view.page_index, 0);
    assert_eq!(view.page_size.get(), 10);
}

#[test]
fn test_search_commit_none_removes_key() {
    let mut store = store("q=eng&page=2");
    apply(&mut store, Intent::CommitSearch(None));
    assert!(!store.params().contains_key("q"));
    assert_eq!(view(&store).search_query, None);
    // Clearing does not move the page.
    assert_eq!(view(&store).page_index, 2);
}

#[test]
fn test_search_commit_empty_string_is_kept() {
    let mut store = store("page=2");
    apply(&mut store, Intent::CommitSearch(Some(String::new())));
    assert!(store.params().contains_key("q"));
    assert_eq!(store.get("q"), Some(""));
    assert_eq!(view(&store).search_query, Some(String::new()));
    assert_eq!(view(&store).page_index, 0);
}

#[test]
fn test_search_commit_resets_page() {
    let mut store = store("page=5");
    apply(&mut store, Intent::CommitSearch(Some("eng".to_string())));
    assert_eq!(view(&store).page_index, 0);
    assert_eq!(view(&store).search_query.as_deref(), Some("eng"));
}

#[test]
fn test_facet_toggle_tri_state() {
    let mut store = store("page=4");
    for value in [Some(true), Some(false), None] {
        apply(&mut store, Intent::ToggleFacet(Facet::Owner, value));
        assert_eq!(view(&store).facets.get(Facet::Owner), value);
        assert_eq!(view(&store).page_index, 4);
    }
    assert!(!store.params().contains_key("owner"));
}

#[test]
fn test_noop_intent_does_not_bump_version() {
    let mut store = store("page=1");
    let before = store.version();
    assert!(!apply(&mut store, Intent::ChangePage(1)));
    assert!(!apply(&mut store, Intent::CommitSearch(None)));
    assert!(!apply(&mut store, Intent::ToggleFacet(Facet::Active, None)));
    assert_eq!(store.version(), before);
}

#[test]
fn test_unrelated_parameters_survive() {
    let mut store = store("utm_source=mail&page=3");
    apply(&mut store, Intent::ChangePageSize(size(5)));
    assert_eq!(store.get("utm_source"), Some("mail"));
}
