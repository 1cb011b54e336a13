// tests/fetch_coordination_tests.rs - Last-query-wins and stale-while-revalidate
//
// Responses are completed by hand in whatever order a slow network might
// deliver them; the controller must always show the rows for the newest
// request and never blank a table that has already shown data.

use role_audit_web::web_app::model::{AuditOrderBy, ResultPage};
use role_audit_web::web_app::state::{
    FetchError, FetchState, Intent, ListController, ListOptions, RequestTracker, ResultSlot,
};

type Controller = ListController<AuditOrderBy, String>;

fn page(rows: &[&str], total: u64) -> ResultPage<String> {
    ResultPage {
        results: rows.iter().map(|r| r.to_string()).collect(),
        total,
    }
}

fn audit_controller(search: &str) -> Controller {
    ListController::new(search, ListOptions::role_audit())
}

#[test]
fn test_out_of_order_responses_show_latest_page() {
    let mut controller = audit_controller("");
    let first = controller.begin_fetch().expect("page 0 request");
    assert_eq!(first.key().page_index, 0);

    controller.dispatch(Intent::ChangePage(1));
    let second = controller.begin_fetch().expect("page 1 request");
    assert_eq!(second.key().page_index, 1);

    assert!(controller.complete_fetch(second, Ok(page(&["row-21", "row-22"], 22))));
    assert!(!controller.complete_fetch(first, Ok(page(&["row-1", "row-2"], 22))));

    assert_eq!(controller.rows(), ["row-21".to_string(), "row-22".to_string()]);
    assert_eq!(controller.view().page_index, 1);
}

#[test]
fn test_stale_response_before_current_is_ignored() {
    let mut controller = audit_controller("");
    let first = controller.begin_fetch().unwrap();
    controller.dispatch(Intent::ChangePage(1));
    let second = controller.begin_fetch().unwrap();

    // The older response lands first and is dropped; still loading.
    assert!(!controller.complete_fetch(first, Ok(page(&["row-1"], 22))));
    assert!(controller.results().is_loading());

    controller.complete_fetch(second, Ok(page(&["row-21"], 22)));
    assert_eq!(controller.rows(), ["row-21".to_string()]);
}

#[test]
fn test_loading_only_on_first_load() {
    let mut controller = audit_controller("");
    assert!(matches!(controller.results(), FetchState::Loading));

    let ticket = controller.begin_fetch().unwrap();
    assert!(controller.results().is_loading());
    controller.complete_fetch(ticket, Ok(page(&["a", "b"], 30)));
    assert!(!controller.results().is_loading());

    // A new view keeps the old rows on screen while its request is out.
    controller.dispatch(Intent::ChangePage(1));
    let ticket = controller.begin_fetch().unwrap();
    assert!(!controller.results().is_loading());
    assert!(controller.is_refreshing());
    assert_eq!(controller.rows().len(), 2);
    assert_eq!(controller.total(), 30);

    controller.complete_fetch(ticket, Ok(page(&["c"], 30)));
    assert!(!controller.is_refreshing());
    assert_eq!(controller.rows(), ["c".to_string()]);
}

#[test]
fn test_failure_is_distinct_from_loading_and_empty() {
    let mut controller = audit_controller("");
    let ticket = controller.begin_fetch().unwrap();
    controller.complete_fetch(ticket, Err(FetchError::Server("boom".to_string())));

    assert!(!controller.results().is_loading());
    assert_eq!(
        controller.results().error(),
        Some(&FetchError::Server("boom".to_string()))
    );
    assert!(controller.rows().is_empty());

    // The next view starts from Loading again rather than showing the error.
    controller.dispatch(Intent::ChangePage(1));
    controller.begin_fetch().unwrap();
    assert!(controller.results().is_loading());

    let mut empty = audit_controller("");
    let ticket = empty.begin_fetch().unwrap();
    empty.complete_fetch(ticket, Ok(page(&[], 0)));
    assert!(empty.results().ready().is_some());
    assert!(empty.results().error().is_none());
}

#[test]
fn test_same_view_is_not_refetched() {
    let mut controller = audit_controller("page=0&per_page=20");
    assert!(controller.begin_fetch().is_some());

    // No-op intent and a differently spelled URL for the same view.
    assert_eq!(controller.dispatch(Intent::ChangePage(0)), None);
    controller.sync_from_url("per_page=20&page=0");
    assert!(controller.begin_fetch().is_none());
}

#[test]
fn test_returning_to_earlier_view_issues_new_request() {
    let mut controller = audit_controller("");
    let first = controller.begin_fetch().unwrap();
    controller.dispatch(Intent::ChangePage(1));
    let _second = controller.begin_fetch().unwrap();
    controller.dispatch(Intent::ChangePage(0));
    let third = controller.begin_fetch().expect("page 0 requested again");

    assert_eq!(third.key(), first.key());
    assert_ne!(third.id(), first.id());
    assert!(!controller.complete_fetch(first, Ok(page(&["old"], 1))));
    assert!(controller.complete_fetch(third, Ok(page(&["new"], 1))));
    assert_eq!(controller.rows(), ["new".to_string()]);
}

#[test]
fn test_suggestions_are_last_input_wins() {
    let mut controller: ListController<AuditOrderBy, String, String> = audit_controller("");
    controller.set_search_input("en");
    let first = controller.begin_suggestions().unwrap();
    controller.set_search_input("eng");
    let second = controller.begin_suggestions().unwrap();

    controller.complete_suggestions(second, Ok(page(&["engineering"], 1)));
    controller.complete_suggestions(first, Ok(page(&["engineering", "enterprise"], 2)));

    assert_eq!(controller.suggestions(), ["engineering".to_string()]);
}

#[test]
fn test_suggestions_ignore_view_changes() {
    let mut controller = audit_controller("");
    controller.set_search_input("eng");
    let ticket = controller.begin_suggestions().unwrap();
    assert_eq!(ticket.key(), "eng");

    controller.dispatch(Intent::ChangePage(3));
    controller.dispatch(Intent::ToggleSort(AuditOrderBy::Moniker));
    assert!(controller.begin_suggestions().is_none());
}

#[test]
fn test_request_tracker_and_slot_directly() {
    let mut tracker: RequestTracker<u32> = RequestTracker::new();
    let a = tracker.issue(1).unwrap();
    assert!(tracker.issue(1).is_none());
    let b = tracker.issue(2).unwrap();
    assert!(!tracker.is_current(&a));
    assert!(tracker.is_current(&b));
    assert_eq!(tracker.latest_key(), Some(&2));

    let mut slot: ResultSlot<u32, &str> = ResultSlot::new();
    let t = slot.begin(7).unwrap();
    assert!(slot.is_pending());
    slot.complete(t, Ok("seven"));
    assert_eq!(slot.state().ready(), Some(&"seven"));
    assert_eq!(slot.loaded().map(|t| *t.key()), Some(7));
}

#[test]
fn test_failure_after_data_does_not_blank_table() {
    let mut controller = audit_controller("");
    let ticket = controller.begin_fetch().unwrap();
    controller.complete_fetch(ticket, Ok(page(&["row-1", "row-2"], 45)));

    controller.dispatch(Intent::ChangePage(1));
    let ticket = controller.begin_fetch().unwrap();
    controller.complete_fetch(ticket, Err(FetchError::Server("boom".to_string())));
    assert!(controller.results().error().is_some());

    // The next view shows the last good rows while it loads.
    controller.dispatch(Intent::ChangePage(2));
    let ticket = controller.begin_fetch().unwrap();
    assert!(!controller.results().is_loading());
    assert!(controller.is_refreshing());
    assert_eq!(controller.rows(), ["row-1".to_string(), "row-2".to_string()]);
    assert_eq!(controller.total(), 45);

    controller.complete_fetch(ticket, Ok(page(&["row-41"], 45)));
    assert_eq!(controller.rows(), ["row-41".to_string()]);
}
