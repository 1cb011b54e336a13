// web_app/state/suggest.rs - Autocomplete candidates for the search box
//
// Keyed only by the raw text in the search control, never by the committed
// search, the sort, or the pagination.

use super::fetch::{FetchError, FetchState, ResultSlot, Ticket};
use crate::web_app::model::{ResultPage, SuggestionQuery};

#[derive(Clone, Debug)]
pub struct SuggestionState<T> {
    input: String,
    slot: ResultSlot<String, Vec<T>>,
}

impl<T> Default for SuggestionState<T> {
    fn default() -> Self {
        SuggestionState {
            input: String::new(),
            slot: ResultSlot::default(),
        }
    }
}

impl<T> SuggestionState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, text: &str) {
        if self.input != text {
            self.input = text.to_string();
        }
    }

    /// Mirror the committed search into an untouched input box.
    pub fn seed(&mut self, committed: Option<&str>) {
        if self.input.is_empty() {
            self.input = committed.unwrap_or_default().to_string();
        }
    }

    /// Issue a lookup for the current input if it has not been requested yet.
    pub fn begin(&mut self) -> Option<Ticket<String>> {
        self.slot.begin(self.input.clone())
    }

    pub fn request(ticket: &Ticket<String>) -> SuggestionQuery {
        SuggestionQuery::for_input(ticket.key())
    }

    pub fn complete(
        &mut self,
        ticket: Ticket<String>,
        outcome: Result<ResultPage<T>, FetchError>,
    ) -> bool {
        self.slot.complete(ticket, outcome.map(|page| page.results))
    }

    /// Current candidates; empty until a lookup succeeds.
    pub fn options(&self) -> &[T] {
        self.slot.state().ready().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn state(&self) -> &FetchState<Vec<T>> {
        self.slot.state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_only_fills_empty_input() {
        let mut state: SuggestionState<String> = SuggestionState::new();
        state.seed(Some("eng"));
        assert_eq!(state.input(), "eng");
        state.seed(Some("ops"));
        assert_eq!(state.input(), "eng");
    }

    #[test]
    fn test_request_is_fixed_first_page() {
        let mut state: SuggestionState<String> = SuggestionState::new();
        state.set_input("plat");
        let ticket = state.begin().unwrap();
        let request = SuggestionState::<String>::request(&ticket);
        assert_eq!(request.page, 0);
        assert_eq!(request.per_page, 10);
        assert_eq!(request.q, "plat");
        assert!(state.begin().is_none());
    }

    #[test]
    fn test_out_of_order_suggestions_keep_latest() {
        let mut state: SuggestionState<&str> = SuggestionState::new();
        state.set_input("a");
        let first = state.begin().unwrap();
        state.set_input("ab");
        let second = state.begin().unwrap();

        let page = |items: Vec<&'static str>| ResultPage {
            total: items.len() as u64,
            results: items,
        };
        assert!(state.complete(second, Ok(page(vec!["abc"]))));
        assert!(!state.complete(first, Ok(page(vec!["a1", "a2"]))));
        assert_eq!(state.options(), &["abc"]);
    }
}
