// web_app/state/fetch.rs - Request tracking for the list fetchers
//
// Both fetchers (results and suggestions) follow the same rules:
// - a request is only issued when its key differs from the latest one
// - every request carries a ticket; only the latest ticket may land
// - once data has been shown it stays visible while a newer request is
//   in flight (stale-while-revalidate)

use thiserror::Error;

/// Why a fetch produced no data
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("server error: {0}")]
    Server(String),
    #[error("request failed: {0}")]
    Transport(String),
}

/// Loading, loaded, or failed; never conflated
#[derive(Clone, Debug, PartialEq)]
pub enum FetchState<T> {
    Loading,
    Ready(T),
    Failed(FetchError),
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            FetchState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

/// Handle for one issued request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket<K> {
    id: u64,
    key: K,
}

impl<K> Ticket<K> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn key(&self) -> &K {
        &self.key
    }
}

/// Last-query-wins bookkeeping for one fetcher
#[derive(Clone, Debug)]
pub struct RequestTracker<K> {
    next_id: u64,
    latest: Option<Ticket<K>>,
}

impl<K> Default for RequestTracker<K> {
    fn default() -> Self {
        RequestTracker {
            next_id: 1,
            latest: None,
        }
    }
}

impl<K: Clone + PartialEq> RequestTracker<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a ticket for `key`, or `None` if `key` is already the latest
    /// request (value equality, so re-deriving the same key is free).
    pub fn issue(&mut self, key: K) -> Option<Ticket<K>> {
        if self.latest.as_ref().is_some_and(|latest| latest.key == key) {
            return None;
        }
        let ticket = Ticket {
            id: self.next_id,
            key,
        };
        self.next_id += 1;
        self.latest = Some(ticket.clone());
        Some(ticket)
    }

    pub fn is_current(&self, ticket: &Ticket<K>) -> bool {
        self.latest.as_ref().is_some_and(|latest| latest.id == ticket.id)
    }

    pub fn latest_key(&self) -> Option<&K> {
        self.latest.as_ref().map(|ticket| &ticket.key)
    }
}

/// Fetch state plus the tracker that guards it
#[derive(Clone, Debug)]
pub struct ResultSlot<K, T> {
    tracker: RequestTracker<K>,
    state: FetchState<T>,
    loaded: Option<Ticket<K>>,
    /// Last good response, held while a failure is on display
    last_ready: Option<(Ticket<K>, T)>,
    pending: bool,
}

impl<K, T> Default for ResultSlot<K, T> {
    fn default() -> Self {
        ResultSlot {
            tracker: RequestTracker::default(),
            state: FetchState::Loading,
            loaded: None,
            last_ready: None,
            pending: false,
        }
    }
}

impl<K: Clone + PartialEq, T> ResultSlot<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a request for `key` unless it is already the latest one.
    pub fn begin(&mut self, key: K) -> Option<Ticket<K>> {
        let ticket = self.tracker.issue(key)?;
        self.pending = true;
        if self.state.error().is_some() {
            // Back to the last good rows if there ever were any.
            self.state = match self.last_ready.take() {
                Some((loaded, data)) => {
                    self.loaded = Some(loaded);
                    FetchState::Ready(data)
                }
                None => FetchState::Loading,
            };
        }
        Some(ticket)
    }

    /// Land a response. Responses for superseded tickets are dropped.
    pub fn complete(&mut self, ticket: Ticket<K>, outcome: Result<T, FetchError>) -> bool {
        if !self.tracker.is_current(&ticket) {
            tracing::debug!(ticket = ticket.id, "discarding stale response");
            return false;
        }
        self.pending = false;
        match outcome {
            Ok(data) => {
                self.state = FetchState::Ready(data);
                self.loaded = Some(ticket);
                self.last_ready = None;
            }
            Err(err) => {
                tracing::warn!(ticket = ticket.id, error = %err, "fetch failed");
                let previous = std::mem::replace(&mut self.state, FetchState::Failed(err));
                if let (FetchState::Ready(data), Some(loaded)) = (previous, self.loaded.take()) {
                    self.last_ready = Some((loaded, data));
                }
            }
        }
        true
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Showing earlier data while a newer request is outstanding.
    pub fn is_refreshing(&self) -> bool {
        self.pending && self.state.ready().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Ticket of the request whose data is on display.
    pub fn loaded(&self) -> Option<&Ticket<K>> {
        self.loaded.as_ref()
    }

    pub fn latest_key(&self) -> Option<&K> {
        self.tracker.latest_key()
    }
}
