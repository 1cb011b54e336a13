// web_app/state/params.rs - URL-backed query parameter store
//
// The store is the single source of truth for a list page's view state.
// It is an ordered string->string mapping that round-trips through the
// URL query string. Every mutation goes through `ParamStore::update`, which
// commits a whole batch of edits as one new version.

use url::form_urlencoded;

/// Ordered query parameters, one value per key
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string. A leading `?` is ignored and repeated
    /// keys keep their first position with the last value.
    pub fn parse(search: &str) -> Self {
        let search = search.strip_prefix('?').unwrap_or(search);
        let mut params = QueryParams::new();
        for (key, value) in form_urlencoded::parse(search.as_bytes()) {
            params.set(key.as_ref(), value.as_ref());
        }
        params
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    /// Set `key`, replacing an existing value in place.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.pairs.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => {
                if existing != value {
                    *existing = value.to_string();
                }
            }
            None => self.pairs.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.pairs.iter().position(|(k, _)| k == key)?;
        Some(self.pairs.remove(index).1)
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize as `application/x-www-form-urlencoded`, without the `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.set(key.as_ref(), value.as_ref());
        }
        params
    }
}

/// Versioned owner of a page's query parameters
///
/// The version only moves when the parameters actually change, so feeding
/// the store's own URL back into `sync_from_url` is a no-op.
#[derive(Clone, Debug, Default)]
pub struct ParamStore {
    params: QueryParams,
    version: u64,
}

impl ParamStore {
    pub fn new(params: QueryParams) -> Self {
        ParamStore { params, version: 0 }
    }

    pub fn from_search(search: &str) -> Self {
        Self::new(QueryParams::parse(search))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }

    pub fn params(&self) -> &QueryParams {
        &self.params
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a batch of edits atomically.
    ///
    /// The mutator works on a copy; the copy replaces the current
    /// parameters in a single commit. Returns whether anything changed.
    pub fn update<F>(&mut self, mutate: F) -> bool
    where
        F: FnOnce(&mut QueryParams),
    {
        let mut next = self.params.clone();
        mutate(&mut next);
        self.commit(next)
    }

    /// Replace the parameters from a URL-driven change (back/forward,
    /// pasted link). Returns whether anything changed.
    pub fn sync_from_url(&mut self, search: &str) -> bool {
        self.commit(QueryParams::parse(search))
    }

    pub fn to_query_string(&self) -> String {
        self.params.to_query_string()
    }

    fn commit(&mut self, next: QueryParams) -> bool {
        if next == self.params {
            return false;
        }
        self.params = next;
        self.version = self.version.wrapping_add(1);
        true
    }
}
