use crate::store::push_front_capped;
use serde::{Deserialize, Serialize};

/// Maximum number of remembered queries.
pub const RECENT_SEARCH_CAP: usize = 10;

/// Search box state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchState {
    /// Current query text.
    pub query: String,
    /// Ids of matching content.
    pub results: Vec<String>,
    /// Whether a search is running.
    pub is_searching: bool,
    /// Recent queries, most recent first.
    pub recent: Vec<String>,
}

impl SearchState {
    /// Update the query text.
    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Store results and stop the spinner.
    pub fn set_results(&mut self, results: Vec<String>) {
        self.results = results;
        self.is_searching = false;
    }

    /// Start or stop the spinner.
    pub fn set_searching(&mut self, searching: bool) {
        self.is_searching = searching;
    }

    /// Remember a query. Blank queries are ignored; an existing query
    /// (compared case-insensitively) moves to the front.
    pub fn add_recent_search(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        self.recent.retain(|q| !q.eq_ignore_ascii_case(query));
        push_front_capped(&mut self.recent, query.to_string(), RECENT_SEARCH_CAP);
        true
    }

    /// Forget a query.
    pub fn remove_recent_search(&mut self, query: &str) -> bool {
        let before = self.recent.len();
        self.recent.retain(|q| !q.eq_ignore_ascii_case(query));
        self.recent.len() != before
    }

    /// Forget all queries.
    pub fn clear_recent(&mut self) {
        self.recent.clear();
    }

    /// Clear the query and results, keeping recent queries.
    pub fn clear(&mut self) {
        self.query.clear();
        self.results.clear();
        self.is_searching = false;
    }
}
