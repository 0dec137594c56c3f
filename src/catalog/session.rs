//! Display client state.
//!
//! # Responsibilities
//! - Own the current search term and the displayed result list
//! - Hand out a sequence ticket per issued search
//! - Apply only the outcome of the newest search
//!
//! # Design Decisions
//! - A new result list replaces the old one wholesale; no merge
//! - A failed search leaves the displayed list untouched and raises a notification
//! - Outcomes of superseded searches are dropped, success or failure

use crate::catalog::client::{CatalogClient, ClientError};
use crate::catalog::record::{ProductRecord, SearchQuery};

/// Message shown to the user when a search fails.
pub const SEARCH_FAILED_NOTICE: &str = "Could not reach the API gateway";

/// Identifies one issued search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: SearchQuery,
}

impl SearchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn query(&self) -> &SearchQuery {
        &self.query
    }
}

/// What applying a search outcome did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Results replaced; carries the new count.
    Replaced(usize),
    /// Search failed; results kept, notification raised.
    Failed,
    /// A newer search was issued meanwhile; outcome ignored.
    Stale,
}

#[derive(Debug, Default)]
pub struct SearchSession {
    term: String,
    results: Vec<ProductRecord>,
    latest: u64,
    notification: Option<String>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn set_term(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    /// Currently displayed products, in backend order.
    pub fn results(&self) -> &[ProductRecord] {
        &self.results
    }

    /// Issue a new search for the current term. Supersedes any in flight.
    pub fn begin_search(&mut self) -> SearchTicket {
        self.latest += 1;
        SearchTicket {
            seq: self.latest,
            query: SearchQuery::new(self.term.clone()),
        }
    }

    /// Apply the outcome of the search identified by `ticket`.
    pub fn apply(
        &mut self,
        ticket: &SearchTicket,
        outcome: Result<Vec<ProductRecord>, ClientError>,
    ) -> Applied {
        if ticket.seq != self.latest {
            tracing::debug!(seq = ticket.seq, latest = self.latest, "Discarding stale search outcome");
            return Applied::Stale;
        }

        match outcome {
            Ok(records) => {
                self.results = records;
                self.notification = None;
                Applied::Replaced(self.results.len())
            }
            Err(e) => {
                tracing::warn!(term = %ticket.query.as_param(), error = %e, "Search failed");
                self.notification = Some(format!("{}: {}", SEARCH_FAILED_NOTICE, e));
                Applied::Failed
            }
        }
    }

    /// Issue a search for the current term and apply its outcome.
    pub async fn search(&mut self, client: &CatalogClient) -> Applied {
        let ticket = self.begin_search();
        let outcome = client.search(ticket.query()).await;
        self.apply(&ticket, outcome)
    }

    /// Pending user-facing notification, cleared on read.
    pub fn take_notification(&mut self) -> Option<String> {
        self.notification.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(titles: &[&str]) -> Vec<ProductRecord> {
        titles
            .iter()
            .map(|t| ProductRecord::from_json(&json!({ "title": t })))
            .collect()
    }

    fn failure() -> ClientError {
        ClientError::Decode(serde_json::from_str::<Vec<ProductRecord>>("{}").unwrap_err())
    }

    #[test]
    fn test_success_replaces_results_in_order() {
        let mut session = SearchSession::new();
        session.set_term("laptop");

        let ticket = session.begin_search();
        assert_eq!(ticket.query().as_param(), "laptop");
        assert_eq!(session.apply(&ticket, Ok(records(&["b", "a"]))), Applied::Replaced(2));

        let titles: Vec<_> = session.results().iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["b", "a"]);
    }

    #[test]
    fn test_failure_keeps_previous_results() {
        let mut session = SearchSession::new();
        let first = session.begin_search();
        session.apply(&first, Ok(records(&["kept"])));

        let second = session.begin_search();
        assert_eq!(session.apply(&second, Err(failure())), Applied::Failed);

        assert_eq!(session.results().len(), 1);
        assert_eq!(session.results()[0].title, "kept");
        let notice = session.take_notification().unwrap();
        assert!(notice.starts_with(SEARCH_FAILED_NOTICE));
        assert_eq!(session.take_notification(), None);
    }

    #[test]
    fn test_stale_outcomes_are_discarded() {
        let mut session = SearchSession::new();
        session.set_term("old");
        let older = session.begin_search();
        session.set_term("new");
        let newer = session.begin_search();

        assert_eq!(session.apply(&newer, Ok(records(&["fresh"]))), Applied::Replaced(1));
        // The older request completes last and must not win.
        assert_eq!(session.apply(&older, Ok(records(&["stale", "stale"]))), Applied::Stale);
        assert_eq!(session.apply(&older, Err(failure())), Applied::Stale);

        assert_eq!(session.results()[0].title, "fresh");
        assert_eq!(session.take_notification(), None);
    }

    #[test]
    fn test_empty_result_clears_list() {
        let mut session = SearchSession::new();
        let first = session.begin_search();
        session.apply(&first, Ok(records(&["x"])));

        let second = session.begin_search();
        assert_eq!(session.apply(&second, Ok(Vec::new())), Applied::Replaced(0));
        assert!(session.results().is_empty());
    }
}
