//! Query lifecycle state machine.
//!
//! The lifecycle is a pure reducer over [`QueryState`]; [`SearchSession`] wraps it
//! around a [`SearchGateway`] call. Each submission takes a new request token and a
//! response is only applied while its token is still the latest one, so overlapping
//! submissions always settle on the most recent query.

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::EMPTY_QUERY_MESSAGE;
use crate::gateway::SearchGateway;
use crate::models::{SearchResponse, SearchResult};
use crate::{Error, Result};

/// Monotonically increasing identifier of a submission.
pub type RequestToken = u64;

/// The single authoritative snapshot of the query lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum QueryOutcome {
    #[default]
    Idle,
    Loading,
    Success {
        query: String,
        results: Vec<SearchResult>,
    },
    Error {
        message: String,
    },
}

impl QueryOutcome {
    pub fn is_loading(&self) -> bool {
        matches!(self, QueryOutcome::Loading)
    }

    /// Results of a successful query; empty in every other state.
    pub fn results(&self) -> &[SearchResult] {
        match self {
            QueryOutcome::Success { results, .. } => results,
            _ => &[],
        }
    }

    pub fn query(&self) -> Option<&str> {
        match self {
            QueryOutcome::Success { query, .. } => Some(query),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            QueryOutcome::Error { message } => Some(message),
            _ => None,
        }
    }
}

/// A validated query waiting on the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub token: RequestToken,
    pub query: String,
}

/// Reducer state: the current outcome plus request bookkeeping.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryState {
    pub outcome: QueryOutcome,
    /// Token issued to the most recent submission
    pub latest: RequestToken,
    /// In-flight search, if the latest submission was valid
    pub pending: Option<Ticket>,
}

/// Inputs to the reducer.
#[derive(Debug)]
pub enum QueryEvent {
    /// Raw, untrimmed text from the input control.
    Submit(String),
    /// The gateway call for `token` finished.
    Resolved {
        token: RequestToken,
        result: Result<SearchResponse>,
    },
}

/// Trim a raw query, rejecting blank input.
pub fn validate_query(raw: &str) -> Result<&str> {
    let query = raw.trim();
    if query.is_empty() {
        return Err(Error::Validation(EMPTY_QUERY_MESSAGE.to_string()));
    }
    Ok(query)
}

/// Apply one event. Every transition replaces the outcome wholesale.
pub fn reduce(state: QueryState, event: QueryEvent) -> QueryState {
    match event {
        QueryEvent::Submit(raw) => {
            let latest = state.latest + 1;
            match validate_query(&raw) {
                Ok(query) => QueryState {
                    outcome: QueryOutcome::Loading,
                    latest,
                    pending: Some(Ticket {
                        token: latest,
                        query: query.to_string(),
                    }),
                },
                Err(err) => QueryState {
                    outcome: QueryOutcome::Error {
                        message: err.user_message(),
                    },
                    latest,
                    pending: None,
                },
            }
        }
        QueryEvent::Resolved { token, result } => match state.pending {
            Some(ticket) if ticket.token == token => {
                let outcome = match result {
                    Ok(response) => QueryOutcome::Success {
                        query: ticket.query,
                        results: response.results,
                    },
                    Err(err) => QueryOutcome::Error {
                        message: err.user_message(),
                    },
                };

                QueryState {
                    outcome,
                    latest: state.latest,
                    pending: None,
                }
            }
            // Superseded or already settled
            _ => state,
        },
    }
}

/// Drives the reducer around gateway calls for one user session.
pub struct SearchSession<G> {
    gateway: G,
    state: RwLock<QueryState>,
}

impl<G: SearchGateway> SearchSession<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: RwLock::new(QueryState::default()),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Snapshot of the current outcome.
    pub async fn outcome(&self) -> QueryOutcome {
        self.state.read().await.outcome.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.outcome.is_loading()
    }

    /// Submit raw text and wait for its outcome.
    ///
    /// The returned snapshot is whatever the cell holds once this call's response
    /// has been applied or discarded, which is a later submission's outcome if one
    /// overtook it.
    pub async fn submit(&self, raw: &str) -> QueryOutcome {
        match self.begin(raw).await {
            Some(ticket) => self.complete(ticket).await,
            None => self.outcome().await,
        }
    }

    /// Record a submission. Returns the ticket to dispatch, or `None` when the
    /// text failed validation and the outcome is already an error.
    pub async fn begin(&self, raw: &str) -> Option<Ticket> {
        let mut state = self.state.write().await;
        *state = reduce(std::mem::take(&mut *state), QueryEvent::Submit(raw.to_string()));

        if state.pending.is_none() {
            debug!(token = state.latest, "Rejected blank query");
        }
        state.pending.clone()
    }

    /// Run the gateway call for `ticket` and apply its result.
    pub async fn complete(&self, ticket: Ticket) -> QueryOutcome {
        let result = self.gateway.search(&ticket.query).await;
        if let Err(e) = &result {
            warn!(token = ticket.token, error = %e, "Search failed");
        }

        let mut state = self.state.write().await;
        if state.latest != ticket.token {
            debug!(
                token = ticket.token,
                latest = state.latest,
                "Discarding response for superseded query"
            );
        }

        *state = reduce(
            std::mem::take(&mut *state),
            QueryEvent::Resolved {
                token: ticket.token,
                result,
            },
        );
        state.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(chunk_id: &str, score: f64) -> SearchResult {
        SearchResult {
            chunk_id: chunk_id.to_string(),
            chunk_index: 0,
            text: format!("text of {}", chunk_id),
            similarity_score: score,
            document_id: None,
        }
    }

    fn response(results: Vec<SearchResult>) -> SearchResponse {
        SearchResponse {
            results,
            query: None,
            num_results: None,
        }
    }

    fn submit(state: QueryState, raw: &str) -> QueryState {
        reduce(state, QueryEvent::Submit(raw.to_string()))
    }

    fn resolve(state: QueryState, token: RequestToken, result: Result<SearchResponse>) -> QueryState {
        reduce(state, QueryEvent::Resolved { token, result })
    }

    #[test]
    fn test_initial_state_is_idle() {
        let state = QueryState::default();
        assert_eq!(state.outcome, QueryOutcome::Idle);
        assert!(state.pending.is_none());
    }

    #[test]
    fn test_valid_submit_goes_through_loading() {
        let state = submit(QueryState::default(), "  machine learning ");
        assert_eq!(state.outcome, QueryOutcome::Loading);
        assert_eq!(
            state.pending,
            Some(Ticket {
                token: 1,
                query: "machine learning".to_string(),
            })
        );

        let state = resolve(state, 1, Ok(response(vec![result("a", 0.85)])));
        assert_eq!(
            state.outcome,
            QueryOutcome::Success {
                query: "machine learning".to_string(),
                results: vec![result("a", 0.85)],
            }
        );
        assert!(state.pending.is_none());
    }

    #[test]
    fn test_blank_submit_fails_fast() {
        for raw in ["", "   ", "\t\n"] {
            let state = submit(QueryState::default(), raw);
            assert_eq!(state.outcome.error(), Some(EMPTY_QUERY_MESSAGE));
            assert!(state.pending.is_none());
        }
    }

    #[test]
    fn test_empty_results_are_success() {
        let state = submit(QueryState::default(), "foo");
        let state = resolve(state, 1, Ok(response(vec![])));
        assert!(state.outcome.results().is_empty());
        assert_eq!(state.outcome.query(), Some("foo"));
        assert_ne!(state.outcome, QueryOutcome::Idle);
    }

    #[test]
    fn test_failure_clears_prior_results() {
        let state = submit(QueryState::default(), "first");
        let state = resolve(state, 1, Ok(response(vec![result("a", 0.9)])));
        assert_eq!(state.outcome.results().len(), 1);

        let state = submit(state, "second");
        assert_eq!(state.outcome, QueryOutcome::Loading);
        assert!(state.outcome.results().is_empty());

        let state = resolve(
            state,
            2,
            Err(Error::Service {
                status: 404,
                detail: Some("index not found".to_string()),
            }),
        );
        assert_eq!(
            state.outcome,
            QueryOutcome::Error {
                message: "index not found".to_string(),
            }
        );
        assert!(state.outcome.results().is_empty());
    }

    #[test]
    fn test_transport_failure_uses_fallback_message() {
        let state = submit(QueryState::default(), "foo");
        let state = resolve(state, 1, Err(Error::Transport("connection refused".to_string())));
        assert_eq!(
            state.outcome.error(),
            Some(crate::error::SEARCH_FAILED_MESSAGE)
        );
    }

    #[test]
    fn test_new_submit_clears_previous_error() {
        let state = submit(QueryState::default(), "  ");
        assert!(state.outcome.error().is_some());

        let state = submit(state, "retry");
        assert_eq!(state.outcome, QueryOutcome::Loading);
        assert_eq!(state.outcome.error(), None);
    }

    #[test]
    fn test_stale_response_is_discarded() {
        let state = submit(QueryState::default(), "a");
        let state = submit(state, "b");
        assert_eq!(state.latest, 2);

        let state = resolve(state, 2, Ok(response(vec![result("b1", 0.9)])));
        let settled = state.clone();

        let state = resolve(state, 1, Ok(response(vec![result("a1", 0.9)])));
        assert_eq!(state, settled);
        assert_eq!(state.outcome.query(), Some("b"));
    }

    #[test]
    fn test_response_after_blank_submit_is_discarded() {
        let state = submit(QueryState::default(), "a");
        let state = submit(state, " ");

        let state = resolve(state, 1, Ok(response(vec![result("a1", 0.9)])));
        assert_eq!(state.outcome.error(), Some(EMPTY_QUERY_MESSAGE));
    }

    #[test]
    fn test_duplicate_resolution_is_ignored() {
        let state = submit(QueryState::default(), "a");
        let state = resolve(state, 1, Ok(response(vec![result("a1", 0.9)])));
        let state = resolve(state, 1, Err(Error::Transport("late".to_string())));
        assert_eq!(state.outcome.query(), Some("a"));
    }

    #[test]
    fn test_validate_query() {
        assert_eq!(validate_query("  rust  ").unwrap(), "rust");
        assert!(matches!(validate_query(" \n "), Err(Error::Validation(_))));
    }
}
