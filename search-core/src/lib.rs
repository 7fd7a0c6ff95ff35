//! Client-side query orchestration for the retrieval search service.
//!
//! This crate provides the gateway client, the query lifecycle state machine and
//! the result presentation model shared by the command-line tools.

pub mod config;
pub mod error;
pub mod gateway;
pub mod input;
pub mod models;
pub mod presentation;
pub mod query;
pub mod tier;

pub use config::Config;
pub use error::{Error, Result};
pub use gateway::{GatewayClient, SearchGateway};
pub use input::QueryInput;
pub use models::{IngestionReport, QueryRequest, SearchResponse, SearchResult, ServiceInfo, Upload};
pub use presentation::{display_records, present, DisplayRecord, ResultView};
pub use query::{reduce, QueryEvent, QueryOutcome, QueryState, SearchSession, Ticket};
pub use tier::{tier, ScoreTier};
