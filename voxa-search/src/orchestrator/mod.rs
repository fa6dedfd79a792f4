//! Search orchestrator: hit filtering, concurrent scraping, URL-keyed
//! pairing and reranking.
//!
//! [`SearchOrchestrator`] is the entry point; [`dedup`] and [`assemble`]
//! hold the pure stages it composes.

pub mod assemble;
pub mod dedup;
pub mod search;

pub use search::SearchOrchestrator;
