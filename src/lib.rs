//! Voxa: search-augmented conversational turns.
//!
//! This crate is the host side of the search pipeline in [`voxa_search`]:
//! User query → refined query → search → filter → scrape → rerank → context
//!
//! # Architecture
//!
//! - **Config**: TOML file plus environment-supplied API keys
//! - **Web search**: a blocking bridge that runs the async pipeline on its
//!   own runtime and formats the ranked documents as answer context
//! - **Progress**: per-turn stage reporting through a callback
//! - **Conversation**: chat history where intermediate turns are flagged as
//!   scratch and hidden at render time

pub mod config;
pub mod conversation;
pub mod error;
pub mod progress;
pub mod web_search;

pub use config::VoxaConfig;
pub use conversation::{ChatHistory, ChatMessage, Role};
pub use error::{Result, VoxaError};
pub use progress::{ProgressCallback, TurnStage};
pub use web_search::WebSearch;
