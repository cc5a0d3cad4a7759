//! stackref - Tech Stack Referee
//!
//! Compares technology stacks against project constraints using a fixed
//! knowledge base, a fuzzy search index, a deterministic recommendation
//! cascade and optional generative-AI narratives with rule-based fallbacks.

pub mod advisor;
pub mod ai;
pub mod app;
pub mod chat;
pub mod cli;
pub mod compare;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod recommend;
pub mod search;
pub mod test_utils;

pub use error::{Result, StackError};
