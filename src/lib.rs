//! Gene/paper summaries from an AI text-generation service.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod nlp;
