pub mod cli;
pub mod config;
pub mod docs;
pub mod domain;
pub mod error;
pub mod inspector;
pub mod orchestrator;
pub mod resolver;
pub mod rewrite;
pub mod runner;
pub mod ui;

pub use error::{PublishError, Result};
