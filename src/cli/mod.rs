//! CLI module for textflow

pub mod serve;

use clap::{Parser, Subcommand};

/// Textflow - sequential LLM-backed text processing pipelines
#[derive(Parser)]
#[command(name = "textflow")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the API server
    Serve,
}
