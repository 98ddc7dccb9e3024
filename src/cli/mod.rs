//! CLI module for Policy Advisor
//!
//! Subcommands:
//! - `serve`: run the HTTP API
//! - `ask`: answer one question about a local policy file

pub mod ask;
pub mod serve;

use clap::{Parser, Subcommand};

/// Policy Advisor - answers coverage questions about insurance policy documents
#[derive(Parser)]
#[command(name = "policy-advisor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Answer a single question about a local policy document
    Ask(ask::AskArgs),
}
