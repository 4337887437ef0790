//! CLI module for the Ledger API
//!
//! - `serve`: run the HTTP server
//! - `migrate`: apply or revert the database schema

pub mod migrate;
pub mod serve;

use clap::{Parser, Subcommand};

/// Ledger API - personal finance bookkeeping backend
#[derive(Parser)]
#[command(name = "ledger")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP server
    Serve,

    /// Manage the PostgreSQL schema
    Migrate(migrate::MigrateArgs),
}
