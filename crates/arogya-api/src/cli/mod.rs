//! CLI command definitions for the `arogya` binary.
//!
//! Uses clap derive macros for argument parsing. `serve` runs the REST API;
//! the remaining commands inspect the local session database.

pub mod diseases;
pub mod session;

use clap::{Parser, Subcommand};

/// Symptom triage and health information backend.
#[derive(Parser)]
#[command(name = "arogya", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as newline-delimited JSON.
    #[arg(long, global = true, env = "AROGYA_LOG_JSON")]
    pub log_json: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, env = "AROGYA_OTEL")]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Port to listen on.
        #[arg(short, long, default_value = "8000", env = "AROGYA_PORT")]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1", env = "AROGYA_HOST")]
        host: String,
    },

    /// Inspect chat sessions.
    #[command(alias = "session")]
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Inspect diagnosed diseases.
    #[command(alias = "disease")]
    Diseases {
        #[command(subcommand)]
        action: DiseaseAction,
    },
}

#[derive(Subcommand)]
pub enum SessionAction {
    /// List sessions with a conversation preview.
    #[command(alias = "ls")]
    List {
        /// Maximum number of sessions to show.
        #[arg(short, long)]
        limit: Option<i64>,
    },

    /// Show the stored conversation of a session.
    Show {
        /// Session id (hid).
        hid: String,
    },

    /// Delete a session and its diagnosed diseases.
    #[command(alias = "rm")]
    Delete {
        /// Session id (hid).
        hid: String,
    },
}

#[derive(Subcommand)]
pub enum DiseaseAction {
    /// List diagnosed diseases, newest first.
    #[command(alias = "ls")]
    List {
        /// Maximum number of rows to show.
        #[arg(short, long)]
        limit: Option<i64>,
    },
}
