//! CLI argument definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Batch comic-page generation from CSV prompts via the Gemini image API.
#[derive(Debug, Parser)]
#[command(name = "comicforge", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Batch-generate comic pages from a CSV of prompts
    Generate {
        /// CSV file with page number, template name, and prompt columns
        #[arg(long)]
        csv: PathBuf,
        /// Directory of panel template images
        #[arg(long)]
        templates: PathBuf,
        /// Directory of character reference images
        #[arg(long)]
        characters: Option<PathBuf>,
        /// Output ZIP path for completed pages
        #[arg(long, default_value = "comic_pages.zip")]
        out: PathBuf,
    },

    /// Generate a single page outside CSV ingestion
    GenerateOne {
        /// Template name (filename stem, extension stripped)
        #[arg(long)]
        template: String,
        /// Generation prompt
        #[arg(long)]
        prompt: String,
        /// Page number used for the output filename
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Directory of panel template images
        #[arg(long)]
        templates: PathBuf,
        /// Directory of character reference images
        #[arg(long)]
        characters: Option<PathBuf>,
        /// Directory to save the generated page into
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },

    /// List registered panel templates with name diagnostics
    Templates {
        /// Directory of panel template images
        #[arg(long)]
        templates: PathBuf,
    },

    /// Manage the user approval workflow
    Users(UsersCommand),
}

/// User-management command group.
#[derive(Debug, Args)]
pub struct UsersCommand {
    /// Action to perform
    #[command(subcommand)]
    pub action: UsersAction,
}

/// User-management actions.
#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// List every user record
    List,
    /// List users awaiting a decision
    Pending,
    /// Approve a user
    Approve {
        /// User id to approve
        uid: String,
        /// Acting admin, stamped onto the record
        #[arg(long)]
        by: String,
    },
    /// Reject a user
    Reject {
        /// User id to reject
        uid: String,
        /// Acting admin, stamped onto the record
        #[arg(long)]
        by: String,
    },
    /// Return a user to pending, clearing any decision
    Reset {
        /// User id to reset
        uid: String,
    },
}
