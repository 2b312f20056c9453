//! Comicforge CLI binary.
//!
//! This binary provides command-line access to Comicforge's functionality:
//! - Batch-generate comic pages from a CSV of prompts
//! - Generate a single page outside CSV ingestion
//! - Inspect registered panel templates
//! - Manage the user approval workflow

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() {
    use cli::{Cli, Commands, handle_users_command, list_templates, run_generate, run_generate_one};

    // Load .env before anything reads GEMINI_API_KEY
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Execute the requested command
    let result = match cli.command {
        Commands::Generate {
            csv,
            templates,
            characters,
            out,
        } => run_generate(&csv, &templates, characters.as_deref(), &out).await,

        Commands::GenerateOne {
            template,
            prompt,
            page,
            templates,
            characters,
            out,
        } => run_generate_one(&template, &prompt, page, &templates, characters.as_deref(), &out)
            .await,

        Commands::Templates { templates } => list_templates(&templates).await,

        Commands::Users(users_cmd) => handle_users_command(users_cmd).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
