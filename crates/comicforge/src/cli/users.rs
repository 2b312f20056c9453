//! User-management command handlers.

use crate::cli::{UsersAction, UsersCommand};
use comicforge::{ComicforgeConfig, ComicforgeResult, FirestoreUserDirectory, UserDirectory, UserRecord};
use comicforge_error::ConfigError;

/// Build the Firestore directory from configuration and environment.
fn build_directory(config: &ComicforgeConfig) -> ComicforgeResult<FirestoreUserDirectory> {
    let project_id = config.firestore.project_id.clone().ok_or_else(|| {
        ConfigError::new("firestore.project_id is not configured; set it in comicforge.toml")
    })?;
    let api_key = std::env::var("FIREBASE_API_KEY")
        .map_err(|_| ConfigError::new("FIREBASE_API_KEY environment variable not set"))?;
    Ok(FirestoreUserDirectory::new(project_id, api_key))
}

fn print_record(record: &UserRecord) {
    let decided = match record.status {
        comicforge::UserStatus::Approved => record
            .approved_by
            .as_deref()
            .map(|by| format!(" by {}", by))
            .unwrap_or_default(),
        comicforge::UserStatus::Rejected => record
            .rejected_by
            .as_deref()
            .map(|by| format!(" by {}", by))
            .unwrap_or_default(),
        comicforge::UserStatus::Pending => String::new(),
    };
    println!(
        "  {}  {}  {}{}  (created {})",
        record.uid,
        record.email,
        record.status,
        decided,
        record.created_at.format("%Y-%m-%d %H:%M")
    );
}

/// `comicforge users ...`: the admin approval workflow.
pub async fn handle_users_command(command: UsersCommand) -> ComicforgeResult<()> {
    let config = ComicforgeConfig::load()?;
    let directory = build_directory(&config)?;

    match command.action {
        UsersAction::List => {
            let records = directory.list().await?;
            println!("{} user(s):", records.len());
            for record in &records {
                print_record(record);
            }
        }
        UsersAction::Pending => {
            let records = directory.list_pending().await?;
            println!("{} pending user(s):", records.len());
            for record in &records {
                print_record(record);
            }
        }
        UsersAction::Approve { uid, by } => {
            directory.approve(&uid, &by).await?;
            println!("Approved {}", uid);
        }
        UsersAction::Reject { uid, by } => {
            directory.reject(&uid, &by).await?;
            println!("Rejected {}", uid);
        }
        UsersAction::Reset { uid } => {
            directory.reset(&uid).await?;
            println!("Reset {} to pending", uid);
        }
    }
    Ok(())
}
