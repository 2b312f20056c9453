//! Template inspection command handler.

use comicforge::{ComicforgeResult, SessionState};
use comicforge_core::debug_chars;
use std::path::Path;
use tracing::debug;

/// `comicforge templates`: list registered templates with the same name
/// diagnostics the batch precondition error uses. Run before a batch to
/// confirm what the CSV has to match.
pub async fn list_templates(templates_dir: &Path) -> ComicforgeResult<()> {
    let mut session = SessionState::new();
    session.load_templates(templates_dir).await?;

    if session.templates().is_empty() {
        println!("No templates found in {}", templates_dir.display());
        return Ok(());
    }

    println!("{} template(s):", session.templates().len());
    for template in session.templates() {
        println!(
            "  \"{}\" (length: {})  {}x{}  {}  {}",
            template.name,
            template.name.chars().count(),
            template.width,
            template.height,
            template.aspect_ratio,
            template.aspect_ratio.description()
        );
        debug!(name = %template.name, chars = %debug_chars(&template.name));
    }
    Ok(())
}
