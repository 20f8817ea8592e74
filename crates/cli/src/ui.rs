//! Terminal UI helpers for consistent colored output.

use std::future::Future;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

/// Print a success message with green checkmark.
pub fn success(msg: &str) {
    println!("{} {}", "✓".green(), msg);
}

/// Print an info message with blue info icon.
pub fn info(msg: &str) {
    eprintln!("{} {}", "ℹ".blue(), msg);
}

/// Print an error message with red X.
fn error(msg: &str) {
    eprintln!("{} {}", "✗".red(), msg);
}

/// Print a hint/suggestion (dimmed, indented).
fn hint(msg: &str) {
    eprintln!("  {} {}", "→".dimmed(), msg.dimmed());
}

/// Format a value as bold (for IDs, counts, etc.).
pub fn bold(s: &str) -> String {
    s.bold().to_string()
}

/// Rating as filled/empty stars, or a dash when absent.
pub fn stars(rating: Option<i32>) -> String {
    match rating {
        Some(n @ 1..=5) => {
            let filled = n as usize;
            format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
        }
        Some(n) => n.to_string(),
        None => "-".to_string(),
    }
}

/// First `max` characters of `text` on one line, with an ellipsis if cut.
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Run an async operation with a spinner showing the given message.
/// Returns the result of the operation.
pub async fn spin<T, F: Future<Output = T>>(msg: &str, fut: F) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.dim} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(msg.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));

    let result = fut.await;

    spinner.finish_and_clear();
    result
}

/// Display an error with contextual hints based on the error message.
pub fn print_error(err: &anyhow::Error) {
    let msg = format!("{err:#}");
    error(&msg);

    if msg.contains("DATABASE_URL") {
        hint("Set DATABASE_URL in the environment or in a .env file.");
    } else if msg.contains("relation \"reviews\" does not exist") {
        hint("Create the table first: site-admin init-db");
    } else if msg.contains("password authentication failed") {
        hint("Check the credentials in DATABASE_URL.");
    } else if msg.contains("connection")
        || msg.contains("Connection")
        || msg.contains("timed out")
        || msg.contains("No such host")
    {
        hint("Check that PostgreSQL is running and reachable.");
    }
}
