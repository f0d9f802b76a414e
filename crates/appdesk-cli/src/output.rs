//! Console output for the CLI.
//!
//! Human-readable text goes to stdout; `--json` replaces it with a single
//! JSON document.

use anyhow::Result;
use appdesk_core::{DirectoryStatus, GeneratedEntry};

fn mark(flag: bool) -> &'static str {
    if flag {
        "✓"
    } else {
        "✗"
    }
}

/// Render the launcher directory listing.
pub fn format_directories(statuses: &[DirectoryStatus]) -> String {
    let mut out = String::from("Available desktop file directories:\n");
    for (i, status) in statuses.iter().enumerate() {
        out.push_str(&format!(
            "  {}. {} (exists: {}, writable: {})\n",
            i + 1,
            status.path.display(),
            mark(status.exists),
            mark(status.writable)
        ));
    }
    out
}

pub fn print_directories(statuses: &[DirectoryStatus], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(statuses)?);
    } else {
        print!("{}", format_directories(statuses));
    }
    Ok(())
}

pub fn print_generated(entry: &GeneratedEntry, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(entry)?);
    } else {
        println!("✓ Desktop file created: {}", entry.path.display());
        println!("The application should now appear in your application launcher.");
    }
    Ok(())
}
