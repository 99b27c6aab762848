//! Operator-facing output and the interactive confirmation prompt.

use crate::version::VersionToken;
use anyhow::Result;
use console::style;
use std::io::{self, Write};

pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Echo a command line before it is executed.
pub fn display_command(command: &str) {
    println!("{}", style(command).cyan());
}

/// Display the computed old -> new version pair for a bump.
pub fn display_proposed_bump(old: &VersionToken, new: &VersionToken) {
    println!("\n{}", style("Proposed version bump:").bold());
    println!("  From: {}", style(old).red());
    println!("  To:   {}", style(new).green());
}

/// Hint printed when a tag exists locally but was not pushed.
pub fn display_manual_push_instruction(tag: &str, remote: &str) {
    println!(
        "\n{} Local tag exists but was not pushed. To push it later, run:\n  {}",
        style("→").yellow(),
        style(format!("git push {} {}", remote, tag)).cyan()
    );
}

/// Prompts the operator to confirm an action with a yes/no prompt.
///
/// Accepts "y" or "yes" (case-insensitive) as confirmation. Default is "no"
/// if the operator presses Enter; end of input also counts as a decline.
pub fn confirm_action(prompt: &str) -> Result<bool> {
    print!("\n{} (y/N): ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    let read = io::stdin().read_line(&mut input)?;
    if read == 0 {
        // stdin closed, treat as decline
        return Ok(false);
    }

    let response = input.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
