use clap::{Parser, Subcommand};

use bumptag::config;
use bumptag::error::BumptagError;
use bumptag::git_ops::GitRepo;
use bumptag::ui;
use bumptag::version::VersionToken;
use bumptag::workflow;

#[derive(Parser)]
#[command(
    name = "bumptag",
    about = "Bump version metadata artifacts and publish tagged releases"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Increment the final version component, rewrite all artifacts, and commit
    Bump {
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },
    /// Create annotated tag v<version> and push it to the configured remote
    Release {
        #[arg(short, long, help = "GPG-sign the git tag")]
        sign: bool,
    },
}

fn main() {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("loading config: {}", e));
            std::process::exit(1);
        }
    };

    if config.artifacts.is_empty() {
        ui::display_error("No artifacts configured in bumptag.toml");
        std::process::exit(1);
    }

    let repo = match GitRepo::open(std::path::Path::new(".")) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Command::Bump { yes } => run_bump(&config, &repo, yes),
        Command::Release { sign } => run_release(&config, &repo, sign),
    };

    if let Err(e) = result {
        if matches!(e, BumptagError::Aborted) {
            eprintln!("\nNot proceeding");
        } else {
            ui::display_error(&e.to_string());
        }
        // Git failures propagate the subprocess exit status unchanged
        std::process::exit(e.subprocess_status().unwrap_or(1));
    }
}

fn run_bump(
    config: &config::Config,
    repo: &GitRepo,
    yes: bool,
) -> bumptag::Result<()> {
    let mut gate = |old: &VersionToken, new: &VersionToken| -> bumptag::Result<bool> {
        ui::display_proposed_bump(old, new);
        if yes {
            return Ok(true);
        }
        ui::confirm_action("Proceed with bump?")
            .map_err(|e| BumptagError::Io(std::io::Error::other(e)))
    };

    let new = workflow::run_bump(config, repo, &mut gate)?;
    ui::display_success(&format!("Bumped to version {}", new));
    Ok(())
}

fn run_release(config: &config::Config, repo: &GitRepo, sign: bool) -> bumptag::Result<()> {
    let outcome = match workflow::run_release(config, repo, sign) {
        Ok(outcome) => outcome,
        Err(e) => {
            // A failed push leaves the local tag in place; tell the operator
            // how to finish the release by hand.
            if let BumptagError::Push { .. } = e {
                if let Ok(version) = current_version_hint(config, repo) {
                    ui::display_manual_push_instruction(
                        &format!("v{}", version),
                        &config.remote,
                    );
                }
            }
            return Err(e);
        }
    };

    ui::display_success(&format!(
        "Pushed tag {} to {}",
        outcome.tag_name, config.remote
    ));
    Ok(())
}

fn current_version_hint(
    config: &config::Config,
    repo: &GitRepo,
) -> bumptag::Result<VersionToken> {
    workflow::current_version(&config.artifacts(), repo)
}
