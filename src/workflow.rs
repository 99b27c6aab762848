//! Bump and release workflow orchestration.
//!
//! Keeps the side-effect ordering invariant in one place: every read-only
//! check (extraction, consistency, literal-match scan) runs before the
//! confirmation gate, and the confirmation gate runs before any file or
//! git mutation.

use crate::artifact::Artifact;
use crate::config::Config;
use crate::error::{BumptagError, Result};
use crate::git_ops::GitRepo;
use crate::version::VersionToken;

/// Confirmation gate for the bump workflow.
///
/// Receives the computed old -> new pair and decides whether to proceed.
/// The interactive CLI wires this to a prompt; tests and non-interactive
/// callers supply a closure.
pub trait Confirm {
    fn confirm(&mut self, old: &VersionToken, new: &VersionToken) -> Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&VersionToken, &VersionToken) -> Result<bool>,
{
    fn confirm(&mut self, old: &VersionToken, new: &VersionToken) -> Result<bool> {
        self(old, new)
    }
}

/// Extract the current version, requiring every artifact copy to agree.
///
/// The first artifact is the source of truth; any other copy recording a
/// different token is an inconsistency that must be fixed by hand before
/// the tool will touch the tree.
pub fn current_version(artifacts: &[Artifact], repo: &GitRepo) -> Result<VersionToken> {
    let first = artifacts
        .first()
        .ok_or_else(|| BumptagError::config("no artifacts configured in bumptag.toml"))?;

    let version = first.read_version(repo.work_tree())?;

    for artifact in &artifacts[1..] {
        let other = artifact.read_version(repo.work_tree())?;
        if other != version {
            return Err(BumptagError::metadata(format!(
                "version mismatch: {} has {}, but {} has {}",
                first.path.display(),
                version,
                artifact.path.display(),
                other
            )));
        }
    }

    Ok(version)
}

/// Bump the final version component across all artifacts and commit.
///
/// Steps, strictly in order:
/// 1. extract the current version (all copies must agree)
/// 2. pre-scan every artifact for the exact old marker line
/// 3. confirmation gate — a decline aborts with zero mutation
/// 4. rewrite every artifact
/// 5. `git commit -a -m "version <new>"`
///
/// A commit failure leaves the files bumped; there is no rollback, the
/// operator retries the commit by hand.
pub fn run_bump(config: &Config, repo: &GitRepo, confirm: &mut dyn Confirm) -> Result<VersionToken> {
    let artifacts = config.artifacts();
    let old = current_version(&artifacts, repo)?;
    let new = old.bump_patch();

    // Fail-fast: formatting drift in any artifact aborts before the prompt
    for artifact in &artifacts {
        artifact.verify_replaceable(repo.work_tree(), &old)?;
    }

    if !confirm.confirm(&old, &new)? {
        return Err(BumptagError::Aborted);
    }

    for artifact in &artifacts {
        artifact.apply_bump(repo.work_tree(), &old, &new)?;
    }

    repo.commit_all(&format!("version {}", new))?;

    Ok(new)
}

/// Outcome of a release: the tag that was created and pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    pub version: VersionToken,
    pub tag_name: String,
}

/// Tag the current commit as `v<version>` and push the tag.
///
/// The annotation message is `version <version>`. On push failure the local
/// tag is left in place; the caller surfaces the partial state to the
/// operator.
pub fn run_release(config: &Config, repo: &GitRepo, sign: bool) -> Result<ReleaseOutcome> {
    let artifacts = config.artifacts();
    let version = current_version(&artifacts, repo)?;

    let tag_name = format!("v{}", version);
    let message = format!("version {}", version);

    repo.create_annotated_tag(&tag_name, &message, sign)?;
    repo.push_tag(&config.remote, &tag_name)?;

    Ok(ReleaseOutcome { version, tag_name })
}
