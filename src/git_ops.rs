use crate::error::{BumptagError, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Wrapper around the system `git` binary for commit, tag, and push.
///
/// Every mutating command is echoed to the operator before it runs, and a
/// non-zero exit maps to an error carrying the literal command line and the
/// exit status, so the operator sees exactly what failed and the status can
/// be propagated as the process exit code.
pub struct GitRepo {
    work_tree: PathBuf,
}

/// Which workflow step a git command belongs to, for error classification.
enum GitStep {
    Commit,
    Tag,
    Push,
}

impl GitRepo {
    /// Open the git repository containing `path`.
    ///
    /// # Returns
    /// * `Ok(GitRepo)` - rooted at the repository work tree
    /// * `Err` - if `path` is not inside a git work tree
    pub fn open(path: &Path) -> Result<Self> {
        let output = Command::new("git")
            .current_dir(path)
            .args(["rev-parse", "--show-toplevel"])
            .output()?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(BumptagError::config(format!(
                "not a git repository: {}",
                stderr.trim()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(GitRepo {
            work_tree: PathBuf::from(stdout.trim()),
        })
    }

    /// The repository work tree root.
    pub fn work_tree(&self) -> &Path {
        &self.work_tree
    }

    /// Commit all working-tree changes: `git commit -a -m <message>`.
    pub fn commit_all(&self, message: &str) -> Result<()> {
        self.run(GitStep::Commit, &["commit", "-a", "-m", message])
    }

    /// Create an annotated tag at HEAD: `git tag -a <name> -m <message> [-s]`.
    ///
    /// When `sign` is true the tag is additionally GPG-signed; the signing
    /// key setup is external and assumed pre-configured.
    pub fn create_annotated_tag(&self, name: &str, message: &str, sign: bool) -> Result<()> {
        let mut args = vec!["tag", "-a", name, "-m", message];
        if sign {
            args.push("-s");
        }
        self.run(GitStep::Tag, &args)
    }

    /// Push a single tag ref to a remote: `git push <remote> <tag_name>`.
    ///
    /// Only the named ref is pushed, never the whole repository.
    pub fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        self.run(GitStep::Push, &["push", remote, tag_name])
    }

    fn run(&self, step: GitStep, args: &[&str]) -> Result<()> {
        let command_line = render_command_line(args);
        crate::ui::display_command(&command_line);

        let status = Command::new("git")
            .current_dir(&self.work_tree)
            .args(args)
            .status()?;

        if status.success() {
            return Ok(());
        }

        // Killed by signal on unix leaves no code; report -1 like the shell
        let code = status.code().unwrap_or(-1);
        Err(match step {
            GitStep::Commit => BumptagError::Commit {
                command: command_line,
                status: code,
            },
            GitStep::Tag => BumptagError::Tag {
                command: command_line,
                status: code,
            },
            GitStep::Push => BumptagError::Push {
                command: command_line,
                status: code,
            },
        })
    }
}

/// Render the full command line as the operator would type it.
fn render_command_line(args: &[&str]) -> String {
    let mut parts = vec!["git".to_string()];
    for arg in args {
        if arg.contains(' ') {
            parts.push(format!("'{}'", arg));
        } else {
            parts.push(arg.to_string());
        }
    }
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Initialize a throwaway git repo with one commit.
    fn init_repo(dir: &Path) {
        let run = |args: &[&str]| {
            let status = Command::new("git")
                .current_dir(dir)
                .args(args)
                .status()
                .expect("failed to run git");
            assert!(status.success(), "git {:?} failed", args);
        };

        run(&["init", "-q"]);
        run(&["config", "user.name", "Test User"]);
        run(&["config", "user.email", "test@example.com"]);
        fs::write(dir.join("README.md"), "initial\n").unwrap();
        run(&["add", "README.md"]);
        run(&["commit", "-q", "-m", "Initial commit"]);
    }

    fn git_stdout(dir: &Path, args: &[&str]) -> String {
        let output = Command::new("git")
            .current_dir(dir)
            .args(args)
            .output()
            .expect("failed to run git");
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    #[test]
    fn test_render_command_line() {
        assert_eq!(
            render_command_line(&["commit", "-a", "-m", "version 1.2.4"]),
            "git commit -a -m 'version 1.2.4'"
        );
        assert_eq!(
            render_command_line(&["push", "origin", "v1.2.4"]),
            "git push origin v1.2.4"
        );
    }

    #[test]
    fn test_open_outside_repo_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = GitRepo::open(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_open_finds_work_tree_from_subdirectory() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();

        let repo = GitRepo::open(&sub).unwrap();
        assert_eq!(
            repo.work_tree().canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_commit_all() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());
        fs::write(dir.path().join("README.md"), "changed\n").unwrap();

        let repo = GitRepo::open(dir.path()).unwrap();
        repo.commit_all("version 1.2.4").unwrap();

        let subject = git_stdout(dir.path(), &["log", "-1", "--format=%s"]);
        assert_eq!(subject.trim(), "version 1.2.4");
    }

    #[test]
    fn test_create_annotated_tag() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());

        let repo = GitRepo::open(dir.path()).unwrap();
        repo.create_annotated_tag("v2.0.1", "version 2.0.1", false)
            .unwrap();

        let tags = git_stdout(dir.path(), &["tag", "--list"]);
        assert!(tags.contains("v2.0.1"));
        let annotation = git_stdout(
            dir.path(),
            &["tag", "--list", "--format=%(contents:subject)", "v2.0.1"],
        );
        assert_eq!(annotation.trim(), "version 2.0.1");
    }

    #[test]
    fn test_create_duplicate_tag_fails_with_status() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());

        let repo = GitRepo::open(dir.path()).unwrap();
        repo.create_annotated_tag("v1.0.0", "version 1.0.0", false)
            .unwrap();

        let err = repo
            .create_annotated_tag("v1.0.0", "version 1.0.0", false)
            .unwrap_err();
        match err {
            BumptagError::Tag { command, status } => {
                assert!(command.contains("git tag -a v1.0.0"));
                assert_ne!(status, 0);
            }
            other => panic!("expected Tag error, got {:?}", other),
        }
    }

    #[test]
    fn test_push_tag_to_bare_remote() {
        let dir = tempfile::tempdir().unwrap();
        let work = dir.path().join("work");
        let remote = dir.path().join("remote.git");
        fs::create_dir_all(&work).unwrap();
        init_repo(&work);

        let status = Command::new("git")
            .args(["init", "-q", "--bare"])
            .arg(&remote)
            .status()
            .unwrap();
        assert!(status.success());
        let status = Command::new("git")
            .current_dir(&work)
            .args(["remote", "add", "origin"])
            .arg(&remote)
            .status()
            .unwrap();
        assert!(status.success());

        let repo = GitRepo::open(&work).unwrap();
        repo.create_annotated_tag("v1.2.4", "version 1.2.4", false)
            .unwrap();
        repo.push_tag("origin", "v1.2.4").unwrap();

        let remote_tags = git_stdout(&remote, &["tag", "--list"]);
        assert!(remote_tags.contains("v1.2.4"));
    }

    #[test]
    fn test_push_to_missing_remote_fails() {
        let dir = tempfile::tempdir().unwrap();
        init_repo(dir.path());

        let repo = GitRepo::open(dir.path()).unwrap();
        repo.create_annotated_tag("v1.0.0", "version 1.0.0", false)
            .unwrap();

        let err = repo.push_tag("origin", "v1.0.0").unwrap_err();
        match err {
            BumptagError::Push { command, status } => {
                assert_eq!(command, "git push origin v1.0.0");
                assert_ne!(status, 0);
            }
            other => panic!("expected Push error, got {:?}", other),
        }
    }
}
