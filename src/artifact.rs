use crate::error::{BumptagError, Result};
use crate::version::VersionToken;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// The known metadata artifact formats.
///
/// Each kind knows how to locate the version marker line in a file and how
/// to render the exact replacement line. Adding a new format means adding a
/// variant here; the bump workflow itself does not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// A module metadata file with a line of the form `__version__ = '1.2.3'`
    Module,
    /// A packaging spec file with a line of the form `Version:        1.2.3`
    /// (the column spacing is part of the literal match)
    Spec,
}

impl ArtifactKind {
    fn marker_regex(&self) -> regex::Regex {
        let pattern = match self {
            ArtifactKind::Module => r"(?m)^__version__\s*=\s*'([^']+)'\s*$",
            ArtifactKind::Spec => r"(?m)^Version:[ \t]+(\S+)\s*$",
        };
        // Both patterns are fixed literals, known-valid
        regex::Regex::new(pattern).unwrap()
    }

    /// Extract the version token from artifact contents.
    ///
    /// Fails if no marker line is present, and also if more than one is:
    /// duplicate markers are ambiguous and silently picking one would let
    /// the copies drift apart.
    pub fn extract(&self, text: &str) -> Result<VersionToken> {
        let re = self.marker_regex();
        let mut captures = re.captures_iter(text);

        let first = captures
            .next()
            .ok_or_else(|| BumptagError::metadata("no version marker line found"))?;

        if captures.next().is_some() {
            return Err(BumptagError::metadata(
                "multiple version marker lines found; refusing to pick one",
            ));
        }

        VersionToken::parse(&first[1])
    }

    /// Render the exact marker line for a version.
    ///
    /// This is the literal text used for substring replacement, so it must
    /// match the on-disk formatting byte for byte.
    pub fn render_line(&self, version: &VersionToken) -> String {
        match self {
            ArtifactKind::Module => format!("__version__ = '{}'", version),
            ArtifactKind::Spec => format!("Version:        {}", version),
        }
    }
}

/// A text file holding one canonical copy of the version token.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub path: PathBuf,
    pub kind: ArtifactKind,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, kind: ArtifactKind) -> Self {
        Artifact {
            path: path.into(),
            kind,
        }
    }

    fn resolved_path(&self, root: &Path) -> PathBuf {
        if self.path.is_absolute() {
            self.path.clone()
        } else {
            root.join(&self.path)
        }
    }

    fn read_text(&self, root: &Path) -> Result<String> {
        let path = self.resolved_path(root);
        fs::read_to_string(&path).map_err(|e| {
            BumptagError::metadata(format!("cannot read {}: {}", path.display(), e))
        })
    }

    /// Read and extract the version currently recorded in this artifact.
    pub fn read_version(&self, root: &Path) -> Result<VersionToken> {
        let text = self.read_text(root)?;
        match self.kind.extract(&text) {
            Err(BumptagError::Metadata(msg)) => Err(BumptagError::metadata(format!(
                "{}: {}",
                self.path.display(),
                msg
            ))),
            other => other,
        }
    }

    /// Verify the exact old marker line is present exactly once.
    ///
    /// Run over every artifact before any file is rewritten, so formatting
    /// drift fails the whole bump instead of producing a silent no-op
    /// rewrite on one copy.
    pub fn verify_replaceable(&self, root: &Path, old: &VersionToken) -> Result<()> {
        let text = self.read_text(root)?;
        let old_line = self.kind.render_line(old);

        match text.matches(old_line.as_str()).count() {
            1 => Ok(()),
            0 => Err(BumptagError::metadata(format!(
                "{}: expected line `{}` not found verbatim",
                self.path.display(),
                old_line
            ))),
            n => Err(BumptagError::metadata(format!(
                "{}: expected line `{}` found {} times",
                self.path.display(),
                old_line,
                n
            ))),
        }
    }

    /// Rewrite the artifact, replacing the old marker line with the new one.
    ///
    /// Whole-file read and rewrite; literal substring substitution. The same
    /// exactly-once check as [Artifact::verify_replaceable] guards the write.
    pub fn apply_bump(&self, root: &Path, old: &VersionToken, new: &VersionToken) -> Result<()> {
        self.verify_replaceable(root, old)?;

        let text = self.read_text(root)?;
        let old_line = self.kind.render_line(old);
        let new_line = self.kind.render_line(new);
        let updated = text.replace(old_line.as_str(), new_line.as_str());

        let path = self.resolved_path(root);
        fs::write(&path, updated).map_err(|e| {
            BumptagError::metadata(format!("cannot write {}: {}", path.display(), e))
        })?;
        Ok(())
    }
}
