use std::path::{Path, PathBuf};

use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum OutputSource {
    #[strum(serialize = "output file")]
    File,
    #[strum(serialize = "stdout")]
    Stdout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOutput {
    pub source: OutputSource,
    /// Whitespace-trimmed text.
    pub text: String,
}

/// Decides where a candidate's answer comes from.
///
/// If the output file exists after the run it is authoritative, even when empty.
/// Otherwise non-blank stdout is used.
#[derive(Debug, Clone)]
pub struct OutputResolver {
    output_file: PathBuf,
}

impl OutputResolver {
    pub const DEFAULT_FILENAME: &str = "Output.txt";

    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        Self {
            output_file: output_file.into(),
        }
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }

    /// Removes an output file left over from a previous run.
    /// Must be called before every launch.
    pub fn discard_stale(&self) -> fsutil::Result<()> {
        if fsutil::remove_file_if_exists(&self.output_file)? {
            log::debug!("Removed stale {}", self.output_file.to_string_lossy());
        }
        Ok(())
    }

    pub fn resolve(&self, stdout: &str) -> fsutil::Result<Option<ResolvedOutput>> {
        if self.output_file.is_file() {
            let text = fsutil::read_to_string(&self.output_file)?;
            return Ok(Some(ResolvedOutput {
                source: OutputSource::File,
                text: text.trim().to_owned(),
            }));
        }

        let text = stdout.trim();
        if text.is_empty() {
            return Ok(None);
        }
        Ok(Some(ResolvedOutput {
            source: OutputSource::Stdout,
            text: text.to_owned(),
        }))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn resolver() -> (tempfile::TempDir, OutputResolver) {
        let dir = tempfile::tempdir().unwrap();
        let r = OutputResolver::new(dir.path().join(OutputResolver::DEFAULT_FILENAME));
        (dir, r)
    }

    #[test]
    fn file_wins_over_stdout() {
        let (_dir, r) = resolver();
        fsutil::write(r.output_file(), "  42\n\n").unwrap();

        let got = r.resolve("from stdout\n").unwrap().unwrap();
        assert_eq!(got.source, OutputSource::File);
        assert_eq!(got.text, "42");
    }

    #[test]
    fn empty_file_is_still_authoritative() {
        let (_dir, r) = resolver();
        fsutil::write(r.output_file(), "").unwrap();

        let got = r.resolve("7\n").unwrap().unwrap();
        assert_eq!(got.source, OutputSource::File);
        assert_eq!(got.text, "");
    }

    #[test]
    fn stdout_is_used_without_file() {
        let (_dir, r) = resolver();
        let got = r.resolve("\n 7 8 \n").unwrap().unwrap();
        assert_eq!(got.source, OutputSource::Stdout);
        assert_eq!(got.text, "7 8");

        assert_eq!(r.resolve(" \n\t").unwrap(), None);
    }

    #[test]
    fn discard_stale_removes_previous_output() {
        let (_dir, r) = resolver();
        r.discard_stale().unwrap();

        fsutil::write(r.output_file(), "old").unwrap();
        r.discard_stale().unwrap();
        assert!(!r.output_file().exists());
        assert_eq!(r.resolve("").unwrap(), None);
    }
}
