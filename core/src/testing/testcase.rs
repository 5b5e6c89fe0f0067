use std::path::{Path, PathBuf};

use anyhow::Context as _;
use cft_webclient::ProblemLetter;

/// A sample test stored as an `.in` file plus its expected `.out` sibling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FsTestcase {
    name: String,
    input_data_path: PathBuf,
    groundtruth_data_path: PathBuf,
}

pub trait FsTestcaseFinder {
    /// Glob matched against file names in the testcase directory.
    fn input_filename_pattern(&self) -> String;

    fn find_by_input_file_path(&self, path: impl AsRef<Path>) -> Option<FsTestcase>;
}

impl FsTestcase {
    pub fn new(
        name: impl Into<String>,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            input_data_path: input.into(),
            groundtruth_data_path: output.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn input_file(&self) -> &Path {
        &self.input_data_path
    }

    pub fn groundtruth_file(&self) -> &Path {
        &self.groundtruth_data_path
    }

    pub fn has_groundtruth(&self) -> bool {
        self.groundtruth_data_path.is_file()
    }

    pub async fn read_input(&self) -> anyhow::Result<String> {
        tokio::fs::read_to_string(&self.input_data_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to read testcase {}",
                    self.input_data_path.to_string_lossy()
                )
            })
    }

    pub async fn read_groundtruth(&self) -> anyhow::Result<String> {
        tokio::fs::read_to_string(&self.groundtruth_data_path)
            .await
            .with_context(|| {
                format!(
                    "Failed to read testcase {}",
                    self.groundtruth_data_path.to_string_lossy()
                )
            })
    }

    /// Sorted by name.
    pub fn enumerate(
        dir: impl AsRef<Path>,
        finder: &impl FsTestcaseFinder,
    ) -> fsutil::Result<Vec<Self>> {
        let mut res: Vec<Self> = fsutil::find_files(&dir, &finder.input_filename_pattern())?
            .into_iter()
            .filter_map(|path| finder.find_by_input_file_path(path))
            .collect();
        res.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(res)
    }
}

/// Finds `{letter}*.in` files; `B1.in` pairs with `B1.out` and is named `B1`.
#[derive(Debug, Clone, Copy)]
pub struct LetterTestcaseFinder {
    letter: ProblemLetter,
}

impl LetterTestcaseFinder {
    pub fn new(letter: ProblemLetter) -> Self {
        Self { letter }
    }
}

impl FsTestcaseFinder for LetterTestcaseFinder {
    fn input_filename_pattern(&self) -> String {
        format!("{}*.in", self.letter)
    }

    fn find_by_input_file_path(&self, path: impl AsRef<Path>) -> Option<FsTestcase> {
        let path = path.as_ref();
        if path.extension()? != "in" {
            return None;
        }
        let name = path.file_stem()?.to_str()?;
        if !name.starts_with(self.letter.as_char()) {
            return None;
        }
        Some(FsTestcase::new(name, path, path.with_extension("out")))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn letter(s: &str) -> ProblemLetter {
        ProblemLetter::parse(s).unwrap()
    }

    #[test]
    fn enumerate_pairs_in_and_out_files() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["B1.in", "B1.out", "B2.in", "B10.in", "B10.out", "A1.in", "B_metadata.json"] {
            fsutil::write(dir.path().join(name), "").unwrap();
        }

        let got = FsTestcase::enumerate(dir.path(), &LetterTestcaseFinder::new(letter("b"))).unwrap();
        let names: Vec<&str> = got.iter().map(|t| t.name()).collect();
        assert_eq!(names, vec!["B1", "B10", "B2"]);

        assert_eq!(got[0].groundtruth_file(), dir.path().join("B1.out"));
        assert!(got[0].has_groundtruth());
        assert!(!got[2].has_groundtruth());
    }

    #[test]
    fn missing_dir_has_no_testcases() {
        let dir = tempfile::tempdir().unwrap();
        let got = FsTestcase::enumerate(dir.path().join("nope"), &LetterTestcaseFinder::new(letter("A")))
            .unwrap();
        assert!(got.is_empty());
    }

    #[tokio::test]
    async fn read_contents() {
        let dir = tempfile::tempdir().unwrap();
        let t = FsTestcase::new("A1", dir.path().join("A1.in"), dir.path().join("A1.out"));
        fsutil::write(t.input_file(), "1 2\n").unwrap();

        assert_eq!(t.read_input().await.unwrap(), "1 2\n");
        assert!(t.read_groundtruth().await.is_err());
    }
}
