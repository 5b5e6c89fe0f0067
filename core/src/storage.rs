use std::path::{Path, PathBuf};

use cft_webclient::{ProblemLetter, ProblemMetadata, ProblemTarget, SampleTestcase};

/// Flat directory holding the sample tests of every problem:
/// `B1.in`, `B1.out`, ..., `B_metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestsDir {
    dir: PathBuf,
}

/// Locations written by [`TestsDir::save_problem_data`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedProblemData {
    pub testcase_files: Vec<(PathBuf, PathBuf)>,
    pub metadata_file: PathBuf,
}

impl TestsDir {
    pub const DEFAULT_DIRNAME: &str = "tests";

    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn testcase_filenames(letter: ProblemLetter, ord: u32) -> (String, String) {
        (format!("{}{}.in", letter, ord), format!("{}{}.out", letter, ord))
    }

    pub fn metadata_file(&self, letter: ProblemLetter) -> PathBuf {
        self.dir.join(format!("{}_metadata.json", letter))
    }

    /// Overwrites existing files with the same names. Files of a previous fetch with a
    /// higher ordinal are left in place.
    pub fn save_problem_data(
        &self,
        metadata: &ProblemMetadata,
        testcases: &[SampleTestcase],
        letter: ProblemLetter,
    ) -> fsutil::Result<SavedProblemData> {
        fsutil::mkdir_all(&self.dir)?;

        let mut testcase_files = Vec::with_capacity(testcases.len());
        for t in testcases {
            let (in_name, out_name) = Self::testcase_filenames(letter, t.ord);
            let in_path = self.dir.join(in_name);
            let out_path = self.dir.join(out_name);
            fsutil::write(&in_path, with_final_newline(&t.input))?;
            fsutil::write(&out_path, with_final_newline(&t.output))?;
            testcase_files.push((in_path, out_path));
        }

        let metadata_file = self.metadata_file(letter);
        fsutil::write_json_pretty_with_mkdir(&metadata_file, metadata)?;

        Ok(SavedProblemData {
            testcase_files,
            metadata_file,
        })
    }

    pub fn load_metadata(&self, letter: ProblemLetter) -> fsutil::Result<ProblemMetadata> {
        fsutil::read_json_with_deserialize(self.metadata_file(letter))
    }
}

/// `debug_{contestId}_{letter}.html`
pub fn debug_dump_filename(target: &ProblemTarget) -> String {
    format!("debug_{}_{}.html", target.contest_id, target.letter)
}

fn with_final_newline(s: &str) -> String {
    let mut s = s.trim_end().to_owned();
    s.push('\n');
    s
}

#[cfg(test)]
mod test {
    use super::*;
    use cft_webclient::{ContestId, SiteKind};

    fn target() -> ProblemTarget {
        ProblemTarget::new(
            SiteKind::Contest,
            ContestId::parse("2139").unwrap(),
            ProblemLetter::parse("b").unwrap(),
        )
    }

    #[test]
    fn save_and_load() {
        let tmp = tempfile::tempdir().unwrap();
        let tests = TestsDir::new(tmp.path().join("tests"));
        let t = target();

        let meta = ProblemMetadata::new(&t, "2 seconds", 2);
        let cases = vec![
            SampleTestcase {
                ord: 1,
                input: "3\n1 2 3".to_owned(),
                output: "6\n\n".to_owned(),
            },
            SampleTestcase {
                ord: 2,
                input: "0".to_owned(),
                output: "0".to_owned(),
            },
        ];

        let saved = tests.save_problem_data(&meta, &cases, t.letter).unwrap();
        assert_eq!(saved.testcase_files.len(), 2);
        assert_eq!(saved.metadata_file, tmp.path().join("tests/B_metadata.json"));

        let read = |name: &str| fsutil::read_to_string(tmp.path().join("tests").join(name)).unwrap();
        assert_eq!(read("B1.in"), "3\n1 2 3\n");
        assert_eq!(read("B1.out"), "6\n");
        assert_eq!(read("B2.out"), "0\n");

        assert_eq!(tests.load_metadata(t.letter).unwrap(), meta);
    }

    #[test]
    fn missing_metadata_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = TestsDir::new(tmp.path())
            .load_metadata(target().letter)
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn debug_dump_name() {
        assert_eq!(debug_dump_filename(&target()), "debug_2139_B.html");
    }
}
