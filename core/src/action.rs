pub mod error {
    #[allow(unused_imports)]
    pub(crate) use anyhow::{anyhow, bail, ensure, Context as _};
    pub use anyhow::{Error, Result};
}

use std::path::{Path, PathBuf};
use std::time::Duration;

use cft_webclient::{
    codeforces::CountMismatch, CodeforcesClient, ProblemLetter, ProblemMetadata, ProblemTarget,
    Url,
};
use error::*;

use crate::config::Config;
use crate::report::{TestPlan, TestReport, TestReporter, TimeLimitSource};
use crate::storage::{self, SavedProblemData, TestsDir};
use crate::testing::{
    judge_testcase, FsTestcase, FsTestcaseFinder as _, LetterTestcaseFinder, OutputResolver,
    TestRunner,
};

pub fn init_config_file(dir: impl AsRef<Path>) -> Result<PathBuf> {
    let path = dir.as_ref().join(Config::FILENAME);
    ensure!(
        !path.exists(),
        "{} already exists",
        path.to_string_lossy()
    );
    let toml = Config::example_toml()?;
    fsutil::write_with_mkdir(&path, toml).context("Failed to write config file")?;
    Ok(path)
}

#[derive(Debug, Clone)]
pub struct FetchSummary {
    pub url: Url,
    pub metadata: ProblemMetadata,
    pub saved: SavedProblemData,
    pub count_mismatch: Option<CountMismatch>,
}

/// Fetches the problem page, extracts its samples and writes them to `tests_dir`.
///
/// When the page has no usable samples, the raw HTML is written to
/// `debug_dir/debug_{contestId}_{letter}.html` before returning the error.
pub async fn fetch_and_save_samples(
    cli: &CodeforcesClient,
    target: &ProblemTarget,
    tests_dir: &TestsDir,
    debug_dir: impl AsRef<Path>,
) -> Result<FetchSummary> {
    let page = cli
        .fetch_problem_page(target)
        .await
        .with_context(|| format!("Failed to fetch problem {}", target))?;

    let scraped = match page.scrape_samples(target) {
        Ok(scraped) => scraped,
        Err(e) if e.is_no_sample_tests() => {
            let dump = debug_dir
                .as_ref()
                .join(storage::debug_dump_filename(target));
            return match fsutil::write_with_mkdir(&dump, &page.html) {
                Ok(()) => Err(anyhow!(e).context(format!(
                    "Failed to extract sample tests of {} (HTML saved to {} for inspection)",
                    target,
                    dump.to_string_lossy()
                ))),
                Err(write_err) => {
                    log::warn!("Failed to save debug HTML: {}", write_err);
                    Err(anyhow!(e)
                        .context(format!("Failed to extract sample tests of {}", target)))
                }
            };
        }
        Err(e) => {
            return Err(anyhow!(e).context(format!(
                "Failed to extract sample tests of {} ({})",
                target, page.url
            )))
        }
    };

    let metadata = ProblemMetadata::new(target, &scraped.time_limit, scraped.testcases.len());
    let saved = tests_dir
        .save_problem_data(&metadata, &scraped.testcases, target.letter)
        .context("Failed to save sample tests")?;

    Ok(FetchSummary {
        url: page.url,
        metadata,
        saved,
        count_mismatch: scraped.count_mismatch,
    })
}

/// Time limit from `{letter}_metadata.json`, else `default`.
pub fn load_time_limit(
    tests_dir: &TestsDir,
    letter: ProblemLetter,
    default: Duration,
) -> (Duration, TimeLimitSource) {
    let path = tests_dir.metadata_file(letter);
    let fallback = |reason: String| {
        log::warn!("{}; using default time limit", reason);
        (default, TimeLimitSource::Default(reason))
    };

    let metadata = match tests_dir.load_metadata(letter) {
        Ok(m) => m,
        Err(e) if e.is_not_found() => {
            return fallback(format!("No metadata file found ({})", path.to_string_lossy()))
        }
        Err(e) => return fallback(format!("Error reading metadata file: {}", e)),
    };

    let limit = metadata
        .time_limit_secs()
        .and_then(|secs| Duration::try_from_secs_f64(secs).ok());
    match limit {
        Some(limit) => {
            log::info!("Time limit {:?} from {}", limit, path.to_string_lossy());
            (limit, TimeLimitSource::Metadata(path))
        }
        None => fallback(format!(
            "No usable time limit in {} (given '{}')",
            path.to_string_lossy(),
            metadata.time_limit
        )),
    }
}

#[derive(Debug, Clone)]
pub struct TestRunOptions {
    pub problem_letter: ProblemLetter,
    pub executable: PathBuf,
    pub tests_dir: TestsDir,
    /// Working directory of the program; `Output.txt` is looked up here.
    pub work_dir: PathBuf,
    pub output_file: PathBuf,
    pub time_limit: Duration,
    pub time_limit_source: TimeLimitSource,
}

/// Runs every `{letter}*.in` test in order, one at a time.
///
/// Fails before running anything if the executable does not exist or no test is found.
pub async fn run_tests(
    opts: &TestRunOptions,
    reporter: &mut dyn TestReporter,
) -> Result<TestReport> {
    let executable = TestRunner::resolve_executable(&opts.executable)?;

    let finder = LetterTestcaseFinder::new(opts.problem_letter);
    let testcases = FsTestcase::enumerate(opts.tests_dir.dir(), &finder)
        .context("Failed to find testcases")?;
    if testcases.is_empty() {
        bail!(
            "No test files found for problem {} (looking for {} in {})",
            opts.problem_letter,
            finder.input_filename_pattern(),
            opts.tests_dir.dir().to_string_lossy()
        );
    }

    let runner = TestRunner::new(&executable)
        .work_dir(&opts.work_dir)
        .execution_time_limit(opts.time_limit);
    let resolver = OutputResolver::new(opts.work_dir.join(&opts.output_file));

    log::debug!("Running: {}", executable.to_string_lossy());
    reporter.on_start(&TestPlan {
        problem_letter: opts.problem_letter,
        executable,
        testcase_count: testcases.len(),
        time_limit: opts.time_limit,
        time_limit_source: opts.time_limit_source.clone(),
    });

    let mut outcomes = Vec::with_capacity(testcases.len());
    for t in &testcases {
        reporter.on_testcase_start(t);
        let outcome = judge_testcase(&runner, &resolver, t).await;
        reporter.on_testcase_finish(&outcome);
        outcomes.push(outcome);
    }

    let report = TestReport::new(outcomes);
    reporter.on_finish(&report);
    Ok(report)
}

#[cfg(test)]
mod test {
    use super::*;
    use cft_webclient::ContestId;

    fn letter() -> ProblemLetter {
        ProblemLetter::parse("C").unwrap()
    }

    #[test]
    fn time_limit_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let tests = TestsDir::new(dir.path());
        fsutil::write(
            tests.metadata_file(letter()),
            r#"{"contestId": "1", "problemLetter": "C", "timeLimit": "1.5 seconds", "testCount": 1}"#,
        )
        .unwrap();

        let (limit, source) = load_time_limit(&tests, letter(), Duration::from_secs(6));
        assert_eq!(limit, Duration::from_millis(1500));
        assert_eq!(source, TimeLimitSource::Metadata(tests.metadata_file(letter())));
    }

    #[test]
    fn time_limit_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let tests = TestsDir::new(dir.path());
        let default = Duration::from_secs(6);

        let (limit, source) = load_time_limit(&tests, letter(), default);
        assert_eq!(limit, default);
        assert!(matches!(source, TimeLimitSource::Default(reason) if reason.starts_with("No metadata file found")));

        fsutil::write(tests.metadata_file(letter()), "{ not json").unwrap();
        let (limit, source) = load_time_limit(&tests, letter(), default);
        assert_eq!(limit, default);
        assert!(matches!(source, TimeLimitSource::Default(reason) if reason.starts_with("Error reading metadata file")));

        let meta = ProblemMetadata {
            contest_id: ContestId::parse("1").unwrap().to_string(),
            problem_letter: "C".to_owned(),
            time_limit: String::new(),
            test_count: 0,
        };
        fsutil::write_json_pretty_with_mkdir(tests.metadata_file(letter()), &meta).unwrap();
        let (limit, _) = load_time_limit(&tests, letter(), default);
        assert_eq!(limit, default);
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = init_config_file(dir.path()).unwrap();
        assert!(Config::from_toml_file(path).is_ok());
        assert!(init_config_file(dir.path()).is_err());
    }
}
