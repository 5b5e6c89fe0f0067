use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use cft_webclient::ProblemLetter;

use crate::testing::{FsTestcase, JudgeCode, TestOutcome};

/// Where the execution time limit of a run came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeLimitSource {
    Metadata(PathBuf),
    CommandLine,
    /// The reason the metadata could not be used.
    Default(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestPlan {
    pub problem_letter: ProblemLetter,
    pub executable: PathBuf,
    pub testcase_count: usize,
    pub time_limit: Duration,
    pub time_limit_source: TimeLimitSource,
}

/// Receives progress of a test run. Implemented by the console and by tests.
pub trait TestReporter {
    fn on_start(&mut self, _plan: &TestPlan) {}

    fn on_testcase_start(&mut self, _testcase: &FsTestcase) {}

    fn on_testcase_finish(&mut self, outcome: &TestOutcome);

    fn on_finish(&mut self, _report: &TestReport) {}
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentReporter;

impl TestReporter for SilentReporter {
    fn on_testcase_finish(&mut self, _outcome: &TestOutcome) {}
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TestReport {
    pub outcomes: Vec<TestOutcome>,
}

impl TestReport {
    pub fn new(outcomes: Vec<TestOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_accepted()).count()
    }

    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// False for an empty report.
    pub fn is_all_passed(&self) -> bool {
        self.total() > 0 && self.passed() == self.total()
    }

    pub fn count_by_judge(&self) -> BTreeMap<JudgeCode, usize> {
        self.outcomes.iter().fold(BTreeMap::new(), |mut count, o| {
            *count.entry(o.judge).or_default() += 1;
            count
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = &TestOutcome> {
        self.outcomes.iter().filter(|o| !o.is_accepted())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn empty_report_is_not_a_pass() {
        let r = TestReport::default();
        assert_eq!(r.total(), 0);
        assert!(!r.is_all_passed());
    }

    #[test]
    fn counts() {
        let r = TestReport::new(vec![
            TestOutcome::new("A1", JudgeCode::AC),
            TestOutcome::new("A2", JudgeCode::WA),
            TestOutcome::new("A3", JudgeCode::WA),
            TestOutcome::new("A4", JudgeCode::TLE),
        ]);
        assert_eq!((r.passed(), r.failed(), r.total()), (1, 3, 4));
        assert!(!r.is_all_passed());
        assert_eq!(r.count_by_judge().get(&JudgeCode::WA), Some(&2));
        assert_eq!(r.failures().count(), 3);
    }
}
