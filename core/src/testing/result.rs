use std::time::Duration;

use strum::{Display, EnumIter};

use super::output::OutputSource;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// `None` when the process was killed or terminated by a signal.
    pub status: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum JudgeCode {
    #[strum(serialize = "AC")]
    AC,
    #[strum(serialize = "WA")]
    WA,
    #[strum(serialize = "TLE")]
    TLE,
    #[strum(serialize = "RE")]
    RE,
    /// Neither the output file nor stdout had anything in it.
    #[strum(serialize = "NO")]
    NoOutput,
    /// The `.in` file has no `.out` sibling.
    #[strum(serialize = "MO")]
    MissingOutputFile,
    #[strum(serialize = "NF")]
    ExecutableNotFound,
    /// The harness itself failed (unreadable files, broken pipes, ...).
    #[strum(serialize = "IE")]
    InternalError,
}

impl JudgeCode {
    pub fn description(self) -> &'static str {
        use JudgeCode::*;
        match self {
            AC => "ACCEPTED",
            WA => "WRONG ANSWER",
            TLE => "TIME LIMIT EXCEEDED",
            RE => "RUNTIME ERROR",
            NoOutput => "NO OUTPUT GENERATED",
            MissingOutputFile => "MISSING OUTPUT FILE",
            ExecutableNotFound => "EXECUTABLE NOT FOUND",
            InternalError => "INTERNAL ERROR",
        }
    }

    pub fn is_accepted(self) -> bool {
        self == JudgeCode::AC
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestOutcome {
    pub testcase_name: String,
    pub judge: JudgeCode,
    /// Human readable diagnostic: the line diff for WA, the exit code for RE, etc.
    pub detail: Option<String>,
    pub execution_time: Option<Duration>,
    pub output: Option<ProcessOutput>,
    pub output_source: Option<OutputSource>,
}

impl TestOutcome {
    pub fn new(testcase_name: impl Into<String>, judge: JudgeCode) -> Self {
        Self {
            testcase_name: testcase_name.into(),
            judge,
            detail: None,
            execution_time: None,
            output: None,
            output_source: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn is_accepted(&self) -> bool {
        self.judge.is_accepted()
    }
}
