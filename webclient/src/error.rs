use std::fmt;

use reqwest::StatusCode;

pub type Result<T> = ::std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Problem {problem} not found")]
    ProblemNotFound { problem: String },

    #[error(
        "Contest {contest_id} not found or not public \
         (try `gym`, check the contest ID, or wait if the contest is running)"
    )]
    ContestNotFound { contest_id: String },

    #[error("Problem {problem} found but has no sample tests: {reason}")]
    NoSampleTests {
        problem: String,
        reason: NoSampleReason,
    },

    #[error("Failed to parse the page of {problem}: {reason}")]
    ParseFailure { problem: String, reason: String },

    #[error("Failed to parse as URL '{url}'")]
    InvalidSyntaxUrl {
        url: String,

        #[source]
        source: url::ParseError,
    },

    #[error("Unexpected response code '{got}' (expected '{expected}') while requesting to {requested_url}")]
    UnexpectedResponseCode {
        got: StatusCode,
        expected: StatusCode,
        requested_url: String,
    },

    #[error("Http error: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoSampleReason {
    /// The page carries no sample block at all.
    NoSampleMarker,
    /// Sample blocks exist but neither layout yielded both inputs and outputs.
    NoBlocksMatched,
}

impl fmt::Display for NoSampleReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use NoSampleReason::*;
        let s = match self {
            NoSampleMarker => "this might be an output-only or interactive problem",
            NoBlocksMatched => {
                "no input/output block matched \
                 (wrong contest ID or problem letter, or Codeforces changed their HTML structure)"
            }
        };
        write!(f, "{}", s)
    }
}

impl Error {
    pub fn is_no_sample_tests(&self) -> bool {
        matches!(self, Error::NoSampleTests { .. })
    }

    /// Network or HTTP level failure.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Http(_) | Error::UnexpectedResponseCode { .. }
        )
    }
}
