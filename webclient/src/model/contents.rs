use serde::{Deserialize, Serialize};

use super::problem_id::ProblemTarget;

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct SampleTestcase {
    /// 1-based position on the problem page
    pub ord: u32,
    pub input: String,
    pub output: String,
}

/// Descriptor of a fetched sample set, persisted next to the testcases.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemMetadata {
    pub contest_id: String,
    pub problem_letter: String,
    /// Time limit as printed on the page, e.g. "2 seconds". Empty if the page had none.
    #[serde(default)]
    pub time_limit: String,
    pub test_count: usize,
}

impl ProblemMetadata {
    pub fn new(target: &ProblemTarget, time_limit: impl Into<String>, test_count: usize) -> Self {
        Self {
            contest_id: target.contest_id.to_string(),
            problem_letter: target.letter.to_string(),
            time_limit: time_limit.into(),
            test_count,
        }
    }

    /// Leading number of `time_limit` in seconds, if it is a positive finite number.
    ///
    /// ```
    /// use cft_webclient::ProblemMetadata;
    ///
    /// let meta = |s: &str| ProblemMetadata {
    ///     contest_id: "1".to_owned(),
    ///     problem_letter: "A".to_owned(),
    ///     time_limit: s.to_owned(),
    ///     test_count: 1,
    /// };
    /// assert_eq!(meta("2 seconds").time_limit_secs(), Some(2.0));
    /// assert_eq!(meta("1.5 second").time_limit_secs(), Some(1.5));
    /// assert_eq!(meta("").time_limit_secs(), None);
    /// assert_eq!(meta("0 seconds").time_limit_secs(), None);
    /// ```
    pub fn time_limit_secs(&self) -> Option<f64> {
        let secs: f64 = self.time_limit.split_whitespace().next()?.parse().ok()?;
        (secs.is_finite() && secs > 0.0).then_some(secs)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn metadata_json_field_names() {
        let meta = ProblemMetadata {
            contest_id: "2139".to_owned(),
            problem_letter: "B".to_owned(),
            time_limit: "2 seconds".to_owned(),
            test_count: 3,
        };
        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contestId": "2139",
                "problemLetter": "B",
                "timeLimit": "2 seconds",
                "testCount": 3,
            })
        );
    }
}
