use std::fmt;

/// Placeholder shown for a line that exists on one side only.
pub const MISSING: &str = "[MISSING]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDiff {
    /// 1-based
    pub line_no: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

impl fmt::Display for LineDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Line {}: Expected '{}', Got '{}'",
            self.line_no,
            self.expected.as_deref().unwrap_or(MISSING),
            self.actual.as_deref().unwrap_or(MISSING),
        )
    }
}

/// Line-by-line comparison of an expected and an actual answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDiff {
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub differences: Vec<LineDiff>,
}

impl fmt::Display for OutputDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn numbered(f: &mut fmt::Formatter<'_>, lines: &[String]) -> fmt::Result {
            for (i, line) in lines.iter().enumerate() {
                writeln!(f, "     {}: {}", i + 1, line)?;
            }
            Ok(())
        }

        writeln!(f, "   Expected:")?;
        numbered(f, &self.expected)?;
        writeln!(f, "   Got:")?;
        numbered(f, &self.actual)?;
        write!(f, "   Differences:")?;
        for d in &self.differences {
            write!(f, "\n     {}", d)?;
        }
        Ok(())
    }
}

/// Compares two answers ignoring trailing whitespace on each line and
/// leading/trailing blank space of the whole text.
///
/// Returns `None` when they are equivalent.
///
/// ```
/// use cft_core::testing::diff::compare;
///
/// assert_eq!(compare("1\n2\n", "1  \n2"), None);
///
/// let diff = compare("1\n2", "1").unwrap();
/// assert_eq!(diff.differences[0].to_string(), "Line 2: Expected '2', Got '[MISSING]'");
/// ```
pub fn compare(expected: &str, actual: &str) -> Option<OutputDiff> {
    let expected: Vec<&str> = expected.trim().lines().collect();
    let actual: Vec<&str> = actual.trim().lines().collect();

    let n = expected.len().max(actual.len());
    let differences: Vec<LineDiff> = (0..n)
        .filter_map(|i| {
            let e = expected.get(i).copied();
            let a = actual.get(i).copied();
            if e.map(str::trim_end) == a.map(str::trim_end) {
                return None;
            }
            Some(LineDiff {
                line_no: i + 1,
                expected: e.map(str::to_owned),
                actual: a.map(str::to_owned),
            })
        })
        .collect();

    if differences.is_empty() {
        return None;
    }

    Some(OutputDiff {
        expected: expected.into_iter().map(str::to_owned).collect(),
        actual: actual.into_iter().map(str::to_owned).collect(),
        differences,
    })
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn trailing_whitespace_and_crlf_are_ignored() {
        assert_eq!(compare("YES\nNO", "YES   \r\nNO\r\n\n"), None);
        assert_eq!(compare("", "  \n"), None);
    }

    #[test]
    fn leading_whitespace_inside_a_line_matters() {
        let diff = compare("1 2\n3", "1 2\n 3").unwrap();
        assert_eq!(
            diff.differences,
            vec![LineDiff {
                line_no: 2,
                expected: Some("3".to_owned()),
                actual: Some(" 3".to_owned()),
            }]
        );
    }

    #[test]
    fn extra_and_missing_lines() {
        let diff = compare("a", "a\nb\nc").unwrap();
        assert_eq!(diff.differences.len(), 2);
        assert_eq!(
            diff.differences[1].to_string(),
            "Line 3: Expected '[MISSING]', Got 'c'"
        );
    }

    #[test]
    fn rendered_diff() {
        let diff = compare("1\n2", "1\n3").unwrap();
        assert_eq!(
            diff.to_string(),
            "   Expected:\n     1: 1\n     2: 2\n   Got:\n     1: 1\n     2: 3\n   Differences:\n     Line 2: Expected '2', Got '3'"
        );
    }
}
