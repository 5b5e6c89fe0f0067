use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::problem_id::ContestId;

/// Section of Codeforces that hosts a problem.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumIter,
    strum::EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum SiteKind {
    /// `contest/{id}/problem/{letter}`
    Contest,
    /// `gym/{id}/problem/{letter}`
    Gym,
    /// `problemset/problem/{id}/{letter}`
    Problemset,
}

impl SiteKind {
    /// Contest IDs at or above this value are assumed to be gym contests.
    pub const GYM_CONTEST_ID_THRESHOLD: u64 = 100_000;

    pub const fn lowercase(&self) -> &'static str {
        use SiteKind::*;
        match self {
            Contest => "contest",
            Gym => "gym",
            Problemset => "problemset",
        }
    }

    /// Guesses the site kind from the magnitude of the contest ID.
    /// Best effort only: nothing verifies the guess against the judge.
    pub fn detect(contest_id: &ContestId) -> Self {
        if contest_id.number() >= Self::GYM_CONTEST_ID_THRESHOLD {
            SiteKind::Gym
        } else {
            SiteKind::Contest
        }
    }

    /// Parses `raw` case-insensitively, falling back to [`SiteKind::detect`]
    /// when it names no known kind (e.g. `"auto"`).
    pub fn parse_or_detect(raw: &str, contest_id: &ContestId) -> Self {
        match SiteKind::from_str(raw.trim()) {
            Ok(kind) => kind,
            Err(_) => {
                let kind = Self::detect(contest_id);
                log::info!(
                    "Unknown site kind '{}': assuming '{}' from contest ID {}",
                    raw,
                    kind,
                    contest_id
                );
                kind
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn id(s: &str) -> ContestId {
        ContestId::parse(s).unwrap()
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(SiteKind::parse_or_detect("GYM", &id("1")), SiteKind::Gym);
        assert_eq!(
            SiteKind::parse_or_detect("ProblemSet", &id("2139")),
            SiteKind::Problemset
        );
        assert_eq!(
            SiteKind::parse_or_detect(" contest ", &id("123456")),
            SiteKind::Contest
        );
    }

    #[test]
    fn unknown_kind_is_detected_from_contest_id() {
        assert_eq!(SiteKind::parse_or_detect("auto", &id("2139")), SiteKind::Contest);
        assert_eq!(SiteKind::parse_or_detect("auto", &id("99999")), SiteKind::Contest);
        assert_eq!(SiteKind::parse_or_detect("", &id("100000")), SiteKind::Gym);
        assert_eq!(SiteKind::parse_or_detect("x", &id("104520")), SiteKind::Gym);
    }

    #[test]
    fn display_is_lowercase() {
        use strum::IntoEnumIterator as _;
        for kind in SiteKind::iter() {
            assert_eq!(kind.to_string(), kind.lowercase());
        }
    }
}
