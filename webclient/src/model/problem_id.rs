use super::site::SiteKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("INVALID ID: Contest ID must be a number (given '{0}')")]
    InvalidContestId(String),

    #[error(
        "INVALID PROBLEM LETTER: Problem letter must be a single letter like A, B, C (given '{0}')"
    )]
    InvalidProblemLetter(String),
}

/// Numeric contest identification.
/// (e.g.) "2139", "104520"
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct ContestId {
    raw: String,
    number: u64,
}

impl ContestId {
    pub fn parse(s: impl AsRef<str>) -> Result<Self> {
        let raw = s.as_ref().trim();
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidContestId(raw.to_owned()));
        }
        let number = raw
            .parse()
            .map_err(|_| Error::InvalidContestId(raw.to_owned()))?;
        Ok(Self {
            raw: raw.to_owned(),
            number,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn number(&self) -> u64 {
        self.number
    }
}

impl std::fmt::Display for ContestId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Single uppercase problem letter.
/// (e.g.) 'A', 'B'
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy)]
pub struct ProblemLetter(char);

impl ProblemLetter {
    pub fn parse(s: impl AsRef<str>) -> Result<Self> {
        let raw = s.as_ref().trim();
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => Ok(Self(c.to_ascii_uppercase())),
            _ => Err(Error::InvalidProblemLetter(raw.to_owned())),
        }
    }

    pub fn as_char(&self) -> char {
        self.0
    }
}

impl std::fmt::Display for ProblemLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A problem to fetch: where it lives and which one it is.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct ProblemTarget {
    pub site: SiteKind,
    pub contest_id: ContestId,
    pub letter: ProblemLetter,
}

impl ProblemTarget {
    pub fn new(site: SiteKind, contest_id: ContestId, letter: ProblemLetter) -> Self {
        Self {
            site,
            contest_id,
            letter,
        }
    }
}

/// (e.g.) "2139B"
impl std::fmt::Display for ProblemTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.contest_id, self.letter)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn contest_id_must_be_digits() {
        assert_eq!(ContestId::parse("2139").unwrap().number(), 2139);
        assert_eq!(ContestId::parse(" 104520 ").unwrap().as_str(), "104520");
        assert_eq!(
            ContestId::parse("21a9"),
            Err(Error::InvalidContestId("21a9".to_owned()))
        );
        assert!(ContestId::parse("").is_err());
        assert!(ContestId::parse("-1").is_err());
        assert!(ContestId::parse("99999999999999999999999").is_err());
    }

    #[test]
    fn problem_letter_is_normalized_to_uppercase() {
        assert_eq!(ProblemLetter::parse("b").unwrap().as_char(), 'B');
        assert_eq!(ProblemLetter::parse(" C\n").unwrap().to_string(), "C");
        assert!(ProblemLetter::parse("").is_err());
        assert!(ProblemLetter::parse("AB").is_err());
        assert!(ProblemLetter::parse("1").is_err());
        assert!(ProblemLetter::parse("é").is_err());
    }

    #[test]
    fn problem_target_display() {
        let t = ProblemTarget::new(
            SiteKind::Contest,
            ContestId::parse("2139").unwrap(),
            ProblemLetter::parse("b").unwrap(),
        );
        assert_eq!(t.to_string(), "2139B");
    }
}
