use crate::{error::Result, model::*, util};

pub const DEFAULT_BASE_URL: &str = "https://codeforces.com";

/// Builds the problem page URL of `target` under `base_url`.
///
/// ```
/// use cft_webclient::{codeforces, ContestId, ProblemLetter, ProblemTarget, SiteKind};
///
/// let target = |site| ProblemTarget::new(
///     site,
///     ContestId::parse("2139").unwrap(),
///     ProblemLetter::parse("b").unwrap(),
/// );
/// let url = |site| codeforces::problem_url(codeforces::DEFAULT_BASE_URL, &target(site))
///     .unwrap()
///     .to_string();
///
/// assert_eq!(url(SiteKind::Contest), "https://codeforces.com/contest/2139/problem/B");
/// assert_eq!(url(SiteKind::Gym), "https://codeforces.com/gym/2139/problem/B");
/// assert_eq!(url(SiteKind::Problemset), "https://codeforces.com/problemset/problem/2139/B");
/// ```
pub fn problem_url(base_url: &str, target: &ProblemTarget) -> Result<Url> {
    let ProblemTarget {
        site,
        contest_id,
        letter,
    } = target;

    use SiteKind::*;
    let path = match site {
        Contest | Gym => format!("{}/{}/problem/{}", site.lowercase(), contest_id, letter),
        Problemset => format!("problemset/problem/{}/{}", contest_id, letter),
    };
    util::join_url(base_url, &path)
}
