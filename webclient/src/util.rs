use url::Url;

use crate::error::*;

pub fn parse_url(url: impl AsRef<str>) -> Result<Url> {
    match Url::parse(url.as_ref()) {
        Ok(url) => Ok(url),
        Err(e) => Err(Error::InvalidSyntaxUrl {
            url: url.as_ref().to_owned(),
            source: e,
        }),
    }
}

/// Appends a relative `path` to `base`, keeping every segment of `base`.
pub fn join_url(base: &str, path: &str) -> Result<Url> {
    let url = format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    self::parse_url(url)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_join_url() {
        let url = join_url("https://codeforces.com", "contest/1/problem/A").unwrap();
        assert_eq!(url.as_str(), "https://codeforces.com/contest/1/problem/A");

        // Trailling slash of base and leading slash of path are merged:
        let url = join_url("https://codeforces.com/", "/gym/1/problem/A").unwrap();
        assert_eq!(url.as_str(), "https://codeforces.com/gym/1/problem/A");

        // Base path segments are kept:
        let url = join_url("http://localhost:8080/mirror", "problemset/problem/1/A").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/mirror/problemset/problem/1/A"
        );

        assert!(matches!(
            join_url("codeforces", "contest/1/problem/A"),
            Err(Error::InvalidSyntaxUrl { .. })
        ));
    }
}
