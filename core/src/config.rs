use std::path::{Path, PathBuf};
use std::result::Result as StdResult;
use std::time::Duration;

use anyhow::{ensure, Context as _};
use cft_webclient::{codeforces::DEFAULT_BASE_URL, HttpClient, HttpClientOptions};
use rust_embed::RustEmbed;
use serde::Deserialize;

use crate::storage::TestsDir;
use crate::testing::{OutputResolver, TestRunner};

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub source_config_file: Option<PathBuf>,
    pub fetch: FetchConfig,
    pub test: TestConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TestConfig {
    pub tests_dir: PathBuf,
    pub default_time_limit_secs: f64,
    pub output_file: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: HttpClient::DEFAULT_USER_AGENT.to_owned(),
            timeout_secs: HttpClient::DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            tests_dir: TestsDir::DEFAULT_DIRNAME.into(),
            default_time_limit_secs: TestRunner::DEFAULT_EXEC_TIME_LIMIT.as_secs_f64(),
            output_file: OutputResolver::DEFAULT_FILENAME.into(),
        }
    }
}

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Asset;

impl Config {
    pub const FILENAME: &str = "cft.toml";

    pub fn example_toml() -> anyhow::Result<String> {
        let file = Asset::get(Self::FILENAME)
            .with_context(|| format!("Embedded {} is missing", Self::FILENAME))?;
        let s = std::str::from_utf8(file.data.as_ref())
            .with_context(|| format!("Embedded {} is not UTF-8", Self::FILENAME))?;
        Ok(s.to_owned())
    }

    pub fn from_toml(s: &str) -> StdResult<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn from_toml_file(filepath: PathBuf) -> anyhow::Result<Self> {
        let toml = fsutil::read_to_string(&filepath).context("Cannot read a file")?;
        let mut cfg = Self::from_toml(&toml)
            .with_context(|| format!("Invalid config TOML: {:?}", filepath))?;
        cfg.validate()
            .with_context(|| format!("Invalid config: {:?}", filepath))?;
        cfg.source_config_file = Some(filepath);
        Ok(cfg)
    }

    /// Find config file ancestor dirs, including current dir.
    pub fn find_file_in_ancestors(cur_dir: impl AsRef<Path>) -> Option<PathBuf> {
        cur_dir
            .as_ref()
            .ancestors()
            .map(|dir| dir.join(Self::FILENAME))
            .find(|path| path.is_file())
    }

    /// `<config_dir>/cft/cft.toml`, e.g. `~/.config/cft/cft.toml` on Linux.
    pub fn global_config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cft").join(Self::FILENAME))
    }

    /// Ancestors of `cur_dir` first, then the global config, then built-in defaults.
    pub fn load(cur_dir: impl AsRef<Path>) -> anyhow::Result<Self> {
        let found = Self::find_file_in_ancestors(&cur_dir)
            .or_else(|| Self::global_config_file().filter(|path| path.is_file()));

        match found {
            Some(path) => {
                log::debug!("Using config file {}", path.to_string_lossy());
                Self::from_toml_file(path)
            }
            None => {
                log::debug!("No {} found; using defaults", Self::FILENAME);
                Ok(Self::default())
            }
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        let secs = self.test.default_time_limit_secs;
        ensure!(
            secs.is_finite() && secs > 0.0,
            "test.default_time_limit_secs must be a positive number (given {})",
            secs
        );
        ensure!(
            self.fetch.timeout_secs > 0,
            "fetch.timeout_secs must be positive"
        );
        Ok(())
    }
}

impl FetchConfig {
    pub fn http_options(&self) -> HttpClientOptions {
        HttpClientOptions {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

impl TestConfig {
    pub fn default_time_limit(&self) -> Duration {
        Duration::try_from_secs_f64(self.default_time_limit_secs)
            .unwrap_or(TestRunner::DEFAULT_EXEC_TIME_LIMIT)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn example_toml_should_be_parsable() {
        let toml = Config::example_toml().unwrap();
        let cfg = dbg!(Config::from_toml(&toml)).unwrap();
        assert_eq!(cfg, Config::default());
        cfg.validate().unwrap();
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg = Config::from_toml("[test]\ntests_dir = \"samples\"\n").unwrap();
        assert_eq!(cfg.test.tests_dir, Path::new("samples"));
        assert_eq!(cfg.test.default_time_limit(), Duration::from_secs(6));
        assert_eq!(cfg.test.output_file, Path::new("Output.txt"));
        assert_eq!(cfg.fetch, FetchConfig::default());
    }

    #[test]
    fn non_positive_time_limit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(Config::FILENAME);
        fsutil::write(&path, "[test]\ndefault_time_limit_secs = 0.0\n").unwrap();

        let err = Config::from_toml_file(path).unwrap_err();
        assert!(format!("{:#}", err).contains("default_time_limit_secs"), "{:#}", err);
    }

    #[test]
    fn load_finds_config_in_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        fsutil::mkdir_all(&nested).unwrap();
        fsutil::write(
            dir.path().join(Config::FILENAME),
            "[fetch]\nbase_url = \"http://localhost:8080\"\n",
        )
        .unwrap();

        let cfg = Config::load(&nested).unwrap();
        assert_eq!(cfg.fetch.base_url, "http://localhost:8080");
        assert_eq!(
            cfg.source_config_file,
            Some(dir.path().join(Config::FILENAME))
        );
    }
}
