pub mod fetch;
pub mod init;

use std::path::PathBuf;

use cft_core::{
    console::{ColorChoice, Console},
    Config,
};

use crate::util;

#[derive(Debug, clap::Parser)]
#[command(author, version, about, long_about = None)]
pub struct GlobalArgs {
    #[command(subcommand)]
    pub subcmd: Subcommand,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ArgColor::Auto, global = true)]
    pub color: ArgColor,

    /// Print debug logs (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Read this config file instead of searching for cft.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Subcommand {
    /// Download the sample tests of a problem
    Fetch(fetch::Args),

    /// Write an example cft.toml
    Init(init::Args),

    /// Run an executable against the downloaded sample tests
    #[command(alias("t"))]
    Test(test::Args),
}

pub type SubcmdResult = anyhow::Result<()>;

impl GlobalArgs {
    pub async fn exec_subcmd(&self) -> SubcmdResult {
        use Subcommand::*;
        match &self.subcmd {
            Fetch(args) => fetch::exec(args, self).await,
            Init(args) => init::exec(args, self),
            Test(args) => test::exec(args, self).await,
        }
    }

    pub fn load_config(&self) -> anyhow::Result<Config> {
        match &self.config {
            Some(path) => {
                log::debug!("Config file given by --config: {}", util::display_path(path));
                Config::from_toml_file(path.clone())
            }
            None => Config::load(util::current_dir()),
        }
    }

    pub fn console(&self) -> Console {
        Console::new(self.color.into())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
#[clap(rename_all = "lower")]
pub enum ArgColor {
    Auto,
    Always,
    Never,
}

impl From<ArgColor> for ColorChoice {
    fn from(value: ArgColor) -> Self {
        use ArgColor::*;
        match value {
            Auto => ColorChoice::Auto,
            Always => ColorChoice::Always,
            Never => ColorChoice::Never,
        }
    }
}

#[cfg(test)]
mod test_args {
    use super::*;
    use clap::{CommandFactory, Parser};
    use std::ffi::OsString;

    #[test]
    fn verify_command() {
        GlobalArgs::command().debug_assert();
    }

    #[test]
    fn test_alias_and_global_flags() {
        let args = GlobalArgs::try_parse_from(["cft", "t", "b", "./a.out", "--color", "never", "-v"])
            .unwrap();
        assert_eq!(args.color, ArgColor::Never);
        assert!(args.verbose);
        let Subcommand::Test(t) = args.subcmd else {
            panic!("expected test subcommand")
        };
        assert_eq!(t.problem_letter, "b");
        assert_eq!(t.executable, PathBuf::from("./a.out"));
    }

    #[test]
    fn fetch_takes_three_positionals() {
        let args = GlobalArgs::try_parse_from(["cft", "fetch", "gym", "104520", "A"]).unwrap();
        let Subcommand::Fetch(f) = args.subcmd else {
            panic!("expected fetch subcommand")
        };
        assert_eq!(
            (f.site_kind.as_str(), f.contest_id.as_str(), f.problem_letter.as_str()),
            ("gym", "104520", "A")
        );

        assert!(GlobalArgs::try_parse_from(["cft", "fetch", "gym", "104520"]).is_err());
    }

    #[test]
    fn explicit_config_file_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("my-cft.toml");
        std::fs::write(&path, "[fetch]\ntimeout_secs = 3\n").unwrap();

        let args = GlobalArgs::try_parse_from([
            OsString::from("cft"),
            "--config".into(),
            path.clone().into_os_string(),
            "fetch".into(),
            "contest".into(),
            "1850".into(),
            "A".into(),
        ])
        .unwrap();
        let cfg = args.load_config().unwrap();
        assert_eq!(cfg.fetch.timeout_secs, 3);
        assert_eq!(cfg.source_config_file, Some(path));
    }
}
