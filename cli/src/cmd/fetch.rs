use std::path::PathBuf;

use anyhow::Context as _;
use cft_core::{action, storage::TestsDir};
use cft_webclient::{CodeforcesClient, ContestId, HttpClient, ProblemLetter, ProblemTarget, SiteKind};

use super::{GlobalArgs, SubcmdResult};
use crate::util;

#[derive(Debug, clap::Args)]
pub struct Args {
    /// contest, gym or problemset; anything else guesses from the contest ID
    pub site_kind: String,

    /// e.g. 2139
    pub contest_id: String,

    /// e.g. B
    pub problem_letter: String,

    /// Directory to write the sample tests into (default: test.tests_dir)
    #[arg(short = 'd', long)]
    pub tests_dir: Option<PathBuf>,
}

pub async fn exec(args: &Args, global_args: &GlobalArgs) -> SubcmdResult {
    let contest_id = ContestId::parse(&args.contest_id)?;
    let letter = ProblemLetter::parse(&args.problem_letter)?;
    let site = SiteKind::parse_or_detect(&args.site_kind, &contest_id);
    let target = ProblemTarget::new(site, contest_id, letter);

    let cfg = global_args.load_config()?;
    let console = global_args.console();

    let http = HttpClient::new(&cfg.fetch.http_options()).context("Failed to build HTTP client")?;
    let cli = CodeforcesClient::new(Box::new(http)).with_base_url(&cfg.fetch.base_url);
    let tests_dir = TestsDir::new(
        args.tests_dir
            .clone()
            .unwrap_or_else(|| cfg.test.tests_dir.clone()),
    );

    let summary =
        action::fetch_and_save_samples(&cli, &target, &tests_dir, util::current_dir()).await?;

    console.success(format!(
        "Downloaded {} sample tests for problem {} ({})",
        summary.metadata.test_count, target, site
    ));
    if summary.metadata.time_limit.is_empty() {
        console.plain("Time limit: not shown on the page");
    } else {
        console.plain(format!("Time limit: {}", summary.metadata.time_limit));
    }
    if let Some(m) = summary.count_mismatch {
        console.failure(format!(
            "The page had {} inputs but {} outputs; only the first {} pairs were kept",
            m.inputs, m.outputs, summary.metadata.test_count
        ));
    }
    for (input, output) in &summary.saved.testcase_files {
        console.item(util::display_path(input));
        console.item(util::display_path(output));
    }
    console.item(util::display_path(&summary.saved.metadata_file));
    Ok(())
}
