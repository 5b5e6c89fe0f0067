use std::io;
use std::time::Duration;

use colored::{Color, ColoredString, Colorize};
use crossterm::{terminal, tty::IsTty};
use indicatif::{ProgressBar, ProgressStyle};
use strum::{Display, EnumString};

use crate::report::{TestPlan, TestReport, TestReporter, TimeLimitSource};
use crate::style;
use crate::testing::{FsTestcase, JudgeCode, TestOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    pub fn should_colorize(self) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::env::var_os("NO_COLOR").is_none() && io::stdout().is_tty(),
        }
    }
}

/// User-facing output on stdout. Logging goes elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct Console {
    color: bool,
    interactive: bool,
}

impl Console {
    pub fn new(choice: ColorChoice) -> Self {
        Self {
            color: choice.should_colorize(),
            interactive: io::stdout().is_tty(),
        }
    }

    pub fn is_colored(&self) -> bool {
        self.color
    }

    fn paint(&self, s: ColoredString) -> String {
        if self.color {
            s.to_string()
        } else {
            (*s).to_owned()
        }
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        println!("{}", self.paint(msg.as_ref().green()));
    }

    pub fn failure(&self, msg: impl AsRef<str>) {
        println!("{}", self.paint(msg.as_ref().bright_red()));
    }

    pub fn item(&self, msg: impl AsRef<str>) {
        println!("  {}", msg.as_ref());
    }

    pub fn plain(&self, msg: impl AsRef<str>) {
        println!("{}", msg.as_ref());
    }

    fn judge_icon(&self, judge: JudgeCode) -> String {
        if self.color {
            style::judge_icon(judge).to_string()
        } else {
            format!("[{:<3}]", judge.to_string())
        }
    }
}

/// [`TestReporter`] that prints to the terminal, with a spinner while a test runs.
pub struct ConsoleReporter {
    console: Console,
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new(console: Console) -> Self {
        Self {
            console,
            spinner: None,
        }
    }

    fn print_summary(&self, report: &TestReport) {
        let c = &self.console;
        let bar = "-".repeat(5);

        if report.is_all_passed() {
            let msg = format!("All {} tests passed ✨", report.total());
            println!("{} {} {}", bar, c.paint(msg.green()), bar);
            return;
        }

        let summary_msg = format!("{} / {} tests passed", report.passed(), report.total());
        let detail_msg = report
            .count_by_judge()
            .iter()
            .filter(|(&judge, _)| judge != JudgeCode::AC)
            .map(|(&judge, &cnt)| format!("{}x{}", c.judge_icon(judge), cnt))
            .collect::<Vec<String>>()
            .join(", ");

        println!(
            "{} {} ({}) {}",
            bar,
            c.paint(summary_msg.bright_red()),
            detail_msg,
            bar
        );
    }

    fn testcase_line(&self, outcome: &TestOutcome) -> String {
        let time = outcome
            .execution_time
            .map(|t| format!(" [{}ms]", t.as_millis()))
            .unwrap_or_default();
        let brief = outcome
            .detail
            .as_deref()
            .and_then(brief_detail)
            .map(|d| format!(": {}", d))
            .unwrap_or_default();
        format!(
            "Testcase {} ... {} {}{}{}",
            outcome.testcase_name,
            self.console.judge_icon(outcome.judge),
            outcome.judge.description(),
            brief,
            time,
        )
    }

    fn print_failure_detail(&self, outcome: &TestOutcome) {
        let c = &self.console;
        let (cols, _) = terminal::size().unwrap_or((40, 40));
        let cols = cols as usize;

        const BOLD_LINE: &str = "━";
        const THIN_LINE: &str = "─";

        let bold_bar = c.paint(BOLD_LINE.repeat(cols).blue().bold());
        let sub_title = |s: &str| {
            println!(
                "{}{}",
                c.paint(s.cyan().bold()),
                c.paint(THIN_LINE.repeat(cols.saturating_sub(s.len() + 1)).bright_black()),
            )
        };

        println!(
            "\n{}: {} {}\n{}",
            c.paint(outcome.testcase_name.color(Color::BrightYellow).bold()),
            c.judge_icon(outcome.judge),
            outcome.judge.description(),
            bold_bar,
        );

        if let Some(detail) = &outcome.detail {
            sub_title("[detail]");
            println!("{}", detail);
        }
        if let Some(source) = outcome.output_source {
            println!("(answer read from {})", source);
        }
        if let Some(output) = outcome.output.as_ref().filter(|o| !o.stderr.is_empty()) {
            sub_title("[stderr]");
            print!("{}", output.stderr);
            if !output.stderr.ends_with('\n') {
                println!();
            }
        }

        println!("{}", bold_bar);
    }
}

/// First line of a verdict detail. For an output diff, its first differing line.
fn brief_detail(detail: &str) -> Option<&str> {
    let mut lines = detail.lines().map(str::trim).filter(|l| !l.is_empty());
    let first = lines.next()?;
    if first != "Expected:" {
        return Some(first);
    }
    lines.skip_while(|l| *l != "Differences:").nth(1).or(Some(first))
}

impl TestReporter for ConsoleReporter {
    fn on_start(&mut self, plan: &TestPlan) {
        let limit = plan.time_limit.as_secs_f64();
        match &plan.time_limit_source {
            TimeLimitSource::Metadata(path) => self.console.plain(format!(
                "Using time limit: {}s (from {})",
                limit,
                path.to_string_lossy()
            )),
            TimeLimitSource::CommandLine => self
                .console
                .plain(format!("Using time limit: {}s (from command line)", limit)),
            TimeLimitSource::Default(reason) => self
                .console
                .plain(format!("{}. Using default time limit: {}s", reason, limit)),
        }
        self.console.plain(format!(
            "Running {} tests for problem {} with {}",
            plan.testcase_count,
            plan.problem_letter,
            plan.executable.to_string_lossy()
        ));
    }

    fn on_testcase_start(&mut self, testcase: &FsTestcase) {
        if !self.console.interactive {
            return;
        }
        let style = ProgressStyle::default_spinner()
            .template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let bar = ProgressBar::new_spinner()
            .with_style(style)
            .with_message(format!("Testcase {} ...", testcase.name()));
        bar.enable_steady_tick(Duration::from_millis(80));
        self.spinner = Some(bar);
    }

    fn on_testcase_finish(&mut self, outcome: &TestOutcome) {
        if let Some(bar) = self.spinner.take() {
            bar.finish_and_clear();
        }

        println!("{}", self.testcase_line(outcome));
    }

    fn on_finish(&mut self, report: &TestReport) {
        report
            .failures()
            .for_each(|outcome| self.print_failure_detail(outcome));
        println!();
        self.print_summary(report);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::testing::diff;
    use std::str::FromStr;

    fn plain_reporter() -> ConsoleReporter {
        ConsoleReporter::new(Console {
            color: false,
            interactive: false,
        })
    }

    #[test]
    fn color_choice_parsing() {
        assert_eq!(ColorChoice::from_str("NEVER").unwrap(), ColorChoice::Never);
        assert_eq!(ColorChoice::Always.to_string(), "always");
        assert!(!ColorChoice::Never.should_colorize());
        assert!(ColorChoice::Always.should_colorize());
    }

    #[test]
    fn testcase_line_carries_a_brief_detail() {
        let r = plain_reporter();

        let ac = TestOutcome {
            execution_time: Some(Duration::from_millis(12)),
            ..TestOutcome::new("B1", JudgeCode::AC)
        };
        assert_eq!(
            r.testcase_line(&ac),
            "Testcase B1 ... [AC ] ACCEPTED [12ms]"
        );

        let re = TestOutcome::new("B2", JudgeCode::RE).with_detail("Exit code 3");
        assert_eq!(
            r.testcase_line(&re),
            format!("Testcase B2 ... [RE ] {}: Exit code 3", JudgeCode::RE.description())
        );

        let diff = diff::compare("3\n", "1 2\n").unwrap();
        let wa = TestOutcome::new("B3", JudgeCode::WA).with_detail(diff.to_string());
        assert_eq!(
            r.testcase_line(&wa),
            format!(
                "Testcase B3 ... [WA ] {}: Line 1: Expected '3', Got '1 2'",
                JudgeCode::WA.description()
            )
        );
    }

    #[test]
    fn brief_detail_of_blank_text() {
        assert_eq!(brief_detail(""), None);
        assert_eq!(brief_detail("\n  \n"), None);
        assert_eq!(brief_detail("Killed after 2.0 seconds\nmore"), Some("Killed after 2.0 seconds"));
    }
}
