use ::lazy_regex::{lazy_regex, Lazy, Regex};

use super::clean::clean_text;
use crate::{
    error::{Error, NoSampleReason, Result},
    model::{ProblemTarget, SampleTestcase},
};

static RE_NOT_FOUND_TITLE: Lazy<Regex> = lazy_regex!(r"(?is)<title>[^<]*\b404\b");
static RE_SAMPLE_MARKER: Lazy<Regex> = lazy_regex!(r#"<div class="(?:input|sample-test)""#);
static RE_TIME_LIMIT: Lazy<Regex> =
    lazy_regex!(r#"(?s)<div class="time-limit"[^>]*>.*?(\d+(?:\.\d+)?\s*seconds?)"#);

static RE_INPUT_BLOCK: Lazy<Regex> =
    lazy_regex!(r#"(?s)<div class="input">.*?<pre[^>]*>(.*?)</pre>"#);
static RE_OUTPUT_BLOCK: Lazy<Regex> =
    lazy_regex!(r#"(?s)<div class="output">.*?<pre[^>]*>(.*?)</pre>"#);
static RE_WRAPPED_INPUT_BLOCK: Lazy<Regex> =
    lazy_regex!(r#"(?s)<div class="sample-test">.*?<div class="input">.*?<pre[^>]*>(.*?)</pre>"#);
static RE_WRAPPED_OUTPUT_BLOCK: Lazy<Regex> =
    lazy_regex!(r#"(?s)<div class="sample-test">.*?<div class="output">.*?<pre[^>]*>(.*?)</pre>"#);

/// Uncleaned `<pre>` contents captured by a [`SampleLayout`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSamples {
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
}

impl RawSamples {
    fn is_complete(&self) -> bool {
        !self.inputs.is_empty() && !self.outputs.is_empty()
    }
}

/// One known arrangement of sample blocks on a problem page.
pub trait SampleLayout: Sync {
    fn name(&self) -> &'static str;

    /// Returns empty lists when the layout does not apply.
    fn extract(&self, html: &str) -> RawSamples;
}

/// `<div class="input">` / `<div class="output">` followed by a `<pre>`.
pub struct DirectBlocks;

/// Input/output containers inside a wrapping `<div class="sample-test">`.
pub struct SampleTestWrapped;

impl SampleLayout for DirectBlocks {
    fn name(&self) -> &'static str {
        "direct-blocks"
    }

    fn extract(&self, html: &str) -> RawSamples {
        RawSamples {
            inputs: first_captures(&RE_INPUT_BLOCK, html),
            outputs: first_captures(&RE_OUTPUT_BLOCK, html),
        }
    }
}

impl SampleLayout for SampleTestWrapped {
    fn name(&self) -> &'static str {
        "sample-test-wrapped"
    }

    fn extract(&self, html: &str) -> RawSamples {
        RawSamples {
            inputs: first_captures(&RE_WRAPPED_INPUT_BLOCK, html),
            outputs: first_captures(&RE_WRAPPED_OUTPUT_BLOCK, html),
        }
    }
}

/// Tried in order; a later layout is consulted only when earlier ones came up empty.
pub const DEFAULT_LAYOUTS: &[&dyn SampleLayout] = &[&DirectBlocks, &SampleTestWrapped];

fn first_captures(re: &Regex, html: &str) -> Vec<String> {
    re.captures_iter(html)
        .map(|caps| caps[1].to_owned())
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMismatch {
    pub inputs: usize,
    pub outputs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedSamples {
    pub testcases: Vec<SampleTestcase>,
    /// e.g. "2 seconds"; empty when the page shows no time limit
    pub time_limit: String,
    /// Set when inputs and outputs were truncated to the shorter list.
    pub count_mismatch: Option<CountMismatch>,
}

pub fn scrape_samples(html: &str, target: &ProblemTarget) -> Result<ScrapedSamples> {
    scrape_samples_with_layouts(html, target, DEFAULT_LAYOUTS)
}

pub fn scrape_samples_with_layouts(
    html: &str,
    target: &ProblemTarget,
    layouts: &[&dyn SampleLayout],
) -> Result<ScrapedSamples> {
    check_page(html, target)?;

    let time_limit = scrape_time_limit(html);

    let raw = extract_with_fallback(html, layouts);
    let mut inputs: Vec<String> = raw.inputs.iter().map(|s| clean_text(s)).collect();
    let mut outputs: Vec<String> = raw.outputs.iter().map(|s| clean_text(s)).collect();

    if inputs.is_empty() || outputs.is_empty() {
        return Err(Error::NoSampleTests {
            problem: target.to_string(),
            reason: NoSampleReason::NoBlocksMatched,
        });
    }

    let count_mismatch = if inputs.len() != outputs.len() {
        log::warn!(
            "Found {} inputs but {} outputs for {}: keeping the first {}",
            inputs.len(),
            outputs.len(),
            target,
            inputs.len().min(outputs.len()),
        );
        let mismatch = CountMismatch {
            inputs: inputs.len(),
            outputs: outputs.len(),
        };
        let n = inputs.len().min(outputs.len());
        inputs.truncate(n);
        outputs.truncate(n);
        Some(mismatch)
    } else {
        None
    };

    let testcases = inputs
        .into_iter()
        .zip(outputs)
        .enumerate()
        .map(|(i, (input, output))| SampleTestcase {
            ord: (i + 1) as u32,
            input,
            output,
        })
        .collect();

    Ok(ScrapedSamples {
        testcases,
        time_limit,
        count_mismatch,
    })
}

fn check_page(html: &str, target: &ProblemTarget) -> Result<()> {
    if html.contains("Problem not found") || RE_NOT_FOUND_TITLE.is_match(html) {
        return Err(Error::ProblemNotFound {
            problem: target.to_string(),
        });
    }
    if html.contains("Contest not found") {
        return Err(Error::ContestNotFound {
            contest_id: target.contest_id.to_string(),
        });
    }
    if !RE_SAMPLE_MARKER.is_match(html) {
        return Err(Error::NoSampleTests {
            problem: target.to_string(),
            reason: NoSampleReason::NoSampleMarker,
        });
    }
    Ok(())
}

fn extract_with_fallback(html: &str, layouts: &[&dyn SampleLayout]) -> RawSamples {
    let mut last = RawSamples::default();
    for layout in layouts {
        let raw = layout.extract(html);
        if raw.is_complete() {
            log::debug!("Sample layout '{}' matched", layout.name());
            return raw;
        }
        log::debug!("Sample layout '{}' did not match", layout.name());
        last = raw;
    }
    last
}

/// Returns an empty string if the page shows no time limit.
pub fn scrape_time_limit(html: &str) -> String {
    RE_TIME_LIMIT
        .captures(html)
        .map(|caps| clean_text(&caps[1]))
        .unwrap_or_default()
}
