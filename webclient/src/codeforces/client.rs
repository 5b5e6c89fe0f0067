use super::{samples, urls};
use crate::{error::Result, http::PageFetcher, model::*};

pub struct CodeforcesClient {
    fetcher: Box<dyn PageFetcher>,
    base_url: String,
}

/// Raw problem page as returned by the fetcher.
#[derive(Debug, Clone)]
pub struct ProblemPage {
    pub url: Url,
    pub html: String,
}

impl CodeforcesClient {
    pub fn new(fetcher: Box<dyn PageFetcher>) -> Self {
        Self {
            fetcher,
            base_url: urls::DEFAULT_BASE_URL.to_owned(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn problem_url(&self, target: &ProblemTarget) -> Result<Url> {
        urls::problem_url(&self.base_url, target)
    }

    /// Single attempt, no retry.
    pub async fn fetch_problem_page(&self, target: &ProblemTarget) -> Result<ProblemPage> {
        let url = self.problem_url(target)?;
        log::info!("Fetching from: {}", url);
        let html = self.fetcher.fetch_page(&url).await?;
        Ok(ProblemPage { url, html })
    }
}

impl ProblemPage {
    pub fn scrape_samples(&self, target: &ProblemTarget) -> Result<samples::ScrapedSamples> {
        samples::scrape_samples(&self.html, target)
    }
}
