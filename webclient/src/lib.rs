// exported modules
pub mod error;
pub mod http;
pub mod model;

// site impls
pub mod codeforces;

// re-exports
pub use codeforces::CodeforcesClient;
pub use error::*;
pub use http::{HttpClient, HttpClientOptions, PageFetcher};
pub use model::*;

// internal modules
mod util;
