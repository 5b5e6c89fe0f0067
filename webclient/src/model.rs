pub mod contents;
pub mod problem_id;
pub mod site;

pub use contents::*;
pub use problem_id::{ContestId, ProblemLetter, ProblemTarget};
pub use site::*;

pub use reqwest::{StatusCode, Url};
