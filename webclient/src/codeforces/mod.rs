pub mod clean;
pub mod client;
pub mod samples;
pub mod urls;

pub use client::*;
pub use samples::*;
pub use urls::*;
