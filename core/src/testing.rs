pub mod diff;
pub mod judge;
pub mod output;
pub mod result;
pub mod runner;
pub mod testcase;

pub use judge::judge_testcase;
pub use output::*;
pub use result::*;
pub use runner::*;
pub use testcase::*;
