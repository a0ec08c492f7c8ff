pub mod career_tester;
pub mod reports;
pub mod scenarios;
pub mod tester;

pub use tester::*;
