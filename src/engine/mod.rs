// src/engine/mod.rs

//! The pure scoring and aggregation core. No I/O, no shared state:
//! every function here is a total function over caller-supplied data
//! and is safe to call concurrently.

pub mod evaluate;
pub mod stats;

pub use evaluate::{SubmittedAnswers, evaluate};
pub use stats::{distribution, leaderboard, summarize};
