//! Worker tasks that back the leaderboard sync engine.
//!
//! One board worker runs per category; it is the only writer of its board.

mod board;

pub(crate) use board::BoardWorker;
