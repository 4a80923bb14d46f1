//! Query helpers for opponent decision making

mod matchup;

pub use matchup::{expected_power, strongest_move};
