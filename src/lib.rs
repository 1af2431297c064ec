pub mod calendar;
pub mod config;
pub mod dataset;
pub mod error;
pub mod handicap;
pub mod model;
pub mod notation;
pub mod scorepad;
pub mod xlsx;

pub use config::ScorerConfig;
pub use error::{ArgumentError, Result, ScorerError};
pub use handicap::{handicap_for_score, score_for_handicap, HandicapParams, ScoringSystemVersion};
pub use model::*;
pub use scorepad::{generate_numbered_row_headers, ScorePad, ScorePadFormatter, ScorePadRow};
