//! Conversion between handicaps and round scores.

pub mod engine;
pub mod table;
pub mod tables;

pub use engine::{expected_arrow_score, handicap_for_score, score_for_handicap, HandicapParams};
pub use table::{HandicapTable, HandicapTableRow};
pub use tables::{HandicapCoefficients, ScoreRounding, ScoringSystemVersion};
