use thiserror::Error;

/// Caller-input problems that are not tied to a specific state machine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("arrow counts ({arrow_counts}) and distances ({distances}) differ in length")]
    SizeMismatch { arrow_counts: usize, distances: usize },

    #[error("arrow count distance {arrow_count} is paired with distance {distance}")]
    DistanceOrderMismatch { arrow_count: u32, distance: u32 },

    #[error("end size must be positive")]
    NonPositiveEndSize,

    #[error("end size {size} is smaller than the {arrows} arrows already entered")]
    EndTooSmall { size: usize, arrows: usize },

    #[error("round {round_id} has several sub types, one must be given")]
    SubTypeRequired { round_id: u32 },

    #[error("round {round_id} has no sub type {sub_type_id}")]
    UnknownSubType { round_id: u32, sub_type_id: u32 },

    #[error("round {round_id} has no distances")]
    NoDistances { round_id: u32 },

    #[error("distance numbers of round {round_id} must run 1..n, found {found} at position {position}")]
    NonContiguousDistances { round_id: u32, position: usize, found: u32 },

    #[error("distance {distance_number} of round {round_id} has no arrows")]
    ZeroArrowCount { round_id: u32, distance_number: u32 },

    #[error("no arrows to tabulate")]
    EmptyArrows,

    #[error("arrow value {score} (x: {is_x}) is not valid here")]
    InvalidArrow { score: u8, is_x: bool },

    #[error("score {score} is above the maximum of {max}")]
    ScoreAboveMaximum { score: u32, max: u32 },

    #[error("unknown round: {0}")]
    UnknownRound(String),
}

#[derive(Error, Debug)]
pub enum ScorerError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    #[error("End already holds {size} arrows")]
    EndFull { size: usize },

    #[error("End has no arrows")]
    EndEmpty,

    #[error("End size cannot change once the end is recorded")]
    EndSizeLocked,

    #[error("{entity} belongs to round {found}, expected round {expected}")]
    InconsistentRoundData {
        entity: &'static str,
        expected: u32,
        found: u32,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Excel error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),
}

pub type Result<T> = std::result::Result<T, ScorerError>;
