use crate::error::{ArgumentError, Result};
use crate::model::{
    normalize_round_name, FullRound, Round, RoundArrowCount, RoundDistance, RoundSubType,
};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use std::path::Path;

const ROUNDS_FILE: &str = "rounds.csv";
const SUB_TYPES_FILE: &str = "round_sub_types.csv";
const ARROW_COUNTS_FILE: &str = "round_arrow_counts.csv";
const DISTANCES_FILE: &str = "round_distances.csv";

/// Reference round data, as shipped with the crate or loaded from a directory
#[derive(Debug, Clone, Default)]
pub struct RoundDataset {
    pub rounds: Vec<Round>,
    pub sub_types: Vec<RoundSubType>,
    pub arrow_counts: Vec<RoundArrowCount>,
    pub distances: Vec<RoundDistance>,
}

/// Deserialize every row of a CSV table
fn read_table<T: DeserializeOwned>(csv: &str) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let mut rows = Vec::new();
    for result in reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

impl RoundDataset {
    /// The rounds bundled with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_csv(
            include_str!("../../data/rounds.csv"),
            include_str!("../../data/round_sub_types.csv"),
            include_str!("../../data/round_arrow_counts.csv"),
            include_str!("../../data/round_distances.csv"),
        )
    }

    pub fn from_csv(
        rounds: &str,
        sub_types: &str,
        arrow_counts: &str,
        distances: &str,
    ) -> Result<Self> {
        let mut dataset = Self {
            rounds: read_table(rounds)?,
            sub_types: read_table(sub_types)?,
            arrow_counts: read_table(arrow_counts)?,
            distances: read_table(distances)?,
        };

        for round in &mut dataset.rounds {
            if !round.has_normalized_name() {
                let normalized = normalize_round_name(&round.name);
                warn!("Round name {:?} stored as {:?}", round.name, normalized);
                round.name = normalized;
            }
        }

        debug!(
            "Loaded {} rounds, {} sub types, {} arrow counts, {} distances",
            dataset.rounds.len(),
            dataset.sub_types.len(),
            dataset.arrow_counts.len(),
            dataset.distances.len()
        );

        Ok(dataset)
    }

    /// Read the four round tables from a directory
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let read = |name: &str| std::fs::read_to_string(dir.join(name));
        Self::from_csv(
            &read(ROUNDS_FILE)?,
            &read(SUB_TYPES_FILE)?,
            &read(ARROW_COUNTS_FILE)?,
            &read(DISTANCES_FILE)?,
        )
    }

    /// Apply an update: rounds in `update` replace rounds with the same id, new rounds are added
    pub fn merge(&mut self, update: RoundDataset) {
        let replaced: Vec<u32> = update.rounds.iter().map(|r| r.id).collect();
        debug!("Merging {} rounds into dataset", replaced.len());

        self.rounds.retain(|r| !replaced.contains(&r.id));
        self.sub_types.retain(|s| !replaced.contains(&s.round_id));
        self.arrow_counts.retain(|c| !replaced.contains(&c.round_id));
        self.distances.retain(|d| !replaced.contains(&d.round_id));

        self.rounds.extend(update.rounds);
        self.sub_types.extend(update.sub_types);
        self.arrow_counts.extend(update.arrow_counts);
        self.distances.extend(update.distances);
        self.rounds.sort_by_key(|r| r.id);
    }

    /// Look a round up by name, ignoring case, spaces and punctuation
    pub fn find_round(&self, name: &str) -> Option<&Round> {
        let key = normalize_round_name(name);
        self.rounds
            .iter()
            .find(|r| r.name == key || normalize_round_name(&r.display_name) == key)
    }

    pub fn full_round(&self, round_id: u32) -> Result<FullRound> {
        let round = self
            .rounds
            .iter()
            .find(|r| r.id == round_id)
            .ok_or_else(|| ArgumentError::UnknownRound(round_id.to_string()))?;
        self.assemble(round)
    }

    pub fn full_round_by_name(&self, name: &str) -> Result<FullRound> {
        let round = self
            .find_round(name)
            .ok_or_else(|| ArgumentError::UnknownRound(name.to_string()))?;
        self.assemble(round)
    }

    pub fn full_rounds(&self) -> Result<Vec<FullRound>> {
        self.rounds.iter().map(|r| self.assemble(r)).collect()
    }

    fn assemble(&self, round: &Round) -> Result<FullRound> {
        FullRound::new(
            round.clone(),
            self.arrow_counts
                .iter()
                .filter(|c| c.round_id == round.id)
                .copied()
                .collect(),
            self.sub_types
                .iter()
                .filter(|s| s.round_id == round.id)
                .cloned()
                .collect(),
            self.distances
                .iter()
                .filter(|d| d.round_id == round.id)
                .copied()
                .collect(),
        )
    }
}
