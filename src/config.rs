use crate::dataset::RoundDataset;
use crate::error::Result;
use crate::handicap::{HandicapParams, ScoringSystemVersion};
use crate::model::{FullRound, DEFAULT_END_SIZE};
use log::debug;
use std::path::PathBuf;

/// Settings a caller injects instead of relying on compiled-in round ids
#[derive(Debug, Clone, PartialEq)]
pub struct ScorerConfig {
    /// Round used when none is named
    pub default_round: String,
    pub end_size: usize,
    pub system: ScoringSystemVersion,
    pub inner_ten_archer: bool,
    /// Directory of round tables merged over the bundled rounds
    pub data_dir: Option<PathBuf>,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            default_round: "york".to_string(),
            end_size: DEFAULT_END_SIZE,
            system: ScoringSystemVersion::default(),
            inner_ten_archer: false,
            data_dir: None,
        }
    }
}

impl ScorerConfig {
    pub fn with_default_round(mut self, name: &str) -> Self {
        self.default_round = name.to_string();
        self
    }

    pub fn with_end_size(mut self, end_size: usize) -> Self {
        self.end_size = end_size;
        self
    }

    pub fn with_system(mut self, system: ScoringSystemVersion) -> Self {
        self.system = system;
        self
    }

    pub fn with_inner_ten(mut self, inner_ten_archer: bool) -> Self {
        self.inner_ten_archer = inner_ten_archer;
        self
    }

    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = Some(dir);
        self
    }

    pub fn handicap_params(&self) -> HandicapParams {
        HandicapParams::new(self.system).with_inner_ten(self.inner_ten_archer)
    }

    /// Bundled rounds, updated from `data_dir` when one is set
    pub fn load_dataset(&self) -> Result<RoundDataset> {
        let mut dataset = RoundDataset::bundled()?;
        if let Some(dir) = &self.data_dir {
            debug!("Loading rounds from {}", dir.display());
            dataset.merge(RoundDataset::from_dir(dir)?);
        }
        Ok(dataset)
    }

    /// The named round, or the configured default
    pub fn resolve_round(&self, dataset: &RoundDataset, name: Option<&str>) -> Result<FullRound> {
        dataset.full_round_by_name(name.unwrap_or(&self.default_round))
    }
}
