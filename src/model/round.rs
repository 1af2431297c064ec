use super::arrow::{FaceZones, GoldsType};
use crate::error::{ArgumentError, Result, ScorerError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::fmt;

lazy_static! {
    static ref NOT_NAME_CHAR: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Reduce a round name to the lowercase alphanumeric key rounds are stored under
pub fn normalize_round_name(name: &str) -> String {
    NOT_NAME_CHAR
        .replace_all(&name.to_lowercase(), "")
        .into_owned()
}

/// A named scoring format
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Round {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    pub is_outdoor: bool,
    pub is_metric: bool,
    pub reference_round_id: Option<u32>,
}

impl Round {
    pub fn distance_unit(&self) -> DistanceUnit {
        if self.is_metric {
            DistanceUnit::Metres
        } else {
            DistanceUnit::Yards
        }
    }

    /// Outdoor imperial rounds are shot on five-zone faces
    pub fn face_zones(&self) -> FaceZones {
        if self.is_outdoor && !self.is_metric {
            FaceZones::FiveZone
        } else {
            FaceZones::TenZone
        }
    }

    pub fn golds_type(&self) -> GoldsType {
        match self.face_zones() {
            FaceZones::FiveZone => GoldsType::Nines,
            FaceZones::TenZone => GoldsType::Tens,
        }
    }

    pub fn has_normalized_name(&self) -> bool {
        self.name == normalize_round_name(&self.name)
    }
}

/// A distance variant of a round, e.g. "Hereford" for the York family
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RoundSubType {
    pub round_id: u32,
    pub sub_type_id: u32,
    pub name: String,
    pub gent_under_age: Option<u32>,
    pub lady_under_age: Option<u32>,
}

/// Face size and arrow count for one distance of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RoundArrowCount {
    pub round_id: u32,
    pub distance_number: u32,
    pub face_size_cm: u32,
    pub arrow_count: u32,
}

/// The distance shot for one sub type at one distance number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RoundDistance {
    pub round_id: u32,
    pub sub_type_id: u32,
    pub distance_number: u32,
    pub distance: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceUnit {
    Metres,
    Yards,
}

impl DistanceUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            DistanceUnit::Metres => "m",
            DistanceUnit::Yards => "yd",
        }
    }
}

const METRES_PER_YARD: f64 = 0.9144;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Distance {
    pub value: u32,
    pub unit: DistanceUnit,
}

impl Distance {
    pub fn in_metres(&self) -> f64 {
        match self.unit {
            DistanceUnit::Metres => self.value as f64,
            DistanceUnit::Yards => self.value as f64 * METRES_PER_YARD,
        }
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

/// Everything needed to shoot one distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceSpec {
    pub distance_number: u32,
    pub distance: Distance,
    pub face_size_cm: u32,
    pub arrow_count: u32,
}

/// Check that arrow counts and distances describe the same round in the same order
pub(crate) fn check_geometry(
    round: &Round,
    arrow_counts: &[RoundArrowCount],
    distances: &[RoundDistance],
) -> Result<()> {
    if arrow_counts.len() != distances.len() {
        return Err(ArgumentError::SizeMismatch {
            arrow_counts: arrow_counts.len(),
            distances: distances.len(),
        }
        .into());
    }

    for count in arrow_counts {
        if count.round_id != round.id {
            return Err(inconsistent("arrow count", round.id, count.round_id));
        }
    }
    for distance in distances {
        if distance.round_id != round.id {
            return Err(inconsistent("distance", round.id, distance.round_id));
        }
    }

    for (count, distance) in arrow_counts.iter().zip(distances) {
        if count.distance_number != distance.distance_number {
            return Err(ArgumentError::DistanceOrderMismatch {
                arrow_count: count.distance_number,
                distance: distance.distance_number,
            }
            .into());
        }
    }

    Ok(())
}

fn inconsistent(entity: &'static str, expected: u32, found: u32) -> ScorerError {
    ScorerError::InconsistentRoundData {
        entity,
        expected,
        found,
    }
}

/// A round together with all of its reference data
#[derive(Debug, Clone, PartialEq)]
pub struct FullRound {
    pub round: Round,
    pub arrow_counts: Vec<RoundArrowCount>,
    pub sub_types: Vec<RoundSubType>,
    pub distances: Vec<RoundDistance>,
}

impl FullRound {
    pub fn new(
        round: Round,
        mut arrow_counts: Vec<RoundArrowCount>,
        mut sub_types: Vec<RoundSubType>,
        mut distances: Vec<RoundDistance>,
    ) -> Result<Self> {
        for sub_type in &sub_types {
            if sub_type.round_id != round.id {
                return Err(inconsistent("sub type", round.id, sub_type.round_id));
            }
        }
        for count in &arrow_counts {
            if count.round_id != round.id {
                return Err(inconsistent("arrow count", round.id, count.round_id));
            }
        }
        for distance in &distances {
            if distance.round_id != round.id {
                return Err(inconsistent("distance", round.id, distance.round_id));
            }
        }

        if arrow_counts.is_empty() {
            return Err(ArgumentError::NoDistances { round_id: round.id }.into());
        }

        arrow_counts.sort_by_key(|c| c.distance_number);
        sub_types.sort_by_key(|s| s.sub_type_id);
        distances.sort_by_key(|d| (d.sub_type_id, d.distance_number));

        for (position, count) in arrow_counts.iter().enumerate() {
            if count.distance_number as usize != position + 1 {
                return Err(ArgumentError::NonContiguousDistances {
                    round_id: round.id,
                    position,
                    found: count.distance_number,
                }
                .into());
            }
            if count.arrow_count == 0 {
                return Err(ArgumentError::ZeroArrowCount {
                    round_id: round.id,
                    distance_number: count.distance_number,
                }
                .into());
            }
        }

        let full = Self {
            round,
            arrow_counts,
            sub_types,
            distances,
        };

        // Each sub type must give a distance for every arrow count, in order
        for sub_type_id in full.sub_type_ids() {
            let numbers: Vec<u32> = full
                .distances
                .iter()
                .filter(|d| d.sub_type_id == sub_type_id)
                .map(|d| d.distance_number)
                .collect();
            if numbers.len() != full.arrow_counts.len() {
                return Err(ArgumentError::SizeMismatch {
                    arrow_counts: full.arrow_counts.len(),
                    distances: numbers.len(),
                }
                .into());
            }
            for (position, number) in numbers.iter().enumerate() {
                if *number as usize != position + 1 {
                    return Err(ArgumentError::NonContiguousDistances {
                        round_id: full.round.id,
                        position,
                        found: *number,
                    }
                    .into());
                }
            }
        }

        Ok(full)
    }

    /// Sub type ids known for this round, from the sub type table or, failing that, the distances
    pub(crate) fn sub_type_ids(&self) -> BTreeSet<u32> {
        if self.sub_types.is_empty() {
            self.distances.iter().map(|d| d.sub_type_id).collect()
        } else {
            self.sub_types.iter().map(|s| s.sub_type_id).collect()
        }
    }

    /// One selection per variant of the round: `None` for a round with a single sub type
    pub fn sub_type_selections(&self) -> Vec<Option<u32>> {
        let ids = self.sub_type_ids();
        if ids.len() <= 1 {
            vec![None]
        } else {
            ids.into_iter().map(Some).collect()
        }
    }

    pub fn sub_type(&self, sub_type_id: u32) -> Option<&RoundSubType> {
        self.sub_types.iter().find(|s| s.sub_type_id == sub_type_id)
    }

    /// Distances for a sub type in shooting order.
    ///
    /// Rounds with a single sub type ignore `sub_type`; rounds with several require one.
    pub fn get_distances(&self, sub_type: Option<u32>) -> Result<Vec<RoundDistance>> {
        let ids = self.sub_type_ids();

        let selected = if ids.len() <= 1 {
            match ids.iter().next() {
                Some(id) => *id,
                None => return Ok(Vec::new()),
            }
        } else {
            let id = sub_type.ok_or(ArgumentError::SubTypeRequired {
                round_id: self.round.id,
            })?;
            if !ids.contains(&id) {
                return Err(ArgumentError::UnknownSubType {
                    round_id: self.round.id,
                    sub_type_id: id,
                }
                .into());
            }
            id
        };

        Ok(self
            .distances
            .iter()
            .filter(|d| d.sub_type_id == selected)
            .copied()
            .collect())
    }

    /// (distance, face, arrow count) for each distance of a sub type
    pub fn distance_specs(&self, sub_type: Option<u32>) -> Result<Vec<DistanceSpec>> {
        let distances = self.get_distances(sub_type)?;
        check_geometry(&self.round, &self.arrow_counts, &distances)?;

        let unit = self.round.distance_unit();
        Ok(self
            .arrow_counts
            .iter()
            .zip(&distances)
            .map(|(count, distance)| DistanceSpec {
                distance_number: count.distance_number,
                distance: Distance {
                    value: distance.distance,
                    unit,
                },
                face_size_cm: count.face_size_cm,
                arrow_count: count.arrow_count,
            })
            .collect())
    }

    pub fn arrows_per_distance(&self) -> Vec<usize> {
        self.arrow_counts
            .iter()
            .map(|c| c.arrow_count as usize)
            .collect()
    }

    pub fn total_arrows(&self) -> usize {
        self.arrows_per_distance().iter().sum()
    }

    pub fn max_score(&self) -> u32 {
        self.total_arrows() as u32 * self.round.face_zones().max_arrow_score() as u32
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn round(id: u32, name: &str, is_outdoor: bool, is_metric: bool) -> Round {
        Round {
            id,
            name: normalize_round_name(name),
            display_name: name.to_string(),
            is_outdoor,
            is_metric,
            reference_round_id: None,
        }
    }

    pub fn counts(round_id: u32, counts: &[(u32, u32)]) -> Vec<RoundArrowCount> {
        counts
            .iter()
            .enumerate()
            .map(|(i, (face, arrows))| RoundArrowCount {
                round_id,
                distance_number: i as u32 + 1,
                face_size_cm: *face,
                arrow_count: *arrows,
            })
            .collect()
    }

    pub fn distances(round_id: u32, sub_type_id: u32, values: &[u32]) -> Vec<RoundDistance> {
        values
            .iter()
            .enumerate()
            .map(|(i, d)| RoundDistance {
                round_id,
                sub_type_id,
                distance_number: i as u32 + 1,
                distance: *d,
            })
            .collect()
    }

    pub fn sub_type(round_id: u32, sub_type_id: u32, name: &str) -> RoundSubType {
        RoundSubType {
            round_id,
            sub_type_id,
            name: name.to_string(),
            gent_under_age: None,
            lady_under_age: None,
        }
    }

    /// York (sub type 1) and Hereford (sub type 2)
    pub fn york() -> FullRound {
        let mut all = distances(1, 1, &[100, 80, 60]);
        all.extend(distances(1, 2, &[80, 60, 50]));
        FullRound::new(
            round(1, "York", true, false),
            counts(1, &[(122, 72), (122, 48), (122, 24)]),
            vec![sub_type(1, 1, "York"), sub_type(1, 2, "Hereford")],
            all,
        )
        .unwrap()
    }

    pub fn wa_1440_gents() -> FullRound {
        FullRound::new(
            round(2, "WA 1440 Gents", true, true),
            counts(2, &[(122, 36), (122, 36), (80, 36), (80, 36)]),
            vec![sub_type(2, 1, "Gents")],
            distances(2, 1, &[90, 70, 50, 30]),
        )
        .unwrap()
    }

    pub fn wa_18() -> FullRound {
        FullRound::new(
            round(3, "WA 18", false, true),
            counts(3, &[(40, 60)]),
            Vec::new(),
            distances(3, 1, &[18]),
        )
        .unwrap()
    }

    pub fn portsmouth() -> FullRound {
        FullRound::new(
            round(4, "Portsmouth", false, false),
            counts(4, &[(60, 60)]),
            Vec::new(),
            distances(4, 1, &[20]),
        )
        .unwrap()
    }

    /// Two distances of three arrows each
    pub fn short_metric() -> FullRound {
        FullRound::new(
            round(5, "Short Metric Test", true, true),
            counts(5, &[(122, 3), (122, 3)]),
            Vec::new(),
            distances(5, 1, &[70, 50]),
        )
        .unwrap()
    }
}
