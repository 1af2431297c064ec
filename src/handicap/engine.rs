use super::tables::{HandicapCoefficients, ScoringSystemVersion};
use crate::error::{ArgumentError, Result};
use crate::model::round::check_geometry;
use crate::model::{FaceZones, FullRound, Round, RoundArrowCount, RoundDistance};
use log::trace;

/// Options shared by both directions of the conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandicapParams {
    pub system: ScoringSystemVersion,
    /// Score the X ring as the only 10 (compound scoring)
    pub inner_ten_archer: bool,
    /// Only the first `n` arrows of the round count, for rounds still being shot
    pub shot_arrows: Option<usize>,
}

impl HandicapParams {
    pub fn new(system: ScoringSystemVersion) -> Self {
        Self {
            system,
            ..Self::default()
        }
    }

    pub fn with_inner_ten(mut self, inner_ten_archer: bool) -> Self {
        self.inner_ten_archer = inner_ten_archer;
        self
    }

    pub fn with_shot_arrows(mut self, shot_arrows: usize) -> Self {
        self.shot_arrows = Some(shot_arrows);
        self
    }
}

/// Average score of one arrow shot by an archer of `handicap` at a face of `face_size_cm`
pub fn expected_arrow_score(
    coefficients: &HandicapCoefficients,
    handicap: f64,
    distance_m: f64,
    face_size_cm: f64,
    zones: FaceZones,
    is_outdoor: bool,
    inner_ten_archer: bool,
) -> f64 {
    let spread = coefficients.group_spread_cm(handicap, distance_m);
    let arrow_radius = coefficients.arrow_radius_cm(is_outdoor);
    // Chance of landing outside a ring of `radius`, counting line cutters in
    let outside = |radius: f64| (-((radius + arrow_radius) / spread).powi(2)).exp();

    match zones {
        FaceZones::TenZone => {
            let rings: f64 = (1..=10)
                .map(|n| {
                    let radius = if n == 1 && inner_ten_archer {
                        face_size_cm / 40.0
                    } else {
                        n as f64 * face_size_cm / 20.0
                    };
                    outside(radius)
                })
                .sum();
            10.0 - rings
        }
        FaceZones::FiveZone => {
            let inner: f64 = (1..=4)
                .map(|n| outside(n as f64 * face_size_cm / 10.0))
                .sum();
            9.0 - 2.0 * inner - outside(face_size_cm / 2.0)
        }
    }
}

/// One distance of a round reduced to the numbers the model needs
#[derive(Debug, Clone, Copy)]
pub(crate) struct CountedDistance {
    arrows: usize,
    distance_m: f64,
    face_size_cm: f64,
}

/// Validated geometry with the arrows that count towards the prediction
#[derive(Debug, Clone)]
pub(crate) struct PreparedRound {
    zones: FaceZones,
    is_outdoor: bool,
    distances: Vec<CountedDistance>,
}

impl PreparedRound {
    pub(crate) fn new(
        round: &Round,
        arrow_counts: &[RoundArrowCount],
        distances: &[RoundDistance],
        shot_arrows: Option<usize>,
    ) -> Result<Self> {
        check_geometry(round, arrow_counts, distances)?;

        let unit = round.distance_unit();
        let total: usize = arrow_counts.iter().map(|c| c.arrow_count as usize).sum();
        // Arrows beyond the round's length are not part of any distance
        let mut remaining = shot_arrows.map_or(total, |shot| shot.min(total));

        let counted = arrow_counts
            .iter()
            .zip(distances)
            .map(|(count, distance)| {
                let arrows = remaining.min(count.arrow_count as usize);
                remaining -= arrows;
                CountedDistance {
                    arrows,
                    distance_m: crate::model::Distance {
                        value: distance.distance,
                        unit,
                    }
                    .in_metres(),
                    face_size_cm: count.face_size_cm as f64,
                }
            })
            .collect();

        Ok(Self {
            zones: round.face_zones(),
            is_outdoor: round.is_outdoor,
            distances: counted,
        })
    }

    pub(crate) fn counted_arrows(&self) -> usize {
        self.distances.iter().map(|d| d.arrows).sum()
    }

    pub(crate) fn max_score(&self) -> u32 {
        self.counted_arrows() as u32 * self.zones.max_arrow_score() as u32
    }

    fn expected_score(&self, handicap: f64, params: &HandicapParams) -> f64 {
        let coefficients = params.system.coefficients();
        self.distances
            .iter()
            .filter(|d| d.arrows > 0)
            .map(|d| {
                d.arrows as f64
                    * expected_arrow_score(
                        coefficients,
                        handicap,
                        d.distance_m,
                        d.face_size_cm,
                        self.zones,
                        self.is_outdoor,
                        params.inner_ten_archer,
                    )
            })
            .sum()
    }

    /// Whole-number score the tables give for `handicap`, saturating outside the table range
    pub(crate) fn predicted_score(&self, handicap: i32, params: &HandicapParams) -> u32 {
        let coefficients = params.system.coefficients();
        let max = self.max_score();

        if handicap < coefficients.min_handicap {
            return max;
        }
        if handicap > coefficients.max_handicap {
            return 0;
        }

        let expected = self.expected_score(handicap as f64, params);
        coefficients.rounding.apply(expected).min(max)
    }
}

/// Score an archer of `handicap` is expected to shoot on the given round
pub fn score_for_handicap(
    round: &Round,
    arrow_counts: &[RoundArrowCount],
    distances: &[RoundDistance],
    handicap: i32,
    params: &HandicapParams,
) -> Result<u32> {
    let prepared = PreparedRound::new(round, arrow_counts, distances, params.shot_arrows)?;
    Ok(prepared.predicted_score(handicap, params))
}

/// Handicap earned by `score` on the given round.
///
/// The result is the best handicap whose table score does not exceed `score`.
/// A score of zero earns the worst handicap of the scheme.
pub fn handicap_for_score(
    round: &Round,
    arrow_counts: &[RoundArrowCount],
    distances: &[RoundDistance],
    score: u32,
    params: &HandicapParams,
) -> Result<i32> {
    let prepared = PreparedRound::new(round, arrow_counts, distances, params.shot_arrows)?;
    let max = prepared.max_score();
    if score > max {
        return Err(ArgumentError::ScoreAboveMaximum { score, max }.into());
    }

    let coefficients = params.system.coefficients();
    if score == 0 {
        return Ok(coefficients.max_handicap);
    }

    let (mut low, mut high) = (coefficients.min_handicap, coefficients.max_handicap);
    if prepared.predicted_score(high, params) > score {
        return Ok(high);
    }

    // Table scores fall as the handicap rises, so the first handicap at or below `score` wins
    while low < high {
        let mid = low + (high - low) / 2;
        let predicted = prepared.predicted_score(mid, params);
        trace!("handicap {} predicts {} against {}", mid, predicted, score);
        if predicted <= score {
            high = mid;
        } else {
            low = mid + 1;
        }
    }

    Ok(low)
}

impl FullRound {
    pub fn score_for_handicap(
        &self,
        sub_type: Option<u32>,
        handicap: i32,
        params: &HandicapParams,
    ) -> Result<u32> {
        let distances = self.get_distances(sub_type)?;
        score_for_handicap(&self.round, &self.arrow_counts, &distances, handicap, params)
    }

    pub fn handicap_for_score(
        &self,
        sub_type: Option<u32>,
        score: u32,
        params: &HandicapParams,
    ) -> Result<i32> {
        let distances = self.get_distances(sub_type)?;
        handicap_for_score(&self.round, &self.arrow_counts, &distances, score, params)
    }
}
