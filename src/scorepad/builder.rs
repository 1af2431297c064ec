use super::headers::{generate_numbered_row_headers, partition_sizes, RowHeader};
use crate::error::{ArgumentError, Result};
use crate::model::round::check_geometry;
use crate::model::{
    Arrow, Distance, End, FullRound, GoldsType, Round, RoundArrowCount, RoundDistance,
};
use log::debug;

/// One end of the score pad
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndRow {
    pub end: End,
    pub hits: u32,
    pub score: u32,
    pub golds: u32,
    pub x_count: u32,
    /// Cumulative score of the shoot up to and including this end
    pub running_total: u32,
}

/// Totals over a distance, the surplus arrows, or the whole shoot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TotalRow {
    /// The distance totalled; `None` for surplus arrows and the grand total
    pub distance: Option<Distance>,
    pub arrows: u32,
    pub hits: u32,
    pub score: u32,
    pub golds: u32,
    pub x_count: u32,
}

impl TotalRow {
    fn add(&mut self, row: &EndRow) {
        self.arrows += row.end.len() as u32;
        self.hits += row.hits;
        self.score += row.score;
        self.golds += row.golds;
        self.x_count += row.x_count;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScorePadRow {
    End(EndRow),
    DistanceTotal(TotalRow),
    GrandTotal(TotalRow),
}

impl ScorePadRow {
    pub fn hits(&self) -> u32 {
        match self {
            ScorePadRow::End(row) => row.hits,
            ScorePadRow::DistanceTotal(row) | ScorePadRow::GrandTotal(row) => row.hits,
        }
    }

    pub fn score(&self) -> u32 {
        match self {
            ScorePadRow::End(row) => row.score,
            ScorePadRow::DistanceTotal(row) | ScorePadRow::GrandTotal(row) => row.score,
        }
    }

    pub fn golds(&self) -> u32 {
        match self {
            ScorePadRow::End(row) => row.golds,
            ScorePadRow::DistanceTotal(row) | ScorePadRow::GrandTotal(row) => row.golds,
        }
    }

    /// Only end rows carry a running total
    pub fn running_total(&self) -> Option<u32> {
        match self {
            ScorePadRow::End(row) => Some(row.running_total),
            _ => None,
        }
    }
}

/// End-by-end and distance-by-distance breakdown of a shoot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScorePad {
    pub end_size: usize,
    pub golds_type: GoldsType,
    pub arrows_per_distance: Vec<usize>,
    pub arrows_shot: usize,
    pub rows: Vec<ScorePadRow>,
}

impl ScorePad {
    /// Build a score pad counting golds the way `round` does
    pub fn build(
        round: &Round,
        arrow_counts: &[RoundArrowCount],
        distances: &[RoundDistance],
        arrows: &[Arrow],
        end_size: usize,
    ) -> Result<Self> {
        Self::build_with_golds(
            round,
            arrow_counts,
            distances,
            arrows,
            end_size,
            round.golds_type(),
        )
    }

    pub fn build_with_golds(
        round: &Round,
        arrow_counts: &[RoundArrowCount],
        distances: &[RoundDistance],
        arrows: &[Arrow],
        end_size: usize,
        golds_type: GoldsType,
    ) -> Result<Self> {
        if arrows.is_empty() {
            return Err(ArgumentError::EmptyArrows.into());
        }
        if end_size == 0 {
            return Err(ArgumentError::NonPositiveEndSize.into());
        }
        check_geometry(round, arrow_counts, distances)?;
        let zones = round.face_zones();
        for arrow in arrows {
            zones.validate(arrow)?;
        }

        let arrows_per_distance: Vec<usize> = arrow_counts
            .iter()
            .map(|c| c.arrow_count as usize)
            .collect();
        let partitions = partition_sizes(&arrows_per_distance, arrows.len());
        let show_distance_totals = partitions.len() > 1;
        let unit = round.distance_unit();

        let mut rows = Vec::new();
        let mut grand_total = TotalRow::default();
        let mut running_total = 0;
        let mut remaining = arrows;

        for (index, size) in partitions.iter().enumerate() {
            if remaining.is_empty() {
                break;
            }
            let (partition, rest) = remaining.split_at((*size).min(remaining.len()));
            remaining = rest;

            let mut distance_total = TotalRow {
                distance: distances.get(index).map(|d| Distance {
                    value: d.distance,
                    unit,
                }),
                ..TotalRow::default()
            };

            // A distance's last end may be short so that ends never straddle distances
            for (position, chunk) in partition.chunks(end_size).enumerate() {
                let capacity = end_size.min(size - position * end_size);
                let end = End::recorded_on_face(chunk.to_vec(), capacity, zones)?;
                let score = end.score();
                running_total += score;

                let row = EndRow {
                    hits: end.hits(),
                    score,
                    golds: end.golds(golds_type),
                    x_count: end.x_count(),
                    running_total,
                    end,
                };
                distance_total.add(&row);
                grand_total.add(&row);
                rows.push(ScorePadRow::End(row));
            }

            if show_distance_totals {
                rows.push(ScorePadRow::DistanceTotal(distance_total));
            }
        }

        rows.push(ScorePadRow::GrandTotal(grand_total));

        debug!(
            "Score pad for {}: {} arrows in {} rows",
            round.display_name,
            arrows.len(),
            rows.len()
        );

        Ok(Self {
            end_size,
            golds_type,
            arrows_per_distance,
            arrows_shot: arrows.len(),
            rows,
        })
    }

    pub fn end_rows(&self) -> impl Iterator<Item = &EndRow> {
        self.rows.iter().filter_map(|row| match row {
            ScorePadRow::End(end) => Some(end),
            _ => None,
        })
    }

    pub fn distance_totals(&self) -> impl Iterator<Item = &TotalRow> {
        self.rows.iter().filter_map(|row| match row {
            ScorePadRow::DistanceTotal(total) => Some(total),
            _ => None,
        })
    }

    pub fn grand_total(&self) -> Option<&TotalRow> {
        self.rows.iter().rev().find_map(|row| match row {
            ScorePadRow::GrandTotal(total) => Some(total),
            _ => None,
        })
    }

    /// Row labels matching `rows` one for one
    pub fn row_headers(&self) -> Result<Vec<RowHeader>> {
        generate_numbered_row_headers(&self.arrows_per_distance, self.end_size, self.arrows_shot)
    }
}

impl FullRound {
    pub fn score_pad(&self, sub_type: Option<u32>, arrows: &[Arrow], end_size: usize) -> Result<ScorePad> {
        let distances = self.get_distances(sub_type)?;
        ScorePad::build(&self.round, &self.arrow_counts, &distances, arrows, end_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScorerError;
    use crate::model::round::fixtures::*;

    fn arrows(values: &[u8]) -> Vec<Arrow> {
        values.iter().map(|v| Arrow::ring(*v).unwrap()).collect()
    }

    #[test]
    fn test_two_distance_pad() {
        let round = short_metric();
        let pad = round.score_pad(None, &arrows(&[10, 10, 9, 8, 8, 8]), 3).unwrap();
        assert_eq!(pad.rows.len(), 5);

        match &pad.rows[0] {
            ScorePadRow::End(row) => {
                assert_eq!(row.score, 29);
                assert_eq!(row.running_total, 29);
                assert_eq!(row.golds, 2);
            }
            other => panic!("expected end row, got {:?}", other),
        }
        match &pad.rows[1] {
            ScorePadRow::DistanceTotal(total) => {
                assert_eq!(total.score, 29);
                assert_eq!(total.distance.map(|d| d.to_string()), Some("70m".to_string()));
            }
            other => panic!("expected distance total, got {:?}", other),
        }
        match &pad.rows[2] {
            ScorePadRow::End(row) => {
                assert_eq!(row.score, 24);
                assert_eq!(row.running_total, 53);
            }
            other => panic!("expected end row, got {:?}", other),
        }
        assert!(matches!(&pad.rows[3], ScorePadRow::DistanceTotal(t) if t.score == 24));

        let grand = pad.grand_total().unwrap();
        assert_eq!(grand.score, 53);
        assert_eq!(grand.hits, 6);
        assert_eq!(grand.arrows, 6);
        assert_eq!(pad.rows[4].running_total(), None);
    }

    #[test]
    fn test_short_ends_at_distance_boundaries() {
        // 72/48/24 arrows in ends of 5: 15 + 10 + 5 ends, the last of each distance short
        let round = york();
        let shot: Vec<Arrow> = (0..144).map(|i| Arrow::ring([9, 7, 5][i % 3]).unwrap()).collect();
        let pad = round.score_pad(Some(1), &shot, 5).unwrap();

        let ends: Vec<&EndRow> = pad.end_rows().collect();
        assert_eq!(ends.len(), 30);
        assert_eq!(ends[14].end.len(), 2);
        assert_eq!(ends[14].end.size(), 2);
        assert_eq!(ends[24].end.len(), 3);
        assert_eq!(ends[29].end.len(), 4);
        assert_eq!(pad.distance_totals().count(), 3);
        assert_eq!(pad.golds_type, GoldsType::Nines);
        assert_eq!(pad.grand_total().unwrap().golds, 48);
    }

    #[test]
    fn test_short_end_holds_only_the_arrows_left_in_its_distance() {
        let round = york();
        let pad = round.score_pad(Some(1), &arrows(&[9; 72]), 5).unwrap();
        let last = pad.end_rows().last().unwrap();
        assert_eq!(last.end.size(), 2);
        assert_eq!(last.end.to_display_string(".", " "), "9 9");

        // The same end while still being shot keeps a slot for the arrow to come
        let pad = round.score_pad(Some(1), &arrows(&[9; 71]), 5).unwrap();
        let last = pad.end_rows().last().unwrap();
        assert_eq!(last.end.to_display_string(".", " "), "9 .");

        // A partly shot end in the middle of a distance keeps the full end size
        let pad = round.score_pad(Some(1), &arrows(&[9; 7]), 5).unwrap();
        let last = pad.end_rows().last().unwrap();
        assert_eq!(last.end.to_display_string(".", " "), "9 9 . . .");
    }

    #[test]
    fn test_incomplete_round_stops_early() {
        let round = york();
        let pad = round.score_pad(Some(1), &arrows(&[9; 80]), 6).unwrap();
        let totals: Vec<&TotalRow> = pad.distance_totals().collect();
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].arrows, 72);
        assert_eq!(totals[1].arrows, 8);
        assert_eq!(pad.end_rows().count(), 12 + 2);
        assert_eq!(pad.grand_total().unwrap().score, 720);
    }

    #[test]
    fn test_surplus_arrows_get_their_own_partition() {
        let round = wa_18();
        let pad = round.score_pad(None, &arrows(&[10; 63]), 3).unwrap();
        let totals: Vec<&TotalRow> = pad.distance_totals().collect();
        assert_eq!(totals.len(), 2);
        assert!(totals[0].distance.is_some());
        assert_eq!(totals[1].distance, None);
        assert_eq!(totals[1].arrows, 3);
        assert_eq!(pad.grand_total().unwrap().score, 630);
    }

    #[test]
    fn test_single_distance_has_no_distance_totals() {
        let round = wa_18();
        let pad = round.score_pad(None, &arrows(&[7; 60]), 3).unwrap();
        assert_eq!(pad.distance_totals().count(), 0);
        assert_eq!(pad.rows.len(), 21);
    }

    #[test]
    fn test_totals_agree() {
        let round = wa_1440_gents();
        let shot: Vec<Arrow> = (0..144u32)
            .map(|i| Arrow::ring((i * 7 % 11) as u8).unwrap())
            .collect();
        let pad = round.score_pad(None, &shot, 6).unwrap();

        let end_sum: u32 = pad.end_rows().map(|r| r.score).sum();
        let distance_sum: u32 = pad.distance_totals().map(|r| r.score).sum();
        let grand = pad.grand_total().unwrap().score;
        assert_eq!(end_sum, grand);
        assert_eq!(distance_sum, grand);

        let mut cumulative = 0;
        for row in pad.end_rows() {
            cumulative += row.score;
            assert_eq!(row.running_total, cumulative);
        }
    }

    #[test]
    fn test_rejects_invalid_input() {
        let round = short_metric();
        let distances = round.get_distances(None).unwrap();

        assert!(matches!(
            ScorePad::build(&round.round, &round.arrow_counts, &distances, &[], 3),
            Err(ScorerError::InvalidArgument(ArgumentError::EmptyArrows))
        ));
        assert!(matches!(
            ScorePad::build(&round.round, &round.arrow_counts, &distances, &arrows(&[9]), 0),
            Err(ScorerError::InvalidArgument(ArgumentError::NonPositiveEndSize))
        ));
        assert!(matches!(
            ScorePad::build(&round.round, &round.arrow_counts[..1], &distances, &arrows(&[9]), 3),
            Err(ScorerError::InvalidArgument(ArgumentError::SizeMismatch { .. }))
        ));

        // Eights cannot be scored on a five-zone face
        let york = york();
        assert!(matches!(
            york.score_pad(Some(1), &arrows(&[9, 8]), 6),
            Err(ScorerError::InvalidArgument(ArgumentError::InvalidArrow { score: 8, .. }))
        ));
    }

    #[test]
    fn test_golds_override() {
        let round = short_metric();
        let distances = round.get_distances(None).unwrap();
        let shot = vec![Arrow::X, Arrow::ring(10).unwrap(), Arrow::ring(9).unwrap()];
        let pad = ScorePad::build_with_golds(
            &round.round,
            &round.arrow_counts,
            &distances,
            &shot,
            3,
            GoldsType::Xs,
        )
        .unwrap();
        assert_eq!(pad.grand_total().unwrap().golds, 1);
        assert_eq!(pad.grand_total().unwrap().x_count, 1);
    }
}
