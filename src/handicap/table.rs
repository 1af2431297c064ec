use super::engine::{HandicapParams, PreparedRound};
use crate::error::Result;
use crate::model::FullRound;
use log::debug;
use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandicapTableRow {
    pub handicap: i32,
    pub score: u32,
}

/// Predicted score for every handicap of a scheme on one round
#[derive(Debug, Clone, PartialEq)]
pub struct HandicapTable {
    pub round_name: String,
    pub sub_type: Option<String>,
    pub params: HandicapParams,
    pub rows: Vec<HandicapTableRow>,
}

impl HandicapTable {
    pub fn build(round: &FullRound, sub_type: Option<u32>, params: &HandicapParams) -> Result<Self> {
        let distances = round.get_distances(sub_type)?;
        let prepared =
            PreparedRound::new(&round.round, &round.arrow_counts, &distances, params.shot_arrows)?;
        let coefficients = params.system.coefficients();

        let rows: Vec<HandicapTableRow> = (coefficients.min_handicap..=coefficients.max_handicap)
            .into_par_iter()
            .map(|handicap| HandicapTableRow {
                handicap,
                score: prepared.predicted_score(handicap, params),
            })
            .collect();

        debug!(
            "Built {} handicap rows for {} ({})",
            rows.len(),
            round.round.display_name,
            params.system
        );

        // Variants without a sub type row are named by id so titles stay distinct
        let sub_type_name = match distances.first() {
            Some(d) if round.sub_type_ids().len() > 1 => Some(
                round
                    .sub_type(d.sub_type_id)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| format!("sub type {}", d.sub_type_id)),
            ),
            _ => None,
        };

        Ok(Self {
            round_name: round.round.display_name.clone(),
            sub_type: sub_type_name,
            params: *params,
            rows,
        })
    }

    /// Tables for every sub type of every round
    pub fn for_rounds(rounds: &[FullRound], params: &HandicapParams) -> Result<Vec<Self>> {
        let jobs: Vec<(&FullRound, Option<u32>)> = rounds
            .iter()
            .flat_map(|round| {
                round
                    .sub_type_selections()
                    .into_iter()
                    .map(move |sub_type| (round, sub_type))
            })
            .collect();

        jobs.into_par_iter()
            .map(|(round, sub_type)| Self::build(round, sub_type, params))
            .collect()
    }

    pub fn title(&self) -> String {
        match &self.sub_type {
            Some(sub_type) => format!("{} ({})", self.round_name, sub_type),
            None => self.round_name.clone(),
        }
    }

    pub fn score_at(&self, handicap: i32) -> Option<u32> {
        self.rows
            .iter()
            .find(|r| r.handicap == handicap)
            .map(|r| r.score)
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut out = csv::Writer::from_writer(writer);
        for row in &self.rows {
            out.serialize(row)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::RoundDataset;
    use crate::handicap::ScoringSystemVersion;
    use crate::model::round::fixtures::*;

    #[test]
    fn test_table_covers_scheme_range() {
        let params = HandicapParams::new(ScoringSystemVersion::Legacy);
        let table = HandicapTable::build(&york(), Some(2), &params).unwrap();
        assert_eq!(table.rows.len(), 101);
        assert_eq!(table.rows[0].handicap, 0);
        assert_eq!(table.rows[100].handicap, 100);
        assert_eq!(table.title(), "York (Hereford)");
    }

    #[test]
    fn test_table_matches_engine() {
        let round = wa_1440_gents();
        let params = HandicapParams::default();
        let table = HandicapTable::build(&round, None, &params).unwrap();
        assert_eq!(table.score_at(50), Some(886));
        assert_eq!(table.score_at(151), None);
        for row in table.rows.iter().step_by(10) {
            assert_eq!(
                Some(row.score),
                round.score_for_handicap(None, row.handicap, &params).ok()
            );
        }
        assert_eq!(table.title(), "WA 1440 Gents");
    }

    #[test]
    fn test_for_rounds_expands_sub_types() {
        let rounds = vec![york(), wa_18()];
        let tables = HandicapTable::for_rounds(&rounds, &HandicapParams::default()).unwrap();
        assert_eq!(tables.len(), 3);
        assert!(tables.iter().all(|t| t.rows.len() == 151));
    }

    #[test]
    fn test_for_rounds_finds_sub_types_from_distances() {
        let dataset = RoundDataset::from_csv(
            "id,name,display_name,is_outdoor,is_metric,reference_round_id\n1,club,Club,true,true,\n",
            "round_id,sub_type_id,name,gent_under_age,lady_under_age\n",
            "round_id,distance_number,face_size_cm,arrow_count\n1,1,122,36\n",
            "round_id,sub_type_id,distance_number,distance\n1,1,1,70\n1,2,1,50\n",
        )
        .unwrap();
        let rounds = dataset.full_rounds().unwrap();
        assert_eq!(rounds[0].sub_type_selections(), vec![Some(1), Some(2)]);

        let tables = HandicapTable::for_rounds(&rounds, &HandicapParams::default()).unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].title(), "Club (sub type 1)");
        assert_eq!(tables[1].title(), "Club (sub type 2)");
        assert!(tables[1].score_at(50).unwrap() > tables[0].score_at(50).unwrap());
    }

    #[test]
    fn test_write_csv() {
        let table = HandicapTable::build(&wa_18(), None, &HandicapParams::default()).unwrap();
        let mut out = Vec::new();
        table.write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("handicap,score"));
        assert_eq!(lines.count(), 151);
    }
}
