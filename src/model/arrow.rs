use crate::error::{ArgumentError, Result};
use std::fmt;

/// A single shot. An inner ten is stored as a 10 with the X flag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Arrow {
    pub score: u8,
    pub is_x: bool,
}

impl Arrow {
    pub const MISS: Arrow = Arrow { score: 0, is_x: false };
    pub const X: Arrow = Arrow { score: 10, is_x: true };

    pub fn new(score: u8, is_x: bool) -> Result<Self> {
        if score > 10 || (is_x && score != 10) {
            return Err(ArgumentError::InvalidArrow { score, is_x }.into());
        }
        Ok(Self { score, is_x })
    }

    /// A plain ring score with no X flag
    pub fn ring(score: u8) -> Result<Self> {
        Self::new(score, false)
    }

    pub fn is_hit(&self) -> bool {
        self.score > 0
    }

    /// Ordering key used when an end is shown best arrow first
    fn display_rank(&self) -> (u8, bool) {
        (self.score, self.is_x)
    }

    /// Symbol used on score sheets: X, M or the ring value
    pub fn symbol(&self) -> String {
        if self.is_x {
            "X".to_string()
        } else if self.score == 0 {
            "M".to_string()
        } else {
            self.score.to_string()
        }
    }
}

impl fmt::Display for Arrow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl PartialOrd for Arrow {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Arrow {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.display_rank().cmp(&other.display_rank())
    }
}

/// An arrow as recorded against a shoot, in shooting order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrowScore {
    pub shoot_id: u32,
    pub arrow_number: u32,
    pub arrow: Arrow,
}

/// Put recorded arrows back into shooting order and strip the bookkeeping
pub fn arrows_in_order(scores: &[ArrowScore]) -> Vec<Arrow> {
    let mut sorted: Vec<&ArrowScore> = scores.iter().collect();
    sorted.sort_by_key(|s| s.arrow_number);
    sorted.into_iter().map(|s| s.arrow).collect()
}

/// Scoring zones printed on a target face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceZones {
    /// 10 rings scoring 10 down to 1, with an inner X ring
    TenZone,
    /// Imperial colour rings scoring 9, 7, 5, 3, 1
    FiveZone,
}

impl FaceZones {
    pub fn max_arrow_score(&self) -> u8 {
        match self {
            FaceZones::TenZone => 10,
            FaceZones::FiveZone => 9,
        }
    }

    pub fn accepts(&self, arrow: &Arrow) -> bool {
        match self {
            FaceZones::TenZone => arrow.score <= 10 && (!arrow.is_x || arrow.score == 10),
            FaceZones::FiveZone => !arrow.is_x && (arrow.score == 0 || arrow.score % 2 == 1),
        }
    }

    pub fn validate(&self, arrow: &Arrow) -> Result<()> {
        if self.accepts(arrow) {
            Ok(())
        } else {
            Err(ArgumentError::InvalidArrow {
                score: arrow.score,
                is_x: arrow.is_x,
            }
            .into())
        }
    }
}

/// Which rings count as golds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GoldsType {
    #[default]
    Tens,
    Nines,
    Xs,
}

impl GoldsType {
    pub fn is_gold(&self, arrow: &Arrow) -> bool {
        match self {
            GoldsType::Tens => arrow.score >= 10,
            GoldsType::Nines => arrow.score >= 9,
            GoldsType::Xs => arrow.is_x,
        }
    }

    /// Column heading used on score pads
    pub fn short_name(&self) -> &'static str {
        match self {
            GoldsType::Tens => "10s",
            GoldsType::Nines => "G",
            GoldsType::Xs => "Xs",
        }
    }

    pub fn from_str(s: &str) -> Option<GoldsType> {
        match s.to_lowercase().as_str() {
            "10" | "10s" | "tens" => Some(GoldsType::Tens),
            "9" | "9s" | "nines" | "golds" => Some(GoldsType::Nines),
            "x" | "xs" => Some(GoldsType::Xs),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_validation() {
        assert!(Arrow::new(10, true).is_ok());
        assert!(Arrow::new(9, true).is_err());
        assert!(Arrow::new(11, false).is_err());
        assert_eq!(Arrow::ring(0).unwrap(), Arrow::MISS);
    }

    #[test]
    fn test_arrow_symbols() {
        assert_eq!(Arrow::X.to_string(), "X");
        assert_eq!(Arrow::MISS.to_string(), "M");
        assert_eq!(Arrow::ring(7).unwrap().to_string(), "7");
        assert_eq!(Arrow::ring(10).unwrap().to_string(), "10");
    }

    #[test]
    fn test_x_ranks_above_ten() {
        let ten = Arrow::ring(10).unwrap();
        assert!(Arrow::X > ten);
        assert!(ten > Arrow::ring(9).unwrap());
    }

    #[test]
    fn test_five_zone_rejects_even_scores() {
        let zones = FaceZones::FiveZone;
        assert!(zones.accepts(&Arrow::ring(9).unwrap()));
        assert!(zones.accepts(&Arrow::MISS));
        assert!(!zones.accepts(&Arrow::ring(8).unwrap()));
        assert!(!zones.accepts(&Arrow::X));
        assert!(FaceZones::TenZone.accepts(&Arrow::X));
    }

    #[test]
    fn test_golds() {
        let nine = Arrow::ring(9).unwrap();
        let ten = Arrow::ring(10).unwrap();
        assert!(!GoldsType::Tens.is_gold(&nine));
        assert!(GoldsType::Tens.is_gold(&Arrow::X));
        assert!(GoldsType::Nines.is_gold(&nine));
        assert!(!GoldsType::Xs.is_gold(&ten));
        assert_eq!(GoldsType::from_str("Nines"), Some(GoldsType::Nines));
    }

    #[test]
    fn test_arrows_in_order() {
        let scores = vec![
            ArrowScore { shoot_id: 1, arrow_number: 2, arrow: Arrow::MISS },
            ArrowScore { shoot_id: 1, arrow_number: 0, arrow: Arrow::X },
            ArrowScore { shoot_id: 1, arrow_number: 1, arrow: Arrow::ring(7).unwrap() },
        ];
        let arrows = arrows_in_order(&scores);
        assert_eq!(arrows, vec![Arrow::X, Arrow::ring(7).unwrap(), Arrow::MISS]);
    }
}
