pub mod arrow;
pub mod end;
pub mod round;

pub use arrow::{arrows_in_order, Arrow, ArrowScore, FaceZones, GoldsType};
pub use end::{End, EndDisplay, EndState, DEFAULT_END_SIZE};
pub use round::{
    normalize_round_name, Distance, DistanceSpec, DistanceUnit, FullRound, Round,
    RoundArrowCount, RoundDistance, RoundSubType,
};
