use crate::error::{ArgumentError, Result};

/// Label of one score pad row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowHeader {
    /// 1-based end number, counted across the whole shoot
    End(usize),
    DistanceTotal,
    GrandTotal,
}

/// Arrows per partition: each distance of the round, then any surplus arrows
pub(crate) fn partition_sizes(arrows_per_distance: &[usize], arrows_shot: usize) -> Vec<usize> {
    let mut partitions = arrows_per_distance.to_vec();
    let nominal: usize = arrows_per_distance.iter().sum();
    if arrows_shot > nominal {
        partitions.push(arrows_shot - nominal);
    }
    partitions
}

/// Row labels for a score pad of `arrows_shot` arrows.
///
/// A distance that was only partly shot contributes only the ends actually shot, and
/// distances never reached contribute nothing.
pub fn generate_numbered_row_headers(
    arrows_per_distance: &[usize],
    end_size: usize,
    arrows_shot: usize,
) -> Result<Vec<RowHeader>> {
    if end_size == 0 {
        return Err(ArgumentError::NonPositiveEndSize.into());
    }
    if arrows_shot == 0 {
        return Err(ArgumentError::EmptyArrows.into());
    }

    let partitions = partition_sizes(arrows_per_distance, arrows_shot);
    let show_distance_totals = partitions.len() > 1;

    let mut headers = Vec::new();
    let mut remaining = arrows_shot;
    let mut end_number = 1;

    for size in partitions {
        if remaining == 0 {
            break;
        }
        let shot_here = size.min(remaining);
        remaining -= shot_here;

        for _ in 0..shot_here.div_ceil(end_size) {
            headers.push(RowHeader::End(end_number));
            end_number += 1;
        }
        if show_distance_totals {
            headers.push(RowHeader::DistanceTotal);
        }
    }

    headers.push(RowHeader::GrandTotal);
    Ok(headers)
}
