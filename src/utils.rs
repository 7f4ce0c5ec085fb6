//! Utility functions for the rating calculator

use crate::error::EloError;
use crate::types::{CompetitorId, Rating, RatingChange, RatingSet};

/// Round to the nearest integer rating, halves rounding up (`-10.5` -> `-10`)
pub fn round_half_up(value: f64) -> Rating {
    (value + 0.5).floor() as Rating
}

/// Pair up ratings before and after an update, ordered by competitor id.
///
/// Competitors missing from `after` are skipped.
pub fn rating_changes(before: &RatingSet, after: &RatingSet) -> Vec<RatingChange> {
    let mut changes: Vec<RatingChange> = before
        .iter()
        .filter_map(|(id, old)| after.get(id).map(|new| RatingChange::new(*id, *old, *new)))
        .collect();
    changes.sort_by_key(|change| change.competitor_id);
    changes
}

/// Parse an `ID=RATING` pair as given on the command line
pub fn parse_rating_entry(entry: &str) -> crate::error::Result<(CompetitorId, Rating)> {
    let invalid = || EloError::InvalidRatingEntry {
        entry: entry.to_string(),
    };

    let (id, rating) = entry.split_once('=').ok_or_else(invalid)?;
    let id: CompetitorId = id.trim().parse().map_err(|_| invalid())?;
    let rating: Rating = rating.trim().parse().map_err(|_| invalid())?;

    Ok((id, rating))
}
