use crate::models::leaderboard::{laps_for, LapEntry, LeaderboardDocument};

/// Fastest `top_n` laps for one track/car. Ties keep their order from the document.
pub fn rank(doc: &LeaderboardDocument, track: &str, car: &str, top_n: usize) -> Vec<LapEntry> {
    let mut laps = laps_for(doc, track, car);

    // sort_by_key is stable
    laps.sort_by_key(|lap| lap.lap_time_ms);
    laps.truncate(top_n);
    laps
}
