use serde_json::Value;

/// track id -> car id -> recorded laps. Only the slice being ranked is ever decoded.
pub type LeaderboardDocument = Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LapEntry {
    pub name: String,
    pub lap_time_ms: u64,
}

impl LapEntry {
    #[cfg(test)]
    pub fn new(name: &str, lap_time_ms: u64) -> Self {
        Self {
            name: name.to_string(),
            lap_time_ms,
        }
    }

    /// Missing, null or mistyped fields fall back to `"Unknown"` and `0`.
    pub fn from_value(entry: &Value) -> Self {
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();

        let laptime = entry.get("laptime");
        let lap_time_ms = laptime
            .and_then(Value::as_u64)
            .or_else(|| {
                laptime
                    .and_then(Value::as_f64)
                    .filter(|ms| ms.is_finite() && *ms >= 0.0)
                    .map(|ms| ms.trunc() as u64)
            })
            .unwrap_or(0);

        Self { name, lap_time_ms }
    }
}

/// Laps recorded for one track/car. Anything not shaped like a list of laps is empty.
pub fn laps_for(doc: &LeaderboardDocument, track: &str, car: &str) -> Vec<LapEntry> {
    doc.get(track)
        .and_then(|cars| cars.get(car))
        .and_then(Value::as_array)
        .map(|laps| laps.iter().map(LapEntry::from_value).collect())
        .unwrap_or_default()
}
