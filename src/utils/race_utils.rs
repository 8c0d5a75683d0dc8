pub const NAME_WIDTH: usize = 14;
const ELLIPSIS: &str = "...";

/// Medal for the podium, `"{rank}."` for everyone else. Ranks start at 1.
pub fn position_marker(rank: usize) -> String {
    match rank {
        1 => "🥇".to_string(),
        2 => "🥈".to_string(),
        3 => "🥉".to_string(),
        _ => format!("{rank}."),
    }
}

pub fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }
    let kept: String = name
        .chars()
        .take(max_len.saturating_sub(ELLIPSIS.len()))
        .collect();
    format!("{kept}{ELLIPSIS}")
}

/// `125001` -> `"2:05.001"`.
pub fn format_lap_time(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1_000;
    let millis = ms % 1_000;
    format!("{minutes}:{seconds:02}.{millis:03}")
}
