pub mod fetcher;
pub mod leaderboard;
pub mod publisher;
pub mod ranker;
pub mod renderer;

#[cfg(test)]
pub mod test_helpers;
