pub mod error;
pub mod leaderboard;
pub mod message;
