pub mod ids;
pub mod leaderboard;
pub mod player;
pub mod ranked;
pub mod summoner;
