pub mod catalog;
pub mod matchmaking;
