pub mod matchups;
pub mod pages;
pub mod players;
