pub mod board;
pub mod coord;
pub mod error;
pub mod evaluation;
pub mod game;
pub mod masks;
pub mod movegen;
pub mod search;
