pub mod board;
pub mod game;
pub mod history;
pub mod move_gen;
pub mod notation;
pub mod perft;
pub mod position;

#[cfg(test)]
pub mod test_utils;
