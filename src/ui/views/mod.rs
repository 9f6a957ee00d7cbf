pub mod completed;
pub mod game;
pub mod levels;
pub mod load_error;
