pub mod canvas;
pub mod common;
pub mod generate;
pub mod helpers;
pub mod persist;
pub mod state;
pub mod text;
pub mod verify;
