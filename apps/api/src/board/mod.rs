// Board generation: random 5×5 layouts drawn from a theme's item pool.

pub mod generator;
pub mod handlers;
pub mod sampler;

pub use generator::{generate_board, Board, BoardError, BOARD_SIZE};
pub use sampler::{Sampler, SeededSampler, ThreadRngSampler};
