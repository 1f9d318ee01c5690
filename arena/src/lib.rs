mod game;
mod summary;
pub use game::*;
pub use summary::*;

pub struct Config {
    pub rng: rand::rngs::StdRng,
    /// Games that take longer than this are counted as draws.
    pub max_plies: usize,
}
