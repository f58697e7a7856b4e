pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::SimSettings;
pub use rng::SimRng;
