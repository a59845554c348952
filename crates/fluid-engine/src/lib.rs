//! The simulation engine: cell classification, the per-cell tick state
//! machine, and the deterministic random stream it draws from.

pub mod cell;
pub mod engine;
pub mod rng;

pub use cell::{default_rho_for, is_wall, AIR, AIR_RHO, DEFAULT_RHO, SOURCE, SOURCE_RHO, WALL};
pub use engine::Engine;
pub use rng::{DeterministicRng, FIXED_SEED};
