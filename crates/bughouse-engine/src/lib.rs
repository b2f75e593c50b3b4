//! Search, evaluation, and partner communication for bughouse seats.

pub mod comm;
pub mod config;
pub mod error;
pub mod eval;
pub mod runner;
pub mod search;
pub mod stats;

pub use comm::{AdviceContext, CommChannel};
pub use config::SearchConfig;
pub use error::EngineError;
pub use eval::{Evaluator, Material, MaterialMobility, MaterialPosition, MaterialPositionPocket};
pub use runner::{GameRecord, Runner, Seat};
pub use search::control::{CutoffFn, NextDepth, NextDepthFn};
pub use search::ordering::MoveOrder;
pub use search::{SearchEngine, SearchOutcome};
pub use stats::Statistics;
