//! Search engine for the qishou Xiangqi engine

pub mod params;
pub mod search;
pub mod stats;
pub mod tt;

pub use self::params::SearchParams;
pub use self::search::{Search, SearchInfo, SearchResult};
pub use self::stats::SearchStats;
pub use self::tt::TranspositionTable;
pub use crate::board::Move;
