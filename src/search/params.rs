//! Search parameters and configuration
//!
//! Controls depth and time limits of iterative deepening and the size of
//! the per-session transposition table.

/// Search parameters for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchParams {
    /// Maximum search depth in plies
    pub max_depth: u8,

    /// Time budget in milliseconds, checked between depths (0 = unlimited)
    pub time_limit_ms: u64,

    /// Transposition table size in megabytes
    pub tt_size_mb: usize,

    /// Seed for the Zobrist keys; a random seed is drawn when absent
    pub zobrist_seed: Option<u64>,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            max_depth: 4,
            time_limit_ms: 3000,
            tt_size_mb: 16,
            zobrist_seed: None,
        }
    }
}

impl SearchParams {
    /// Create new search params with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum depth in plies
    pub fn max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    /// Set time limit in milliseconds
    pub fn time_limit(mut self, ms: u64) -> Self {
        self.time_limit_ms = ms;
        self
    }

    /// Set transposition table size in megabytes
    pub fn tt_size_mb(mut self, mb: usize) -> Self {
        self.tt_size_mb = mb;
        self
    }

    /// Fix the Zobrist key seed (reproducible hashing)
    pub fn zobrist_seed(mut self, seed: u64) -> Self {
        self.zobrist_seed = Some(seed);
        self
    }
}
