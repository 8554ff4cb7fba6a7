//! Search statistics and performance metrics
//!
//! Tracks nodes searched, cutoffs, hash table hits, and timing information.

use std::time::{Duration, Instant};

/// Search statistics
#[derive(Debug, Default, Clone)]
pub struct SearchStats {
    /// Total nodes searched
    pub nodes: u64,

    /// Transposition table hits
    pub tt_hits: u64,

    /// Transposition table stores
    pub tt_stores: u64,

    /// Alpha-beta cutoffs
    pub cutoffs: u64,

    /// Deepest fully completed iteration
    pub depth_reached: u8,

    /// Search start time
    pub start_time: Option<Instant>,

    /// Time spent searching
    pub search_time: Duration,

    /// Nodes per second rate
    pub nps: u64,
}

impl SearchStats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Start timing
    pub fn start_timing(&mut self) {
        self.start_time = Some(Instant::now());
    }

    /// Time since `start_timing`
    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    /// Update search time and calculate NPS
    pub fn update_timing(&mut self) {
        self.search_time = self.elapsed();
        let elapsed_ms = self.search_time.as_millis() as u64;
        if elapsed_ms > 0 {
            self.nps = (self.nodes * 1000) / elapsed_ms;
        }
    }

    pub fn inc_node(&mut self) {
        self.nodes += 1;
    }

    pub fn inc_tt_hit(&mut self) {
        self.tt_hits += 1;
    }

    pub fn inc_tt_store(&mut self) {
        self.tt_stores += 1;
    }

    pub fn inc_cutoff(&mut self) {
        self.cutoffs += 1;
    }

    /// Reset all statistics
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Log a formatted summary at info level
    pub fn log_summary(&self) {
        log::info!(
            "depth {} | nodes {} | tt hits {} / stores {} | cutoffs {} | {} ms | {} nps",
            self.depth_reached,
            self.nodes,
            self.tt_hits,
            self.tt_stores,
            self.cutoffs,
            self.search_time.as_millis(),
            self.nps
        );
    }
}
