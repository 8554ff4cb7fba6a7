//! Main search engine implementation for qishou
//!
//! Iterative deepening over a negamax alpha-beta search with a
//! transposition table and most-valuable-victim move ordering. The board is
//! mutated in place and every applied move is undone by a scope guard.

use std::cmp::Reverse;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use super::params::SearchParams;
use super::stats::SearchStats;
use super::tt::{NodeType, TranspositionTable};
use crate::board::{Board, Color, Move, PieceKind};
use crate::eval::{evaluate, material_value};
use crate::zobrist::ZobristKeys;

/// Wider than any reachable score
pub const INFINITY: i32 = 1_000_000;
/// Returned for a move that captures the opposing general
pub const WIN_SCORE: i32 = 100_000;
/// Base loss when the side to move has no legal move
pub const LOSS_SCORE: i32 = 20_000;
/// Scores beyond this mean a general falls within the horizon
pub const DECISIVE_THRESHOLD: i32 = 9_000;

/// Progress report emitted after each completed iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchInfo {
    pub depth: u8,
    pub score: i32,
    pub best_move: Option<Move>,
    pub nodes: u64,
    pub elapsed: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// None when the side has no legal move (resignation)
    pub best_move: Option<Move>,
    pub score: i32,
    /// Deepest completed iteration; 0 when no iteration was needed
    pub depth: u8,
}

fn captures_general(board: &Board, mv: Move, side: Color) -> bool {
    board
        .piece_on(mv.to())
        .is_some_and(|p| p.kind == PieceKind::General && p.color != side)
}

fn victim_value(board: &Board, mv: Move) -> i32 {
    board
        .piece_on(mv.to())
        .map_or(0, |p| material_value(p.kind))
}

/// Captures first, higher-value victims first; quiet moves keep their order.
pub fn order_moves(board: &Board, moves: &mut [Move]) {
    moves.sort_by_key(|&mv| Reverse(victim_value(board, mv)));
}

/// Search session: owns the hash keys and transposition table for one game.
pub struct Search {
    keys: ZobristKeys,
    tt: TranspositionTable,
    params: SearchParams,
    stats: SearchStats,
    stop: Option<Arc<AtomicBool>>,
}

impl Search {
    pub fn new(params: SearchParams) -> Self {
        let keys = match params.zobrist_seed {
            Some(seed) => ZobristKeys::from_seed(seed),
            None => ZobristKeys::random(),
        };
        Self {
            keys,
            tt: TranspositionTable::new(params.tt_size_mb),
            params,
            stats: SearchStats::new(),
            stop: None,
        }
    }

    pub fn params(&self) -> &SearchParams {
        &self.params
    }

    pub fn set_max_depth(&mut self, depth: u8) {
        self.params.max_depth = depth.max(1);
    }

    pub fn set_time_limit(&mut self, ms: u64) {
        self.params.time_limit_ms = ms;
    }

    pub fn tt(&self) -> &TranspositionTable {
        &self.tt
    }

    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Flag polled between iterations; setting it ends the search after the
    /// iteration in progress.
    pub fn set_stop_flag(&mut self, flag: Arc<AtomicBool>) {
        self.stop = Some(flag);
    }

    /// Forget cached results (new game)
    pub fn clear(&mut self) {
        self.tt.clear();
    }

    fn stop_requested(&self) -> bool {
        self.stop
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Best move for `color` with the session's depth and time limits.
    pub fn search(&mut self, board: &mut Board, color: Color) -> SearchResult {
        self.search_with_progress(board, color, |_| {})
    }

    pub fn search_with_progress<F>(
        &mut self,
        board: &mut Board,
        color: Color,
        on_depth: F,
    ) -> SearchResult
    where
        F: FnMut(&SearchInfo),
    {
        let (max_depth, time_limit_ms) = (self.params.max_depth, self.params.time_limit_ms);
        self.iterate(board, color, max_depth, time_limit_ms, on_depth)
    }

    /// Engine entry point for the game controller. `None` means `color` has
    /// no legal move and resigns.
    pub fn request_ai_move(
        &mut self,
        board: &mut Board,
        color: Color,
        max_depth: u8,
        time_budget_ms: u64,
    ) -> Option<Move> {
        self.iterate(board, color, max_depth.max(1), time_budget_ms, |_| {})
            .best_move
    }

    fn iterate<F>(
        &mut self,
        board: &mut Board,
        color: Color,
        max_depth: u8,
        time_limit_ms: u64,
        mut on_depth: F,
    ) -> SearchResult
    where
        F: FnMut(&SearchInfo),
    {
        self.stats.reset();
        self.stats.start_timing();
        self.tt.new_search();

        let mut root_moves = board.generate_moves_for(color);
        if root_moves.is_empty() {
            log::info!("{color} has no legal move");
            return SearchResult {
                best_move: None,
                score: -LOSS_SCORE,
                depth: 0,
            };
        }

        if let Some(&mv) = root_moves
            .iter()
            .find(|&&mv| captures_general(board, mv, color))
        {
            log::info!("{color} captures the general with {mv}");
            return SearchResult {
                best_move: Some(mv),
                score: WIN_SCORE,
                depth: 0,
            };
        }

        let hash = self.keys.full_hash(board);
        order_moves(board, &mut root_moves);

        let mut result = SearchResult {
            best_move: Some(root_moves[0]),
            score: evaluate(board, color),
            depth: 0,
        };

        for depth in 1..=max_depth {
            let (mv, score) = self.search_root(board, &root_moves, depth, color, hash);
            result = SearchResult {
                best_move: Some(mv),
                score,
                depth,
            };
            self.stats.depth_reached = depth;

            // Principal move leads the next iteration
            if let Some(pos) = root_moves.iter().position(|&m| m == mv) {
                let best = root_moves.remove(pos);
                root_moves.insert(0, best);
            }

            let info = SearchInfo {
                depth,
                score,
                best_move: Some(mv),
                nodes: self.stats.nodes,
                elapsed: self.stats.elapsed(),
            };
            log::debug!(
                "depth {} score {} move {} nodes {} time {} ms",
                depth,
                score,
                mv,
                info.nodes,
                info.elapsed.as_millis()
            );
            on_depth(&info);

            if score.abs() > DECISIVE_THRESHOLD {
                break;
            }
            if self.stop_requested() {
                log::debug!("stop requested after depth {depth}");
                break;
            }
            if time_limit_ms > 0
                && depth >= 2
                && info.elapsed >= Duration::from_millis(time_limit_ms)
            {
                break;
            }
        }

        self.stats.update_timing();
        self.stats.log_summary();
        if let Some(mv) = result.best_move {
            log::info!(
                "{color} plays {mv} (score {}, depth {})",
                result.score,
                result.depth
            );
        }
        result
    }

    fn search_root(
        &mut self,
        board: &mut Board,
        moves: &[Move],
        depth: u8,
        color: Color,
        hash: u64,
    ) -> (Move, i32) {
        let mut alpha = -INFINITY;
        let mut best = (moves[0], -INFINITY);

        for &mv in moves {
            self.stats.inc_node();
            let score = {
                let mut child = board.play(mv);
                let child_hash = self.keys.apply(hash, child.undo_info());
                -self.negamax(
                    &mut child,
                    depth - 1,
                    -INFINITY,
                    -alpha,
                    color.opponent(),
                    child_hash,
                )
            };
            if score > best.1 {
                best = (mv, score);
            }
            alpha = alpha.max(score);
        }

        self.tt
            .store(hash, best.1, depth, NodeType::Exact, Some(best.0));
        self.stats.inc_tt_store();
        best
    }

    /// Negamax alpha-beta. `hash` must equal `keys.full_hash(board)`.
    fn negamax(
        &mut self,
        board: &mut Board,
        depth: u8,
        mut alpha: i32,
        mut beta: i32,
        side: Color,
        hash: u64,
    ) -> i32 {
        self.stats.inc_node();
        let alpha_orig = alpha;

        let mut hash_move = None;
        if let Some(entry) = self.tt.probe(hash) {
            hash_move = entry.best_move;
            if entry.depth >= depth {
                self.stats.inc_tt_hit();
                match entry.node_type {
                    NodeType::Exact => return entry.score,
                    NodeType::LowerBound => alpha = alpha.max(entry.score),
                    NodeType::UpperBound => beta = beta.min(entry.score),
                }
                if alpha >= beta {
                    return entry.score;
                }
            }
        }

        if depth == 0 {
            return evaluate(board, side);
        }

        let mut moves = board.generate_moves_for(side);
        if moves.is_empty() {
            // Losing later is better than losing now
            return -LOSS_SCORE + (100 - depth as i32);
        }
        // Checked over the whole list so a hash move cannot shadow the win.
        if moves.iter().any(|&mv| captures_general(board, mv, side)) {
            return WIN_SCORE;
        }
        order_moves(board, &mut moves);
        if let Some(hm) = hash_move {
            if let Some(pos) = moves.iter().position(|&m| m == hm) {
                moves[..=pos].rotate_right(1);
            }
        }

        let mut best_score = -INFINITY;
        let mut best_move = None;

        for mv in moves {
            let score = {
                let mut child = board.play(mv);
                let child_hash = self.keys.apply(hash, child.undo_info());
                -self.negamax(&mut child, depth - 1, -beta, -alpha, side.opponent(), child_hash)
            };

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
            if alpha >= beta {
                self.stats.inc_cutoff();
                break;
            }
        }

        let node_type = NodeType::classify(best_score, alpha_orig, beta);
        self.tt.store(hash, best_score, depth, node_type, best_move);
        self.stats.inc_tt_store();
        best_score
    }
}

impl Default for Search {
    fn default() -> Self {
        Self::new(SearchParams::default())
    }
}
