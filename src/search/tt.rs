//! Fixed-capacity transposition table with depth-preferred replacement

use crate::board::Move;

/// Node type for transposition table entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Exact = 0,
    LowerBound = 1,
    UpperBound = 2,
}

impl NodeType {
    /// Classify a search result against the window it was searched with.
    pub fn classify(score: i32, alpha_orig: i32, beta: i32) -> Self {
        if score <= alpha_orig {
            NodeType::UpperBound
        } else if score >= beta {
            NodeType::LowerBound
        } else {
            NodeType::Exact
        }
    }
}

/// Single TT entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TTEntry {
    pub key: u64,
    pub score: i32,
    pub depth: u8,
    pub node_type: NodeType,
    pub best_move: Option<Move>,
    pub age: u8,
}

/// Transposition table keyed by the full 64-bit hash.
///
/// The slot index is `key & mask`; a probe only answers when the stored key
/// is identical. Two positions sharing a full hash are indistinguishable,
/// which is accepted: the board itself is never compared.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    mask: u64,
    age: u8,
}

impl TranspositionTable {
    /// Create a TT with approximately `size_mb` megabytes
    pub fn new(size_mb: usize) -> Self {
        let entry_size = std::mem::size_of::<Option<TTEntry>>();
        let mut entries = (size_mb * 1024 * 1024) / entry_size;
        if entries == 0 {
            entries = 1024;
        }
        // Round down so the table never exceeds the requested budget.
        let mut slots = entries.next_power_of_two();
        if slots > entries {
            slots /= 2;
        }
        let slots = slots.max(1024);

        Self {
            entries: vec![None; slots],
            mask: (slots - 1) as u64,
            age: 0,
        }
    }

    pub fn probe(&self, key: u64) -> Option<TTEntry> {
        self.entries[(key & self.mask) as usize].filter(|e| e.key == key)
    }

    /// Store an entry.
    ///
    /// Replacement priorities:
    /// 1. Empty slots: always replace
    /// 2. Entries from an earlier root search: replace
    /// 3. Same position searched at least as deep: refresh
    /// 4. Deeper searches: always replace shallow with deeper
    /// 5. Exact scores: replace at equal depth
    pub fn store(
        &mut self,
        key: u64,
        score: i32,
        depth: u8,
        node_type: NodeType,
        best_move: Option<Move>,
    ) {
        let age = self.age;
        let slot = &mut self.entries[(key & self.mask) as usize];
        let replace = match slot {
            None => true,
            Some(existing) => {
                existing.age != age
                    || (existing.key == key && depth >= existing.depth)
                    || depth > existing.depth
                    || (depth == existing.depth && node_type == NodeType::Exact)
            }
        };

        if replace {
            *slot = Some(TTEntry {
                key,
                score,
                depth,
                node_type,
                best_move,
                age,
            });
        }
    }

    /// Increment search age (call at start of each new root search)
    pub fn new_search(&mut self) {
        self.age = self.age.wrapping_add(1);
    }

    pub fn fill_percentage(&self) -> f64 {
        let filled = self.entries.iter().filter(|e| e.is_some()).count();
        (filled as f64 / self.entries.len() as f64) * 100.0
    }

    pub fn clear(&mut self) {
        self.entries.iter_mut().for_each(|e| *e = None);
        self.age = 0;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new(16)
    }
}
