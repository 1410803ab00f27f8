//! In-memory ranking table.
//!
//! Holds the session's top results as `(name, score, lines)` tuples. Nothing
//! is persisted; the table resets with the process.

/// Maximum entries kept.
pub const RANKING_MAX: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub name: String,
    pub score: u32,
    pub lines: u32,
}

#[derive(Debug, Clone)]
pub struct Ranking {
    entries: Vec<RankEntry>,
}

impl Ranking {
    /// Empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[RankEntry] {
        &self.entries
    }

    /// Whether a score would enter the table.
    pub fn would_rank(&self, score: u32) -> bool {
        if self.entries.len() < RANKING_MAX {
            return true;
        }
        match self.entries.last() {
            Some(last) => score > last.score,
            None => true,
        }
    }

    /// 1-based rank a score would land at, if it ranks at all.
    pub fn rank_of(&self, score: u32) -> Option<usize> {
        for (i, entry) in self.entries.iter().enumerate() {
            if score > entry.score {
                return Some(i + 1);
            }
        }
        if self.entries.len() < RANKING_MAX {
            Some(self.entries.len() + 1)
        } else {
            None
        }
    }

    /// Insert an entry, keeping the table sorted by score descending and
    /// capped at [`RANKING_MAX`]. Names are upper-cased and cut to 3 chars.
    pub fn add_entry(&mut self, name: &str, score: u32, lines: u32) {
        let name: String = name.to_uppercase().chars().take(3).collect();
        self.entries.push(RankEntry { name, score, lines });
        self.entries.sort_by(|a, b| b.score.cmp(&a.score));
        self.entries.truncate(RANKING_MAX);
    }
}

impl Default for Ranking {
    /// Seed table shown before anyone has played.
    fn default() -> Self {
        let seed = [
            ("SSS", 1000, 50),
            ("CPU", 900, 40),
            ("BBB", 800, 30),
            ("CCC", 700, 20),
            ("DDD", 600, 10),
            ("EEE", 500, 9),
            ("FFF", 450, 8),
            ("GGG", 400, 7),
            ("HHH", 350, 6),
            ("III", 300, 5),
        ];
        let mut ranking = Ranking::new();
        for (name, score, lines) in seed {
            ranking.add_entry(name, score, lines);
        }
        ranking
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_stay_sorted_and_capped() {
        let mut ranking = Ranking::default();
        assert_eq!(ranking.entries().len(), RANKING_MAX);

        ranking.add_entry("new", 950, 42);
        assert_eq!(ranking.entries().len(), RANKING_MAX);
        assert_eq!(ranking.entries()[1].name, "NEW");
        // The previous last place fell off.
        assert!(ranking.entries().iter().all(|e| e.score >= 350));
    }

    #[test]
    fn names_are_uppercased_and_truncated() {
        let mut ranking = Ranking::new();
        ranking.add_entry("player", 10, 1);
        assert_eq!(ranking.entries()[0].name, "PLA");
    }

    #[test]
    fn would_rank_against_a_full_table() {
        let ranking = Ranking::default();
        assert!(ranking.would_rank(301));
        assert!(!ranking.would_rank(300));
        assert!(Ranking::new().would_rank(0));
    }

    #[test]
    fn rank_positions_are_one_based() {
        let ranking = Ranking::default();
        assert_eq!(ranking.rank_of(1500), Some(1));
        assert_eq!(ranking.rank_of(850), Some(3));
        assert_eq!(ranking.rank_of(100), None);

        let mut partial = Ranking::new();
        partial.add_entry("AAA", 500, 10);
        assert_eq!(partial.rank_of(100), Some(2));
    }
}
