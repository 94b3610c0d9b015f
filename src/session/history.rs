//! Conversation history and the suffix window selected for prompts.

use serde::{Deserialize, Serialize};

/// One player message paired with one generated reply.
///
/// Ids are unique and strictly increasing within a session (1-based).
/// On-disk field names (`user` / `response`) match the chat-log format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exchange {
    pub id: u64,
    pub user: String,
    pub response: String,
}

impl Exchange {
    /// Window cost of this exchange: word count of both sides.
    /// A coarse stand-in for tokens.
    pub fn cost(&self) -> usize {
        self.user.split_whitespace().count() + self.response.split_whitespace().count()
    }
}

/// Select the longest suffix of `history` whose cumulative cost fits
/// `budget`, preserving chronological (oldest-first) order.
///
/// Walks backward from the most recent entry and stops before an older entry
/// that would push the total over budget. Entries are never split. If even
/// the newest entry alone exceeds the budget it is still included — a
/// non-empty history never yields an empty window.
pub fn window(history: &[Exchange], budget: usize) -> &[Exchange] {
    let mut start = history.len();
    let mut total = 0usize;

    for (i, entry) in history.iter().enumerate().rev() {
        let cost = entry.cost();
        if total + cost > budget {
            break;
        }
        total += cost;
        start = i;
    }

    // Budget smaller than the newest entry alone: include it anyway rather
    // than sending the model no context at all.
    if start == history.len() && !history.is_empty() {
        start = history.len() - 1;
    }

    &history[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exchange(id: u64, user: &str, response: &str) -> Exchange {
        Exchange { id, user: user.into(), response: response.into() }
    }

    /// Four exchanges costing 2, 4, 6, and 8 words respectively.
    fn sample_history() -> Vec<Exchange> {
        vec![
            exchange(1, "a", "b"),
            exchange(2, "a b", "c d"),
            exchange(3, "a b c", "d e f"),
            exchange(4, "a b c d", "e f g h"),
        ]
    }

    #[test]
    fn cost_counts_words_on_both_sides() {
        assert_eq!(exchange(1, "open the door", "It creaks loudly.").cost(), 6);
        assert_eq!(exchange(2, "", "").cost(), 0);
    }

    #[test]
    fn generous_budget_keeps_everything() {
        let h = sample_history();
        assert_eq!(window(&h, 1000), &h[..]);
    }

    #[test]
    fn window_is_a_chronological_suffix() {
        let h = sample_history();
        // Budget 18 fits entries 4 (8) and 3 (6) and 2 (4), not 1.
        let w = window(&h, 18);
        assert_eq!(w.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2, 3, 4]);
    }

    #[test]
    fn exact_budget_boundary_included() {
        let h = sample_history();
        // All four cost exactly 20.
        assert_eq!(window(&h, 20).len(), 4);
        assert_eq!(window(&h, 19).len(), 3);
    }

    #[test]
    fn tiny_budget_still_returns_newest_entry() {
        let h = sample_history();
        let w = window(&h, 1);
        assert_eq!(w.len(), 1);
        assert_eq!(w[0].id, 4);
    }

    #[test]
    fn empty_history_yields_empty_window() {
        assert!(window(&[], 100).is_empty());
    }

    #[test]
    fn zero_cost_entries_all_fit_zero_budget() {
        let h = vec![exchange(1, "", ""), exchange(2, "", "")];
        assert_eq!(window(&h, 0).len(), 2);
    }
}
