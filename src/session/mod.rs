//! In-memory session state: the ordered exchange list and id allocation.

pub mod history;
pub mod prompt;

pub use history::{window, Exchange};

/// One running game session's conversation.
///
/// Owns the authoritative exchange list; persistence only ever reads it.
/// Ids are allocated here and never reused, so the checkpointed append log
/// can rely on them being strictly increasing.
#[derive(Debug, Default)]
pub struct Session {
    exchanges: Vec<Exchange>,
    next_id: u64,
}

impl Session {
    pub fn new() -> Self {
        Self { exchanges: Vec::new(), next_id: 1 }
    }

    /// Resume from a loaded chat log. Id allocation continues after the
    /// highest restored id.
    pub fn resume(exchanges: Vec<Exchange>) -> Self {
        let next_id = exchanges.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self { exchanges, next_id }
    }

    /// Append a completed exchange, assigning it the next id.
    pub fn record(&mut self, user: impl Into<String>, response: impl Into<String>) -> &Exchange {
        let exchange = Exchange {
            id: self.next_id,
            user: user.into(),
            response: response.into(),
        };
        self.next_id += 1;
        self.exchanges.push(exchange);
        &self.exchanges[self.exchanges.len() - 1]
    }

    pub fn history(&self) -> &[Exchange] {
        &self.exchanges
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }
}
