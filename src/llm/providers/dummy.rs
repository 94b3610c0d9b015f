//! Dummy provider — scripted replies for tests and offline play.
//!
//! Replies queued with [`push_reply`](DummyProvider::push_reply) are returned
//! in order; once the queue is empty every call echoes the tail of the prompt
//! prefixed with `[dm]`. Interior mutability is a `RefCell` — the app has
//! exactly one thread of control.

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::llm::{GenerateOptions, ProviderError};

#[derive(Debug, Default)]
pub struct DummyProvider {
    replies: RefCell<VecDeque<String>>,
}

impl DummyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a scripted reply to be returned by the next `generate` call.
    pub fn push_reply(&self, reply: impl Into<String>) {
        self.replies.borrow_mut().push_back(reply.into());
    }

    pub fn generate(&self, prompt: &str, _opts: &GenerateOptions) -> Result<String, ProviderError> {
        if let Some(reply) = self.replies.borrow_mut().pop_front() {
            return Ok(reply);
        }
        let tail = prompt.lines().last().unwrap_or_default();
        Ok(format!("[dm] {tail}"))
    }
}
