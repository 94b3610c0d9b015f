//! Chat screen — the Dungeon Master conversation loop.
//!
//! Each turn: window the history, assemble the prompt, call the provider,
//! print the reply, record the exchange, flush the chat log. Provider and
//! storage failures are reported as `System:` lines and never lose or
//! mutate the in-memory history.

use std::io::{BufRead, Write};

use tracing::warn;

use crate::config::Config;
use crate::error::AppError;
use crate::game::Party;
use crate::llm::{GenerateOptions, LlmProvider};
use crate::session::{history, prompt, Exchange, Session};
use crate::storage::{chat_log, SaveBundle};
use crate::ui::console;

/// Print previously saved exchanges when resuming a loaded game.
pub fn replay<W: Write>(out: &mut W, exchanges: &[Exchange]) -> Result<(), AppError> {
    for exchange in exchanges {
        writeln!(out, "Player: {}", exchange.user)?;
        writeln!(out, "Dungeon Master:\n    {}\n", exchange.response)?;
    }
    Ok(())
}

/// Run the conversation loop until `/quit` or end-of-input.
pub fn run<R: BufRead, W: Write>(
    config: &Config,
    provider: &LlmProvider,
    bundle: &SaveBundle,
    party: &Party,
    session: &mut Session,
    input: &mut R,
    out: &mut W,
) -> Result<(), AppError> {
    writeln!(out, "\n=== Dungeon Master ===")?;
    writeln!(out, "Your party:")?;
    write!(out, "{}", party.roster_summary())?;
    writeln!(out, "Type your actions below. /quit saves and exits.\n")?;

    let opts = GenerateOptions::narration(config);

    loop {
        let Some(message) = console::read_line(input, out, "You: ")? else {
            break;
        };
        if message.is_empty() {
            continue;
        }
        if message == "/quit" {
            break;
        }

        let recent = history::window(session.history(), config.history_budget);
        let prompt = prompt::assemble(&bundle.settings, party, recent, &message);

        let reply = match provider.generate(&prompt, &opts) {
            Ok(reply) => reply,
            Err(e) => {
                warn!("generation failed: {e}");
                writeln!(out, "System: Error fetching response: {e}")?;
                continue;
            }
        };

        writeln!(out, "Dungeon Master:\n    {reply}\n")?;
        session.record(message, reply);

        if let Err(e) = chat_log::append_and_save(&bundle.chat_file, session.history()) {
            warn!("chat log save failed: {e}");
            writeln!(out, "System: Failed to save chat history: {e}")?;
        }
    }

    writeln!(out, "Farewell, adventurer.")?;
    Ok(())
}
