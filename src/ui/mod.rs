//! Console user interface.
//!
//! Screens are plain functions over `BufRead`/`Write` pairs; [`App`] wires
//! them into the start-menu flow: new game → create characters → pick a
//! party → choose settings → chat, or load game → replay → chat.

pub mod chat;
pub mod console;
pub mod creator;
pub mod party;
pub mod settings;

use std::io::{BufRead, Write};

use tracing::info;

use crate::config::Config;
use crate::error::AppError;
use crate::game::{GameSettings, Party, PartyMember};
use crate::llm::LlmProvider;
use crate::session::Session;
use crate::storage::{chat_log, CharacterStore, SaveBundle};

pub struct App {
    config: Config,
    provider: LlmProvider,
    store: CharacterStore,
}

impl App {
    pub fn new(config: Config, provider: LlmProvider) -> Self {
        let store = CharacterStore::new(config.characters_dir());
        Self { config, provider, store }
    }

    /// Start-menu loop. Returns when the user quits or input ends.
    pub fn run<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<(), AppError> {
        writeln!(out, "Welcome to DungeonGPT")?;

        loop {
            let choice = console::select(
                input,
                out,
                "\n=== Main Menu ===",
                &["New Game", "Load Game", "Quit"],
                0,
            )?;
            match choice {
                Some(0) => self.new_game(input, out)?,
                Some(1) => self.load_game(input, out)?,
                _ => break,
            }
        }
        writeln!(out, "Goodbye.")?;
        Ok(())
    }

    fn new_game<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<(), AppError> {
        creator::run(&self.store, &self.provider, &self.config, input, out)?;

        let Some(party) = party::run(&self.store, input, out)? else {
            return Ok(());
        };
        let Some((_, bundle)) = settings::run(
            &self.config.saves_dir(),
            &party,
            GameSettings::default(),
            input,
            out,
        )?
        else {
            return Ok(());
        };

        info!("starting new session");
        let mut session = Session::new();
        chat::run(&self.config, &self.provider, &bundle, &party, &mut session, input, out)
    }

    fn load_game<R: BufRead, W: Write>(&self, input: &mut R, out: &mut W) -> Result<(), AppError> {
        let saved = SaveBundle::list(&self.config.saves_dir())?;
        if saved.is_empty() {
            writeln!(out, "No saved games found.")?;
            return Ok(());
        }

        let names: Vec<String> = saved
            .iter()
            .map(|p| {
                p.file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| p.display().to_string())
            })
            .collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let Some(index) = console::select(input, out, "\n=== Load Game ===", &refs, refs.len() - 1)?
        else {
            return Ok(());
        };

        let bundle = SaveBundle::load(&saved[index])?;
        let party = self.resolve_party(&bundle)?;
        let log = chat_log::load(&bundle.chat_file)?;

        info!(save = %saved[index].display(), exchanges = log.conversation_history.len(), "resuming session");
        chat::replay(out, &log.conversation_history)?;
        let mut session = Session::resume(log.conversation_history);
        chat::run(&self.config, &self.provider, &bundle, &party, &mut session, input, out)
    }

    /// Re-read every sheet the bundle references. A missing or malformed
    /// sheet file fails the load; the save is unusable without its party.
    fn resolve_party(&self, bundle: &SaveBundle) -> Result<Party, AppError> {
        let mut members = Vec::with_capacity(bundle.party_members.len());
        for file in &bundle.party_members {
            let sheet = self.store.load(file)?;
            members.push(PartyMember { file: file.clone(), sheet });
        }
        Party::assemble(members)
    }
}
