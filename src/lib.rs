//! DungeonGPT — a console Dungeon Master backed by a chat-completion API.
//!
//! Layering, top to bottom:
//!   - `ui`      — console screens and the start-menu flow
//!   - `session` — in-memory history, windowing, prompt assembly
//!   - `llm`     — provider abstraction and backends
//!   - `game`    — character sheets, parties, settings
//!   - `storage` — JSON persistence for all of the above

pub mod config;
pub mod error;
pub mod game;
pub mod llm;
pub mod logger;
pub mod session;
pub mod storage;
pub mod ui;
