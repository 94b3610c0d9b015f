//! Party selection screen — pick exactly four persisted sheets.

use std::io::{BufRead, Write};

use crate::error::AppError;
use crate::game::{Party, PartyMember, PARTY_SIZE};
use crate::storage::CharacterStore;
use crate::ui::console;

/// Returns `None` when the user backs out or no characters exist yet.
pub fn run<R: BufRead, W: Write>(
    store: &CharacterStore,
    input: &mut R,
    out: &mut W,
) -> Result<Option<Party>, AppError> {
    loop {
        let sheets = store.list()?;
        if sheets.is_empty() {
            writeln!(out, "No characters found — create some first.")?;
            return Ok(None);
        }

        writeln!(out, "\n=== Select Party ===")?;
        for (i, (_, sheet)) in sheets.iter().enumerate() {
            writeln!(out, " [{}] {}", i + 1, sheet.summary())?;
        }

        let Some(answer) = console::read_line(
            input,
            out,
            &format!("Select exactly {PARTY_SIZE} by number, comma-separated (or 'back'): "),
        )?
        else {
            return Ok(None);
        };
        if answer.eq_ignore_ascii_case("back") {
            return Ok(None);
        }

        match parse_selection(&answer, sheets.len()) {
            Ok(indices) => {
                let members: Vec<PartyMember> = indices
                    .iter()
                    .map(|&i| {
                        let (file, sheet) = sheets[i].clone();
                        PartyMember { file, sheet }
                    })
                    .collect();
                match Party::assemble(members) {
                    Ok(party) => {
                        writeln!(out, "Your party has been selected successfully!")?;
                        return Ok(Some(party));
                    }
                    Err(e) => writeln!(out, "Selection error: {e}")?,
                }
            }
            Err(msg) => writeln!(out, "Selection error: {msg}")?,
        }
    }
}

/// Parse `1,3,4,6` into zero-based indices, rejecting junk, out-of-range
/// numbers, and duplicates.
fn parse_selection(answer: &str, available: usize) -> Result<Vec<usize>, String> {
    let mut indices = Vec::new();
    for part in answer.split(',') {
        let part = part.trim();
        let n: usize = part
            .parse()
            .map_err(|_| format!("'{part}' is not a number"))?;
        if !(1..=available).contains(&n) {
            return Err(format!("{n} is out of range 1..={available}"));
        }
        let idx = n - 1;
        if indices.contains(&idx) {
            return Err(format!("character {n} selected more than once"));
        }
        indices.push(idx);
    }
    Ok(indices)
}
