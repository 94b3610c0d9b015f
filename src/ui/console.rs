//! Shared console input helpers.
//!
//! Every screen reads from a `BufRead` and writes to a `Write` so tests can
//! drive the whole UI through in-memory buffers. `Ok(None)` consistently
//! means end-of-input (the user closed stdin) and unwinds the screen stack.

use std::io::{self, BufRead, Write};

/// Print `prompt` (no newline), flush, and read one trimmed line.
/// `None` on end-of-input.
pub fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Numbered menu. Empty input picks `default`; invalid input re-prompts.
/// Returns the selected index.
pub fn select<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    title: &str,
    options: &[&str],
    default: usize,
) -> io::Result<Option<usize>> {
    writeln!(out, "{title}")?;
    for (i, option) in options.iter().enumerate() {
        let marker = if i == default { "*" } else { " " };
        writeln!(out, " {marker}[{}] {option}", i + 1)?;
    }

    loop {
        let Some(answer) = read_line(input, out, "> ")? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(Some(default));
        }
        match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => return Ok(Some(n - 1)),
            _ => writeln!(out, "Please enter a number between 1 and {}.", options.len())?,
        }
    }
}

/// Read an integer within `min..=max`. Empty input picks `default`.
pub fn read_number<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
    min: u8,
    max: u8,
    default: u8,
) -> io::Result<Option<u8>> {
    loop {
        let Some(answer) = read_line(input, out, &format!("{prompt} [{default}]: "))? else {
            return Ok(None);
        };
        if answer.is_empty() {
            return Ok(Some(default));
        }
        match answer.parse::<u8>() {
            Ok(n) if (min..=max).contains(&n) => return Ok(Some(n)),
            _ => writeln!(out, "Please enter a number between {min} and {max}.")?,
        }
    }
}

/// Yes/no question. Empty input picks `default`.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
    default: bool,
) -> io::Result<Option<bool>> {
    let hint = if default { "[Y/n]" } else { "[y/N]" };
    loop {
        let Some(answer) = read_line(input, out, &format!("{prompt} {hint}: "))? else {
            return Ok(None);
        };
        match answer.to_lowercase().as_str() {
            "" => return Ok(Some(default)),
            "y" | "yes" => return Ok(Some(true)),
            "n" | "no" => return Ok(Some(false)),
            _ => writeln!(out, "Please answer y or n.")?,
        }
    }
}
