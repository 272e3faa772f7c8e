//! Command parsing and execution behind the `avl-trace` binary.
//!
//! Commands, one per line or argument:
//! - `insert <key>` / `i <key>`
//! - `delete <key>` / `d <key>`
//! - `reset`
//! - `print`
//!
//! Blank lines and `#` comments are skipped.

use std::str::FromStr;

use thiserror::Error;

use crate::session::{Frame, Session};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("command `{0}` needs a key")]
    MissingKey(String),
    #[error("invalid key `{0}`: expected an integer")]
    InvalidKey(String),
    #[error("unexpected trailing input: {0}")]
    Trailing(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Insert(i64),
    Delete(i64),
    Reset,
    Print,
}

impl Command {
    /// Parses one line; `Ok(None)` for blank lines and comments.
    pub fn parse_line(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            return Ok(None);
        }
        line.parse().map(Some)
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let name = parts.next().unwrap_or("").to_lowercase();
        let key = |parts: &mut std::str::SplitWhitespace<'_>| -> Result<i64, CommandError> {
            let raw = parts
                .next()
                .ok_or_else(|| CommandError::MissingKey(name.clone()))?;
            raw.parse()
                .map_err(|_| CommandError::InvalidKey(raw.to_string()))
        };
        let cmd = match name.as_str() {
            "insert" | "i" | "add" => Command::Insert(key(&mut parts)?),
            "delete" | "d" | "del" | "remove" => Command::Delete(key(&mut parts)?),
            "reset" | "clear" => Command::Reset,
            "print" | "p" | "show" => Command::Print,
            _ => return Err(CommandError::Unknown(name.clone())),
        };
        let rest: Vec<&str> = parts.collect();
        if !rest.is_empty() {
            return Err(CommandError::Trailing(rest.join(" ")));
        }
        Ok(cmd)
    }
}

/// Applies `cmd` to the session. `print` produces no trace, only the
/// current snapshot.
pub fn run(session: &mut Session<i64>, cmd: Command) -> Frame<i64> {
    match cmd {
        Command::Insert(k) => session.insert(k),
        Command::Delete(k) => session.delete(&k),
        Command::Reset => session.reset(),
        Command::Print => Frame {
            log: Vec::new(),
            snapshot: session.tree().snapshot(),
        },
    }
}
