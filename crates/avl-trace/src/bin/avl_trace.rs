//! `avl-trace`: run insert/delete commands against an AVL tree and print
//! the balancing trace of each one.
//!
//! Usage:
//!   avl-trace [--descent] [--json] [--quiet] [COMMAND]...
//!
//! Commands come from the arguments (`"insert 10" "delete 5"`) or, when none
//! are given, from stdin, one per line.

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use avl_trace::cli::{run, Command};
use avl_trace::{Frame, LogSink, Session, TracingSink, TreeOptions};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "avl-trace", about = "Step through AVL insertions and deletions")]
struct Cli {
    /// Also report every left/right step of the descent.
    #[arg(long)]
    descent: bool,
    /// Print each frame (trace and tree snapshot) as one JSON line.
    #[arg(long)]
    json: bool,
    /// Print only the tree after each command, not the trace.
    #[arg(long, short)]
    quiet: bool,
    /// Commands such as `insert 10`; read from stdin when empty.
    commands: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let options = TreeOptions::default().with_descent(cli.descent);
    let mut session = Session::<i64>::with_options(options);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.commands.is_empty() {
        for (idx, line) in io::stdin().lock().lines().enumerate() {
            let line = line.context("failed to read stdin")?;
            let cmd = Command::parse_line(&line)
                .with_context(|| format!("line {}: {}", idx + 1, line.trim()))?;
            if let Some(cmd) = cmd {
                let frame = run(&mut session, cmd);
                emit(&mut out, &cli, &frame, &session.tree().print())?;
            }
        }
    } else {
        for arg in &cli.commands {
            let cmd = Command::parse_line(arg).with_context(|| format!("argument `{arg}`"))?;
            if let Some(cmd) = cmd {
                let frame = run(&mut session, cmd);
                emit(&mut out, &cli, &frame, &session.tree().print())?;
            }
        }
    }

    tracing::debug!(nodes = session.tree().len(), height = session.tree().height(), "done");
    Ok(())
}

fn emit(out: &mut impl Write, cli: &Cli, frame: &Frame<i64>, dump: &str) -> Result<()> {
    let mut mirror = TracingSink;
    for entry in &frame.log {
        mirror.log(&entry.message, entry.severity);
    }

    if cli.json {
        serde_json::to_writer(&mut *out, frame).context("failed to encode frame")?;
        writeln!(out)?;
        return Ok(());
    }

    if !cli.quiet {
        for entry in &frame.log {
            writeln!(out, "{entry}")?;
        }
    }
    writeln!(out, "{dump}")?;
    writeln!(
        out,
        "nodes: {}, height: {}",
        frame.snapshot.len, frame.snapshot.height
    )?;
    Ok(())
}
