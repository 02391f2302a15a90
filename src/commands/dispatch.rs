//! Command dispatch logic for ebbnote

use std::env;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Instant;

use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::commands::shell::{LineSource, ReaderSource, RustylineSource};
use crate::commands::{due, export, html, new, push, shell};
use crate::session::Session;
use ebbnote_core::error::Result;

pub fn run(cli: &Cli, start: Instant) -> Result<()> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut session = Session::open(cli, &cwd, &mut out)?;
    debug!(elapsed = ?start.elapsed(), root = %session.config.root_dir().display(), "open_session");

    let result = match &cli.command {
        None | Some(Commands::Shell) => run_shell(&mut session, &mut out),
        Some(Commands::New {
            subject,
            content,
            open,
        }) => new::execute(&mut session, subject, content, *open, &mut out),
        Some(Commands::Export { open }) => export::execute(&session, *open, &mut out),
        Some(Commands::Due) => due::execute(&session, &mut out),
        Some(Commands::Push) => push::execute(&session, &mut out).map(|_| ()),
        Some(Commands::Html { out: out_dir }) => {
            html::execute(&session, out_dir.clone(), &mut out).map(|_| ())
        }
    };

    out.flush()?;
    debug!(elapsed = ?start.elapsed(), "dispatch");
    result
}

/// Read from a line editor on a terminal, plain lines otherwise
fn run_shell(session: &mut Session, out: &mut dyn Write) -> Result<()> {
    let stdin = io::stdin();
    let mut input: Box<dyn LineSource> = if stdin.is_terminal() {
        Box::new(RustylineSource::new()?)
    } else {
        Box::new(ReaderSource::new(stdin.lock()))
    };
    shell::run(session, input.as_mut(), out)
}
