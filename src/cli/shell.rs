//! Interactive shell
//!
//! Reads one command per line after a successful login and runs it against
//! the already-loaded storage. Errors are printed and the shell carries on.

use std::fmt;
use std::io::{self, BufRead, Write};

use clap::{Args, CommandFactory, Parser};

use crate::auth::{self, SuppliedLogin};
use crate::config::Settings;
use crate::error::LibraryResult;
use crate::storage::Storage;

use super::{execute, Command};

const PROMPT: &str = "library> ";

/// Options for `library shell`
#[derive(Args, Clone, Default)]
pub struct ShellArgs {
    /// Login name (prompted for when absent)
    #[arg(short, long, env = "LIBRARY_CLI_USER")]
    pub username: Option<String>,

    /// Login password (prompted for without echo when absent)
    #[arg(long, env = "LIBRARY_CLI_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

impl fmt::Debug for ShellArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShellArgs")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// One line of shell input
#[derive(Parser, Debug)]
#[command(
    name = "",
    no_binary_name = true,
    disable_version_flag = true,
    override_usage = "<COMMAND> [ARGS]  (or `help`, `exit`)"
)]
struct ShellLine {
    #[command(subcommand)]
    command: Command,
}

/// What the loop should do after a line
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Log in on the terminal, then run the shell on stdin
pub fn handle_shell(storage: &mut Storage, settings: &Settings, args: ShellArgs) -> LibraryResult<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    let supplied = SuppliedLogin {
        username: args.username,
        password: args.password,
    };
    let user = auth::login(&settings.credentials, &supplied, &mut input, &mut out)?;
    writeln!(out, "Welcome, {}. Type `help` for commands, `exit` to leave.", user)?;

    run_shell(storage, settings, input, &mut out)
}

/// Run commands from `input` until `exit` or end of input
pub fn run_shell<R: BufRead, W: Write>(
    storage: &mut Storage,
    settings: &Settings,
    mut input: R,
    out: &mut W,
) -> LibraryResult<()> {
    let mut line = String::new();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            break;
        }

        if run_line(storage, settings, line.trim(), out)? == Flow::Exit {
            break;
        }
    }

    tracing::debug!("shell closed");
    Ok(())
}

/// Execute one line. Only output failures end the loop with an error.
fn run_line<W: Write>(
    storage: &mut Storage,
    settings: &Settings,
    line: &str,
    out: &mut W,
) -> LibraryResult<Flow> {
    match line {
        "" => return Ok(Flow::Continue),
        "exit" | "quit" => return Ok(Flow::Exit),
        "help" | "?" => {
            writeln!(out, "{}", ShellLine::command().render_help())?;
            return Ok(Flow::Continue);
        }
        _ => {}
    }

    let Some(words) = shlex::split(line) else {
        writeln!(out, "Error: unbalanced quotes")?;
        return Ok(Flow::Continue);
    };

    let parsed = match ShellLine::try_parse_from(words) {
        Ok(parsed) => parsed,
        Err(e) => {
            write!(out, "{}", e.render())?;
            return Ok(Flow::Continue);
        }
    };

    if matches!(parsed.command, Command::Shell(_)) {
        writeln!(out, "Already in the shell.")?;
        return Ok(Flow::Continue);
    }

    // Flush prompt output before handlers print to stdout
    out.flush()?;
    if let Err(e) = execute(storage, settings, parsed.command) {
        tracing::debug!(error = %e, "shell command failed");
        writeln!(out, "Error: {}", e)?;
    }
    Ok(Flow::Continue)
}
