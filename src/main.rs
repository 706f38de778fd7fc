use anyhow::Result;
use clap::Parser;

use library::cli::{execute, Command};
use library::config::{LibraryPaths, Settings};
use library::logging::init_tracing;
use library::storage::Storage;

#[derive(Parser)]
#[command(
    name = "library",
    author = "Kaylee Beyene",
    version,
    about = "Track a small library's books, members and loans",
    long_about = "library-cli keeps a small library's catalogue, members and \
                  borrow/return history in plain CSV files. Run a single command, \
                  or `library shell` for an interactive session."
)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let paths = LibraryPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths)?;
    storage.set_audit_enabled(settings.audit_enabled);
    storage.load_all()?;

    match cli.command {
        Some(command) => execute(&mut storage, &settings, command)?,
        None => {
            println!("library-cli - books, members and loans");
            println!();
            println!("Run 'library --help' for usage information.");
            println!("Run 'library shell' for an interactive session.");
        }
    }

    Ok(())
}
