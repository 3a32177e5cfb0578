//! linestore CLI
//!
//! Command-line tool for inspecting and editing a record file at the raw
//! `[id]body` level, without codecs.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use linestore::line::parser;
use linestore::scan::{Fetcher, Persister};
use linestore::{Newline, Result, StoreError};

/// linestore CLI
#[derive(Parser, Debug)]
#[command(name = "linestore-cli")]
#[command(about = "Inspect and edit a linestore record file")]
struct Args {
    /// The record file to operate on
    #[arg(short, long)]
    file: PathBuf,

    /// Line ending convention used for writes
    #[arg(long, value_enum, default_value = "lf")]
    newline: NewlineArg,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum NewlineArg {
    Lf,
    Crlf,
}

impl From<NewlineArg> for Newline {
    fn from(arg: NewlineArg) -> Self {
        match arg {
            NewlineArg::Lf => Newline::Lf,
            NewlineArg::Crlf => Newline::CrLf,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List every record in physical order
    List,

    /// Print the record stored under an id
    Get {
        /// The record id to look up
        id: i64,
    },

    /// Append a record body under the next free id
    Add {
        /// The record body (opaque text, no `[id]` prefix)
        body: String,
    },

    /// Rewrite the record stored under an id
    Update {
        /// The record id to rewrite
        id: i64,

        /// The replacement body
        body: String,
    },

    /// Delete the record stored under an id
    Remove {
        /// The record id to delete
        id: i64,
    },

    /// Print the highest recorded id
    MaxId,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let newline = Newline::from(args.newline);
    let fetcher = Fetcher::new(&args.file, newline);
    let persister = Persister::new(&args.file, newline);

    match args.command {
        Commands::List => {
            for record in fetcher.fetch_all()? {
                println!("{record}");
            }
        }
        Commands::Get { id } => match fetcher.fetch_by_id(id)? {
            Some(record) => println!("{record}"),
            None => println!("no record with id {id}"),
        },
        Commands::Add { body } => {
            if body.trim().is_empty() {
                return Err(StoreError::InvalidArgument(
                    "record body must not be empty or whitespace-only".into(),
                ));
            }
            let id = fetcher.fetch_max_id()? + 1;
            persister.add(&parser::build_line(id, &body))?;
            println!("{id}");
        }
        Commands::Update { id, body } => {
            persister.update(id, &parser::build_line(id, &body))?;
        }
        Commands::Remove { id } => {
            persister.remove(id)?;
        }
        Commands::MaxId => {
            println!("{}", fetcher.fetch_max_id()?);
        }
    }

    Ok(())
}
