use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use pss_core::SharingConfig;

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[clap(name = "pss", version, about = "Partial secret sharing")]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Break a secret into parts, printing one token per line
    Split(SplitArgs),
    /// Recover a secret from parts given as arguments or on stdin
    Recover(RecoverArgs),
}

#[derive(Args, Debug)]
struct SplitArgs {
    /// Parts required to recover the secret
    #[clap(short = 'k', long, env = "PSS_THRESHOLD")]
    threshold: u32,
    /// Parts to generate
    #[clap(short = 'n', long, env = "PSS_TOTAL")]
    total: u32,
    /// The secret; read from the first line of stdin when omitted
    #[clap(short, long)]
    secret: Option<String>,
}

#[derive(Args, Debug)]
struct RecoverArgs {
    /// Part tokens; read line by line from stdin when omitted
    parts: Vec<String>,
}

fn run(cli: Cli) -> Result<()> {
    let config = SharingConfig::default();
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Command::Split(args) => {
            let secret = match args.secret {
                Some(secret) => secret,
                None => commands::read_secret(stdin.lock())?,
            };
            let params = commands::SplitParams {
                threshold: args.threshold,
                total: args.total,
            };
            commands::split(
                &secret,
                params,
                &config,
                &mut rand::rng(),
                &mut stdout,
            )?;
        }
        Command::Recover(args) => {
            let secret = if args.parts.is_empty() {
                let lines = stdin.lock().lines();
                commands::recover(lines, &config, &mut io::stderr())?
            } else {
                let parts = args.parts.into_iter().map(Ok::<_, io::Error>);
                commands::recover(parts, &config, &mut io::stderr())?
            };
            writeln!(stdout, "{secret}")?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    logging::init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
