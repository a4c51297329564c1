use std::path::PathBuf;

use bank::get_bank;
use clap::Parser;
use process::models::Command;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Dataset CSV
    path: PathBuf,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let bank = get_bank(&args.path)?;
    println!("{}", process::run(&bank, &args.command)?);

    Ok(())
}
