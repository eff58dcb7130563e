#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod bridge;
mod cmd;
mod error;

#[derive(Parser)]
#[command(name = "tagcopy", about = "Copy structured values by matching field tags")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	Schema(cmd::schema::Args),
	Copy(cmd::copy::Args),
}

fn main() {
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> error::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Schema(args) => cmd::schema::run(args),
		Commands::Copy(args) => cmd::copy::run(args),
	}
}
