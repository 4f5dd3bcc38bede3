mod commands;
mod run;

use clap::Parser;

use commands::Commands;
use run::Run;

#[derive(clap::Parser)]
#[command(version, about)]
#[command(propagate_version = true)]
struct Args {
	#[command(subcommand)]
	commands: Commands,
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
	color_eyre::install()?;
	env_logger::init();

	let args = Args::parse();

	// Delegate to sub-commands.
	args.commands.run(mirror::Config::default()).await
}

#[cfg(test)]
mod tests {
	use clap::CommandFactory;

	use super::*;

	#[test]
	fn args() {
		Args::command().debug_assert();
	}

	#[test]
	fn surface_is_positional_only() {
		// The only accepted argument is the exporter's output dir.
		assert!(Args::try_parse_from(["comfy-mirror", "sync"]).is_ok());
		assert!(Args::try_parse_from(["comfy-mirror", "export"]).is_ok());
		assert!(Args::try_parse_from(["comfy-mirror", "export", "out"]).is_ok());

		assert!(Args::try_parse_from(["comfy-mirror", "sync", "--config", "x"]).is_err());
		assert!(Args::try_parse_from(["comfy-mirror", "export", "--config", "x"]).is_err());
	}
}
