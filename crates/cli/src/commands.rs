mod export;
mod sync;

use crate::run::Run;

#[derive(clap::Subcommand)]
pub enum Commands {
	/// Export the capability catalogue of a running ComfyUI instance
	Export(export::ExportCommand),

	/// Synchronize the front-end assets with the latest published release
	Sync(sync::SyncCommand),
}

impl Run for Commands {
	async fn run(&self, config: mirror::Config) -> eyre::Result<()> {
		match self {
			Self::Export(cmd) => cmd.run(config).await,
			Self::Sync(cmd) => cmd.run(config).await,
		}
	}
}
