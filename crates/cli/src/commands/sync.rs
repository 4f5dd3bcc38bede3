use eyre::WrapErr;
use owo_colors::OwoColorize;

use crate::run::Run;

#[derive(clap::Args)]
pub struct SyncCommand {}

impl Run for SyncCommand {
	async fn run(&self, config: mirror::Config) -> eyre::Result<()> {
		let mirror = mirror::Mirror::new(config);

		mirror
			.sync()
			.await
			.wrap_err("Failed to synchronize the front-end")?;

		let version = mirror
			.frontend
			.current_version()?
			.unwrap_or_else(|| "unknown".to_owned());

		println!("Synchronized front-end to {}", version.green());

		Ok(())
	}
}
