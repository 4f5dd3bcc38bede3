use eyre::WrapErr;
use owo_colors::OwoColorize;

use crate::run::Run;

#[derive(clap::Args)]
pub struct ExportCommand {
	/// The directory to export the catalogue into
	output_dir: Option<String>,
}

impl Run for ExportCommand {
	async fn run(&self, config: mirror::Config) -> eyre::Result<()> {
		let mut config = config;
		if let Some(output_dir) = &self.output_dir {
			config.public_dir.clone_from(output_dir);
		}

		let public_dir = config.public_dir();
		let mirror = mirror::Mirror::new(config);

		mirror
			.export()
			.await
			.wrap_err("Failed to export the catalogue")?;

		println!(
			"Exported catalogue to {}",
			public_dir.display().green()
		);

		Ok(())
	}
}
