/// A runnable subcommand.
pub trait Run {
	/// Runs the subcommand using the given config.
	async fn run(&self, config: mirror::Config) -> eyre::Result<()>;
}
