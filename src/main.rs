use bidtrace::app::Config;
use bidtrace::cli::{self, Cli, Commands, ConfigCommand};
use clap::Parser;
use tracing::error;

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match Config::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config: {e}");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    };

    config.init_logging();

    let result = match &cli.command {
        Commands::Replay(args) => cli::replay::execute(&config, args).map(|_| ()),
        Commands::Bucket(args) => {
            cli::bucket::execute(args);
            Ok(())
        }
        Commands::Config(ConfigCommand::Show) => cli::config::execute_show(&config),
    };

    if let Err(e) = result {
        error!(error = %e, "Command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
