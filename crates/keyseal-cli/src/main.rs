use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(name = "keyseal", version, about = "Issue and verify key-bound identity tokens")]
struct Cli {
    /// Path to the configuration file.
    #[arg(
        long,
        short,
        global = true,
        env = "KEYSEAL_CONFIG",
        default_value = "keyseal.yaml"
    )]
    config: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server.
    Serve,

    /// Write a default config if missing and create the key collection.
    Init,

    /// Issue a credential and print its token.
    Issue {
        /// Write the token to this file instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Verify a token (or a file containing one). Exits 1 when rejected.
    Verify { token: String },

    /// Print the effective configuration (secrets omitted).
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = commands::load_config(&cli.config)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.observability.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Serve => commands::serve::run(config).await?,
        Command::Init => commands::init::run(&cli.config, &config).await?,
        Command::Issue { output } => commands::issue::run(&config, output.as_deref()).await?,
        Command::Verify { token } => {
            if !commands::verify::run(&config, &token).await? {
                std::process::exit(1);
            }
        }
        Command::Config => commands::config::run(&config)?,
    }

    Ok(())
}
