use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "raythink", about = "A thinking indicator for the terminal", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Theme preset to use (dark, light)
    #[arg(short, long)]
    theme: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("raythink=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let mut config = raythink_config::Config::load()?;
    raythink_config::Config::ensure_dirs()?;

    if let Some(theme) = cli.theme {
        config.tui.theme = theme;
    }

    match cli.command {
        Some(Commands::Config) => {
            let path = raythink_config::Config::config_path();
            println!("Config path: {}", path.display());
            println!("{}", toml::to_string_pretty(&config)?);
        }
        None => {
            let mut app = raythink_tui::App::new(&config);
            app.run().await?;
        }
    }

    Ok(())
}
