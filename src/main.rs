use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sqldojo::{App, Config};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sqldojo")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override the data directory (completion and exam answers live here)
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sqldojo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = match cli.data_dir {
        Some(dir) => dir,
        None => Config::data_dir()?,
    };

    let mut app = App::new(config, data_dir)?;
    app.run()?;

    Ok(())
}
