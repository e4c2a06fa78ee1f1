use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use swipedeck::core::config::{self, CliOverrides, SwipedeckConfig};
use swipedeck::tui;

#[derive(Parser)]
#[command(name = "swipedeck", about = "Like or dislike cats, one card at a time")]
struct Args {
    /// Catalog base URL (overrides SWIPEDECK_BASE_URL and the config file)
    #[arg(long)]
    base_url: Option<String>,

    /// Catalog tag to browse
    #[arg(short, long)]
    tag: Option<String>,

    /// Items per batch
    #[arg(short, long)]
    batch_size: Option<usize>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to swipedeck.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("swipedeck.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: {e}. Using defaults.");
            log::warn!("Falling back to default config: {}", e);
            SwipedeckConfig::default()
        }
    };
    let cli = CliOverrides {
        base_url: args.base_url,
        tag: args.tag,
        batch_size: args.batch_size,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!(
        "Swipedeck starting up: {} (tag={}, batch={})",
        resolved.base_url,
        resolved.tag,
        resolved.batch_size
    );

    tui::run(resolved)
}
