//! Download an archive with a terminal progress bar and unpack it.
//!
//! ```text
//! cargo run --example fetch -- <url> <category> [destination]
//! ```
//!
//! Press Ctrl-C to cancel; the partial file is removed.

use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use fetchpack::{
    BarReporter, DownloadRequest, DownloadTaskBuilder, ProgressBarOpts, Status, StyleOptions,
    TaskSupervisor,
};
use tracing_subscriber::EnvFilter;

/// Download a zip archive and extract it into `<destination>/models/<category>`.
#[derive(Parser, Debug)]
#[command(name = "fetch")]
#[command(author, version, about)]
struct Args {
    /// URL of the archive
    url: String,

    /// Folder name below `<destination>/models`
    category: String,

    /// Directory receiving the archive
    #[arg(default_value = "downloads")]
    destination: String,

    /// Retry attempts for transient HTTP failures
    #[arg(short, long, default_value_t = 2)]
    retries: u32,

    /// Remove the progress bar once the run ends
    #[arg(long)]
    clear: bool,

    /// Delete the archive after a successful extraction
    #[arg(long)]
    remove_archive: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut sized = ProgressBarOpts::with_pip_style();
    let mut spinner = ProgressBarOpts::spinner();
    sized.set_clear(args.clear);
    spinner.set_clear(args.clear);
    let reporter = BarReporter::new(StyleOptions::new(sized, spinner));

    let task = DownloadTaskBuilder::new()
        .retries(args.retries)
        .keep_archive(!args.remove_archive)
        .build();
    let request = DownloadRequest::new(args.url, args.category, args.destination);
    let handle = TaskSupervisor::spawn(task, request, reporter);

    let cancel = handle.cancel_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel.cancel();
        }
    });

    let summary = handle.join().await?;
    match summary.status() {
        Status::Completed => println!(
            "Extracted {} entries into {}",
            summary.entries(),
            summary
                .extracted_to()
                .map(|p| p.display().to_string())
                .unwrap_or_default()
        ),
        Status::Cancelled => println!("Cancelled after {} bytes", summary.size()),
        Status::Failed { kind, message } => {
            return Err(eyre!("{} ({kind}): {message}", kind.default_message()))
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["fetch", "https://example.com/a.zip", "vision"]).unwrap();
        assert_eq!(args.url, "https://example.com/a.zip");
        assert_eq!(args.category, "vision");
        assert_eq!(args.destination, "downloads");
        assert_eq!(args.retries, 2);
        assert!(!args.clear);
        assert!(!args.remove_archive);
    }

    #[test]
    fn test_args_overrides() {
        let args = Args::try_parse_from([
            "fetch",
            "https://example.com/a.zip",
            "audio",
            "/srv/data",
            "-r",
            "0",
            "--clear",
            "--remove-archive",
        ])
        .unwrap();
        assert_eq!(args.destination, "/srv/data");
        assert_eq!(args.retries, 0);
        assert!(args.clear);
        assert!(args.remove_archive);
    }

    #[test]
    fn test_args_require_category() {
        assert!(Args::try_parse_from(["fetch", "https://example.com/a.zip"]).is_err());
    }
}
