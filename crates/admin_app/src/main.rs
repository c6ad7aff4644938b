use std::path::PathBuf;

use clap::Parser;

mod platform;

/// Drives the bindings of one admin page from the console.
#[derive(Parser, Debug)]
#[command(name = "admin_app", version)]
struct Args {
    /// Page snapshot (RON) describing the URL, rows and form fields.
    page: PathBuf,
    /// Configuration file. Falls back to $ADMIN_KIT_CONFIG, then ./admin.ron.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    platform::run_app(&args.page, args.config.as_deref())
}
