use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tally::sitemap::{Sitemap, DEFAULT_HOSTNAME, DEFAULT_OUTPUT};

#[derive(Parser, Debug)]
#[command(name = "generate_sitemap", version, about = "Write sitemap.xml for the deployed site")]
struct Args {
    /// Absolute origin prefixed to every route
    #[arg(long, default_value = DEFAULT_HOSTNAME)]
    hostname: String,

    /// Where the XML document is written
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    out: PathBuf,
}

fn main() -> ExitCode {
    tally::init();
    let args = Args::parse();

    let written =
        Sitemap::site_routes(args.hostname).and_then(|sitemap| sitemap.write_to(&args.out));
    match written {
        Ok(path) => {
            println!("Sitemap written to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
