use bezel_tools::batch::{run_extraction, RecordFormat};
use bezel_tools::cli::ExtractArgs;
use bezel_tools::logging;
use clap::Parser;

/// Write a `.info` border record next to every bezel PNG in a folder.
#[derive(Debug, Parser)]
#[command(name = "create_infos", version)]
struct Cli {
    #[command(flatten)]
    args: ExtractArgs,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    logging::init(cli.args.verbose);
    let config = cli.args.into_config().map_err(|e| e.to_string())?;
    let options = config.to_options(RecordFormat::Info);
    run_extraction(&config.folder, &options).map_err(|e| e.to_string())?;
    Ok(())
}
