use bezel_tools::batch::{run_extraction, RecordFormat};
use bezel_tools::cli::ExtractArgs;
use bezel_tools::logging;
use clap::Parser;

/// Write a MAME `.lay` layout and a `.zip` artwork bundle for every bezel PNG in a folder.
#[derive(Debug, Parser)]
#[command(name = "create_mame_art", version)]
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
    let run = run_extraction(&config.folder, &config.to_options(RecordFormat::Layout))
        .map_err(|e| e.to_string())?;
    if run.tally.written > 0 {
        println!(
            "Copy the .zip files into MAME's artwork folder; {} bundles written.",
            run.tally.written
        );
    }
    Ok(())
}
