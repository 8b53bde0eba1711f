use bezel_tools::batch::run_propagation;
use bezel_tools::catalog::{build_clone_graph, load_catalog};
use bezel_tools::cli::CloneArgs;
use bezel_tools::logging;
use clap::Parser;
use log::info;

/// Copy bezel artwork between parent and clone sets listed in a MAME XML catalog.
#[derive(Debug, Parser)]
#[command(name = "clone_bezels", version)]
struct Cli {
    #[command(flatten)]
    args: CloneArgs,
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

    info!("Parsing {}...", config.catalog.display());
    let records = load_catalog(&config.catalog).map_err(|e| e.to_string())?;
    let graph = build_clone_graph(&records);
    info!(
        "Done! Found {} parent sets and {} clone relations.",
        graph.parent_names().len(),
        graph.clone_edges().len()
    );

    run_propagation(&config.folder, &graph, &config.to_options(), config.parallel)
        .map_err(|e| e.to_string())?;
    Ok(())
}
