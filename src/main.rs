use clap::Parser;
use colored::*;
use diashow::error::{DiashowError, Result as DiashowResult};
use diashow::{Cli, Config, ToolSearcher};
use env_logger::{Builder, Env, Target};
use log::info;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(e) = setup_logging() {
        eprintln!("{}", e.to_string().red());
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if let DiashowError::NoImagesFound { results } = &e {
                println!("results: {results}");
            }
            eprintln!("{}", e.to_string().red());
            ExitCode::from(e.exit_code())
        }
    }
}

fn run(cli: &Cli) -> DiashowResult<()> {
    let start_time = Instant::now();
    let config_path = Config::locate()?;
    let config = Config::load(&config_path)?;
    info!("Loaded config from {}", config_path.display());

    let searcher = ToolSearcher::new(config.search_tool.clone(), config.search_timeout);
    info!("Searching with {} for {:?}", searcher.program(), cli.pattern);
    let summary = diashow::run(&cli.pattern, &config, &searcher, &mut rand::rng())?;

    println!("results: {}", summary.results);
    println!("found {} images", summary.images);
    info!(
        "Finished in {:.2?}: {} slides ({}) in {}",
        start_time.elapsed(),
        summary.images,
        summary.order,
        summary.slidesfile.display()
    );
    Ok(())
}

fn setup_logging() -> DiashowResult<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });
    builder.target(Target::Stderr);

    builder
        .try_init()
        .map_err(|e| DiashowError::Other(e.to_string()))?;
    Ok(())
}
