//! CLI module for PG Portal

mod args;

pub use args::{Args, Command};

use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{Error, Result};
use crate::loader::{Loader, Notice, Panel, Portal};
use crate::output::{PageMeta, SiteConfig, SiteGenerator};
use crate::search::SearchIndex;
use crate::server::StaticServer;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_logging(args.verbose);

    match execute(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(args: Args) -> Result<ExitCode> {
    let verbose = args.verbose;

    match args.command {
        Command::Build {
            source,
            output,
            config,
            tab,
            no_copy_data,
        } => {
            let mut cfg = load_config(config.as_deref());
            cfg.merge_cli(source, output, tab, no_copy_data);
            cfg.validate()?;

            if verbose {
                println!("Source: {}", cfg.data.source);
                println!("Output: {}", cfg.output.directory.display());
                println!("Default tab: {}", cfg.site.default_tab);
                println!("Copy data: {}", cfg.output.copy_data);
            }

            let source = cfg.source()?;
            let loader = Loader::new(source).with_progress(verbose);

            println!("Loading categories from {}...", loader.source());
            let mut portal = loader.load();
            portal.activate(cfg.default_tab()?.tab_id());
            print_panels(&portal);

            println!("\nGenerating site...");
            let generator = SiteGenerator::new(SiteConfig {
                output_dir: cfg.output.directory.clone(),
                meta: PageMeta {
                    title: cfg.site.title.clone(),
                    tagline: cfg.site.tagline.clone(),
                },
                copy_assets: cfg.output.copy_assets,
                copy_data: cfg.output.copy_data,
                templates: cfg.output.templates.clone(),
            })?;
            let report = generator.generate(&portal, loader.source())?;

            println!("{}", report.summary());
            println!("Site written to: {}", generator.output_dir().display());
            Ok(ExitCode::SUCCESS)
        }

        Command::Check { source, config } => {
            let portal = load_portal(config.as_deref(), source, verbose)?;
            print_panels(&portal);

            let failed = portal.failed_categories();
            if failed.is_empty() {
                println!("\nAll {} categories loaded, {} cards", portal.panels.len(), portal.total_cards());
                Ok(ExitCode::SUCCESS)
            } else {
                println!("\n{} of {} categories failed", failed.len(), portal.panels.len());
                Ok(ExitCode::FAILURE)
            }
        }

        Command::Search { term, source, config } => {
            let portal = load_portal(config.as_deref(), source, verbose)?;
            let index = SearchIndex::build(&portal);

            let hits: Vec<_> = index.search(&term).collect();
            for hit in &hits {
                println!("[{}] {}", hit.category.label(), hit.title);
            }
            println!("{} match(es) for \"{}\"", hits.len(), term.trim());
            Ok(ExitCode::SUCCESS)
        }

        Command::Serve { path, port } => {
            if !path.exists() {
                return Err(Error::PathNotFound(path));
            }

            let server = StaticServer::bind(path.clone(), &format!("127.0.0.1:{}", port))?;
            println!("Serving {} on http://localhost:{}", path.display(), port);
            println!("Press Ctrl+C to stop");
            server.run()?;
            Ok(ExitCode::SUCCESS)
        }

        Command::Version => {
            println!("pgportal {}", env!("CARGO_PKG_VERSION"));
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Explicit config path, or pgportal.toml in the working directory
fn load_config(path: Option<&Path>) -> Config {
    match path {
        Some(p) => Config::load_or_default(p),
        None => Config::load_or_default(&PathBuf::from(DEFAULT_CONFIG_FILE)),
    }
}

fn load_portal(config: Option<&Path>, source: Option<String>, verbose: bool) -> Result<Portal> {
    let mut cfg = load_config(config);
    cfg.merge_cli(source, None, None, false);
    cfg.validate()?;
    Ok(Loader::new(cfg.source()?).with_progress(verbose).load())
}

fn print_panels(portal: &Portal) {
    for panel in &portal.panels {
        println!("  {:<16} {}", panel.category.label(), describe(panel));
    }
}

fn describe(panel: &Panel) -> String {
    match panel.notice_ref() {
        None => format!("{} card(s)", panel.data_cards().len()),
        Some(Notice::Empty { message }) => message.clone(),
        Some(Notice::Failed { detail, .. }) => format!("failed: {}", detail),
        Some(Notice::LocalFile { .. }) => "not loaded: local-file source".to_string(),
        Some(Notice::Unavailable { detail }) => {
            format!("unavailable: {}", detail.as_deref().unwrap_or("unknown error"))
        }
    }
}
