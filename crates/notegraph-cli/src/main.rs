use anyhow::{Context, Result};
use notegraph_config::Config;
use notegraph_engine::{BacklinkOptions, ExportOptions, FrontmatterFormat, LoadOptions, Notes};
use std::{env, path::PathBuf, process};

/// What to load and where to put the result.
struct Run {
    src: String,
    export_path: Option<PathBuf>,
    config: Option<Config>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let run = resolve_run(&args);

    let syntax = run
        .config
        .as_ref()
        .map(|config| config.frontmatter.syntax)
        .unwrap_or_default();
    let indent = run
        .config
        .as_ref()
        .map(|config| config.export.indent)
        .unwrap_or(FrontmatterFormat::DEFAULT_INDENT);

    let mut notes = Notes::new();
    let report = notes
        .load(&run.src, &LoadOptions::default().syntax(syntax))
        .with_context(|| format!("Failed to load notes from '{}'", run.src))?;

    for skipped in &report.skipped {
        log::warn!("Skipped {}: {}", skipped.path.display(), skipped.error);
    }

    notes
        .build_backlinks(&BacklinkOptions::default())
        .context("Failed to build backlinks")?;

    let options = ExportOptions {
        indent: Some(indent),
        transform: None,
    };
    match run.export_path {
        Some(path) => notes
            .export_json(&path, &options)
            .with_context(|| format!("Failed to export notes to '{}'", path.display()))?,
        None => println!("{}", notes.to_json(&options)?),
    }

    Ok(())
}

/// Determine the source from CLI args or the config file, exiting with usage on failure.
fn resolve_run(args: &[String]) -> Run {
    let config_path = Config::config_path();
    let program = args.first().map(String::as_str).unwrap_or("notegraph-cli");

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) if args.len() > 1 => {
            log::warn!("Ignoring config file: {e}");
            None
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Usage: {program} <notes-path-or-glob> [export.json]");
            process::exit(1);
        }
    };

    match args.len() {
        2 | 3 => Run {
            src: args[1].clone(),
            export_path: args.get(2).map(PathBuf::from),
            config,
        },
        1 => match config {
            Some(config) => Run {
                src: config.notes_path.clone(),
                export_path: config.export_path.clone(),
                config: Some(config),
            },
            None => {
                eprintln!("Error: No notes path provided and no config file found");
                eprintln!("Usage: {program} <notes-path-or-glob> [export.json]");
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
        },
        _ => {
            eprintln!("Usage: {program} [notes-path-or-glob] [export.json]");
            process::exit(1);
        }
    }
}
