// SPDX-License-Identifier: MPL-2.0
use geo_backfill::backfill::{BackfillOptions, BackfillPass};
use geo_backfill::config;
use geo_backfill::error::Error;
use geo_backfill::paths;
use std::path::PathBuf;
use std::process::ExitCode;

const HELP: &str = "\
geo_backfill - fill missing gallery coordinates from image EXIF GPS tags

USAGE:
  geo_backfill [OPTIONS]

OPTIONS:
  --root <DIR>       Repository root (default: $GEO_BACKFILL_ROOT or current dir)
  --config <FILE>    Layout config file (default: <root>/geo_backfill.toml)
  --dry-run          Report updates without rewriting the document
  -h, --help         Print this help
";

struct Flags {
    root: Option<PathBuf>,
    config: Option<PathBuf>,
    dry_run: bool,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }

    let flags = Flags {
        root: args.opt_value_from_str("--root")?,
        config: args.opt_value_from_str("--config")?,
        dry_run: args.contains("--dry-run"),
    };

    let remaining = args.finish();
    if !remaining.is_empty() {
        tracing::warn!("Ignoring unexpected arguments: {:?}", remaining);
    }
    Ok(Some(flags))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("{err}\n\n{HELP}");
            return ExitCode::FAILURE;
        }
    };

    paths::init_cli_override(flags.root);
    let root = paths::repo_root();

    let loaded = match &flags.config {
        Some(path) => config::load_from_path(path),
        None => config::load(&root),
    };
    let cfg = match loaded {
        Ok(cfg) => cfg,
        Err(err) => {
            tracing::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let pass = BackfillPass::from_config(
        &cfg,
        &root,
        BackfillOptions {
            dry_run: flags.dry_run,
        },
    );

    match pass.run() {
        Ok(summary) => {
            println!("{}", summary.message(pass.document()));
            ExitCode::SUCCESS
        }
        Err(Error::DocumentNotFound(path)) => {
            println!("Data file not found: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
