//! Brand patcher CLI.
//!
//! Rewrites the compiled admin portal in place: welcome text, login and
//! reset-password logos, favicon, and a global brand stylesheet. Running it
//! again on an already patched build changes nothing.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use patcher::exit_codes;
use patcher::io::config::{PatcherConfig, load_config, render_config, write_config};
use patcher::io::paths::default_config_path;
use patcher::logging;
use patcher::patch::{PatchOptions, run_patch};
use patcher::report::{render_json, render_summary};

#[derive(Parser)]
#[command(
    name = "patcher",
    version,
    about = "Apply brand customizations to a built admin portal"
)]
struct Cli {
    /// Asset root holding the assets directory and the entry HTML.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Config file. Defaults to `<root>/patcher.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply every branding step (the default).
    Apply(ApplyArgs),
    /// Print the effective configuration as TOML.
    Config,
    /// Write the default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default, PartialEq, Eq)]
struct ApplyArgs {
    /// Report what would change without writing files.
    #[arg(long)]
    dry_run: bool,
    /// Print the report as JSON instead of the text summary.
    #[arg(long)]
    json: bool,
    /// Exit with a non-zero code if any step failed.
    #[arg(long)]
    strict: bool,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error applying customizations: {:#}", err);
            std::process::exit(exit_codes::FAILED);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Apply(ApplyArgs::default()));
    match command {
        Command::Apply(args) => cmd_apply(&cli.root, cli.config.as_deref(), &args),
        Command::Config => cmd_config(&cli.root, cli.config.as_deref()),
        Command::Init { force } => cmd_init(&cli.root, cli.config.as_deref(), force),
    }
}

fn cmd_apply(root: &Path, config: Option<&Path>, args: &ApplyArgs) -> Result<i32> {
    let config = resolve_config(root, config)?;
    let report = run_patch(
        root,
        &config,
        PatchOptions {
            dry_run: args.dry_run,
        },
    )?;

    if args.json {
        println!("{}", render_json(&report)?);
    } else {
        print!("{}", render_summary(&report));
    }

    if args.strict && report.has_failures() {
        return Ok(exit_codes::STEP_FAILED);
    }
    info!("branding customizations finished");
    Ok(exit_codes::OK)
}

fn cmd_config(root: &Path, config: Option<&Path>) -> Result<i32> {
    let config = resolve_config(root, config)?;
    print!("{}", render_config(&config)?);
    Ok(exit_codes::OK)
}

fn cmd_init(root: &Path, config: Option<&Path>, force: bool) -> Result<i32> {
    let path = config.map_or_else(|| default_config_path(root), Path::to_path_buf);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    write_config(&path, &PatcherConfig::default())?;
    println!("wrote {}", path.display());
    Ok(exit_codes::OK)
}

/// Load the explicit config (which must exist) or the default location.
fn resolve_config(root: &Path, config: Option<&Path>) -> Result<PatcherConfig> {
    match config {
        Some(path) => {
            if !path.is_file() {
                bail!("config file not found: {}", path.display());
            }
            load_config(path)
        }
        None => load_config(&default_config_path(root)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_defaults_to_apply() {
        let cli = Cli::parse_from(["patcher"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.root, PathBuf::from("."));
    }

    #[test]
    fn parse_apply_flags() {
        let cli = Cli::parse_from(["patcher", "apply", "--dry-run", "--strict"]);
        let Some(Command::Apply(args)) = cli.command else {
            panic!("expected apply");
        };
        assert_eq!(
            args,
            ApplyArgs {
                dry_run: true,
                json: false,
                strict: true
            }
        );
    }

    #[test]
    fn global_root_after_subcommand() {
        let cli = Cli::parse_from(["patcher", "init", "--root", "/srv/admin", "--force"]);
        assert_eq!(cli.root, PathBuf::from("/srv/admin"));
        assert!(matches!(cli.command, Some(Command::Init { force: true })));
    }

    #[test]
    fn explicit_missing_config_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let err = resolve_config(temp.path(), Some(&temp.path().join("custom.toml")))
            .expect_err("should fail");
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn init_refuses_to_overwrite_without_force() {
        let temp = tempfile::tempdir().expect("tempdir");
        cmd_init(temp.path(), None, false).expect("first init");
        let err = cmd_init(temp.path(), None, false).expect_err("second init");
        assert!(err.to_string().contains("already exists"));
        cmd_init(temp.path(), None, true).expect("forced init");
    }
}
