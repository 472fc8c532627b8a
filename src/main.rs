//! Triphonon packager CLI entrypoint.
//!
//! This binary resolves the build configuration for the triphonon native
//! extensions and hands the resulting manifest to an available packaging
//! backend. With `--dry-run` it reports the resolved configuration and
//! exits without invoking anything.

use clap::Parser;
use std::io::Write;
use triphonon_packager::cli::Cli;
use triphonon_packager::error::Result;
use triphonon_packager::installer::{InstallerFacade, SystemCommandExecutor};
use triphonon_packager::output::{DryRunInfo, backend_notice, success_message, write_stderr_line};
use triphonon_packager::pipeline::{BuildOptions, ResolvedConfig, resolve};

fn main() {
    let cli = Cli::parse();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(cli: &Cli, stderr: &mut dyn Write) -> Result<()> {
    let options = BuildOptions {
        source_dir: cli.options.source_dir.clone(),
        timings: cli.options.timings,
    };
    let config = resolve(&options)?;
    let action = cli.command.action();

    if cli.options.dry_run {
        let info = DryRunInfo {
            config: &config,
            action,
            source_dir: &cli.options.source_dir,
        };
        write_stderr_line(stderr, info.display_text());
        return Ok(());
    }

    dispatch_to_backend(cli, &config, stderr)
}

/// Selects a backend and runs the requested action against it.
fn dispatch_to_backend(cli: &Cli, config: &ResolvedConfig, stderr: &mut dyn Write) -> Result<()> {
    let executor = SystemCommandExecutor;
    let facade = InstallerFacade::select(&executor)?;
    let action = cli.command.action();

    if cli.options.verbosity > 0 && !cli.options.quiet {
        write_stderr_line(
            stderr,
            format!(
                "Resolved {} for {} on {}",
                config.version, config.profile.compiler, config.profile.platform
            ),
        );
    }

    if !cli.options.quiet {
        write_stderr_line(stderr, backend_notice(facade.backend()));
    }

    facade.install(&config.manifest, action, config.cflags.as_deref())?;

    if !cli.options.quiet {
        write_stderr_line(
            stderr,
            success_message(action, &config.version.to_string()),
        );
    }

    Ok(())
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, err);
            1
        }
    }
}
