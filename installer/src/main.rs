//! Debian package assembler CLI entrypoint.
//!
//! This binary resolves a build configuration from a TOML file and flags,
//! then runs the packaging pipeline. The archive path is printed on stdout;
//! progress, summaries and errors go to stderr.

use clap::Parser;
use distpack_installer::cli::Cli;
use distpack_installer::config::{BuildConfiguration, ConfigFile};
use distpack_installer::error::Result;
use distpack_installer::executor::{CommandExecutor, SystemCommandExecutor};
use distpack_installer::output::{DryRunInfo, build_summary, write_stderr_line};
use distpack_installer::pipeline::{PipelineContext, build_package, plan_package};
use std::io::Write;

fn main() {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    let mut stderr = std::io::stderr();
    let run_result = run(&cli, &SystemCommandExecutor, &mut stdout, &mut stderr);
    let exit_code = exit_code_for_run_result(run_result, &mut stderr);
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

fn run(
    cli: &Cli,
    executor: &dyn CommandExecutor,
    stdout: &mut dyn Write,
    stderr: &mut dyn Write,
) -> Result<()> {
    let config = resolve_configuration(cli)?;

    if cli.dry_run {
        let plan = plan_package(&config, executor)?;
        let info = DryRunInfo {
            config: &config,
            plan: &plan,
            clean: cli.clean,
        };
        write_stderr_line(stderr, info.display_text());
        return Ok(());
    }

    let context = PipelineContext {
        config: &config,
        executor,
        quiet: cli.quiet,
        clean: cli.clean,
    };
    let output = build_package(&context, stderr)?;

    if !cli.quiet {
        write_stderr_line(stderr, "");
        write_stderr_line(stderr, build_summary(&output, cli.clean));
    }
    writeln!(stdout, "{}", output.archive_path)?;
    Ok(())
}

/// Loads the optional configuration file, applies flag overrides and checks
/// that every source directory exists.
fn resolve_configuration(cli: &Cli) -> Result<BuildConfiguration> {
    let file = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };
    let config = BuildConfiguration::resolve(file, cli.overrides())?;
    config.validate()?;
    Ok(config)
}

fn exit_code_for_run_result(result: Result<()>, stderr: &mut dyn Write) -> i32 {
    match result {
        Ok(()) => 0,
        Err(err) => {
            write_stderr_line(stderr, format!("error: {err}"));
            1
        }
    }
}
