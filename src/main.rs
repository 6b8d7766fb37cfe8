use anyhow::{Context, Result};
use clap::Parser;
use spdx_convert::{cli, config, convert, reporter, ConvertError, ConvertOptions};
use std::process;

fn main() {
    let cli = cli::Cli::parse();

    let code = match cli.command {
        cli::Commands::Convert(args) => {
            let dry_run = args.dry_run;
            match convert_command(args) {
                Ok(()) => 0,
                Err(err) => report_failure(&err, dry_run),
            }
        }
    };

    process::exit(code);
}

fn convert_command(args: cli::ConvertArgs) -> Result<()> {
    init_logging(args.verbose);

    let mut config =
        config::load_config(args.config.as_deref()).context("Failed to load configuration")?;
    config.ignored_dirs.extend(args.ignore_dirs.iter().cloned());

    let mut preserve_spdx = args.preserve_spdx.clone();
    preserve_spdx.extend(config.preserve_spdx.iter().cloned());

    let options = ConvertOptions {
        default_copyright: args.default_file_copyright.clone(),
        preserve_spdx,
        dry_run: args.dry_run,
    };

    let root = convert::resolve_root(&args.path, &options)?;
    log::debug!("Processing {} (dry run: {})", root.display(), options.dry_run);
    if !options.preserve_spdx.is_empty() {
        log::debug!("Preserving holders: {:?}", options.preserve_spdx);
    }

    let converter = convert::Converter::new(&root, &config, options)?;

    for dir in &config.ignored_dirs {
        println!("{}", reporter::format_ignored_dir(dir));
    }

    let report = converter.run(reporter::print_file)?;
    reporter::print_completion(&report);

    reporter::generate_summary(&report, args.format, args.output.as_deref())
        .context("Failed to generate summary")?;

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Print a failure and map it to the process exit status
fn report_failure(err: &anyhow::Error, dry_run: bool) -> i32 {
    match err.downcast_ref::<ConvertError>() {
        Some(ConvertError::InvalidArguments(reason)) => {
            eprintln!("Error: {}\n", reason);
            eprintln!("{}", reporter::WORKFLOW_HINT);
            2
        }
        Some(convert_err) => {
            reporter::print_abort(convert_err, dry_run);
            convert_err.exit_code()
        }
        None => {
            eprintln!("Error: {:#}", err);
            1
        }
    }
}
