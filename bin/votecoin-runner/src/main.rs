//! Command line tool for generating token params and replaying operation
//! scripts against a fresh token.
//!
//! # Warning
//!
//! This tool is intended for testing and development only.

mod args;
mod report;
mod script;
mod util;

use std::process;

use votecoin_common::logging::{self, FileLoggingConfig, LoggerConfig};

use util::exec_subc;

fn main() {
    let args: args::Args = argh::from_env();
    let inner = || -> anyhow::Result<()> {
        init_logging(&args)?;
        exec_subc(args.subc)?;
        Ok(())
    };
    if let Err(e) = inner() {
        eprintln!("ERROR\n{e:?}");
        process::exit(1);
    }
}

fn init_logging(args: &args::Args) -> anyhow::Result<()> {
    let mut config = LoggerConfig::new("votecoin-runner".to_string())
        .with_service_version(env!("CARGO_PKG_VERSION").to_string())
        .with_json_logging(args.json_logs)
        .with_stderr(true);

    for directive in &args.log_directive {
        config = config.with_directive(directive);
    }

    if let Some(dir) = &args.log_dir {
        config = config.with_file_logging(FileLoggingConfig::new(
            dir.clone(),
            "votecoin-runner".to_string(),
        ));
    }

    logging::init(config)?;
    Ok(())
}
