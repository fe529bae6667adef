use crate::{
    cli::{Config, commands, dispatch, executor::Executor, globals::GlobalArgs},
    s3::S3,
};
use anyhow::{Context, Result};
use clap::ArgMatches;
use std::path::{Path, PathBuf};

/// Default config file: ~/.config/osscli/config.json
#[must_use]
pub fn get_config_path() -> PathBuf {
    let home_dir = dirs::home_dir().map_or_else(|| PathBuf::from("/tmp"), |h| h);

    Path::new(&home_dir)
        .join(".config")
        .join("osscli")
        .join("config.json")
}

/// Parse the command line, set up logging and build the executor
///
/// # Errors
///
/// Will return an error if the config file can not be loaded
pub fn start() -> Result<Executor<S3>> {
    // start the command line interface
    let cmd = commands::new(&get_config_path());

    // get the matches, exits on --help, --version and usage errors
    let matches = cmd.get_matches();

    let verbosity_level = match matches.get_count("verbose") {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };

    env_logger::Builder::new()
        .filter_level(verbosity_level)
        .init();

    resolve(&matches)
}

/// Build the executor from the parsed arguments
///
/// # Errors
///
/// Will return an error if the config file can not be loaded or the storage
/// client can not be created
pub fn resolve(matches: &ArgMatches) -> Result<Executor<S3>> {
    // Config file is required
    let config_file = matches
        .get_one::<PathBuf>("config")
        .context("no config file found")?;

    log::info!("config file: {}", config_file.display());

    // load the config file
    let config = Config::new(config_file)?;

    log::debug!("config: {config:#?}");

    let bucket = matches
        .get_one::<String>("bucket")
        .filter(|b| !b.is_empty())
        .context("bucket name missing")?
        .to_string();

    // define global args
    let mut global_args = GlobalArgs::new();

    if let Some(part_size) = matches.get_one::<u64>("part-size") {
        global_args.set_part_size(*part_size);
    }

    if let Some(threshold) = matches.get_one::<u64>("threshold") {
        global_args.set_threshold(*threshold);
    }

    global_args.quiet = matches.get_flag("quiet");

    log::info!(
        "part size: {}, threshold: {}",
        global_args.part_size,
        global_args.threshold
    );

    // create the S3 client
    let s3 = S3::new(config.credentials(), config.region(), config.virtual_hosted)
        .context("unable to create the storage client")?;

    log::debug!("S3:\n{s3}");

    let (operation, operands) = dispatch::dispatch(matches)?;

    log::debug!("globals: {global_args:#?}, operation: {operation}, operands: {operands:?}");

    Ok(Executor::new(s3, bucket, operation, operands, global_args))
}
