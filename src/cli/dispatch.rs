use crate::cli::actions::Operation;
use anyhow::{Context, Result};
use clap::ArgMatches;

/// Map a method name (case-insensitive) to its operation, unknown names map to `Operation::None`
#[must_use]
pub fn operation(method: &str) -> Operation {
    match method.to_lowercase().as_str() {
        "create" => Operation::Create,
        "head" => Operation::Head,
        "get" => Operation::Get,
        "put" => Operation::Put,
        "delete" => Operation::Delete,
        "exists" | "ping" => Operation::ExistenceCheck,
        "find" | "prefix" => Operation::PrefixScan,
        _ => Operation::None,
    }
}

/// Return the operation and its operands based on the positional arguments
///
/// # Errors
///
/// Will return `Err` if the method is missing
pub fn dispatch(matches: &ArgMatches) -> Result<(Operation, Vec<String>)> {
    let method = matches
        .get_one::<String>("method")
        .context("method missing")?;

    let operation = operation(method);

    if operation == Operation::None {
        log::warn!("unknown method: {method}");
    }

    let operands: Vec<String> = matches
        .get_many::<String>("operands")
        .unwrap_or_default()
        .cloned()
        .collect();

    Ok((operation, operands))
}
