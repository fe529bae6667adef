use crate::storage::Storage;
use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Download `key` into `dest`, replacing it if it exists
///
/// # Errors
///
/// Will return `Err` if the object can not be downloaded
pub async fn handle<S: Storage>(storage: &S, bucket: &str, key: &str, dest: &Path) -> Result<()> {
    let bytes = storage.get_object(bucket, key, dest).await?;

    log::info!("{key} -> {} ({bytes} bytes)", dest.display());

    println!("{} Get Object : {key}", "[Success]".green());

    Ok(())
}
