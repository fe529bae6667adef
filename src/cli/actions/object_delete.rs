use crate::storage::Storage;
use anyhow::Result;
use colored::Colorize;

/// Delete the keys in order, stops on the first failure
///
/// # Errors
///
/// Will return `Err` with the first failed deletion
pub async fn handle<S: Storage>(storage: &S, bucket: &str, keys: &[String]) -> Result<()> {
    for key in keys {
        storage.delete_object(bucket, key).await?;

        println!("{} Delete Object : {key}", "[Success]".green());
    }

    Ok(())
}
