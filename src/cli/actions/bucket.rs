use crate::storage::{Acl, Storage};
use anyhow::Result;
use colored::Colorize;

/// Create the bucket, always private
///
/// # Errors
///
/// Will return `Err` if the bucket can not be created
pub async fn create<S: Storage>(storage: &S, bucket: &str) -> Result<()> {
    storage.create_bucket(bucket, Acl::Private).await?;

    println!("{} Create Bucket : {bucket}", "[Success]".green());

    Ok(())
}
