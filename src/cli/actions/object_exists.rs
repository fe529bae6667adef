use crate::{cli::executor::report_error, storage::Storage};
use colored::Colorize;

/// Report for every key whether it exists
///
/// A missing object is a normal answer, only service failures make the
/// result `false`, and they don't stop the remaining checks.
pub async fn handle<S: Storage>(storage: &S, bucket: &str, keys: &[String]) -> bool {
    let mut ok = true;

    for key in keys {
        match storage.object_exists(bucket, key).await {
            Ok(true) => println!("{} The Object ({key}) exists!", "[Success]".green()),
            Ok(false) => println!("{} The Object ({key}) does not exist!", "[Miss]".yellow()),
            Err(err) => {
                report_error(&err.into());
                ok = false;
            }
        }
    }

    ok
}
