//! Runs one operation against the storage service

use crate::{
    cli::{
        actions::{
            Operation, Request, UsageError, bucket, object_delete, object_exists, object_get,
            object_list, object_put,
        },
        globals::GlobalArgs,
    },
    storage::{ServiceError, Storage},
};
use anyhow::Result;
use colored::Colorize;

#[derive(Debug)]
pub struct Executor<S: Storage> {
    storage: S,
    bucket: String,
    operation: Operation,
    operands: Vec<String>,
    globals: GlobalArgs,
}

impl<S: Storage> Executor<S> {
    #[must_use]
    pub const fn new(
        storage: S,
        bucket: String,
        operation: Operation,
        operands: Vec<String>,
        globals: GlobalArgs,
    ) -> Self {
        Self {
            storage,
            bucket,
            operation,
            operands,
            globals,
        }
    }

    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    #[must_use]
    pub const fn operation(&self) -> Operation {
        self.operation
    }

    #[must_use]
    pub fn operands(&self) -> &[String] {
        &self.operands
    }

    #[must_use]
    pub const fn globals(&self) -> &GlobalArgs {
        &self.globals
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Run the operation, `true` only if everything succeeded
    ///
    /// Failures are printed, never returned. The executor (and the storage
    /// client it owns) is dropped once the operation is done.
    pub async fn execute(self) -> bool {
        log::debug!(
            "bucket: {}, operation: {}, operands: {:?}",
            self.bucket,
            self.operation,
            self.operands
        );

        match self.run().await {
            Ok(ok) => ok,
            Err(err) => {
                report_error(&err);
                false
            }
        }
    }

    async fn run(&self) -> Result<bool> {
        let request = self.operation.bind(&self.operands)?;

        match request {
            Request::Create => bucket::create(&self.storage, &self.bucket).await?,

            Request::Head => object_list::head(&self.storage, &self.bucket).await?,

            Request::Get { key, path } => {
                object_get::handle(&self.storage, &self.bucket, key, path).await?;
            }

            Request::Put { key, path } => {
                object_put::handle(&self.storage, &self.bucket, key, path, &self.globals).await?;
            }

            Request::Delete { keys } => {
                object_delete::handle(&self.storage, &self.bucket, keys).await?;
            }

            Request::PrefixScan { prefix } => {
                object_list::prefix_scan(&self.storage, &self.bucket, prefix).await?;
            }

            Request::ExistenceCheck { keys } => {
                return Ok(object_exists::handle(&self.storage, &self.bucket, keys).await);
            }
        }

        Ok(true)
    }
}

/// Print an error, service errors with their code, message and request id
pub fn report_error(err: &anyhow::Error) {
    if let Some(service_error) = err.downcast_ref::<ServiceError>() {
        eprintln!(
            "{}\ncode      :{}\nmessage   :{}\nrequestId :{}",
            "[Error]".red(),
            service_error.code,
            service_error.message,
            service_error.request_id
        );
    } else if let Some(usage_error) = err.downcast_ref::<UsageError>() {
        eprintln!(
            "{} {usage_error}, For more information try {}",
            "[Error]".red(),
            "--help".green()
        );
    } else {
        eprintln!("{} {err:#}", "[Error]".red());
    }
}
