use crate::{
    cli::{executor::report_error, globals::GlobalArgs, progressbar::Bar},
    storage::{Acl, Storage},
    transfer::{Part, PartResults, Strategy, UploadPlan, plan},
};
use anyhow::{Context, Result, anyhow};
use bytes::Bytes;
use colored::Colorize;
use futures::stream::{self, StreamExt};
use std::{io::SeekFrom, path::Path};
use tokio::{
    fs::{self, File},
    io::{AsyncReadExt, AsyncSeekExt},
};

/// Upload `src` under `key`, in parts when the file reaches the threshold
///
/// # Errors
///
/// Will return `Err` if the file can not be read, needs too many parts, or
/// the upload can not be started or completed
pub async fn handle<S: Storage>(
    storage: &S,
    bucket: &str,
    key: &str,
    src: &Path,
    globals: &GlobalArgs,
) -> Result<()> {
    let metadata = fs::metadata(src)
        .await
        .with_context(|| format!("could not read file: {}", src.display()))?;

    if !metadata.is_file() {
        return Err(anyhow!("not a file: {}", src.display()));
    }

    match plan(metadata.len(), globals.threshold, globals.part_size)? {
        Strategy::Single => {
            let etag = storage.put_object(bucket, key, src).await?;

            log::info!("ETag: {etag}");

            println!("{} Put Object : {key}", "[Success]".green());

            Ok(())
        }

        Strategy::Multipart(upload_plan) => {
            multipart(storage, bucket, key, src, &upload_plan, globals.quiet).await
        }
    }
}

async fn multipart<S: Storage>(
    storage: &S,
    bucket: &str,
    key: &str,
    src: &Path,
    upload_plan: &UploadPlan,
    quiet: bool,
) -> Result<()> {
    // nothing exists server side if this fails
    let upload_id = storage.initiate_multipart_upload(bucket, key).await?;

    log::info!("upload id: {upload_id}");

    let bar = Bar::new(upload_plan.file_size(), quiet);

    let results = upload_parts(
        storage,
        bucket,
        key,
        &upload_id,
        src,
        upload_plan.parts(),
        &bar,
    )
    .await;

    bar.finish();

    if !results.failed().is_empty() {
        let warning = format!(
            "{} of {} parts failed {:?}, completing with the {} uploaded parts",
            results.failed().len(),
            upload_plan.part_count(),
            results.failed(),
            results.uploaded()
        );
        log::warn!("{warning}");
        eprintln!("{} {warning}", "[Warning]".yellow());
    }

    match storage
        .complete_multipart_upload(bucket, key, &upload_id, &results.completed(), Acl::Private)
        .await
    {
        Ok(etag) => {
            log::info!("ETag: {etag}");

            println!("{} MultipartUpload Object : {key}", "[Success]".green());

            Ok(())
        }

        Err(err) => {
            // the session is left on the server
            eprintln!(
                "{} upload id: {upload_id} was not completed",
                "[Error]".red()
            );
            Err(err.into())
        }
    }
}

/// Upload the parts one after the other, a failed part is reported and the
/// next one is tried
async fn upload_parts<S: Storage>(
    storage: &S,
    bucket: &str,
    key: &str,
    upload_id: &str,
    src: &Path,
    parts: &[Part],
    bar: &Bar,
) -> PartResults {
    stream::iter(parts)
        .fold(PartResults::default(), move |results, part| async move {
            match upload_part(storage, bucket, key, upload_id, src, part).await {
                Ok(etag) => {
                    bar.inc(part.get_chunk());
                    results.record(part.get_number(), etag)
                }
                Err(err) => {
                    bar.suspend(|| report_error(&err));
                    results.fail(part.get_number())
                }
            }
        })
        .await
}

async fn upload_part<S: Storage>(
    storage: &S,
    bucket: &str,
    key: &str,
    upload_id: &str,
    src: &Path,
    part: &Part,
) -> Result<String> {
    let body = read_part(src, part)
        .await
        .with_context(|| format!("could not read part {}", part.get_number()))?;

    log::debug!(
        "part: {}, seek: {}, chunk: {}",
        part.get_number(),
        part.get_seek(),
        part.get_chunk()
    );

    Ok(storage
        .upload_part(bucket, key, upload_id, part.get_number(), body)
        .await?)
}

// the file is opened per part and closed once the part is read
async fn read_part(src: &Path, part: &Part) -> Result<Bytes> {
    let mut file = File::open(src).await?;

    file.seek(SeekFrom::Start(part.get_seek())).await?;

    let mut buf = vec![0; usize::try_from(part.get_chunk())?];

    file.read_exact(&mut buf).await?;

    Ok(Bytes::from(buf))
}
