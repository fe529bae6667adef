use crate::storage::{ObjectSummary, Storage};
use anyhow::Result;
use std::fmt;

// padding added to the widest value of every column
const COLUMN_PADDING: usize = 4;

/// Objects printed as three left aligned columns: name, size, last modified
#[derive(Debug)]
pub struct Listing<'a> {
    objects: &'a [ObjectSummary],
}

impl<'a> Listing<'a> {
    #[must_use]
    pub const fn new(objects: &'a [ObjectSummary]) -> Self {
        Self { objects }
    }

    /// Column widths, `max(len) + 4` over all the objects, 0 when there are none
    #[must_use]
    pub fn widths(&self) -> (usize, usize, usize) {
        self.objects.iter().fold((0, 0, 0), |(name, size, time), o| {
            (
                name.max(o.key.len() + COLUMN_PADDING),
                size.max(o.size.to_string().len() + COLUMN_PADDING),
                time.max(o.last_modified.len() + COLUMN_PADDING),
            )
        })
    }
}

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (name, size, time) = self.widths();

        writeln!(f, "{:<name$}{:<size$}{:<time$}", "name", "size", "lastModifiedTime")?;
        writeln!(f, "{:<name$}{:<size$}{:<time$}", "----", "----", "----------------")?;

        for object in self.objects {
            writeln!(
                f,
                "{:<name$}{:<size$}{:<time$}",
                object.key, object.size, object.last_modified
            )?;
        }

        Ok(())
    }
}

/// List every object in the bucket, printed once all pages are in so the
/// columns line up across pages
///
/// # Errors
///
/// Will return `Err` if a page can not be listed
pub async fn head<S: Storage>(storage: &S, bucket: &str) -> Result<()> {
    let mut objects: Vec<ObjectSummary> = Vec::new();
    let mut marker = String::new();

    loop {
        let page = storage
            .list_objects(bucket, None, Some(marker.as_str()))
            .await?;

        objects.extend(page.objects);

        if !page.is_truncated {
            break;
        }

        marker = page.next_marker;
    }

    log::info!("{} objects in {bucket}", objects.len());

    print!("{}", Listing::new(&objects));

    Ok(())
}

/// List the objects under `prefix`, one table per page as pages arrive
///
/// # Errors
///
/// Will return `Err` on the first page that fails
pub async fn prefix_scan<S: Storage>(storage: &S, bucket: &str, prefix: &str) -> Result<()> {
    let mut marker = String::new();
    let mut pages: usize = 0;

    loop {
        let page = storage
            .list_objects(bucket, Some(prefix), Some(marker.as_str()))
            .await?;
        pages += 1;

        print!("{}", Listing::new(&page.objects));

        log::debug!(
            "page {pages}: {} objects, next marker: {:?}",
            page.objects.len(),
            page.next_marker
        );

        if !page.is_truncated {
            break;
        }

        marker = page.next_marker;
    }

    Ok(())
}
