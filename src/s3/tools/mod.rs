use anyhow::Result;
use base64ct::{Base64, Encoding};
use futures::stream::TryStreamExt;
use ring::{
    digest,
    digest::{Context, SHA256},
    hmac,
};
use std::{fmt::Write, path::Path};
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};

/// Compute the SHA256 and MD5 digests of a file, and its length
///
/// # Errors
///
/// Will return `Err` if can not open or read the file
pub async fn sha256_md5_digest(file_path: &Path) -> Result<(digest::Digest, md5::Digest, usize)> {
    let file = File::open(file_path).await?;
    let mut stream = FramedRead::with_capacity(file, BytesCodec::new(), 1024 * 256);
    let mut context_sha = Context::new(&SHA256);
    let mut context_md5 = md5::Context::new();
    let mut length: usize = 0;
    while let Some(bytes) = stream.try_next().await? {
        context_sha.update(&bytes);
        context_md5.consume(&bytes);
        length += bytes.len();
    }
    Ok((context_sha.finish(), context_md5.finalize(), length))
}

#[must_use]
pub fn sha256_digest(input: impl AsRef<[u8]>) -> digest::Digest {
    digest::digest(&digest::SHA256, input.as_ref())
}

#[must_use]
pub fn sha256_digest_hex(input: impl AsRef<[u8]>) -> String {
    write_hex_bytes(sha256_digest(input).as_ref())
}

#[must_use]
pub fn md5_digest(input: impl AsRef<[u8]>) -> md5::Digest {
    md5::compute(input)
}

#[must_use]
pub fn base64(input: impl AsRef<[u8]>) -> String {
    Base64::encode_string(input.as_ref())
}

#[must_use]
pub fn sha256_hmac(key: &[u8], msg: &[u8]) -> hmac::Tag {
    let s_key = hmac::Key::new(hmac::HMAC_SHA256, key);
    hmac::sign(&s_key, msg)
}

#[must_use]
pub fn write_hex_bytes(bytes: &[u8]) -> String {
    bytes.iter().fold(String::new(), |mut s, byte| {
        let _ = write!(&mut s, "{byte:02x}");
        s
    })
}
