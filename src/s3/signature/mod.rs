//!  S3 signature v4
//! <https://docs.aws.amazon.com/AmazonS3/latest/API/sig-v4-header-based-auth.html>

use crate::s3::{
    S3,
    tools::{base64, sha256_digest_hex, sha256_hmac, write_hex_bytes},
};
use anyhow::{Result, anyhow};
use chrono::prelude::{DateTime, Utc};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::Method;
use ring::hmac;
use std::collections::BTreeMap;
use url::Url;

static APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug)]
pub struct Signature<'a> {
    s3: &'a S3,
    // service name used in the credential scope
    service: &'a str,
    // The HTTPRequestMethod
    http_method: Method,
    // The HTTP request headers
    headers: BTreeMap<String, String>,
    // current date & time
    datetime: DateTime<Utc>,
}

impl<'a> Signature<'a> {
    #[must_use]
    pub fn new(s3: &'a S3, service: &'a str, http_method: Method) -> Self {
        Self {
            s3,
            service,
            http_method,
            headers: BTreeMap::new(),
            datetime: Utc::now(),
        }
    }

    /// Pin the request time, used to reproduce known signatures
    #[cfg(test)]
    #[must_use]
    pub const fn with_datetime(mut self, datetime: DateTime<Utc>) -> Self {
        self.datetime = datetime;
        self
    }

    /// Returns the headers to send, including the `authorization` header
    ///
    /// # Errors
    ///
    /// Will return `Err` if the url has no host
    pub fn sign(
        &mut self,
        url: &Url,
        digest: &[u8],
        md5: Option<&[u8]>,
        length: Option<usize>,
        custom_headers: Option<BTreeMap<&str, &str>>,
    ) -> Result<BTreeMap<String, String>> {
        let current_date = self.datetime.format("%Y%m%d").to_string();
        let current_datetime = self.datetime.format("%Y%m%dT%H%M%SZ").to_string();
        let digest = write_hex_bytes(digest);

        self.add_header("host", &host_header(url)?);
        self.add_header("x-amz-date", &current_datetime);
        self.add_header("User-Agent", APP_USER_AGENT);
        self.add_header("x-amz-content-sha256", &digest);

        if let Some(length) = length {
            self.add_header("content-length", &length.to_string());
        }

        if let Some(md5) = md5 {
            self.add_header("Content-MD5", &base64(md5));
        }

        if let Some(custom_headers) = custom_headers {
            for (k, v) in custom_headers {
                self.add_header(k, v);
            }
        }

        let signed_headers = signed_headers(&self.headers);

        // https://docs.aws.amazon.com/general/latest/gr/sigv4_signing.html
        // 1. Create a canonical request for Signature Version 4
        //
        //     CanonicalRequest =
        //         HTTPRequestMethod + '\n' +
        //         CanonicalURI + '\n' +
        //         CanonicalQueryString + '\n' +
        //         CanonicalHeaders + '\n' +
        //         SignedHeaders + '\n' +
        //         HexEncode(Hash(RequestPayload))
        let canonical_request = format!(
            "{}\n{}\n{}\n{}\n{}\n{}",
            self.http_method.as_str(),
            canonical_uri(url),
            canonical_query_string(url),
            canonical_headers(&self.headers),
            signed_headers,
            digest
        );

        log::debug!("canonical request:\n{canonical_request}");

        // 2. Create a string to sign for Signature Version 4
        //
        //     StringToSign =
        //         Algorithm + \n +
        //         RequestDateTime + \n +
        //         CredentialScope + \n +
        //         HashedCanonicalRequest
        let scope = format!(
            "{}/{}/{}/aws4_request",
            current_date,
            self.s3.region().name(),
            self.service
        );
        let string_to_sign = string_to_sign(
            &current_datetime,
            &scope,
            &sha256_digest_hex(&canonical_request),
        );

        // 3. Calculate the signature for AWS Signature Version 4
        let signing_key = signature_key(
            self.s3.credentials().access_key_secret(),
            &current_date,
            self.s3.region().name(),
            self.service,
        );
        let signature = sha256_hmac(signing_key.as_ref(), string_to_sign.as_bytes());

        // 4. Add the signature to the HTTP request
        let authorization_header = format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            self.s3.credentials().access_key_id(),
            scope,
            signed_headers,
            write_hex_bytes(signature.as_ref())
        );
        self.add_header("Authorization", &authorization_header);

        Ok(self.headers.clone())
    }

    pub fn add_header(&mut self, key: &str, value: &str) {
        self.headers
            .insert(key.to_ascii_lowercase(), value.trim().to_string());
    }
}

// host[:port], the port only when it is not the default one for the scheme
fn host_header(url: &Url) -> Result<String> {
    let host = url
        .host_str()
        .ok_or_else(|| anyhow!("missing host in url: {url}"))?;
    Ok(url
        .port()
        .map_or_else(|| host.to_string(), |port| format!("{host}:{port}")))
}

// CanonicalURI is the URI-encoded version of the absolute path component of the URI
//
// URI encode every byte except the unreserved characters:
// 'A'-'Z', 'a'-'z', '0'-'9', '-', '.', '_', and '~'.
#[must_use]
pub fn canonical_uri(uri: &Url) -> String {
    const FRAGMENT: &AsciiSet = &NON_ALPHANUMERIC
        .remove(b'/')
        .remove(b'-')
        .remove(b'.')
        .remove(b'_')
        .remove(b'~');

    // the url crate already percent-encodes the path, decode first to avoid double encoding
    let path = percent_encoding::percent_decode_str(uri.path()).decode_utf8_lossy();
    utf8_percent_encode(&path, FRAGMENT).to_string()
}

// CanonicalQueryString specifies the URI-encoded query string parameters, sorted by key name
#[must_use]
pub fn canonical_query_string(uri: &Url) -> String {
    const FRAGMENT: &AsciiSet = &NON_ALPHANUMERIC
        .remove(b'-')
        .remove(b'.')
        .remove(b'_')
        .remove(b'~');
    let mut pairs = uri
        .query_pairs()
        .map(|(key, value)| {
            format!(
                "{}={}",
                utf8_percent_encode(&key, FRAGMENT),
                utf8_percent_encode(&value, FRAGMENT)
            )
        })
        .collect::<Vec<String>>();
    pairs.sort();
    pairs.join("&")
}

fn canonical_headers(headers: &BTreeMap<String, String>) -> String {
    headers.iter().fold(String::new(), |mut canonical, (k, v)| {
        canonical.push_str(k);
        canonical.push(':');
        canonical.push_str(v);
        canonical.push('\n');
        canonical
    })
}

// Create a string to sign for Signature Version 4
// https://docs.aws.amazon.com/general/latest/gr/sigv4-create-string-to-sign.html
#[must_use]
pub fn string_to_sign(timestamp: &str, scope: &str, hashed_canonical_request: &str) -> String {
    format!("AWS4-HMAC-SHA256\n{timestamp}\n{scope}\n{hashed_canonical_request}")
}

fn signed_headers(headers: &BTreeMap<String, String>) -> String {
    headers
        .keys()
        .map(String::as_str)
        .collect::<Vec<&str>>()
        .join(";")
}

fn signature_key(secret_access_key: &str, date: &str, region: &str, service: &str) -> hmac::Tag {
    let k_date = sha256_hmac(
        format!("AWS4{secret_access_key}").as_bytes(),
        date.as_bytes(),
    );
    let k_region = sha256_hmac(k_date.as_ref(), region.as_bytes());
    let k_service = sha256_hmac(k_region.as_ref(), service.as_bytes());
    sha256_hmac(k_service.as_ref(), b"aws4_request")
}
