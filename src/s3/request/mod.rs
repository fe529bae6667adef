use anyhow::Result;
use bytes::Bytes;
use reqwest::{
    Body, Client, Method, Response,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use std::{collections::BTreeMap, path::Path};
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};
use url::Url;

fn header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap> {
    headers
        .iter()
        .map(|(k, v)| Ok((k.parse::<HeaderName>()?, v.parse::<HeaderValue>()?)))
        .collect::<Result<HeaderMap>>()
}

/// # Errors
///
/// Will return `Err` if can not make the request
pub async fn request(
    client: &Client,
    url: Url,
    method: Method,
    headers: &BTreeMap<String, String>,
    body: Option<Bytes>,
) -> Result<Response> {
    log::debug!("{method} {url}");

    let request = client.request(method, url).headers(header_map(headers)?);

    let request = match body {
        Some(body) => request.body(body),
        None => request,
    };

    Ok(request.send().await?)
}

/// Stream the file as the request body
///
/// # Errors
///
/// Will return `Err` if can not open the file or make the request
pub async fn upload(
    client: &Client,
    url: Url,
    method: Method,
    headers: &BTreeMap<String, String>,
    file: &Path,
) -> Result<Response> {
    log::debug!("{method} {url} < {}", file.display());

    let file = File::open(file).await?;
    let stream = FramedRead::new(file, BytesCodec::new());
    let body = Body::wrap_stream(stream);

    Ok(client
        .request(method, url)
        .headers(header_map(headers)?)
        .body(body)
        .send()
        .await?)
}
