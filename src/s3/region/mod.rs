use anyhow::{Context, Result, anyhow};
use url::Url;

/// Default signing region, used by MinIO and AWS us-east-1
pub const DEFAULT_REGION: &str = "us-east-1";

/// Signing region and the endpoint that serves it
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Region {
    name: String,
    endpoint: String,
}

impl Region {
    /// `endpoint` may include the scheme, `https` is used when missing
    #[must_use]
    pub fn new(name: Option<&str>, endpoint: &str) -> Self {
        Self {
            name: name
                .filter(|n| !n.is_empty())
                .unwrap_or(DEFAULT_REGION)
                .to_string(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// # Errors
    ///
    /// Will return `Err` if the endpoint is not a valid URL
    pub fn url(&self) -> Result<Url> {
        let endpoint = if self.endpoint.contains("://") {
            self.endpoint.clone()
        } else {
            format!("https://{}", self.endpoint)
        };

        let url = Url::parse(&endpoint).with_context(|| format!("invalid endpoint: {endpoint}"))?;

        if url.host_str().is_none() {
            return Err(anyhow!("invalid endpoint, missing host: {endpoint}"));
        }

        Ok(url)
    }
}
