use secrecy::{ExposeSecret, SecretString};

#[derive(Debug)]
pub struct Credentials {
    // AccessKeyId
    key: String,
    // AccessKeySecret
    secret: SecretString,
}

impl Credentials {
    #[must_use]
    pub fn new(access: &str, secret: &SecretString) -> Self {
        Self {
            key: access.to_string(),
            secret: SecretString::new(secret.expose_secret().into()),
        }
    }

    /// Get a reference to the access key ID.
    #[must_use]
    pub fn access_key_id(&self) -> &str {
        &self.key
    }

    /// Get a reference to the secret access key.
    #[must_use]
    pub fn access_key_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}
