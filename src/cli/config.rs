use crate::s3::{Credentials, Region};
use anyhow::{Context, Result, anyhow};
use secrecy::SecretString;
use serde::Deserialize;
use std::{fs::File, path::Path};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ConfigFile {
    #[serde(default)]
    endpoint: String,
    #[serde(default)]
    access_key_id: String,
    #[serde(default)]
    access_key_secret: String,
    #[serde(default)]
    region: Option<String>,
    #[serde(default)]
    virtual_hosted: bool,
}

/// Connection settings, loaded once
#[derive(Debug)]
pub struct Config {
    pub endpoint: String,
    pub access_key_id: String,
    pub access_key_secret: SecretString,
    pub region: Option<String>,
    pub virtual_hosted: bool,
}

impl Config {
    /// # Errors
    ///
    /// Will return `Err` if the file can not be read or parsed, or a required
    /// field is missing or empty
    pub fn new(config_path: &Path) -> Result<Self> {
        let file = File::open(config_path)
            .with_context(|| format!("unable to open config file: {}", config_path.display()))?;

        let config: ConfigFile =
            serde_json::from_reader(file).context("unable to parse config file")?;

        for (field, value) in [
            ("Endpoint", &config.endpoint),
            ("AccessKeyId", &config.access_key_id),
            ("AccessKeySecret", &config.access_key_secret),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow!(
                    "\"{field}\" missing or empty in config file: {}",
                    config_path.display()
                ));
            }
        }

        Ok(Self {
            endpoint: config.endpoint,
            access_key_id: config.access_key_id,
            access_key_secret: SecretString::new(config.access_key_secret.into_boxed_str()),
            region: config.region,
            virtual_hosted: config.virtual_hosted,
        })
    }

    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.access_key_id, &self.access_key_secret)
    }

    #[must_use]
    pub fn region(&self) -> Region {
        Region::new(self.region.as_deref(), &self.endpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONF: &str = r#"{
    "Endpoint": "oss-cn-hangzhou.aliyuncs.com",
    "AccessKeyId": "XXX",
    "AccessKeySecret": "YYY"
}"#;

    const CONF_FULL: &str = r#"{
    "Endpoint": "http://127.0.0.1:9000",
    "AccessKeyId": "XXX",
    "AccessKeySecret": "YYY",
    "Region": "oss-cn-hangzhou",
    "VirtualHosted": true
}"#;

    fn config_file(content: &str) -> NamedTempFile {
        let mut tmp_file = NamedTempFile::new().unwrap();
        tmp_file.write_all(content.as_bytes()).unwrap();
        tmp_file
    }

    #[test]
    fn test_config() {
        let tmp_file = config_file(CONF);
        let c = Config::new(tmp_file.path()).unwrap();
        assert_eq!(c.endpoint, "oss-cn-hangzhou.aliyuncs.com");
        assert_eq!(c.access_key_id, "XXX");
        assert_eq!(c.credentials().access_key_secret(), "YYY");
        assert_eq!(c.region, None);
        assert!(!c.virtual_hosted);
        assert_eq!(c.region().name(), "us-east-1");
    }

    #[test]
    fn test_config_full() {
        let tmp_file = config_file(CONF_FULL);
        let c = Config::new(tmp_file.path()).unwrap();
        assert!(c.virtual_hosted);
        assert_eq!(c.region().name(), "oss-cn-hangzhou");
        assert_eq!(c.region().endpoint(), "http://127.0.0.1:9000");
        assert_eq!(c.credentials().access_key_id(), "XXX");
    }

    #[test]
    fn test_config_missing_field() {
        let tmp_file = config_file(r#"{"Endpoint": "e", "AccessKeyId": "XXX"}"#);
        let err = Config::new(tmp_file.path()).unwrap_err();
        assert!(err.to_string().contains("AccessKeySecret"));
    }

    #[test]
    fn test_config_empty_field() {
        let tmp_file =
            config_file(r#"{"Endpoint": "", "AccessKeyId": "XXX", "AccessKeySecret": "YYY"}"#);
        let err = Config::new(tmp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Endpoint"));
    }

    #[test]
    fn test_config_invalid_json() {
        let tmp_file = config_file("Endpoint: yaml");
        assert!(Config::new(tmp_file.path()).is_err());
    }

    #[test]
    fn test_config_not_found() {
        assert!(Config::new(Path::new("/does/not/exist/config.json")).is_err());
    }

    #[test]
    fn test_debug_hides_secret() {
        let tmp_file = config_file(CONF);
        let c = Config::new(tmp_file.path()).unwrap();
        assert!(!format!("{c:?}").contains("YYY"));
    }
}
