//! Amazon S3 + CloudFront provider settings

use serde::{Deserialize, Serialize};

pub const NAME: &str = "aws";

pub const DEFAULT_REGION: &str = "us-east-1";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AwsSettings {
    pub key: String,
    pub secret: String,
    pub region: String,
    pub bucket: String,
    /// CloudFront distribution id; empty when the bucket is served directly.
    pub distribution: String,
    /// Create a dedicated IAM user for the site on `create`.
    #[serde(rename = "new-user")]
    pub new_user: bool,
}

impl Default for AwsSettings {
    fn default() -> Self {
        Self {
            key: String::new(),
            secret: String::new(),
            region: DEFAULT_REGION.to_string(),
            bucket: String::new(),
            distribution: String::new(),
            new_user: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_block_keeps_default_region() {
        let settings: AwsSettings = serde_yaml::from_str("bucket: my-bucket\n").expect("parse");
        assert_eq!(settings.region, DEFAULT_REGION);
        assert_eq!(settings.bucket, "my-bucket");
    }
}
