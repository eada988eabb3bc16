//! Cloudflare DNS provider settings

use serde::{Deserialize, Serialize};

pub const NAME: &str = "cloudflare";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CloudflareSettings {
    pub email: String,
    pub key: String,
    pub zone: String,
}
