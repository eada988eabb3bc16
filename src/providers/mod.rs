//! Deployment providers and the registry of their settings
//!
//! Each provider owns a typed settings object. The registry stores them
//! behind [`ProviderSettings`] so the resolver can layer configuration blocks
//! onto any provider through the YAML data model.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::{Mapping, Value};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;

pub mod aws;
pub mod cloudflare;

pub use aws::AwsSettings;
pub use cloudflare::CloudflareSettings;

/// Type-erased provider settings.
pub trait ProviderSettings: fmt::Debug + Send {
    /// Encode the current settings as a YAML value.
    fn to_yaml(&self) -> Result<Value, serde_yaml::Error>;

    /// Decode YAML text into a new settings object of the same concrete type.
    ///
    /// Decoding from text lets plain scalars such as `2024` fill string fields.
    fn decode(&self, text: &str) -> Result<Box<dyn ProviderSettings>, serde_yaml::Error>;

    fn as_any(&self) -> &dyn Any;
}

impl<T> ProviderSettings for T
where
    T: Serialize + DeserializeOwned + fmt::Debug + Send + 'static,
{
    fn to_yaml(&self) -> Result<Value, serde_yaml::Error> {
        serde_yaml::to_value(self)
    }

    fn decode(&self, text: &str) -> Result<Box<dyn ProviderSettings>, serde_yaml::Error> {
        let settings: T = serde_yaml::from_str(text)?;
        Ok(Box::new(settings))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Provider name to current settings.
///
/// Populated before resolution; resolution overwrites entries in place but
/// never adds or removes provider names.
#[derive(Debug, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Box<dyn ProviderSettings>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in provider at its default settings.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(aws::NAME, AwsSettings::default());
        registry.register(cloudflare::NAME, CloudflareSettings::default());
        registry
    }

    /// Add or replace a provider, returning the previous settings if any.
    pub fn register<S>(&mut self, name: &str, settings: S) -> Option<Box<dyn ProviderSettings>>
    where
        S: ProviderSettings + 'static,
    {
        self.providers.insert(name.to_string(), Box::new(settings))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.providers.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&dyn ProviderSettings> {
        self.providers.get(name).map(|settings| settings.as_ref())
    }

    /// Borrow a provider's settings as their concrete type.
    pub fn get_as<S: Any>(&self, name: &str) -> Option<&S> {
        self.get(name).and_then(|settings| settings.as_any().downcast_ref::<S>())
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.providers.keys()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Replace the settings of an already registered provider.
    ///
    /// Returns `false` and leaves the registry untouched for unknown names.
    pub(crate) fn replace(&mut self, name: &str, settings: Box<dyn ProviderSettings>) -> bool {
        match self.providers.get_mut(name) {
            Some(slot) => {
                *slot = settings;
                true
            }
            None => false,
        }
    }

    /// Encode the whole registry as a mapping of provider name to settings.
    pub fn to_yaml(&self) -> Result<Value, serde_yaml::Error> {
        let mut map = Mapping::new();
        for (name, settings) in &self.providers {
            map.insert(Value::String(name.clone()), settings.to_yaml()?);
        }
        Ok(Value::Mapping(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry_has_known_providers() {
        let registry = ProviderRegistry::builtin();
        assert_eq!(registry.names().cloned().collect::<Vec<_>>(), vec!["aws", "cloudflare"]);
        let aws = registry.get_as::<AwsSettings>("aws").expect("aws settings");
        assert_eq!(aws.region, "us-east-1");
    }

    #[test]
    fn test_get_as_wrong_type_is_none() {
        let registry = ProviderRegistry::builtin();
        assert!(registry.get_as::<CloudflareSettings>("aws").is_none());
    }

    #[test]
    fn test_decode_keeps_concrete_type() {
        let registry = ProviderRegistry::builtin();
        let current = registry.get("aws").expect("aws");
        let decoded = current.decode("region: eu-west-1\nbucket: site\n").expect("decode");
        let aws = decoded.as_any().downcast_ref::<AwsSettings>().expect("aws type");
        assert_eq!(aws.region, "eu-west-1");
        assert_eq!(aws.bucket, "site");
    }

    #[test]
    fn test_decode_reads_plain_scalars_as_strings() {
        let registry = ProviderRegistry::builtin();
        let current = registry.get("cloudflare").expect("cloudflare");
        let decoded = current.decode("zone: 12345\n").expect("decode");
        let cloudflare = decoded.as_any().downcast_ref::<CloudflareSettings>().expect("cf type");
        assert_eq!(cloudflare.zone, "12345");
    }

    #[test]
    fn test_replace_rejects_unknown_names() {
        let mut registry = ProviderRegistry::new();
        assert!(!registry.replace("aws", Box::new(AwsSettings::default())));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_registry_renders_as_mapping() {
        let registry = ProviderRegistry::builtin();
        let rendered = serde_yaml::to_string(&registry.to_yaml().expect("yaml")).expect("render");
        assert!(rendered.contains("aws:"));
        assert!(rendered.contains("region: us-east-1"));
        assert!(rendered.contains("cloudflare:"));
    }
}
