//! Per-operation configuration, read from the environment
//!
//! Each operation has a fixed set of required `OVH_*` parameters. They
//! are all checked up front, before any network call, and every absent
//! or empty one is reported together in a single
//! `MissingConfiguration` error.

use nimbus_cloud::{CloudError, Result};
use nimbus_cloud_ovh::Credentials;

pub const ENDPOINT: &str = "OVH_ENDPOINT";
pub const APPLICATION_KEY: &str = "OVH_APPLICATION_KEY";
pub const APPLICATION_SECRET: &str = "OVH_APPLICATION_SECRET";
pub const CONSUMER_KEY: &str = "OVH_CONSUMER_KEY";
pub const SERVICE_NAME: &str = "OVH_SERVICE_NAME";
pub const INSTANCE_NAME: &str = "OVH_INSTANCE_NAME";
pub const SSH_KEY: &str = "OVH_SSH_KEY";
pub const FLAVOR: &str = "OVH_FLAVOR";
pub const IMAGE: &str = "OVH_IMAGE";
pub const REGION: &str = "OVH_REGION";

/// Parameters every operation needs: the credential set and the
/// project (service) name.
#[derive(Debug, Clone)]
pub struct Settings {
    pub credentials: Credentials,
    pub service_name: String,
}

/// Settings for operations that act on an existing instance.
#[derive(Debug, Clone)]
pub struct InstanceSettings {
    pub base: Settings,
    pub instance_name: String,
}

/// Settings for the create operation, which also names the resources
/// to resolve.
#[derive(Debug, Clone)]
pub struct CreateSettings {
    pub base: Settings,
    pub instance_name: String,
    pub region: String,
    pub flavor: String,
    pub image: String,
    pub ssh_key: String,
}

/// Collects every missing parameter instead of failing on the first.
struct EnvReader {
    missing: Vec<String>,
}

impl EnvReader {
    fn new() -> Self {
        Self { missing: Vec::new() }
    }

    fn require(&mut self, name: &str) -> String {
        match std::env::var(name) {
            Ok(value) if !value.trim().is_empty() => value,
            _ => {
                self.missing.push(name.to_string());
                String::new()
            }
        }
    }

    /// Like `require`, but a CLI-supplied value takes precedence over
    /// the environment.
    fn require_or(&mut self, name: &str, override_value: Option<&str>) -> String {
        match override_value {
            Some(value) if !value.trim().is_empty() => value.to_string(),
            _ => self.require(name),
        }
    }

    fn finish(self) -> Result<()> {
        if self.missing.is_empty() {
            Ok(())
        } else {
            Err(CloudError::MissingConfiguration {
                missing: self.missing,
            })
        }
    }
}

impl Settings {
    fn read(reader: &mut EnvReader) -> Settings {
        Settings {
            credentials: Credentials {
                endpoint: reader.require(ENDPOINT),
                application_key: reader.require(APPLICATION_KEY),
                application_secret: reader.require(APPLICATION_SECRET),
                consumer_key: reader.require(CONSUMER_KEY),
            },
            service_name: reader.require(SERVICE_NAME),
        }
    }

    pub fn from_env() -> Result<Settings> {
        let mut reader = EnvReader::new();
        let settings = Settings::read(&mut reader);
        reader.finish()?;
        Ok(settings)
    }
}

impl InstanceSettings {
    pub fn from_env(instance_override: Option<&str>) -> Result<InstanceSettings> {
        let mut reader = EnvReader::new();
        let base = Settings::read(&mut reader);
        let instance_name = reader.require_or(INSTANCE_NAME, instance_override);
        reader.finish()?;
        Ok(InstanceSettings {
            base,
            instance_name,
        })
    }
}

impl CreateSettings {
    pub fn from_env() -> Result<CreateSettings> {
        let mut reader = EnvReader::new();
        let base = Settings::read(&mut reader);
        let instance_name = reader.require(INSTANCE_NAME);
        let ssh_key = reader.require(SSH_KEY);
        let flavor = reader.require(FLAVOR);
        let image = reader.require(IMAGE);
        let region = reader.require(REGION);
        reader.finish()?;
        Ok(CreateSettings {
            base,
            instance_name,
            region,
            flavor,
            image,
            ssh_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE_VARS: &[&str] = &[
        ENDPOINT,
        APPLICATION_KEY,
        APPLICATION_SECRET,
        CONSUMER_KEY,
        SERVICE_NAME,
    ];

    fn unset_all() -> Vec<(&'static str, Option<&'static str>)> {
        [
            ENDPOINT,
            APPLICATION_KEY,
            APPLICATION_SECRET,
            CONSUMER_KEY,
            SERVICE_NAME,
            INSTANCE_NAME,
            SSH_KEY,
            FLAVOR,
            IMAGE,
            REGION,
        ]
        .iter()
        .map(|name| (*name, None))
        .collect()
    }

    fn set_base() -> Vec<(&'static str, Option<&'static str>)> {
        let mut vars = unset_all();
        for (name, value) in vars.iter_mut() {
            if BASE_VARS.contains(name) {
                *value = Some("x");
            }
        }
        vars
    }

    #[test]
    fn every_missing_parameter_is_named_at_once() {
        temp_env::with_vars(unset_all(), || {
            let err = InstanceSettings::from_env(None).unwrap_err();
            match err {
                CloudError::MissingConfiguration { missing } => {
                    assert_eq!(
                        missing,
                        vec![
                            ENDPOINT,
                            APPLICATION_KEY,
                            APPLICATION_SECRET,
                            CONSUMER_KEY,
                            SERVICE_NAME,
                            INSTANCE_NAME,
                        ]
                    );
                }
                other => panic!("unexpected error: {other}"),
            }
        });
    }

    #[test]
    fn a_single_absent_parameter_is_named_exactly() {
        // Everything present except the instance name.
        temp_env::with_vars(set_base(), || {
            let err = InstanceSettings::from_env(None).unwrap_err();
            match err {
                CloudError::MissingConfiguration { missing } => {
                    assert_eq!(missing, vec![INSTANCE_NAME]);
                }
                other => panic!("unexpected error: {other}"),
            }
        });
    }

    #[test]
    fn empty_values_count_as_missing() {
        let mut vars = set_base();
        for (name, value) in vars.iter_mut() {
            if *name == SERVICE_NAME {
                *value = Some("   ");
            }
        }
        temp_env::with_vars(vars, || {
            let err = Settings::from_env().unwrap_err();
            match err {
                CloudError::MissingConfiguration { missing } => {
                    assert_eq!(missing, vec![SERVICE_NAME]);
                }
                other => panic!("unexpected error: {other}"),
            }
        });
    }

    #[test]
    fn cli_override_satisfies_the_instance_name() {
        temp_env::with_vars(set_base(), || {
            let settings = InstanceSettings::from_env(Some("worker")).unwrap();
            assert_eq!(settings.instance_name, "worker");
            assert_eq!(settings.base.service_name, "x");
        });
    }

    #[test]
    fn create_requires_the_resolution_parameters_too() {
        temp_env::with_vars(set_base(), || {
            let err = CreateSettings::from_env().unwrap_err();
            match err {
                CloudError::MissingConfiguration { missing } => {
                    assert_eq!(missing, vec![INSTANCE_NAME, SSH_KEY, FLAVOR, IMAGE, REGION]);
                }
                other => panic!("unexpected error: {other}"),
            }
        });
    }
}
