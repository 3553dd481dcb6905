use crate::adapters::{JsonFixtures, StaticFixtures};
use crate::core::cursor::CursorPolicy;
use crate::core::registry::{Domain, DomainSettings, RegistryOptions};
use crate::domain::ports::FixtureSource;
use crate::utils::error::{Result, WizardError};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_required_field, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WizardConfig {
    #[serde(default)]
    pub wizard: WizardSection,
    #[serde(default)]
    pub fixtures: FixturesConfig,
    #[serde(default)]
    pub domains: DomainsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardSection {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default)]
    pub cursor_policy: CursorPolicy,
}

impl Default for WizardSection {
    fn default() -> Self {
        Self {
            title: default_title(),
            cursor_policy: CursorPolicy::default(),
        }
    }
}

fn default_title() -> String {
    "Registration wizard".to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureKind {
    #[default]
    Static,
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FixturesConfig {
    #[serde(default)]
    pub source: FixtureKind,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainsConfig {
    pub layout: Option<DomainConfig>,
    pub equipment: Option<DomainConfig>,
    pub material: Option<DomainConfig>,
    pub users: Option<DomainConfig>,
}

impl DomainsConfig {
    pub fn get(&self, domain: Domain) -> Option<&DomainConfig> {
        match domain {
            Domain::Layout => self.layout.as_ref(),
            Domain::Equipment => self.equipment.as_ref(),
            Domain::Material => self.material.as_ref(),
            Domain::Users => self.users.as_ref(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainConfig {
    pub initial_step: Option<i64>,
    pub populate_on_mount: Option<bool>,
}

impl WizardConfig {
    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(WizardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| WizardError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with environment values; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| WizardError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Checks the title, the fixture source and every initial step.
    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("wizard.title", &self.wizard.title)?;

        match self.fixtures.source {
            FixtureKind::Static => {
                if let Some(path) = &self.fixtures.path {
                    validate_path("fixtures.path", path)?;
                }
            }
            FixtureKind::Json => {
                let path = validate_required_field("fixtures.path", &self.fixtures.path)?;
                validate_path("fixtures.path", path)?;
            }
        }

        for domain in Domain::ALL {
            if let Some(step) = self.domains.get(domain).and_then(|d| d.initial_step) {
                validate_range(
                    &format!("domains.{}.initial_step", domain),
                    step,
                    1,
                    i64::from(domain.steps()),
                )?;
            }
        }

        Ok(())
    }

    pub fn cursor_policy(&self) -> CursorPolicy {
        self.wizard.cursor_policy
    }

    /// Per-domain settings with unset keys falling back to the domain defaults.
    pub fn registry_options(&self) -> RegistryOptions {
        Domain::ALL.into_iter().fold(
            RegistryOptions::default().with_policy(self.cursor_policy()),
            |options, domain| {
                let defaults = DomainSettings::defaults_for(domain);
                let settings = match self.domains.get(domain) {
                    Some(overrides) => DomainSettings {
                        initial_step: overrides.initial_step.unwrap_or(defaults.initial_step),
                        populate_on_mount: overrides
                            .populate_on_mount
                            .unwrap_or(defaults.populate_on_mount),
                    },
                    None => defaults,
                };
                options.with_settings(domain, settings)
            },
        )
    }

    pub fn fixture_source(&self) -> Result<Box<dyn FixtureSource>> {
        match self.fixtures.source {
            FixtureKind::Static => Ok(Box::new(StaticFixtures)),
            FixtureKind::Json => {
                let path = validate_required_field("fixtures.path", &self.fixtures.path)?;
                Ok(Box::new(JsonFixtures::new(path)))
            }
        }
    }
}

impl Validate for WizardConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = WizardConfig::from_toml_str("").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.cursor_policy(), CursorPolicy::Accept);

        let options = config.registry_options();
        assert_eq!(options.settings(Domain::Equipment).initial_step, 6);
        assert!(options.settings(Domain::Equipment).populate_on_mount);
        assert!(!options.settings(Domain::Layout).populate_on_mount);
    }

    #[test]
    fn test_parse_domain_overrides() {
        let toml_content = r#"
[wizard]
title = "Plant onboarding"
cursor_policy = "clamp"

[domains.layout]
populate_on_mount = true

[domains.users]
initial_step = 2
"#;

        let config = WizardConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.wizard.title, "Plant onboarding");

        let options = config.registry_options();
        assert_eq!(options.policy, CursorPolicy::Clamp);
        assert!(options.settings(Domain::Layout).populate_on_mount);
        assert_eq!(options.settings(Domain::Layout).initial_step, 1);
        assert_eq!(options.settings(Domain::Users).initial_step, 2);
    }

    #[test]
    fn test_initial_step_out_of_range_fails_validation() {
        let config = WizardConfig::from_toml_str("[domains.users]\ninitial_step = 4\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(WizardError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_json_source_requires_path() {
        let config = WizardConfig::from_toml_str("[fixtures]\nsource = \"json\"\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(WizardError::MissingConfigError { .. })
        ));
        assert!(config.fixture_source().is_err());
    }

    #[test]
    fn test_unknown_policy_is_a_parse_error() {
        let result = WizardConfig::from_toml_str("[wizard]\ncursor_policy = \"wrap\"\n");
        assert!(matches!(result, Err(WizardError::ConfigError { .. })));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("REG_WIZARD_TEST_FIXTURES", "/tmp/plant.json");

        let toml_content = r#"
[fixtures]
source = "json"
path = "${REG_WIZARD_TEST_FIXTURES}"
"#;

        let config = WizardConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.fixtures.path.as_deref(), Some("/tmp/plant.json"));

        std::env::remove_var("REG_WIZARD_TEST_FIXTURES");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[wizard]\ntitle = \"From file\"\n")
            .unwrap();

        let config = WizardConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.wizard.title, "From file");
    }
}
