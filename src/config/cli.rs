use crate::core::cursor::CursorPolicy;
use crate::core::registry::Domain;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "reg-wizard")]
#[command(about = "Drive the registration wizard stores and print their section layout")]
pub struct CliConfig {
    #[arg(long, help = "TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "JSON fixture document; overrides the configured source")]
    pub fixtures: Option<PathBuf>,

    #[arg(long, value_enum, value_delimiter = ',', help = "Domains to mount (default: all)")]
    pub domain: Vec<Domain>,

    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        help = "Cursor moves to replay on each mounted domain"
    )]
    pub steps: Vec<i64>,

    #[arg(long, value_enum, help = "Overrides the configured cursor policy")]
    pub policy: Option<CursorPolicy>,

    #[arg(long, help = "Print snapshots as JSON")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn domains(&self) -> Vec<Domain> {
        if self.domain.is_empty() {
            Domain::ALL.to_vec()
        } else {
            self.domain.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps_and_domains() {
        let cli = CliConfig::parse_from([
            "reg-wizard",
            "--domain",
            "users,material",
            "--steps",
            "2,-1,99",
            "--policy",
            "clamp",
        ]);
        assert_eq!(cli.domains(), vec![Domain::Users, Domain::Material]);
        assert_eq!(cli.steps, vec![2, -1, 99]);
        assert_eq!(cli.policy, Some(CursorPolicy::Clamp));
    }

    #[test]
    fn test_defaults_to_all_domains() {
        let cli = CliConfig::parse_from(["reg-wizard"]);
        assert_eq!(cli.domains(), Domain::ALL.to_vec());
        assert!(cli.config.is_none());
    }
}
