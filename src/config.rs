use std::path::PathBuf;

use crate::api::DEFAULT_API_BASE;
use crate::theme::ThemeMode;

pub const DEFAULT_ROSTER_LIMIT: u16 = 151;
pub const DEFAULT_LOG_FILE: &str = "pokedex.log";

#[derive(clap::Args, Clone, Debug)]
pub struct Config {
    /// PokeAPI base url
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,
    /// Number of entries fetched for the roster
    #[arg(long, default_value_t = DEFAULT_ROSTER_LIMIT)]
    pub limit: u16,
    #[arg(long, value_enum, default_value = "light")]
    pub theme: ThemeMode,
    /// Log file (defaults to pokedex.log in the temp dir)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn log_path(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        config: Config,
    }

    #[test]
    fn flags_default_to_pokeapi_and_first_generation() {
        let config = Cli::parse_from(["pokedex"]).config;
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.limit, 151);
        assert_eq!(config.theme, ThemeMode::Light);
        assert_eq!(config.log_path(), std::env::temp_dir().join(DEFAULT_LOG_FILE));
    }

    #[test]
    fn flags_override_defaults() {
        let config = Cli::parse_from([
            "pokedex",
            "--api-base",
            "http://localhost:8080/api/v2",
            "--limit",
            "20",
            "--theme",
            "dark",
            "--log-file",
            "/tmp/dex.log",
        ])
        .config;
        assert_eq!(config.api_base, "http://localhost:8080/api/v2");
        assert_eq!(config.limit, 20);
        assert_eq!(config.theme, ThemeMode::Dark);
        assert_eq!(config.log_path(), PathBuf::from("/tmp/dex.log"));
    }
}
