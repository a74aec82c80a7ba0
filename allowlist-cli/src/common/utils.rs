use allowlist::config::Config;
use anyhow::{Context, Result};
use log::debug;

use super::cli::AllowlistCli;

pub fn init_logging(max_level: &str) {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or(max_level));
}

/// Starts from the config file (or defaults) and applies command-line overrides.
pub fn load_config(args: &AllowlistCli) -> Result<Config> {
    let mut config = if args.config.is_empty() {
        Config::default()
    } else {
        Config::load(&args.config).with_context(|| format!("reading config {}", args.config))?
    };
    if let Some(encoding) = args.encoding {
        config.set_encoding(encoding);
    }
    if let Some(max) = args.max_identity_len {
        config.set_max_identity_len(max);
    }
    if let Some(threshold) = args.parallel_threshold {
        config.set_parallel_threshold(threshold);
    }
    debug!("effective config: {:?}", config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use allowlist::encoder::LeafEncoding;
    use clap::Parser;

    #[test]
    fn test_flags_override_file() {
        let temp_dir = ::tempfile::Builder::new()
            .prefix("allowlist-cli-config")
            .tempdir()
            .unwrap();
        let path = temp_dir.path().join("config.json");
        let mut file_config = Config::default();
        file_config.set_max_identity_len(20);
        file_config.save(&path).unwrap();

        let args = AllowlistCli::parse_from([
            "allowlist-cli",
            "--config",
            path.to_str().unwrap(),
            "--encoding",
            "packed",
            "root",
            "--input",
            "ids.txt",
        ]);
        let config = load_config(&args).unwrap();
        assert_eq!(config.encoding, LeafEncoding::Packed);
        assert_eq!(config.max_identity_len, 20);
    }

    #[test]
    fn test_missing_config_file() {
        let args = AllowlistCli::parse_from(["allowlist-cli", "--config", "/nonexistent/cfg.json"]);
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }
}
