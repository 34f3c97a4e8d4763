//! Configuration loading and data folder resolution
//!
//! Settings are resolved with the same priority order for every value:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming the data folder
pub const DATA_FOLDER_ENV: &str = "IHUB_DATA_FOLDER";

/// Database file name inside the data folder
pub const DATABASE_FILE: &str = "ihub.db";

/// Runtime configuration for the InfluencerHub backend
#[derive(Debug, Clone)]
pub struct Settings {
    pub project_name: String,
    pub bind_host: String,
    pub bind_port: u16,
    pub data_folder: PathBuf,

    /// HS256 secret shared with the identity provider. Tokens are only
    /// decoded here; issuance happens externally.
    pub jwt_secret: String,
    /// Expected `aud` claim on presented tokens
    pub jwt_audience: String,

    /// Blockchain stub configuration. All three must be present for the
    /// record-keeping stub to consider itself configured.
    pub web3_provider_url: Option<String>,
    pub contract_address: Option<String>,
    pub wallet_private_key: Option<String>,

    /// Payment gateway credentials. When absent the payment service runs
    /// in mock mode.
    pub payment_key_id: Option<String>,
    pub payment_key_secret: Option<String>,
}

/// Optional overrides loaded from the TOML config file
#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    auth: AuthSection,
    #[serde(default)]
    blockchain: BlockchainSection,
    #[serde(default)]
    payments: PaymentsSection,
}

#[derive(Debug, Default, Deserialize)]
struct ServerSection {
    host: Option<String>,
    port: Option<u16>,
    data_folder: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct AuthSection {
    jwt_secret: Option<String>,
    jwt_audience: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct BlockchainSection {
    provider_url: Option<String>,
    contract_address: Option<String>,
    wallet_private_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct PaymentsSection {
    key_id: Option<String>,
    key_secret: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            project_name: "InfluencerHub".to_string(),
            bind_host: "127.0.0.1".to_string(),
            bind_port: 8000,
            data_folder: default_data_folder(),
            jwt_secret: String::new(),
            jwt_audience: "authenticated".to_string(),
            web3_provider_url: None,
            contract_address: None,
            wallet_private_key: None,
            payment_key_id: None,
            payment_key_secret: None,
        }
    }
}

impl Settings {
    /// Load settings with the documented priority order.
    ///
    /// `cli_data_folder` and `cli_config` come from command-line arguments
    /// and take precedence over everything else.
    pub fn load(cli_data_folder: Option<&str>, cli_config: Option<&Path>) -> Result<Self> {
        let file = load_config_file(cli_config)?;
        let mut settings = Settings::default();

        if let Some(host) = file.server.host {
            settings.bind_host = host;
        }
        if let Some(port) = file.server.port {
            settings.bind_port = port;
        }
        if let Some(folder) = file.server.data_folder {
            settings.data_folder = PathBuf::from(folder);
        }
        if let Some(secret) = file.auth.jwt_secret {
            settings.jwt_secret = secret;
        }
        if let Some(audience) = file.auth.jwt_audience {
            settings.jwt_audience = audience;
        }
        settings.web3_provider_url = file.blockchain.provider_url;
        settings.contract_address = file.blockchain.contract_address;
        settings.wallet_private_key = file.blockchain.wallet_private_key;
        settings.payment_key_id = file.payments.key_id;
        settings.payment_key_secret = file.payments.key_secret;

        // Environment variables override the config file. The names match
        // the deployment contract of the original service.
        if let Ok(host) = std::env::var("IHUB_BIND_HOST") {
            settings.bind_host = host;
        }
        if let Ok(port) = std::env::var("IHUB_BIND_PORT") {
            settings.bind_port = port
                .parse()
                .map_err(|_| Error::Config(format!("Invalid IHUB_BIND_PORT: {}", port)))?;
        }
        if let Ok(folder) = std::env::var(DATA_FOLDER_ENV) {
            settings.data_folder = PathBuf::from(folder);
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            settings.jwt_secret = secret;
        }
        if let Ok(url) = std::env::var("WEB3_PROVIDER_URL") {
            settings.web3_provider_url = Some(url);
        }
        if let Ok(addr) = std::env::var("CONTRACT_ADDRESS") {
            settings.contract_address = Some(addr);
        }
        if let Ok(key) = std::env::var("WALLET_PRIVATE_KEY") {
            settings.wallet_private_key = Some(key);
        }
        if let Ok(id) = std::env::var("RAZORPAY_KEY_ID") {
            settings.payment_key_id = Some(id);
        }
        if let Ok(secret) = std::env::var("RAZORPAY_KEY_SECRET") {
            settings.payment_key_secret = Some(secret);
        }

        // Command-line argument wins over everything
        if let Some(folder) = cli_data_folder {
            settings.data_folder = PathBuf::from(folder);
        }

        Ok(settings)
    }

    /// Path of the SQLite database inside the data folder
    pub fn database_path(&self) -> PathBuf {
        self.data_folder.join(DATABASE_FILE)
    }

    /// Create the data folder if it does not exist yet
    pub fn ensure_data_folder(&self) -> Result<()> {
        std::fs::create_dir_all(&self.data_folder)?;
        Ok(())
    }
}

/// Load the TOML config file, if one exists.
///
/// An explicitly passed path must exist and parse; the default locations
/// are optional and silently skipped when absent.
fn load_config_file(cli_config: Option<&Path>) -> Result<ConfigFile> {
    let path = match cli_config {
        Some(path) => {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            path.to_path_buf()
        }
        None => match find_default_config_file() {
            Some(path) => path,
            None => return Ok(ConfigFile::default()),
        },
    };

    let content = std::fs::read_to_string(&path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Default config file locations: ~/.config/influencerhub/config.toml,
/// then /etc/influencerhub/config.toml on Linux.
fn find_default_config_file() -> Option<PathBuf> {
    if let Some(dir) = dirs::config_dir() {
        let user_config = dir.join("influencerhub").join("config.toml");
        if user_config.exists() {
            return Some(user_config);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/influencerhub/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// OS-dependent default data folder
fn default_data_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("influencerhub"))
        .unwrap_or_else(|| PathBuf::from("./influencerhub_data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "IHUB_BIND_HOST",
            "IHUB_BIND_PORT",
            DATA_FOLDER_ENV,
            "JWT_SECRET",
            "WEB3_PROVIDER_URL",
            "CONTRACT_ADDRESS",
            "WALLET_PRIVATE_KEY",
            "RAZORPAY_KEY_ID",
            "RAZORPAY_KEY_SECRET",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let settings = Settings::load(None, None).expect("load should succeed");
        assert_eq!(settings.bind_port, 8000);
        assert_eq!(settings.jwt_audience, "authenticated");
        assert!(settings.payment_key_id.is_none());
    }

    #[test]
    #[serial]
    fn test_env_overrides_file() {
        clear_env();
        let dir = tempfile::tempdir().expect("tempdir");
        let config_path = dir.path().join("config.toml");
        std::fs::write(
            &config_path,
            r#"
            [server]
            port = 9100

            [auth]
            jwt_secret = "from-file"
            "#,
        )
        .expect("write config");

        std::env::set_var("JWT_SECRET", "from-env");
        let settings = Settings::load(None, Some(&config_path)).expect("load should succeed");
        assert_eq!(settings.bind_port, 9100);
        assert_eq!(settings.jwt_secret, "from-env");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_cli_data_folder_wins() {
        clear_env();
        std::env::set_var(DATA_FOLDER_ENV, "/tmp/from-env");
        let settings = Settings::load(Some("/tmp/from-cli"), None).expect("load should succeed");
        assert_eq!(settings.data_folder, PathBuf::from("/tmp/from-cli"));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_explicit_config_rejected() {
        clear_env();
        let result = Settings::load(None, Some(Path::new("/nonexistent/config.toml")));
        assert!(result.is_err());
    }
}
