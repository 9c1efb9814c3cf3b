use crate::error::{config_error, env_error, AppResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default page listing upcoming contests
pub const DEFAULT_CONTESTS_URL: &str = "https://atcoder.jp/contests/?lang=ja";

/// Default location of the OAuth client credentials downloaded from Google Cloud Console
pub const DEFAULT_CREDENTIALS_PATH: &str = "credentials/credentials.json";

/// Default location of the stored OAuth token
pub const DEFAULT_TOKEN_PATH: &str = "credentials/token.json";

/// Main configuration structure for the sync job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Google Calendar API client ID
    pub google_client_id: String,
    /// Google Calendar API client secret
    pub google_client_secret: String,
    /// Where the OAuth token is read from and written back to
    pub token_path: PathBuf,
    /// Listing page to scrape
    pub contests_url: String,
}

/// The `installed` section of a Google OAuth client credentials file
#[derive(Debug, Deserialize)]
struct InstalledCredentials {
    client_id: String,
    client_secret: String,
}

#[derive(Debug, Deserialize)]
struct CredentialsFile {
    installed: InstalledCredentials,
}

impl Config {
    /// Load configuration from environment and the credentials file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let (google_client_id, google_client_secret) = match (
            env::var("GOOGLE_CLIENT_ID"),
            env::var("GOOGLE_CLIENT_SECRET"),
        ) {
            (Ok(id), Ok(secret)) => (id, secret),
            _ => {
                let path = env::var("GOOGLE_CREDENTIALS_PATH")
                    .unwrap_or_else(|_| DEFAULT_CREDENTIALS_PATH.to_string());
                if !Path::new(&path).exists() {
                    return Err(env_error("GOOGLE_CLIENT_ID"));
                }
                Self::read_credentials(Path::new(&path))?
            }
        };

        let token_path = env::var("GOOGLE_TOKEN_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_TOKEN_PATH));

        let contests_url =
            env::var("CONTESTS_URL").unwrap_or_else(|_| String::from(DEFAULT_CONTESTS_URL));

        Ok(Config {
            google_client_id,
            google_client_secret,
            token_path,
            contests_url,
        })
    }

    /// Read the client id and secret from a credentials file
    pub fn read_credentials(path: &Path) -> AppResult<(String, String)> {
        let content = fs::read_to_string(path)?;
        let file: CredentialsFile = serde_json::from_str(&content).map_err(|e| {
            config_error(&format!(
                "Invalid credentials file {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok((file.installed.client_id, file.installed.client_secret))
    }
}
