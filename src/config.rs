use std::net::{IpAddr, SocketAddr};

use anyhow::Context;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://todos.db";

/// Process-wide settings, read once at startup and handed to whatever needs them.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Loads `.env` if present, then reads `DATABASE_URL`, `HOST` and `PORT`.
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let database_url = lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
        let host: IpAddr = lookup("HOST")
            .as_deref()
            .unwrap_or("127.0.0.1")
            .parse()
            .context("HOST must be an IP address")?;
        let port: u16 = lookup("PORT")
            .as_deref()
            .unwrap_or("3000")
            .parse()
            .context("PORT must be a number between 0 and 65535")?;
        Ok(Self { database_url, bind_addr: SocketAddr::new(host, port) })
    }
}

/// Ensures the SQLite file behind a `sqlite://` URL can be opened.
pub fn prepare_sqlite_file(database_url: &str) -> anyhow::Result<()> {
    if database_url.starts_with("sqlite::memory:") { return Ok(()); }
    if let Some(path) = database_url.strip_prefix("sqlite://") {
        let path = path.split('?').next().unwrap_or(path);
        // `sqlite:///C:/db` names a drive path
        let path = if cfg!(windows) && path.len() >= 3 && path.as_bytes()[0] == b'/' && path.as_bytes()[2] == b':' {
            &path[1..]
        } else {
            path
        };
        use std::{fs, fs::OpenOptions, path::Path};
        let p = Path::new(path);
        if let Some(parent) = p.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
            }
        }
        if !p.exists() {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(p)
                .with_context(|| format!("creating database file {}", p.display()))?;
        }
    }
    Ok(())
}
