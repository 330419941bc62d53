use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::{anyhow, Result};

use crate::database::KeyValueStore;

/// Storage key holding the display theme
pub const THEME_KEY: &str = "theme";

/// Display theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(anyhow!("Invalid theme: {}", s)),
        }
    }
}

/// Persisted theme preference
#[derive(Debug, Clone)]
pub struct ThemeStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ThemeStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Stored theme; unset or unknown values read as the default
    pub async fn current(&self) -> Result<Theme> {
        match self.kv.get(THEME_KEY).await? {
            None => Ok(Theme::default()),
            Some(raw) => Ok(raw.parse().unwrap_or_else(|_| {
                warn!("Unknown stored theme '{}', using {}", raw, Theme::default());
                Theme::default()
            })),
        }
    }

    pub async fn set(&self, theme: Theme) -> Result<()> {
        debug!("Setting theme to {}", theme);
        self.kv.set(THEME_KEY, theme.as_str()).await
    }

    /// Switch to the other theme and return it
    pub async fn toggle(&self) -> Result<Theme> {
        let next = self.current().await?.toggled();
        self.set(next).await?;
        Ok(next)
    }
}
