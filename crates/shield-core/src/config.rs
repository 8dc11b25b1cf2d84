//! Console configuration model.
//!
//! Loading from disk and the environment lives in `shield-infrastructure`;
//! this module only defines the shape, defaults and layering rules.

use crate::error::{Result, ShieldError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8002";
pub const DEFAULT_LIVE_FEED_URL: &str = "http://localhost:8000/video_feed/cam1";
pub const DEFAULT_CAMERA_ID: &str = "cam1";

/// Resolved console configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Base URL of the session store (`/sessions`, `/session/{id}/{action}`)
    pub backend_url: String,
    /// Feed shown while no session is selected
    pub live_feed_url: String,
    /// Camera reported alongside the default feed
    pub default_camera_id: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            live_feed_url: DEFAULT_LIVE_FEED_URL.to_string(),
            default_camera_id: DEFAULT_CAMERA_ID.to_string(),
        }
    }
}

impl ConsoleConfig {
    /// Applies every field set in `overrides` on top of `self`.
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(backend_url) = overrides.backend_url {
            self.backend_url = backend_url;
        }
        if let Some(live_feed_url) = overrides.live_feed_url {
            self.live_feed_url = live_feed_url;
        }
        if let Some(default_camera_id) = overrides.default_camera_id {
            self.default_camera_id = default_camera_id;
        }
        self
    }

    /// Checks that `backend_url` is an absolute http(s) URL.
    pub fn validate(&self) -> Result<()> {
        let rest = self
            .backend_url
            .strip_prefix("http://")
            .or_else(|| self.backend_url.strip_prefix("https://"));

        match rest {
            Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
            _ => Err(ShieldError::config(format!(
                "backend_url must be an absolute http(s) URL, got '{}'",
                self.backend_url
            ))),
        }
    }
}

/// Partial configuration from one source (file section, environment, CLI).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ConfigOverrides {
    pub backend_url: Option<String>,
    pub live_feed_url: Option<String>,
    pub default_camera_id: Option<String>,
}
