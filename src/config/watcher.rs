//! Hot reload of the gateway configuration file.
//!
//! Every reload goes through the same path as startup: read the file, put the
//! command-line overrides back on top, validate. Only a config that differs
//! from the last one published reaches the server.

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::config::loader::{load_config_with, ConfigOverrides};
use crate::config::schema::GatewayConfig;

/// Publishes reloaded configurations for one file.
pub struct ConfigWatcher {
    path: PathBuf,
    overrides: ConfigOverrides,
    published: Mutex<GatewayConfig>,
    update_tx: mpsc::UnboundedSender<GatewayConfig>,
}

impl ConfigWatcher {
    /// `running` is the config the gateway started with, overrides included.
    pub fn new(
        path: &Path,
        overrides: ConfigOverrides,
        running: GatewayConfig,
    ) -> (Self, mpsc::UnboundedReceiver<GatewayConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                overrides,
                published: Mutex::new(running),
                update_tx,
            },
            update_rx,
        )
    }

    /// Re-read the file and publish it if it changed. Returns whether a new
    /// config was sent.
    pub fn reload(&self) -> bool {
        let config = match load_config_with(&self.path, &self.overrides) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(path = ?self.path, error = %e, "Failed to reload config, keeping current configuration");
                return false;
            }
        };

        let mut published = self.published.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if *published == config {
            tracing::debug!(path = ?self.path, "Config unchanged");
            return false;
        }
        *published = config.clone();

        tracing::info!(upstream = %config.upstream.base_url, "Publishing reloaded config");
        self.update_tx.send(config).is_ok()
    }

    /// Start watching the file in a background thread.
    ///
    /// The returned watcher must be kept alive for as long as updates are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let this = Arc::new(self);

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) if event.kind.is_modify() || event.kind.is_create() => {
                    this.reload();
                }
                Ok(_) => {}
                Err(e) => tracing::error!(error = ?e, "Watch error"),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?path, "Config watcher started");
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const FILE: &str = "[upstream]\nbase_url = \"http://backend:9000\"\nsearch_path = \"/productos\"\n";

    fn overrides() -> ConfigOverrides {
        ConfigOverrides {
            bind_address: Some("127.0.0.1:8100".into()),
            base_url: Some("http://127.0.0.1:9100".into()),
        }
    }

    #[test]
    fn test_reload_reapplies_overrides() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), FILE).unwrap();
        let running = load_config_with(file.path(), &overrides()).unwrap();
        let (watcher, mut updates) = ConfigWatcher::new(file.path(), overrides(), running);

        fs::write(file.path(), FILE.replace("/productos", "/v2/productos")).unwrap();
        assert!(watcher.reload());

        let config = updates.try_recv().unwrap();
        assert_eq!(config.upstream.search_path, "/v2/productos");
        assert_eq!(config.upstream.base_url, "http://127.0.0.1:9100");
        assert_eq!(config.listener.bind_address, "127.0.0.1:8100");
    }

    #[test]
    fn test_unchanged_file_publishes_nothing() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), FILE).unwrap();
        let running = load_config_with(file.path(), &overrides()).unwrap();
        let (watcher, mut updates) = ConfigWatcher::new(file.path(), overrides(), running);

        // Only the overridden base_url changed in the file.
        fs::write(file.path(), FILE.replace("backend:9000", "other:9000")).unwrap();
        assert!(!watcher.reload());
        assert!(updates.try_recv().is_err());
    }

    #[test]
    fn test_invalid_file_keeps_current_config() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), FILE).unwrap();
        let running = load_config_with(file.path(), &overrides()).unwrap();
        let (watcher, mut updates) = ConfigWatcher::new(file.path(), overrides(), running);

        fs::write(file.path(), "[timeouts]\nrequest_secs = 0\n").unwrap();
        assert!(!watcher.reload());
        assert!(updates.try_recv().is_err());
    }
}
