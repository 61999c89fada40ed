//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cache::{cache_key, Cache};
use storefront_cart::{CartConfig, CartEngine, CartStorage};

use crate::output::Output;

const CONFIG_NAMES: [&str; 3] = ["cart.toml", ".cart.toml", "cart.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Cart configuration.
    pub config: CartConfig,
    /// Output handler.
    pub output: Output,
    /// Directory holding the persisted cart.
    pub data_dir: PathBuf,
    /// Session whose cart is being edited.
    pub session: Option<String>,
}

impl Context {
    /// Load context from a config file, or the nearest one above the
    /// working directory.
    pub fn load(
        config_path: Option<&str>,
        data_dir: &str,
        session: Option<String>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CartConfig::load(path).with_context(|| format!("Failed to load config {}", path))?
        } else {
            Self::find_config(&cwd, &output).unwrap_or_default()
        };

        let data_dir = resolve(&cwd, data_dir);
        output.debug(&format!("cart data in {}", data_dir.display()));

        Ok(Self {
            config,
            output,
            data_dir,
            session,
        })
    }

    /// Find a config file in the directory tree.
    fn find_config(start: &Path, output: &Output) -> Option<CartConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_NAMES {
                let config_path = current.join(name);
                if !config_path.exists() {
                    continue;
                }
                match CartConfig::load(&config_path) {
                    Ok(config) => {
                        output.debug(&format!("using config {}", config_path.display()));
                        return Some(config);
                    }
                    Err(e) => {
                        output.warn(&format!("ignoring {}: {}", config_path.display(), e));
                    }
                }
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Key the current session's cart is stored under.
    pub fn storage_key(&self) -> String {
        match &self.session {
            Some(session) => cache_key!(self.config.storage_key.as_str(), session),
            None => self.config.storage_key.clone(),
        }
    }

    /// Open the persisted cart for the current session.
    pub fn open_cart(&self) -> Result<CartEngine> {
        let cache = Cache::open_dir(&self.data_dir)
            .with_context(|| format!("Failed to open {}", self.data_dir.display()))?;
        let config = self.config.clone().with_storage_key(self.storage_key());
        tracing::debug!(dir = %self.data_dir.display(), key = %config.storage_key, "opening cart");
        Ok(CartEngine::restore(CartStorage::new(cache), config))
    }
}

/// Resolve a path relative to the working directory.
fn resolve(cwd: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        cwd.join(path)
    }
}
