//! Persistent recent-address list
//!
//! The store is a single JSON document with one key the launcher cares
//! about, `recentUrls`: an array of strings, most recent first, defaulting
//! to `[]`. Documents that violate that shape are set aside and replaced
//! with the default rather than failing startup.

use libreverse_core::{LauncherError, LauncherResult};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level key holding the address list
pub const RECENT_URLS_KEY: &str = "recentUrls";

/// Default cap on remembered addresses
pub const MAX_RECENT_URLS: usize = 10;

/// Shape the document must satisfy
#[derive(Debug, Deserialize)]
struct StoreSchema {
    #[serde(rename = "recentUrls", default)]
    recent_urls: Vec<String>,
}

/// Recent-address store, file-backed or in-memory
#[derive(Debug)]
pub struct RecentUrlStore {
    path: Option<PathBuf>,
    /// Full document, so unrelated keys survive a rewrite
    document: Map<String, Value>,
    recent_urls: Vec<String>,
    capacity: usize,
}

impl RecentUrlStore {
    /// Open the store at `path`, creating its directory if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> LauncherResult<Self> {
        let path = path.as_ref().to_path_buf();
        log::info!("Opening recent-address store at {:?}", path);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let (document, recent_urls) = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            match validate(&contents) {
                Ok(parsed) => parsed,
                Err(e) => {
                    log::warn!("Store {:?} failed validation ({}), resetting", path, e);
                    let aside = path.with_extension("json.invalid");
                    if let Err(e) = fs::rename(&path, &aside) {
                        log::warn!("Could not move invalid store aside: {}", e);
                    }
                    (Map::new(), Vec::new())
                }
            }
        } else {
            (Map::new(), Vec::new())
        };

        Ok(Self {
            path: Some(path),
            document,
            recent_urls,
            capacity: MAX_RECENT_URLS,
        })
    }

    /// A store that never touches disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            document: Map::new(),
            recent_urls: Vec::new(),
            capacity: MAX_RECENT_URLS,
        }
    }

    /// Override the list cap (`max_recent_urls` in the config)
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self.recent_urls.truncate(self.capacity);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn recent_urls(&self) -> &[String] {
        &self.recent_urls
    }

    /// Move `url` to the front, drop duplicates, cap, and persist.
    pub fn save(&mut self, url: &str) -> LauncherResult<Vec<String>> {
        let updated = push_recent(&self.recent_urls, url, self.capacity);
        self.write(updated)?;
        Ok(self.recent_urls.clone())
    }

    /// Forget every address.
    pub fn clear(&mut self) -> LauncherResult<Vec<String>> {
        self.write(Vec::new())?;
        Ok(Vec::new())
    }

    fn write(&mut self, urls: Vec<String>) -> LauncherResult<()> {
        let mut document = self.document.clone();
        document.insert(
            RECENT_URLS_KEY.to_string(),
            Value::Array(urls.iter().cloned().map(Value::String).collect()),
        );

        if let Some(path) = &self.path {
            let data = serde_json::to_string_pretty(&document)?;
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, data)?;
            fs::rename(&tmp, path).map_err(|e| {
                LauncherError::storage(format!("Failed to replace {:?}: {}", path, e))
            })?;
        }

        self.document = document;
        self.recent_urls = urls;
        Ok(())
    }
}

/// Insert `url` at the front of `list`, removing any earlier copy and
/// keeping at most `cap` entries.
pub fn push_recent(list: &[String], url: &str, cap: usize) -> Vec<String> {
    std::iter::once(url.to_string())
        .chain(list.iter().filter(|item| item.as_str() != url).cloned())
        .take(cap)
        .collect()
}

fn validate(contents: &str) -> LauncherResult<(Map<String, Value>, Vec<String>)> {
    let value: Value = serde_json::from_str(contents)?;
    let Value::Object(document) = value else {
        return Err(LauncherError::storage("store document is not an object"));
    };
    let schema: StoreSchema = serde_json::from_value(Value::Object(document.clone()))?;
    Ok((document, schema.recent_urls))
}
