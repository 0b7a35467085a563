/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Per-user preference store
//!
//! A small string mapping persisted as JSON, used by plugins to remember
//! things like a user's scrobbler account. Nothing is written until the host
//! calls [`PreferenceStore::flush`] or [`PreferenceStore::close`].

use crate::error::{AppError, GazelleResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Mapping from user key to stored value, backed by a file
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
    dirty: bool,
}

impl PreferenceStore {
    /// Loads the store from `path`
    ///
    /// A missing or unreadable file gives an empty store; the problem is
    /// logged and the file is replaced on the next flush.
    pub async fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Unable to parse {}, starting empty: {}", path.display(), e);
                    BTreeMap::new()
                }
            },
            Err(e) => {
                debug!("Unable to load {}, creating a new one: {}", path.display(), e);
                BTreeMap::new()
            }
        };

        Self {
            path,
            entries,
            dirty: false,
        }
    }

    /// Value stored for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores `value` for `key`, returning the previous value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.dirty = true;
        self.entries.insert(key.into(), value.into())
    }

    /// Removes the value stored for `key`
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.entries.remove(key);
        self.dirty |= removed.is_some();
        removed
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the store has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks if there are changes not yet flushed
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// File backing the store
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the mapping to disk
    ///
    /// The file is replaced atomically through a sibling temporary file.
    pub async fn flush(&mut self) -> GazelleResult<()> {
        let bytes = serde_json::to_vec_pretty(&self.entries)
            .map_err(|e| AppError::storage(format!("unable to encode preferences: {e}")))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| self.io_error("create directory", e))?;
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, bytes).await.map_err(|e| self.io_error("write", e))?;
        fs::rename(&tmp, &self.path).await.map_err(|e| self.io_error("replace", e))?;

        self.dirty = false;
        info!("Flushed {} preferences to {}", self.entries.len(), self.path.display());
        Ok(())
    }

    /// Flushes and releases the store
    pub async fn close(mut self) -> GazelleResult<()> {
        self.flush().await
    }

    fn io_error(&self, op: &str, e: std::io::Error) -> AppError {
        warn!("Unable to {} {}: {}", op, self.path.display(), e);
        AppError::storage(format!("unable to {op} {}: {e}", self.path.display()))
    }
}

/// Resolves the storage key for the sender of a message
///
/// A registered bot account wins. Otherwise the `ident@host` part of a
/// `nick!ident@host` prefix is used, so nick changes keep the same key.
///
/// # Arguments
/// * `prefix` - Full IRC prefix of the sender
/// * `account` - Bot account name the prefix is registered as, if any
pub fn user_key(prefix: &str, account: Option<&str>) -> String {
    if let Some(account) = account.filter(|a| !a.is_empty()) {
        return account.to_string();
    }
    match prefix.split_once('!') {
        Some((_, userhost)) => userhost.to_string(),
        None => prefix.to_string(),
    }
}
