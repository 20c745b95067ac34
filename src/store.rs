// Dual-location token storage behind one facade.
//
// The browser frontend kept the bearer token in localStorage and mirrored it
// into an `authToken` cookie so request interception could read it before
// page scripts ran. The same shape here: a durable file with no expiry plus
// a mirror file carrying a 24-hour expiry, both under the fixed `authToken`
// key. Writes go through to both; reads prefer the durable copy and repair
// it from the mirror when they diverge.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Fixed storage key shared by both locations.
pub const TOKEN_KEY: &str = "authToken";

/// Lifetime of the mirror copy. The durable copy never expires.
pub const MIRROR_TTL_HOURS: i64 = 24;

/// The mirror's on-disk record: token value plus its expiry instant.
#[derive(Debug, Serialize, Deserialize)]
struct MirrorRecord {
    value: String,
    expires_at: DateTime<Utc>,
}

/// Facade over the durable store and the interception-readable mirror.
#[derive(Debug, Clone)]
pub struct TokenVault {
    durable_path: PathBuf,
    mirror_path: PathBuf,
}

impl TokenVault {
    /// Open (and create if needed) the vault under `data_dir`.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir)?;
        Ok(Self {
            durable_path: data_dir.join(TOKEN_KEY),
            mirror_path: data_dir.join(format!("{TOKEN_KEY}.cookie")),
        })
    }

    /// Write-through: store the token in both locations. The mirror copy
    /// gets a fresh 24-hour expiry.
    pub fn set(&self, token: &str) -> Result<(), StoreError> {
        fs::write(&self.durable_path, token)?;
        let record = MirrorRecord {
            value: token.to_string(),
            expires_at: Utc::now() + Duration::hours(MIRROR_TTL_HOURS),
        };
        fs::write(&self.mirror_path, serde_json::to_vec(&record)?)?;
        Ok(())
    }

    /// Clear both locations. Missing files are fine; the end state is the
    /// same either way.
    pub fn clear(&self) -> Result<(), StoreError> {
        for path in [&self.durable_path, &self.mirror_path] {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Read the current token: durable store first, then the mirror. A
    /// token found only in the mirror (set by the interception layer before
    /// the durable store was populated) is copied back into the durable
    /// store so the two converge.
    pub fn load(&self) -> Result<Option<String>, StoreError> {
        if let Some(token) = self.read_durable()? {
            return Ok(Some(token));
        }
        if let Some(token) = self.read_mirror()? {
            fs::write(&self.durable_path, &token)?;
            return Ok(Some(token));
        }
        Ok(None)
    }

    /// Read only the durable store.
    pub fn read_durable(&self) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(&self.durable_path) {
            Ok(s) if s.trim().is_empty() => Ok(None),
            Ok(s) => Ok(Some(s.trim().to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Read only the mirror. An expired record reads as absent; the two
    /// stores are not resynchronized when the mirror lapses first. A
    /// record that no longer parses is deleted and reads as absent, so one
    /// bad write cannot wedge every later read.
    pub fn read_mirror(&self) -> Result<Option<String>, StoreError> {
        let raw = match fs::read(&self.mirror_path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let record: MirrorRecord = match serde_json::from_slice(&raw) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("discarding corrupt token mirror: {e}");
                match fs::remove_file(&self.mirror_path) {
                    Ok(()) => {}
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e.into()),
                }
                return Ok(None);
            }
        };
        if record.expires_at <= Utc::now() {
            return Ok(None);
        }
        Ok(Some(record.value))
    }

    #[cfg(test)]
    fn write_mirror_expiring_at(&self, token: &str, expires_at: DateTime<Utc>) {
        let record = MirrorRecord {
            value: token.to_string(),
            expires_at,
        };
        fs::write(&self.mirror_path, serde_json::to_vec(&record).unwrap()).unwrap();
    }
}
