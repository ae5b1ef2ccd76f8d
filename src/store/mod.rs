//! JSON document store.
//!
//! The whole ledger lives in one [`Database`] document that is kept in memory
//! and written back to a single JSON file after every successful mutation.
//! Mutations run against a copy of the document, so a failed validation or a
//! failed write never leaves a half-applied change behind.

/// Upgrades documents written with the old daily record layout
pub mod migrate;

use crate::config::SeedConfig;
use crate::entities::{DailyRecord, Employee, Expense, Product, SalesRecord};
use crate::errors::Result;
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

/// The complete ledger document as stored on disk.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Database {
    pub products: Vec<Product>,
    pub employees: Vec<Employee>,
    pub daily_records: Vec<DailyRecord>,
    pub sales_records: Vec<SalesRecord>,
    pub expenses: Vec<Expense>,
}

impl Database {
    /// A fresh document holding the seeded catalogue and roster.
    #[must_use]
    pub fn seeded(seed: &SeedConfig) -> Self {
        Self {
            products: seed.products(),
            employees: seed.employees(),
            ..Self::default()
        }
    }
}

/// Shared handle to the ledger document.
#[derive(Debug)]
pub struct Store {
    path: Option<PathBuf>,
    data: RwLock<Database>,
}

impl Store {
    /// Opens the data file at `path`, creating it from `seed` when missing or
    /// empty and migrating legacy daily records in place.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or written.
    #[instrument(skip(seed))]
    pub async fn open(path: &Path, seed: &SeedConfig) -> Result<Self> {
        let existing = match tokio::fs::read(path).await {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => None,
            Ok(bytes) => Some(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };

        let db = match existing {
            None => {
                info!("No data at {}, writing seeded document", path.display());
                let db = Database::seeded(seed);
                persist(path, &db).await?;
                db
            }
            Some(bytes) => {
                let mut doc: serde_json::Value = serde_json::from_slice(&bytes)?;
                let migrated = migrate::migrate_document(&mut doc);
                let db: Database = serde_json::from_value(doc)?;
                if migrated > 0 {
                    info!(records = migrated, "Migrated daily records to current layout");
                    persist(path, &db).await?;
                }
                db
            }
        };

        debug!(
            products = db.products.len(),
            employees = db.employees.len(),
            daily_records = db.daily_records.len(),
            "Ledger document loaded"
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            data: RwLock::new(db),
        })
    }

    /// A store that never touches the filesystem.
    #[must_use]
    pub fn in_memory(db: Database) -> Self {
        Self {
            path: None,
            data: RwLock::new(db),
        }
    }

    /// Runs `f` against the current document.
    pub async fn read<T>(&self, f: impl FnOnce(&Database) -> T) -> T {
        let guard = self.data.read().await;
        f(&guard)
    }

    /// Applies `f` to a copy of the document and, if it succeeds, persists the
    /// copy and makes it current.
    ///
    /// # Errors
    /// Returns the error from `f`, or an I/O error if persisting fails. In both
    /// cases the current document is unchanged.
    pub async fn write<T>(&self, f: impl FnOnce(&mut Database) -> Result<T>) -> Result<T> {
        let mut guard = self.data.write().await;
        let mut next = guard.clone();
        let out = f(&mut next)?;
        if let Some(path) = &self.path {
            persist(path, &next).await?;
        }
        *guard = next;
        Ok(out)
    }
}

/// Writes `db` to a sibling temp file and renames it over `path`.
async fn persist(path: &Path, db: &Database) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec_pretty(db)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    debug!("Persisted ledger document to {}", path.display());
    Ok(())
}
