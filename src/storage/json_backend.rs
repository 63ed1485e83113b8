use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::Utc;
use serde_json::Value;

use crate::domain::ServiceRecord;
use crate::registry::Registry;

use super::{app_data_dir, backups_dir_in, ensure_dir, registries_dir_in, Result};

const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Outcome of loading a registry. Decoding is lenient: service records whose
/// stored form cannot be decoded (for example a malformed `service_date`) are
/// dropped and counted rather than failing the whole load.
#[derive(Debug)]
pub struct LoadReport {
    pub registry: Registry,
    pub skipped_records: usize,
}

#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    registries_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = root.unwrap_or_else(app_data_dir);
        ensure_dir(&root)?;
        let registries_dir = registries_dir_in(&root);
        let backups_dir = backups_dir_in(&root);
        ensure_dir(&registries_dir)?;
        ensure_dir(&backups_dir)?;
        Ok(Self {
            root,
            registries_dir,
            backups_dir,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    pub fn registry_path(&self, name: &str) -> PathBuf {
        self.registries_dir
            .join(format!("{}.json", canonical_name(name)))
    }

    fn backup_dir(&self, name: &str) -> PathBuf {
        self.backups_dir.join(canonical_name(name))
    }

    /// Saves the registry under `name`, preserving the previous file as a
    /// backup snapshot.
    pub fn save(&self, registry: &Registry, name: &str) -> Result<()> {
        let path = self.registry_path(name);
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        if path.exists() {
            self.backup_existing_file(name, &path)?;
        }
        let json = serde_json::to_string_pretty(registry)?;
        let tmp = tmp_path(&path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Loads the registry stored under `name`.
    pub fn load(&self, name: &str) -> Result<LoadReport> {
        load_registry_from_path(&self.registry_path(name))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.registry_path(name).exists()
    }

    pub fn list_registries(&self) -> Result<Vec<String>> {
        if !self.registries_dir.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.registries_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                names.push(stem.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn list_backups(&self, name: &str) -> Result<Vec<String>> {
        let dir = self.backup_dir(name);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            if let Some(file_name) = entry.path().file_name().and_then(|n| n.to_str()) {
                entries.push(file_name.to_string());
            }
        }
        entries.sort_by(|a, b| b.cmp(a));
        Ok(entries)
    }

    fn backup_existing_file(&self, name: &str, path: &Path) -> Result<()> {
        if !path.exists() {
            return Ok(());
        }
        let dir = self.backup_dir(name);
        ensure_dir(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_name = format!(
            "{}_{}.{}",
            canonical_name(name),
            timestamp,
            BACKUP_EXTENSION
        );
        fs::copy(path, dir.join(backup_name))?;
        self.prune_backups(name)?;
        Ok(())
    }

    fn prune_backups(&self, name: &str) -> Result<()> {
        let backups = self.list_backups(name)?;
        if backups.len() <= self.retention {
            return Ok(());
        }
        for entry in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backup_dir(name).join(entry));
        }
        Ok(())
    }
}

fn load_registry_from_path(path: &Path) -> Result<LoadReport> {
    let data = fs::read_to_string(path)?;
    let mut value: Value = serde_json::from_str(&data)?;

    // Pull the record array out so each record can be decoded individually;
    // one malformed record must not poison the registry.
    let raw_services = match value.get_mut("services") {
        Some(services) => services.take(),
        None => Value::Array(Vec::new()),
    };
    if let Some(object) = value.as_object_mut() {
        object.insert("services".into(), Value::Array(Vec::new()));
    }

    let mut registry: Registry = serde_json::from_value(value)?;
    let mut skipped_records = 0usize;
    if let Value::Array(entries) = raw_services {
        for entry in entries {
            match serde_json::from_value::<ServiceRecord>(entry) {
                Ok(record) => registry.services.push(record),
                Err(error) => {
                    skipped_records += 1;
                    tracing::warn!(%error, "skipping undecodable service record");
                }
            }
        }
    }

    Ok(LoadReport {
        registry,
        skipped_records,
    })
}

fn canonical_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|ch| if ch.is_alphanumeric() { ch } else { '_' })
        .collect()
}

fn tmp_path(path: &Path) -> PathBuf {
    path.with_extension(TMP_SUFFIX)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
