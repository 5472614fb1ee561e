use chrono::{DateTime, NaiveDateTime, Utc};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    journal::User,
    utils::{data_dir, ensure_dir},
};

use super::{Result, StorageBackend};

const USER_FILE: &str = "user.json";
const BACKUP_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// JSON-file store for the single user record. Every overwrite stages to
/// a temporary file, keeps a timestamped backup of the previous file, and
/// prunes old backups down to the retention limit.
#[derive(Clone)]
pub struct JsonStorage {
    root: PathBuf,
    user_file: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
}

impl JsonStorage {
    pub fn new(root: Option<PathBuf>, retention: Option<usize>) -> Result<Self> {
        let root = root.unwrap_or_else(data_dir);
        ensure_dir(&root)?;
        let backups_dir = root.join("backups");
        ensure_dir(&backups_dir)?;
        Ok(Self {
            user_file: root.join(USER_FILE),
            backups_dir,
            root,
            retention: retention.unwrap_or(DEFAULT_RETENTION).max(1),
        })
    }

    pub fn new_default() -> Result<Self> {
        Self::new(None, None)
    }

    pub fn user_path(&self) -> &Path {
        &self.user_file
    }

    pub fn base_dir(&self) -> &Path {
        &self.root
    }

    fn backup_existing_file(&self) -> Result<()> {
        if !self.user_file.exists() {
            return Ok(());
        }
        ensure_dir(&self.backups_dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let backup_name = format!("user_{}.{}", timestamp, BACKUP_EXTENSION);
        fs::copy(&self.user_file, self.backups_dir.join(backup_name))?;
        self.prune_backups()?;
        Ok(())
    }

    fn prune_backups(&self) -> Result<()> {
        let backups = self.list_backups()?;
        for name in backups.iter().skip(self.retention) {
            let _ = fs::remove_file(self.backups_dir.join(name));
        }
        Ok(())
    }
}

impl StorageBackend for JsonStorage {
    fn load_user(&self) -> Result<Option<User>> {
        if !self.user_file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&self.user_file)?;
        let mut user: User = serde_json::from_str(&data)?;
        user.rebuild_index();
        Ok(Some(user))
    }

    fn save(&self, user: &User) -> Result<()> {
        self.backup_existing_file()?;
        let json = serde_json::to_string_pretty(user)?;
        let tmp = tmp_path(&self.user_file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.user_file)?;
        Ok(())
    }

    fn list_backups(&self) -> Result<Vec<String>> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(BACKUP_EXTENSION) {
                continue;
            }
            if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(name.to_string());
            }
        }
        entries.sort_by(|a, b| parse_backup_timestamp(b).cmp(&parse_backup_timestamp(a)));
        Ok(entries)
    }
}

fn parse_backup_timestamp(name: &str) -> Option<DateTime<Utc>> {
    let trimmed = name.strip_prefix("user_")?.strip_suffix(".json")?;
    NaiveDateTime::parse_from_str(trimmed, BACKUP_TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
