//! Ledger record repository backed by records.json
//!
//! Records are kept in insertion order in memory and on disk. Every mutation
//! is written through immediately; if the write fails the in-memory change is
//! undone so callers never see a record that was not persisted.

use std::path::PathBuf;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::{debug, info};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{LedgerRecord, NewLedgerRecord, RecordId, Session};

use super::file_io::{read_json, write_json_atomic};
use super::RecordStore;

/// On-disk layout of records.json
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct RecordData {
    records: Vec<LedgerRecord>,
}

/// JSON-file implementation of [`RecordStore`]
pub struct RecordRepository {
    path: PathBuf,
    data: RwLock<Vec<LedgerRecord>>,
}

impl RecordRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Load records from disk, replacing anything in memory
    pub fn load(&self) -> LedgerResult<()> {
        let file_data: RecordData = read_json(&self.path)?;
        debug!(
            path = %self.path.display(),
            count = file_data.records.len(),
            "Loaded records"
        );
        *self.write()? = file_data.records;
        Ok(())
    }

    /// Count all records regardless of owner
    pub fn count(&self) -> LedgerResult<usize> {
        Ok(self.read()?.len())
    }

    /// Find one of the owner's records by full ID, `rec-xxxxxxxx`, or an
    /// 8+ character UUID prefix
    pub fn find(&self, session: &Session, identifier: &str) -> LedgerResult<Option<LedgerRecord>> {
        let owner = session.require_owner()?;
        let data = self.read()?;
        let mut matches = data
            .iter()
            .filter(|r| &r.owner_id == owner && r.id.matches(identifier));

        let found = matches.next().cloned();
        if matches.next().is_some() {
            return Err(LedgerError::Validation(format!(
                "'{}' matches more than one record",
                identifier
            )));
        }
        Ok(found)
    }

    fn persist(&self, records: &[LedgerRecord]) -> LedgerResult<()> {
        let file_data = RecordData {
            records: records.to_vec(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    fn read(&self) -> LedgerResult<RwLockReadGuard<'_, Vec<LedgerRecord>>> {
        self.data
            .read()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> LedgerResult<RwLockWriteGuard<'_, Vec<LedgerRecord>>> {
        self.data
            .write()
            .map_err(|e| LedgerError::Storage(format!("Failed to acquire write lock: {}", e)))
    }
}

impl RecordStore for RecordRepository {
    fn create(&self, session: &Session, record: NewLedgerRecord) -> LedgerResult<LedgerRecord> {
        let owner = session.require_owner()?.clone();
        let record = LedgerRecord::from_new(RecordId::new(), owner, Utc::now(), record);

        let mut data = self.write()?;
        data.push(record.clone());
        if let Err(e) = self.persist(&data) {
            data.pop();
            return Err(e);
        }

        info!(record = %record.id, owner = %record.owner_id, "Created record");
        Ok(record)
    }

    fn list(&self, session: &Session) -> LedgerResult<Vec<LedgerRecord>> {
        let owner = session.require_owner()?;
        let mut records: Vec<_> = self
            .read()?
            .iter()
            .filter(|r| &r.owner_id == owner)
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    fn delete(&self, session: &Session, id: RecordId) -> LedgerResult<LedgerRecord> {
        let owner = session.require_owner()?;

        let mut data = self.write()?;
        let index = data
            .iter()
            .position(|r| r.id == id && &r.owner_id == owner)
            .ok_or_else(|| LedgerError::record_not_found(id.to_string()))?;

        let removed = data.remove(index);
        if let Err(e) = self.persist(&data) {
            data.insert(index, removed);
            return Err(e);
        }

        info!(record = %id, owner = %owner, "Deleted record");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, OwnerId};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, RecordRepository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = RecordRepository::new(temp_dir.path().join("records.json"));
        repo.load().unwrap();
        (temp_dir, repo)
    }

    fn session(name: &str) -> Session {
        Session::signed_in(OwnerId::new(name))
    }

    fn new_record(note: &str) -> NewLedgerRecord {
        NewLedgerRecord {
            note: Some(note.to_string()),
            timestamp: Some("01/06/2025 10:00:00".into()),
            lines: vec![LineItem::new(500, 3, 0, 3)],
        }
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.list(&session("asha")).unwrap().is_empty());
    }

    #[test]
    fn test_create_assigns_id_and_owner() {
        let (_temp_dir, repo) = create_test_repo();
        let created = repo.create(&session("asha"), new_record("till")).unwrap();

        assert_eq!(created.owner_id.as_str(), "asha");
        assert!(created.created_at.is_some());
        assert_eq!(created.total().units(), 1_500);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_anonymous_is_unauthorized() {
        let (_temp_dir, repo) = create_test_repo();
        let anon = Session::anonymous();

        assert!(matches!(
            repo.create(&anon, new_record("x")),
            Err(LedgerError::Unauthorized)
        ));
        assert!(matches!(repo.list(&anon), Err(LedgerError::Unauthorized)));
        assert!(matches!(
            repo.delete(&anon, RecordId::new()),
            Err(LedgerError::Unauthorized)
        ));
    }

    #[test]
    fn test_list_is_owner_scoped_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.create(&session("asha"), new_record("one")).unwrap();
        repo.create(&session("ravi"), new_record("other")).unwrap();
        repo.create(&session("asha"), new_record("two")).unwrap();

        let notes: Vec<_> = repo
            .list(&session("asha"))
            .unwrap()
            .into_iter()
            .map(|r| r.note.unwrap())
            .collect();
        assert_eq!(notes.len(), 2);
        assert!(!notes.contains(&"other".to_string()));
    }

    #[test]
    fn test_delete_scoped_to_owner() {
        let (_temp_dir, repo) = create_test_repo();
        let created = repo.create(&session("asha"), new_record("till")).unwrap();

        let err = repo.delete(&session("ravi"), created.id).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(repo.count().unwrap(), 1);

        let removed = repo.delete(&session("asha"), created.id).unwrap();
        assert_eq!(removed.id, created.id);
        assert_eq!(repo.count().unwrap(), 0);

        assert!(repo.delete(&session("asha"), created.id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        let created = repo.create(&session("asha"), new_record("till")).unwrap();

        let repo2 = RecordRepository::new(temp_dir.path().join("records.json"));
        repo2.load().unwrap();

        let records = repo2.list(&session("asha")).unwrap();
        assert_eq!(records, vec![created]);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.json");
        std::fs::create_dir(&path).unwrap();
        let repo = RecordRepository::new(path);

        let result = repo.create(&session("asha"), new_record("till"));
        assert!(matches!(result, Err(LedgerError::Storage(_))));
        assert_eq!(repo.count().unwrap(), 0);
    }

    #[test]
    fn test_find_by_short_id() {
        let (_temp_dir, repo) = create_test_repo();
        let created = repo.create(&session("asha"), new_record("till")).unwrap();

        let found = repo.find(&session("asha"), &created.id.to_string()).unwrap();
        assert_eq!(found.map(|r| r.id), Some(created.id));
        assert!(repo
            .find(&session("ravi"), &created.id.to_string())
            .unwrap()
            .is_none());
    }
}
