use std::collections::{BTreeMap, HashMap};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::models::{ForeignKey, Kind, Record};
use crate::storage::{Storage, StorageError, StorageResult};

/// Object map keyed `"<Class>.<id>"`, optionally backed by a JSON file.
///
/// Without a path this is a plain in-memory store (tests, local runs).
/// With a path the whole map is rewritten on every `save()`.
#[derive(Debug)]
pub struct FileStorage {
    path: Option<PathBuf>,
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    objects: BTreeMap<String, Record>,
    // Insertion sequence per key; replacing a record keeps its slot.
    order: HashMap<String, u64>,
    next_seq: u64,
    dirty: bool,
}

impl Inner {
    fn with_objects(objects: BTreeMap<String, Record>) -> Self {
        let mut inner = Self {
            objects,
            ..Self::default()
        };
        let mut keys: Vec<(&Record, &String)> =
            inner.objects.iter().map(|(k, r)| (r, k)).collect();
        keys.sort_by(|(a, _), (b, _)| {
            a.base()
                .created_at
                .cmp(&b.base().created_at)
                .then_with(|| a.id().cmp(b.id()))
        });
        let order: HashMap<String, u64> = keys
            .into_iter()
            .enumerate()
            .map(|(seq, (_, k))| (k.clone(), seq as u64))
            .collect();
        inner.next_seq = order.len() as u64;
        inner.order = order;
        inner
    }

    fn insert(&mut self, record: Record) {
        let key = key(record.kind(), record.id());
        if !self.order.contains_key(&key) {
            self.order.insert(key.clone(), self.next_seq);
            self.next_seq += 1;
        }
        self.objects.insert(key, record);
        self.dirty = true;
    }

    fn remove(&mut self, key: &str) -> bool {
        self.order.remove(key);
        let removed = self.objects.remove(key).is_some();
        if removed {
            self.dirty = true;
        }
        removed
    }

    // Records matching `filter`, in insertion order.
    fn select(&self, filter: impl Fn(&Record) -> bool) -> Vec<Record> {
        let mut out: Vec<(u64, &Record)> = self
            .objects
            .iter()
            .filter(|(_, r)| filter(r))
            .map(|(k, r)| (self.order.get(k).copied().unwrap_or(u64::MAX), r))
            .collect();
        out.sort_by_key(|(seq, _)| *seq);
        out.into_iter().map(|(_, r)| r.clone()).collect()
    }
}

fn key(kind: Kind, id: &str) -> String {
    format!("{}.{}", kind.class_name(), id)
}

impl FileStorage {
    pub fn in_memory() -> Self {
        Self {
            path: None,
            inner: Mutex::new(Inner::default()),
        }
    }

    /// Open a file-backed store. A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let objects = load(&path).await?;
        tracing::info!(path = %path.display(), objects = objects.len(), "loaded file storage");

        Ok(Self {
            path: Some(path),
            inner: Mutex::new(Inner::with_objects(objects)),
        })
    }

    async fn flush(&self, inner: &mut Inner) -> StorageResult<()> {
        if let Some(path) = &self.path {
            let bytes = serde_json::to_vec_pretty(&inner.objects)?;
            // Write then rename so a crash never leaves a half-written file.
            let tmp = path.with_extension("tmp");
            tokio::fs::write(&tmp, bytes).await?;
            tokio::fs::rename(&tmp, path).await?;
        }
        inner.dirty = false;
        Ok(())
    }
}

async fn load(path: &Path) -> StorageResult<BTreeMap<String, Record>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(BTreeMap::new()),
        Err(e) => return Err(e.into()),
    };

    let objects: BTreeMap<String, Record> = serde_json::from_slice(&bytes)?;
    for (stored_key, record) in &objects {
        if *stored_key != key(record.kind(), record.id()) {
            return Err(StorageError::Corrupt(stored_key.clone()));
        }
    }
    Ok(objects)
}

#[async_trait]
impl Storage for FileStorage {
    fn backend_name(&self) -> &'static str {
        "file"
    }

    async fn all(&self, kind: Kind) -> StorageResult<Vec<Record>> {
        let inner = self.inner.lock().await;
        Ok(inner.select(|r| r.kind() == kind))
    }

    async fn get(&self, kind: Kind, id: &str) -> StorageResult<Option<Record>> {
        let inner = self.inner.lock().await;
        Ok(inner.objects.get(&key(kind, id)).cloned())
    }

    async fn children(
        &self,
        kind: Kind,
        foreign_key: ForeignKey,
        parent_id: &str,
    ) -> StorageResult<Vec<Record>> {
        let inner = self.inner.lock().await;
        Ok(inner.select(|r| {
            r.kind() == kind && r.foreign_key(foreign_key) == Some(parent_id)
        }))
    }

    async fn put(&self, record: Record) -> StorageResult<()> {
        let mut inner = self.inner.lock().await;
        inner.insert(record);
        Ok(())
    }

    async fn delete(&self, kind: Kind, id: &str) -> StorageResult<bool> {
        let mut inner = self.inner.lock().await;
        Ok(inner.remove(&key(kind, id)))
    }

    async fn save(&self) -> StorageResult<()> {
        let mut inner = self.inner.lock().await;
        self.flush(&mut inner).await
    }

    async fn count(&self, kind: Kind) -> StorageResult<u64> {
        let inner = self.inner.lock().await;
        Ok(inner.objects.values().filter(|r| r.kind() == kind).count() as u64)
    }

    async fn close(&self) -> StorageResult<()> {
        let mut inner = self.inner.lock().await;
        if inner.dirty {
            tracing::debug!("flushing unsaved changes on close");
            self.flush(&mut inner).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{City, State};

    fn city(state_id: &str, name: &str) -> City {
        City {
            state_id: state_id.into(),
            name: name.into(),
            ..City::default()
        }
    }

    #[tokio::test]
    async fn children_filters_by_foreign_key() {
        let storage = FileStorage::in_memory();
        storage.put(city("s1", "A").into()).await.unwrap();
        storage.put(city("s2", "B").into()).await.unwrap();
        storage.put(city("s1", "C").into()).await.unwrap();

        let cities = storage
            .children(Kind::City, ForeignKey::StateId, "s1")
            .await
            .unwrap();
        let names: Vec<String> = cities
            .into_iter()
            .map(|r| City::try_from(r).unwrap().name)
            .collect();

        assert_eq!(names, vec!["A", "C"]);
        assert_eq!(storage.count(Kind::City).await.unwrap(), 3);
        assert_eq!(storage.count(Kind::State).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn save_then_open_restores_objects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");

        let state = State {
            name: "Kano".into(),
            ..State::default()
        };
        let id = state.base.id.clone();

        let storage = FileStorage::open(&path).await.unwrap();
        storage.put(state.into()).await.unwrap();
        storage.save().await.unwrap();

        let reopened = FileStorage::open(&path).await.unwrap();
        let record = reopened.get(Kind::State, &id).await.unwrap().unwrap();
        assert_eq!(State::try_from(record).unwrap().name, "Kano");
    }

    #[tokio::test]
    async fn close_flushes_unsaved_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");

        let storage = FileStorage::open(&path).await.unwrap();
        storage.put(State::default().into()).await.unwrap();
        assert!(!path.exists());

        storage.close().await.unwrap();
        assert!(path.exists());
        let reopened = FileStorage::open(&path).await.unwrap();
        assert_eq!(reopened.count(Kind::State).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn delete_reports_missing_objects() {
        let storage = FileStorage::in_memory();
        let state = State::default();
        let id = state.base.id.clone();
        storage.put(state.into()).await.unwrap();

        assert!(storage.delete(Kind::State, &id).await.unwrap());
        assert!(!storage.delete(Kind::State, &id).await.unwrap());
        assert!(storage.get(Kind::State, &id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn mismatched_key_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.json");

        let record = Record::from(State::default());
        let body = serde_json::json!({ "State.not-the-id": record });
        std::fs::write(&path, serde_json::to_vec(&body).unwrap()).unwrap();

        let err = FileStorage::open(&path).await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(k) if k == "State.not-the-id"));
    }
}
