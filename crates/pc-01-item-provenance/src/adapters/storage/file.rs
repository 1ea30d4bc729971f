use super::lock::{sibling, StoreLock};
use crate::domain::errors::KVStoreError;
use crate::ports::outbound::KeyValueStore;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// File-backed key-value store.
///
/// Holds every key in memory and rewrites the whole file on each `put`, so
/// each write is durable before `put` returns. The store holds an exclusive
/// lock on its file from `open` until drop; a second handle on the same
/// file fails to open instead of overwriting the first one's writes.
///
/// File format: `[key_len:u32 LE][key][value_len:u32 LE][value]...`
#[derive(Debug)]
pub struct FileBackedKVStore {
    data: HashMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
    _lock: StoreLock,
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading existing contents.
    ///
    /// A missing file is an empty store. A file that cannot be read or is
    /// truncated mid-record is an error: the ledger is never silently reset.
    ///
    /// ## Errors
    ///
    /// - `AlreadyLocked`: another open store holds this file
    /// - `IOError`, `CorruptionError`: the file could not be loaded
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();
        // Lock before reading so the loaded contents cannot go stale
        let lock = StoreLock::acquire(&path)?;

        let data = match std::fs::read(&path) {
            Ok(bytes) => {
                let data = decode(&bytes)?;
                tracing::info!(
                    "[pc-01] 💾 Loaded {} keys from {} ({} bytes)",
                    data.len(),
                    path.display(),
                    bytes.len()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("[pc-01] 📁 No existing storage file at {}", path.display());
                HashMap::new()
            }
            Err(e) => {
                return Err(KVStoreError::IOError {
                    message: format!("{}: {}", path.display(), e),
                })
            }
        };

        Ok(Self {
            data,
            path,
            _lock: lock,
        })
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        use std::io::Write;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_error)?;
        }

        let mut bytes = Vec::new();
        for (key, value) in &self.data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }

        // Write atomically via temp file
        let temp_path = sibling(&self.path, ".tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_error)?;
        file.write_all(&bytes).map_err(io_error)?;
        file.sync_all().map_err(io_error)?;
        std::fs::rename(&temp_path, &self.path).map_err(io_error)?;

        Ok(())
    }
}

fn io_error(e: std::io::Error) -> KVStoreError {
    KVStoreError::IOError {
        message: e.to_string(),
    }
}

fn decode(bytes: &[u8]) -> Result<HashMap<Vec<u8>, Vec<u8>>, KVStoreError> {
    let mut data = HashMap::new();
    let mut cursor = 0;

    while cursor < bytes.len() {
        let key = read_chunk(bytes, &mut cursor)?;
        let value = read_chunk(bytes, &mut cursor)?;
        data.insert(key, value);
    }

    Ok(data)
}

fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
    let truncated = || KVStoreError::CorruptionError {
        message: format!("storage file truncated at byte {}", cursor),
    };

    let len_bytes: [u8; 4] = bytes
        .get(*cursor..*cursor + 4)
        .and_then(|b| b.try_into().ok())
        .ok_or_else(truncated)?;
    let len = u32::from_le_bytes(len_bytes) as usize;

    let start = *cursor + 4;
    let chunk = bytes.get(start..start + len).ok_or_else(truncated)?;
    *cursor = start + len;
    Ok(chunk.to_vec())
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        let previous = self.data.insert(key.to_vec(), value.to_vec());
        if let Err(e) = self.save_to_file() {
            // Keep memory consistent with what is on disk
            match previous {
                Some(old) => self.data.insert(key.to_vec(), old),
                None => self.data.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn exists(&self, key: &[u8]) -> Result<bool, KVStoreError> {
        Ok(self.data.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reopen_preserves_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        {
            let mut store = FileBackedKVStore::open(&path).unwrap();
            store.put(b"allItems", br#"{"items":["I1"]}"#).unwrap();
            store.put(b"I1", b"{}").unwrap();
        }

        let store = FileBackedKVStore::open(&path).unwrap();
        assert_eq!(
            store.get(b"allItems").unwrap(),
            Some(br#"{"items":["I1"]}"#.to_vec())
        );
        assert!(store.exists(b"I1").unwrap());
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileBackedKVStore::open(dir.path().join("absent.db")).unwrap();
        assert_eq!(store.get(b"anything").unwrap(), None);
    }

    #[test]
    fn test_truncated_file_is_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        // Key length says 10 bytes, only 2 follow
        let mut bytes = 10u32.to_le_bytes().to_vec();
        bytes.extend_from_slice(b"I1");
        std::fs::write(&path, bytes).unwrap();

        let result = FileBackedKVStore::open(&path);
        assert!(matches!(result, Err(KVStoreError::CorruptionError { .. })));
    }

    #[test]
    fn test_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger.db");

        let mut store = FileBackedKVStore::open(&path).unwrap();
        store.put(b"k", b"v").unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_second_open_fails_while_first_is_live() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        let mut first = FileBackedKVStore::open(&path).unwrap();
        let second = FileBackedKVStore::open(&path);
        assert!(matches!(second, Err(KVStoreError::AlreadyLocked { .. })));

        first.put(b"I1", b"{}").unwrap();
        drop(first);

        let reopened = FileBackedKVStore::open(&path).unwrap();
        assert!(reopened.exists(b"I1").unwrap());
    }

    #[test]
    fn test_store_named_tmp_keeps_atomic_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.tmp");

        {
            let mut store = FileBackedKVStore::open(&path).unwrap();
            store.put(b"k", b"v").unwrap();
        }

        assert!(path.exists());
        assert!(!dir.path().join("ledger.tmp.tmp").exists());
        let store = FileBackedKVStore::open(&path).unwrap();
        assert_eq!(store.get(b"k").unwrap(), Some(b"v".to_vec()));
    }
}
