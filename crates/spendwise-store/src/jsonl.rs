//! JSON-lines file store
//!
//! Each created expense is appended as one JSON line and flushed before the
//! call returns. Opening a store replays the file into memory, so reads never
//! touch disk. A write or flush that fails truncates the file back to its
//! previous length, so a rejected create leaves nothing behind.

use crate::store::{page, ExpenseStore};
use async_trait::async_trait;
use parking_lot::Mutex;
use spendwise_core::{Error, Expense, ExpenseDraft, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Byte sink the log is appended to
///
/// A failed append is undone by truncating back to the length recorded
/// before the write.
pub trait LogSink: Write + Send {
    /// Current length in bytes
    fn size(&self) -> io::Result<u64>;

    /// Cut the sink back to `len` bytes
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl LogSink for File {
    fn size(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

struct JsonlInner<S> {
    sink: S,
    records: Vec<Expense>,
    next_id: u64,
}

/// Append-only expense log on disk
pub struct JsonlStore<S = File> {
    path: PathBuf,
    inner: Mutex<JsonlInner<S>>,
}

impl JsonlStore {
    /// Open (or create) the store at `path`, loading existing records
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let records = if path.exists() {
            read_records(&path)?
        } else {
            Vec::new()
        };

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        info!(
            "Opened expense store {} with {} records",
            path.display(),
            records.len()
        );

        Ok(Self::with_sink(path, file, records))
    }
}

impl<S: LogSink> JsonlStore<S> {
    fn with_sink(path: PathBuf, sink: S, records: Vec<Expense>) -> Self {
        let next_id = records.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        Self {
            path,
            inner: Mutex::new(JsonlInner {
                sink,
                records,
                next_id,
            }),
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn read_records(path: &Path) -> Result<Vec<Expense>> {
    let reader = BufReader::new(File::open(path)?);
    let mut records = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let expense: Expense = serde_json::from_str(&line).map_err(|e| {
            Error::storage(format!(
                "corrupt record at {}:{}: {e}",
                path.display(),
                line_no + 1
            ))
        })?;
        records.push(expense);
    }

    Ok(records)
}

#[async_trait]
impl<S: LogSink + 'static> ExpenseStore for JsonlStore<S> {
    async fn create(&self, draft: ExpenseDraft) -> Result<Expense> {
        let mut inner = self.inner.lock();
        let expense = draft.with_id(inner.next_id);

        let mut line = serde_json::to_vec(&expense)?;
        line.push(b'\n');

        let sink = &mut inner.sink;
        let prev_len = sink.size()?;
        if let Err(e) = sink.write_all(&line).and_then(|()| sink.flush()) {
            warn!(id = expense.id, "Append failed, rolling back to {prev_len} bytes: {e}");
            if let Err(te) = sink.truncate(prev_len) {
                error!("Failed to truncate {}: {te}", self.path.display());
            }
            return Err(e.into());
        }

        inner.next_id += 1;
        inner.records.push(expense.clone());
        debug!(id = expense.id, "Appended expense record");
        Ok(expense)
    }

    async fn list(&self, skip: usize, limit: usize) -> Result<Vec<Expense>> {
        Ok(page(&self.inner.lock().records, skip, limit))
    }

    async fn all(&self) -> Result<Vec<Expense>> {
        Ok(self.inner.lock().records.clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.inner.lock().records.len())
    }

    fn name(&self) -> &str {
        "jsonl"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spendwise_core::NewExpense;

    /// In-memory sink that can be told to fail part way through a write
    #[derive(Default)]
    struct FlakySink {
        bytes: Vec<u8>,
        fail_write: bool,
        fail_flush: bool,
    }

    impl Write for FlakySink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.fail_write {
                // accept a partial chunk so the rollback has something to undo
                let n = buf.len() / 2;
                if n == 0 {
                    return Err(io::Error::other("disk full"));
                }
                self.bytes.extend_from_slice(&buf[..n]);
                return Ok(n);
            }
            self.bytes.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            if self.fail_flush {
                return Err(io::Error::other("flush failed"));
            }
            Ok(())
        }
    }

    impl LogSink for FlakySink {
        fn size(&self) -> io::Result<u64> {
            Ok(self.bytes.len() as u64)
        }

        fn truncate(&mut self, len: u64) -> io::Result<()> {
            self.bytes.truncate(len as usize);
            Ok(())
        }
    }

    fn store() -> JsonlStore<FlakySink> {
        JsonlStore::with_sink(PathBuf::from("flaky.jsonl"), FlakySink::default(), Vec::new())
    }

    fn draft(description: &str) -> ExpenseDraft {
        NewExpense::new(description, 10.0)
            .with_date("2024-03-01")
            .into_draft("dining".to_string())
            .unwrap()
    }

    fn lines(store: &JsonlStore<FlakySink>) -> Vec<Expense> {
        let inner = store.inner.lock();
        String::from_utf8(inner.sink.bytes.clone())
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_trace() {
        let store = store();
        store.create(draft("lunch")).await.unwrap();

        store.inner.lock().sink.fail_write = true;
        assert!(store.create(draft("dinner")).await.is_err());

        store.inner.lock().sink.fail_write = false;
        let third = store.create(draft("coffee")).await.unwrap();
        assert_eq!(third.id, 2);

        let on_disk = lines(&store);
        assert_eq!(on_disk.len(), 2);
        assert_eq!(on_disk[0].id, 1);
        assert_eq!(on_disk[1].id, 2);
        assert_eq!(on_disk[1].description, "coffee");
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_failed_flush_is_rolled_back() {
        let store = store();

        store.inner.lock().sink.fail_flush = true;
        assert!(store.create(draft("lunch")).await.is_err());
        assert!(store.inner.lock().sink.bytes.is_empty());
        assert_eq!(store.count().await.unwrap(), 0);

        store.inner.lock().sink.fail_flush = false;
        let created = store.create(draft("lunch")).await.unwrap();
        assert_eq!(created.id, 1);

        let on_disk = lines(&store);
        assert_eq!(on_disk.len(), 1);
        assert_eq!(on_disk[0].id, 1);
    }
}
