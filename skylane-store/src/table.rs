use std::fs::{self, File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use crate::record::{DecodeError, Record};

/// Errors raised by the record store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing file could not be opened, read, or written.
    #[error("{table} store unavailable: {source}")]
    Unavailable {
        table: &'static str,
        #[source]
        source: io::Error,
    },

    /// A full-width record failed to decode back into its type.
    #[error("corrupt record in {table} store at offset {offset}: {source}")]
    Corrupt {
        table: &'static str,
        offset: u64,
        #[source]
        source: DecodeError,
    },
}

/// A fixed-width record table bound to one backing file.
///
/// Every operation opens the file, does its work, and releases the handle
/// before returning; nothing is cached between calls. Updates never touch
/// the backing file in place: `rewrite_where` stages a full copy beside it
/// and swaps the copy in with a single rename, so an interrupted rewrite
/// leaves the original intact. Concurrent writers are unsupported.
#[derive(Debug, Clone)]
pub struct Table<R: Record> {
    path: PathBuf,
    _record: PhantomData<R>,
}

impl<R: Record> Table<R> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    /// Append one record to the end of the table, creating the file on
    /// first use.
    pub fn append(&self, record: &R) -> Result<(), StoreError> {
        let mut buf = vec![0u8; R::ENCODED_LEN];
        record.encode(&mut buf);
        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(Self::unavailable)?;
        file.write_all(&buf).map_err(Self::unavailable)?;
        file.sync_all().map_err(Self::unavailable)?;
        Ok(())
    }

    /// Iterate the table in insertion order. A missing backing file reads
    /// as an empty table.
    pub fn scan(&self) -> Result<TableScan<R>, StoreError> {
        match File::open(&self.path) {
            Ok(file) => Ok(TableScan::from_file(file)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(TableScan::empty()),
            Err(err) => Err(Self::unavailable(err)),
        }
    }

    /// Rewrite the table, applying `transform` to every record `predicate`
    /// selects. Returning `None` from the transform drops the record.
    ///
    /// The new contents are staged to a sibling file and renamed over the
    /// original only when at least one record matched. Returns whether any
    /// did; a missing backing file matches nothing.
    pub fn rewrite_where<P, T>(&self, mut predicate: P, mut transform: T) -> Result<bool, StoreError>
    where
        P: FnMut(&R) -> bool,
        T: FnMut(R) -> Option<R>,
    {
        let scan = match File::open(&self.path) {
            Ok(file) => TableScan::from_file(file),
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(err) => return Err(Self::unavailable(err)),
        };

        let staging = self.staging_path();
        match self.copy_records(scan, &staging, &mut predicate, &mut transform) {
            Ok(true) => {
                fs::rename(&staging, &self.path).map_err(Self::unavailable)?;
                tracing::debug!(table = R::NAME, "rewritten table swapped into place");
                Ok(true)
            }
            Ok(false) => {
                let _ = fs::remove_file(&staging);
                Ok(false)
            }
            Err(err) => {
                let _ = fs::remove_file(&staging);
                Err(err)
            }
        }
    }

    fn copy_records<P, T>(
        &self,
        scan: TableScan<R>,
        staging: &Path,
        predicate: &mut P,
        transform: &mut T,
    ) -> Result<bool, StoreError>
    where
        P: FnMut(&R) -> bool,
        T: FnMut(R) -> Option<R>,
    {
        let file = File::create(staging).map_err(Self::unavailable)?;
        let mut writer = BufWriter::new(file);
        let mut buf = vec![0u8; R::ENCODED_LEN];
        let mut matched = false;
        for record in scan {
            let record = record?;
            let replacement = if predicate(&record) {
                matched = true;
                transform(record)
            } else {
                Some(record)
            };
            if let Some(record) = replacement {
                record.encode(&mut buf);
                writer.write_all(&buf).map_err(Self::unavailable)?;
            }
        }
        let file = writer
            .into_inner()
            .map_err(|err| Self::unavailable(err.into_error()))?;
        file.sync_all().map_err(Self::unavailable)?;
        Ok(matched)
    }

    fn staging_path(&self) -> PathBuf {
        let mut staged = self.path.clone().into_os_string();
        staged.push(".rewrite");
        PathBuf::from(staged)
    }

    fn unavailable(source: io::Error) -> StoreError {
        StoreError::Unavailable {
            table: R::NAME,
            source,
        }
    }
}

/// Streaming reader over a table file, one record per step.
pub struct TableScan<R: Record> {
    reader: Option<BufReader<File>>,
    offset: u64,
    buf: Vec<u8>,
    _record: PhantomData<R>,
}

impl<R: Record> TableScan<R> {
    fn from_file(file: File) -> Self {
        Self {
            reader: Some(BufReader::new(file)),
            offset: 0,
            buf: vec![0u8; R::ENCODED_LEN],
            _record: PhantomData,
        }
    }

    fn empty() -> Self {
        Self {
            reader: None,
            offset: 0,
            buf: Vec::new(),
            _record: PhantomData,
        }
    }
}

impl<R: Record> Iterator for TableScan<R> {
    type Item = Result<R, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let reader = self.reader.as_mut()?;
        match read_full(reader, &mut self.buf) {
            Ok(0) => {
                self.reader = None;
                None
            }
            Ok(n) if n < R::ENCODED_LEN => {
                // A short trailing chunk means a crashed append; everything
                // before it is still good.
                tracing::warn!(
                    table = R::NAME,
                    offset = self.offset,
                    "ignoring truncated trailing record"
                );
                self.reader = None;
                None
            }
            Ok(_) => {
                let item = R::decode(&self.buf).map_err(|source| StoreError::Corrupt {
                    table: R::NAME,
                    offset: self.offset,
                    source,
                });
                self.offset += R::ENCODED_LEN as u64;
                Some(item)
            }
            Err(source) => {
                self.reader = None;
                Some(Err(StoreError::Unavailable {
                    table: R::NAME,
                    source,
                }))
            }
        }
    }
}

fn read_full(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        }
    }
    Ok(filled)
}
