use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;
use std::sync::{Arc, Mutex};

use log::{info, warn};

use super::format::{self, record::RecordDecoder};
use super::iter::{RecordIterator, SpanIterator};
use super::types::entry::DecodeOutcome;
use super::types::error::{Result, TrdError};
use super::types::models::{ContainerHeader, RecordIndex};
use super::types::variant::FormatVariant;

/// The main reader for Lingea `.trd` dictionary containers.
///
/// Parses the header and resolves the record index once on open; records are
/// read and decoded on demand.
#[derive(Debug)]
pub struct TrdReader<R = File> {
    source: Arc<Mutex<R>>,
    header: ContainerHeader,
    index: RecordIndex,
}

impl TrdReader<File> {
    /// Opens a `.trd` file from the given path.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file cannot be opened
    /// - The header is truncated
    /// - The index tables are inconsistent with the file length
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!("Opening TRD file: {}", path.display());
        Self::from_reader(File::open(path)?)
    }
}

impl<R: Read + Seek> TrdReader<R> {
    /// Loads a container from any seekable byte source.
    pub fn from_reader(mut source: R) -> Result<Self> {
        let header = format::header::parse(&mut source)?;
        let index = format::index::resolve(&mut source, &header)?;

        if index.len() < header.entry_count as usize {
            warn!(
                "Index holds {} offsets for {} entries; trailing entries cannot be read",
                index.len(),
                header.entry_count
            );
        }
        info!(
            "TRD container loaded: {} entries, {} variant",
            header.entry_count, header.variant
        );

        Ok(Self {
            source: Arc::new(Mutex::new(source)),
            header,
            index,
        })
    }

    pub fn header(&self) -> &ContainerHeader {
        &self.header
    }

    pub fn index(&self) -> &RecordIndex {
        &self.index
    }

    pub fn variant(&self) -> FormatVariant {
        self.header.variant
    }

    /// Returns the entry count declared by the header.
    pub fn num_entries(&self) -> usize {
        self.header.entry_count as usize
    }

    /// Returns a record decoder bound to this container's symbol tables.
    pub fn decoder(&self) -> RecordDecoder<'static> {
        RecordDecoder::for_variant(self.header.variant)
    }

    /// Reads the raw bytes of record `n`.
    ///
    /// Returns an empty buffer when `n` is outside `[0, num_entries)`.
    ///
    /// # Errors
    /// `IndexCorrupt` if the index has no offset for an in-range record or
    /// the record's end lies before its start.
    pub fn read_record(&self, n: usize) -> Result<Vec<u8>> {
        if n >= self.num_entries() {
            return Ok(Vec::new());
        }
        let span = self.index.span(n)?.ok_or_else(|| {
            TrdError::IndexCorrupt(format!(
                "record {} has no index offset ({} resolved)",
                n,
                self.index.len()
            ))
        })?;

        let mut source = self.source.lock().map_err(|_| TrdError::LockPoisoned)?;
        source.seek(SeekFrom::Start(span.start))?;
        let mut bytes = vec![0u8; (span.end - span.start) as usize];
        source.read_exact(&mut bytes)?;
        Ok(bytes)
    }

    /// Reads and decodes record `n`.
    ///
    /// # Errors
    /// - `RecordOutOfRange` if `n` is outside `[0, num_entries)`.
    /// - Any error of [`read_record`](Self::read_record) or
    ///   [`RecordDecoder::decode`].
    pub fn decode_record(&self, n: usize) -> Result<DecodeOutcome> {
        if n >= self.num_entries() {
            return Err(TrdError::RecordOutOfRange {
                index: n,
                count: self.num_entries(),
            });
        }
        let bytes = self.read_record(n)?;
        self.decoder().decode(&bytes)
    }

    /// Returns the base iterator over `(n, byte range)` of every record.
    ///
    /// Chain with `.with_records()` to read and decode them.
    pub fn iter_spans(&self) -> SpanIterator<'_, R> {
        SpanIterator::new(self)
    }

    /// Iterates over every record in order, yielding `(n, outcome)`.
    ///
    /// Shortcut for `reader.iter_spans().with_records()`.
    pub fn iter_records(&self) -> RecordIterator<'_, R> {
        self.iter_spans().with_records()
    }

    /// Decodes every record on the rayon thread pool.
    ///
    /// Reads are serialized on the source lock; decoding runs in parallel.
    /// Results come back in record order.
    #[cfg(feature = "parallel")]
    pub fn decode_all_par(&self) -> Vec<(usize, Result<DecodeOutcome>)>
    where
        R: Send,
    {
        use rayon::prelude::*;

        (0..self.num_entries())
            .into_par_iter()
            .map(|n| (n, self.decode_record(n)))
            .collect()
    }
}

impl<R> Clone for TrdReader<R> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            header: self.header.clone(),
            index: self.index.clone(),
        }
    }
}
