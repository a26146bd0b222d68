//! # Record Index Resolution
//!
//! The index region at `index_pos` holds two tables:
//!
//! ```text
//! [base_count x u32]            base offsets, relative to body_pos
//! [pages x 64 x u16]            per-page offsets, in 4-byte units
//! ```
//!
//! Standard containers have one page per base. Small containers reuse each
//! base for four consecutive pages. The absolute start of record `n` is
//! `body_pos + base + offset * 4`; resolution stops once
//! `index_offset_count` offsets are collected, so trailing slots of the last
//! page are ignored.

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use log::{debug, info};

use crate::trd::types::{
    error::{Result, TrdError},
    models::{ContainerHeader, RecordIndex, OFFSETS_PER_PAGE},
    variant::FormatVariant,
};

/// Reads and resolves the record index described by `header`.
///
/// # Errors
/// `IndexCorrupt` if the tables do not fit in the file, if the header asks
/// for more offsets than the pages hold, or if a resolved offset points past
/// the end of the file.
pub fn resolve<R: Read + Seek>(file: &mut R, header: &ContainerHeader) -> Result<RecordIndex> {
    info!("Resolving record index");

    let file_len = file.seek(SeekFrom::End(0))?;
    let base_count = header.index_base_count as usize;
    let page_count = base_count * header.variant.pages_per_base();
    let wanted = header.index_offset_count as usize;

    if wanted > page_count * OFFSETS_PER_PAGE {
        return Err(TrdError::IndexCorrupt(format!(
            "{} offsets requested but {} pages hold only {}",
            wanted,
            page_count,
            page_count * OFFSETS_PER_PAGE
        )));
    }

    let table_len = (base_count * 4 + page_count * OFFSETS_PER_PAGE * 2) as u64;
    let index_pos = header.index_pos as u64;
    if index_pos + table_len > file_len {
        return Err(TrdError::IndexCorrupt(format!(
            "index tables need {} bytes at {:#x}, file is {} bytes",
            table_len, index_pos, file_len
        )));
    }
    if header.body_pos as u64 > file_len {
        return Err(TrdError::IndexCorrupt(format!(
            "body position {:#x} is past the end of the file ({} bytes)",
            header.body_pos, file_len
        )));
    }

    file.seek(SeekFrom::Start(index_pos))?;
    let mut bases = vec![0u32; base_count];
    file.read_u32_into::<LittleEndian>(&mut bases)?;
    let bases = expand_bases(&bases, header.variant);
    debug!("Index bases after expansion: {}", bases.len());

    let mut offsets = Vec::with_capacity(wanted);
    let mut page = [0u16; OFFSETS_PER_PAGE];
    for &base in &bases {
        if offsets.len() >= wanted {
            break;
        }
        file.read_u16_into::<LittleEndian>(&mut page)?;
        let room = wanted - offsets.len();
        offsets.extend(
            page.iter()
                .take(room)
                .map(|&o| header.body_pos as u64 + base as u64 + o as u64 * 4),
        );
    }

    // An offset equal to the file length is the end-of-body marker.
    if let Some((n, &bad)) = offsets.iter().enumerate().find(|&(_, &o)| o > file_len) {
        return Err(TrdError::IndexCorrupt(format!(
            "record {} starts at {:#x}, past the end of the file ({} bytes)",
            n, bad, file_len
        )));
    }

    info!("Record index resolved: {} offsets", offsets.len());
    Ok(RecordIndex::new(offsets, file_len))
}

/// Expands the base table into one base per offset page.
pub fn expand_bases(bases: &[u32], variant: FormatVariant) -> Vec<u32> {
    let per_base = variant.pages_per_base();
    bases
        .iter()
        .flat_map(|&b| std::iter::repeat(b).take(per_base))
        .collect()
}
