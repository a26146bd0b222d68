//! Container header parsing.
//!
//! # Header Structure
//! ```text
//! [64 bytes] Copyright banner (Windows-1250, NUL padded)
//! [64 bytes] 16 x u32 little-endian header words
//!            word 3  format variant code (2052 = small layout)
//!            word 4  entry count
//!            word 6  index base count
//!            word 7  index offset count
//!            word 8  reserved
//!            word 9  index position
//!            word 10 body position
//! ```

use std::io::{Read, Seek, SeekFrom};

use byteorder::{LittleEndian, ReadBytesExt};
use encoding_rs::WINDOWS_1250;
use log::{debug, info};

use crate::trd::types::{
    error::{Result, TrdError},
    models::{ContainerHeader, COPYRIGHT_LEN, HEADER_LEN, HEADER_WORDS},
};

/// Parses the container header from the start of `file`.
///
/// Leaves the reader positioned right after the header words.
///
/// # Errors
/// `HeaderTooShort` if the file cannot hold the banner and header words.
pub fn parse<R: Read + Seek>(file: &mut R) -> Result<ContainerHeader> {
    info!("Parsing container header");

    let file_len = file.seek(SeekFrom::End(0))?;
    if file_len < HEADER_LEN {
        return Err(TrdError::HeaderTooShort {
            expected: HEADER_LEN,
            found: file_len,
        });
    }
    file.seek(SeekFrom::Start(0))?;

    let mut banner = [0u8; COPYRIGHT_LEN];
    file.read_exact(&mut banner)?;
    let copyright = decode_banner(&banner);

    let mut words = [0u32; HEADER_WORDS];
    file.read_u32_into::<LittleEndian>(&mut words)?;

    let header = ContainerHeader::from_words(copyright, words);
    debug!("Header words: {:?}", header.words);
    info!(
        "Container header: variant={}, entries={}, bases={}, offsets={}, index_pos={:#x}, body_pos={:#x}",
        header.variant,
        header.entry_count,
        header.index_base_count,
        header.index_offset_count,
        header.index_pos,
        header.body_pos
    );

    Ok(header)
}

/// Decodes the copyright banner, dropping NUL padding and surrounding blanks.
fn decode_banner(banner: &[u8]) -> String {
    let end = banner.iter().position(|&b| b == 0).unwrap_or(banner.len());
    let (text, _, _) = WINDOWS_1250.decode(&banner[..end]);
    text.trim().to_string()
}
