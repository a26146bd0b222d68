//! Synthetic `.trd` containers for integration tests.

#![allow(dead_code)]

use byteorder::{LittleEndian, WriteBytesExt};

pub const SMALL_CODE: u32 = 2052;

/// Packs symbol codes 4-per-3-bytes followed by a NUL terminator, keeping
/// only the bytes the terminator reaches into.
pub fn pack_codes(codes: &[u8]) -> Vec<u8> {
    let len = codes.len() / 4 * 3 + (codes.len() % 4 + 1).min(3);
    let mut codes = codes.to_vec();
    codes.push(0);
    let mut out = Vec::new();
    for chunk in codes.chunks(4) {
        let c = |i: usize| chunk.get(i).copied().unwrap_or(0);
        out.push(c(0) << 2 | c(1) >> 4);
        out.push((c(1) & 0x0F) << 4 | c(2) >> 2);
        out.push((c(2) & 0x03) << 6 | c(3));
    }
    out.truncate(len);
    out
}

/// Standard alphabet codes for lowercase ASCII letters and spaces.
pub fn codes(text: &str) -> Vec<u8> {
    text.bytes()
        .map(|b| match b {
            b'a'..=b'z' => b - b'a' + 1,
            b' ' => 32,
            other => panic!("no test code for {:?}", other as char),
        })
        .collect()
}

/// A packed, terminated lowercase string.
pub fn word(text: &str) -> Vec<u8> {
    pack_codes(&codes(text))
}

/// A record holding only a headword name.
pub fn headword_record(name: &str) -> Vec<u8> {
    let mut record = vec![0x00, 0x01, 0x01];
    record.extend(word(name));
    record
}

/// Builds a container around a list of record bodies.
///
/// Records are zero padded to 4-byte boundaries. The index gets one base per
/// page (four pages per base for the small layout) and, unless disabled, a
/// final offset marking the end of the body.
pub struct ContainerBuilder {
    variant_code: u32,
    copyright: Vec<u8>,
    records: Vec<Vec<u8>>,
    end_offset: bool,
}

impl ContainerBuilder {
    pub fn new() -> Self {
        Self {
            variant_code: 0,
            copyright: b"(C) Lingea s.r.o.".to_vec(),
            records: Vec::new(),
            end_offset: true,
        }
    }

    pub fn small(mut self) -> Self {
        self.variant_code = SMALL_CODE;
        self
    }

    pub fn without_end_offset(mut self) -> Self {
        self.end_offset = false;
        self
    }

    pub fn record(mut self, bytes: Vec<u8>) -> Self {
        self.records.push(bytes);
        self
    }

    pub fn records(mut self, records: impl IntoIterator<Item = Vec<u8>>) -> Self {
        self.records.extend(records);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let per_base = if self.variant_code == SMALL_CODE { 4 } else { 1 };

        let mut body = Vec::new();
        let mut offsets = Vec::new();
        for record in &self.records {
            offsets.push(body.len() as u32);
            body.extend_from_slice(record);
            while body.len() % 4 != 0 {
                body.push(0);
            }
        }
        if self.end_offset {
            offsets.push(body.len() as u32);
        }

        let pages = offsets.len().div_ceil(64).max(1).next_multiple_of(per_base);
        let base_count = pages / per_base;
        let bases: Vec<u32> = (0..base_count)
            .map(|b| offsets.get(b * per_base * 64).copied().unwrap_or(0))
            .collect();

        let index_pos = 128u32;
        let body_pos = index_pos + 4 * base_count as u32 + 128 * pages as u32;

        let mut out = vec![0u8; 64];
        out[..self.copyright.len()].copy_from_slice(&self.copyright);
        let mut words = [0u32; 16];
        words[3] = self.variant_code;
        words[4] = self.records.len() as u32;
        words[6] = base_count as u32;
        words[7] = offsets.len() as u32;
        words[9] = index_pos;
        words[10] = body_pos;
        for w in words {
            out.write_u32::<LittleEndian>(w).unwrap();
        }

        for &b in &bases {
            out.write_u32::<LittleEndian>(b).unwrap();
        }
        for slot in 0..pages * 64 {
            let rel = match offsets.get(slot) {
                Some(&off) => (off - bases[slot / 64 / per_base]) / 4,
                None => 0,
            };
            out.write_u16::<LittleEndian>(rel as u16).unwrap();
        }

        out.extend_from_slice(&body);
        out
    }
}
