// Mon Oct 12 2026 - Alex

use crate::address::Address;
use crate::mapped::{MapError, MappedFile};
use crate::scan::ScanContext;
use crate::utils::{hex_string_spaced, ScopedTimer};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub offset: u64,
    pub address: Address,
    /// Matched bytes, hex.
    pub bytes: String,
    /// File offset a rel32 operand in the match points at; may be negative or
    /// past the end of the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel_offset: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel_address: Option<Address>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub size: u64,
    pub matches: Vec<MatchRecord>,
    /// Set when `max_matches` stopped the search early.
    pub truncated: bool,
    pub elapsed_ms: f64,
}

/// Matches of `ctx` in `haystack`, found by re-scanning from one past the
/// previous hit. `limit` of 0 means unlimited.
pub fn collect_matches(
    ctx: &ScanContext<'_>,
    haystack: &[u8],
    base_address: Address,
    limit: usize,
    rel_disp: Option<usize>,
) -> (Vec<MatchRecord>, bool) {
    let haystack_start = Address::from_ptr(haystack.as_ptr());
    let len = ctx.pattern().len();
    let mut matches = Vec::new();
    let mut from = 0;

    while from < haystack.len() {
        let result = ctx.scan(&haystack[from..]);
        let offset = match result.offset() {
            Some(offset) => from + offset,
            None => break,
        };

        if limit != 0 && matches.len() == limit {
            return (matches, true);
        }

        let rel_offset = rel_disp
            .and_then(|disp| result.rel32(disp))
            .map(|target| target - haystack_start);

        matches.push(MatchRecord {
            offset: offset as u64,
            address: base_address + offset as u64,
            bytes: hex_string_spaced(&haystack[offset..offset + len]),
            rel_offset,
            rel_address: rel_offset.map(|rel| base_address.offset(rel)),
        });
        from = offset + 1;
    }

    (matches, false)
}

pub fn scan_file(
    ctx: &ScanContext<'_>,
    path: &Path,
    base_address: Address,
    limit: usize,
    rel_disp: Option<usize>,
) -> Result<FileReport, MapError> {
    let mapped = MappedFile::open(path, base_address)?;
    let timer = ScopedTimer::new(&format!("scan {}", path.display()));

    let (matches, truncated) = collect_matches(
        ctx,
        mapped.as_slice(),
        mapped.base_address(),
        limit,
        rel_disp,
    );

    log::debug!(
        "{}: {} match(es) in {} bytes",
        path.display(),
        matches.len(),
        mapped.size()
    );

    Ok(FileReport {
        path: mapped.path().to_path_buf(),
        size: mapped.size() as u64,
        matches,
        truncated,
        elapsed_ms: timer.elapsed_ms(),
    })
}

pub fn save_reports(reports: &[FileReport], path: &Path) -> Result<(), std::io::Error> {
    let json_string = serde_json::to_string_pretty(reports)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;

    Ok(())
}
