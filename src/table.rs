// src/table.rs
use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use tracing::debug;

const UTF8_BOM: &[u8] = b"\xef\xbb\xbf";

/// A CSV file held fully in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Column names, from the first record of the file.
    pub headers: Vec<String>,
    /// Every following record, as a Vec of Strings (one per field).
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Indices (into `rows`) of data rows whose field count differs from the header.
    pub fn ragged_rows(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.len() != self.headers.len())
            .map(|(idx, _)| idx)
            .collect()
    }
}

/// Read the whole CSV at `path`, treating the first record as the header.
///
/// Records may have differing field counts; they are kept as-is. Blank lines
/// come back as empty records, and a leading UTF-8 BOM stays in the first field.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn read_table<P: AsRef<Path>>(path: P) -> Result<Table> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("opening input CSV {:?}", path))?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(data.as_slice());

    // csv skips empty lines, so they are recovered from the bytes between records.
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record = StringRecord::new();
    let mut prev_end = 0usize;
    let mut first = true;
    loop {
        let idx = records.len();
        let more = rdr
            .read_record(&mut record)
            .with_context(|| format!("CSV parse error in {:?} at record {}", path, idx))?;
        if !more {
            break;
        }

        let breaks = line_breaks_around(&data, prev_end);
        let blanks = if first { breaks } else { breaks.saturating_sub(1) };
        records.extend(std::iter::repeat_with(Vec::new).take(blanks));
        records.push(record.iter().map(|s| s.to_string()).collect());

        prev_end = rdr.position().byte() as usize;
        first = false;
    }
    let trailing = line_breaks_around(&data, prev_end);
    let trailing = if first { trailing } else { trailing.saturating_sub(1) };
    records.extend(std::iter::repeat_with(Vec::new).take(trailing));

    if data.starts_with(UTF8_BOM) {
        if let Some(field) = records.first_mut().and_then(|r| r.first_mut()) {
            if !field.starts_with('\u{feff}') {
                field.insert(0, '\u{feff}');
            }
        }
    }

    let mut records = records.into_iter();
    let headers = records
        .next()
        .ok_or_else(|| anyhow!("{:?} has no header row", path))?;
    let rows: Vec<Vec<String>> = records.collect();

    debug!(columns = headers.len(), rows = rows.len(), "read table");
    Ok(Table { headers, rows })
}

/// Line breaks in the run of `\r`/`\n` bytes surrounding `pos`; `\r\n` counts once.
fn line_breaks_around(data: &[u8], pos: usize) -> usize {
    let is_term = |b: &u8| *b == b'\r' || *b == b'\n';
    let pos = pos.min(data.len());
    let start = data[..pos]
        .iter()
        .rposition(|b| !is_term(b))
        .map_or(0, |i| i + 1);
    let end = data[pos..]
        .iter()
        .position(|b| !is_term(b))
        .map_or(data.len(), |i| pos + i);

    let run = &data[start..end];
    let mut breaks = 0;
    let mut i = 0;
    while i < run.len() {
        i += if run[i] == b'\r' && run.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
        breaks += 1;
    }
    breaks
}

/// Write `table` to `path`, replacing any existing file.
///
/// Records end in `\r\n`. The CSV goes to a hidden sibling `.tmp` file first
/// and is renamed into place.
#[tracing::instrument(level = "debug", skip(path, table), fields(path = %path.as_ref().display()))]
pub fn write_table<P: AsRef<Path>>(path: P, table: &Table) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = tmp_path_for(path)?;

    let file = File::create(&tmp_path).with_context(|| format!("creating {:?}", tmp_path))?;
    let mut wtr = WriterBuilder::new()
        .flexible(true)
        .terminator(Terminator::CRLF)
        .from_writer(file);

    let written = write_records(&mut wtr, table)
        .and_then(|_| wtr.flush().with_context(|| format!("flushing {:?}", tmp_path)));
    drop(wtr);
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| format!("renaming {:?} -> {:?}", tmp_path, path));
    }

    debug!(rows = table.rows.len(), "wrote table");
    Ok(())
}

fn write_records(wtr: &mut csv::Writer<File>, table: &Table) -> Result<()> {
    wtr.write_record(&table.headers)
        .context("writing header record")?;
    for (idx, row) in table.rows.iter().enumerate() {
        wtr.write_record(row)
            .with_context(|| format!("writing record {}", idx + 1))?;
    }
    Ok(())
}

fn tmp_path_for(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| anyhow!("output path {:?} has no file name", path))?;
    Ok(path.with_file_name(format!(".{}.tmp", name.to_string_lossy())))
}
