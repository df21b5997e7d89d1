use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Range, Reader, Xls, Xlsx};

use crate::error::{AppError, AppResult};

/// ZIP local file header, the envelope of OOXML workbooks
const ZIP_MAGIC: [u8; 4] = [0x50, 0x4B, 0x03, 0x04];

const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Binary envelope of a spreadsheet export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// BIFF `.xls` (anything that is not a ZIP)
    LegacyBinary,
    /// OOXML `.xlsx`
    ModernZip,
}

impl Container {
    /// Classify a payload from its leading bytes
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.len() >= ZIP_MAGIC.len() && bytes[..ZIP_MAGIC.len()] == ZIP_MAGIC {
            Container::ModernZip
        } else {
            Container::LegacyBinary
        }
    }
}

/// Reject HTML error/login pages served in place of the binary export.
///
/// A UTF-8 byte order mark before the markup is ignored.
pub fn ensure_not_html(bytes: &[u8]) -> AppResult<()> {
    let body = bytes.strip_prefix(UTF8_BOM.as_slice()).unwrap_or(bytes);
    let first = body.iter().find(|b| !b.is_ascii_whitespace());
    if first == Some(&b'<') {
        return Err(AppError::Validation(
            "Course export returned an HTML page instead of a spreadsheet; the upstream session may be missing or expired".to_string(),
        ));
    }
    Ok(())
}

/// First worksheet of a workbook, every cell rendered as trimmed text.
///
/// Rows are indexed from the top of the sheet, including leading blank rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sheet {
    pub rows: Vec<Vec<String>>,
}

impl Sheet {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Decode the first worksheet of an xls/xlsx payload
    pub fn decode(bytes: &[u8]) -> AppResult<Self> {
        let container = Container::detect(bytes);
        tracing::debug!(?container, size = bytes.len(), "Decoding course export");

        let cursor = Cursor::new(bytes);
        let range = match container {
            Container::ModernZip => {
                let mut workbook: Xlsx<_> = Xlsx::new(cursor)
                    .map_err(|e| AppError::Parse(format!("Failed to open xlsx workbook: {}", e)))?;
                workbook
                    .worksheet_range_at(0)
                    .ok_or_else(|| AppError::Parse("Workbook has no sheets".to_string()))?
                    .map_err(|e| AppError::Parse(format!("Failed to read sheet: {}", e)))?
            }
            Container::LegacyBinary => {
                let mut workbook: Xls<_> = Xls::new(cursor)
                    .map_err(|e| AppError::Parse(format!("Failed to open xls workbook: {}", e)))?;
                workbook
                    .worksheet_range_at(0)
                    .ok_or_else(|| AppError::Parse("Workbook has no sheets".to_string()))?
                    .map_err(|e| AppError::Parse(format!("Failed to read sheet: {}", e)))?
            }
        };

        Ok(Self::from_range(&range))
    }

    fn from_range(range: &Range<Data>) -> Self {
        // calamine trims leading empty rows/columns; restore absolute positions
        let (row_offset, col_offset) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<Vec<String>> = vec![Vec::new(); row_offset];
        for row in range.rows() {
            let mut cells = vec![String::new(); col_offset];
            cells.extend(row.iter().map(render_cell));
            rows.push(cells);
        }

        Self { rows }
    }

    pub fn row(&self, idx: usize) -> Option<&[String]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Concatenate rows column-wise by position. Missing rows on either side
    /// are padded so the other side's cells keep their column indexes.
    pub fn merge_columns(self, other: Sheet) -> Sheet {
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let total = self.rows.len().max(other.rows.len());

        let mut left = self.rows.into_iter();
        let mut right = other.rows.into_iter();
        let rows = (0..total)
            .map(|_| {
                let mut row = left.next().unwrap_or_default();
                row.resize(width, String::new());
                row.extend(right.next().unwrap_or_default());
                row
            })
            .collect();

        Sheet { rows }
    }
}

/// Render a cell the way it reads in the spreadsheet UI.
///
/// Integral numbers print without a decimal point; formula cells arrive
/// here already resolved to their cached result.
pub fn render_cell(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 && f.is_finite() && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// Header name to column index lookup built from one header row
#[derive(Debug, Clone, Default)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
}

impl HeaderMap {
    /// The first column carrying a given name wins
    pub fn from_row(header: &[String]) -> Self {
        let mut columns = HashMap::new();
        for (idx, name) in header.iter().enumerate() {
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            columns.entry(name.to_string()).or_insert(idx);
        }
        Self { columns }
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.get(name).copied()
    }

    /// First non-blank value among the given header aliases
    pub fn text<'a>(&self, row: &'a [String], aliases: &[&str]) -> &'a str {
        aliases
            .iter()
            .filter_map(|name| self.index_of(name))
            .filter_map(|idx| row.get(idx))
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    pub fn contains_any(&self, aliases: &[&str]) -> bool {
        aliases.iter().any(|name| self.columns.contains_key(*name))
    }
}
