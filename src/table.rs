//! Reader for the comma separated table exported by Vicon Tracker.
//!
//! Layout:
//! - line 1: section title (`Objects`)
//! - line 2: capture rate
//! - line 3: object names, one every 6 fields starting at field 2
//!   (`Global Angle Wand:Wand`)
//! - lines 4..5: column labels and units
//! - remaining lines: `frame, sub frame, (rx, ry, rz, tx, ty, tz) * objects`
//!
//! The data section ends at the first blank line or at end of input.

use crate::Result;
use csv::StringRecord;
use std::io;

/// Leading metadata columns (frame, sub frame).
pub const LEADING_COLUMNS: usize = 2;

/// Value columns per tracked object (3 rotation + 3 position).
pub const FIELDS_PER_OBJECT: usize = 6;

/// Object as listed in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedObject {
    /// Qualified `subject:segment` name.
    pub name: String,
    /// Index of the object's first value column.
    pub column: usize,
}

/// One data row of the table.
#[derive(Debug, Clone)]
pub struct RawRow {
    /// 1-based record index in the source, header records included.
    /// Blank lines are not counted.
    pub row: u64,
    pub fields: StringRecord,
}

impl RawRow {
    pub fn new<I, T>(row: u64, fields: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        Self {
            row,
            fields: fields.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index)
    }
}

/// Parses the header block and hands out the data rows.
pub struct TableReader<R> {
    reader: csv::Reader<R>,
    records_read: u64,
}

impl<R: io::Read> TableReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(source);
        Self {
            reader,
            records_read: 0,
        }
    }

    fn next_record(&mut self) -> Result<Option<StringRecord>> {
        let mut record = StringRecord::new();
        if self.reader.read_record(&mut record)? {
            self.records_read += 1;
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    /// Read the 5-line header and return the tracked objects in column order.
    ///
    /// A missing name row yields an empty list.
    pub fn read_header(&mut self) -> Result<Vec<TrackedObject>> {
        // Section title and capture rate
        for _ in 0..2 {
            if self.next_record()?.is_none() {
                return Ok(Vec::new());
            }
        }

        let names = match self.next_record()? {
            Some(record) => record,
            None => return Ok(Vec::new()),
        };

        // Column labels and units
        for _ in 0..2 {
            if self.next_record()?.is_none() {
                break;
            }
        }

        let objects = object_names(&names);
        log::debug!(
            "Header lists {} tracked object(s): {:?}",
            objects.len(),
            objects.iter().map(|o| o.name.as_str()).collect::<Vec<_>>()
        );
        Ok(objects)
    }

    /// Consume the reader and return the lazy stream of data rows.
    pub fn rows(self) -> Rows<R> {
        let line = self.reader.position().line();
        Rows {
            reader: self.reader,
            record: self.records_read,
            line,
            finished: false,
        }
    }
}

/// Lazy, finite sequence of data rows.
pub struct Rows<R> {
    reader: csv::Reader<R>,
    record: u64,
    /// Reader line counter after the previous record.
    line: u64,
    finished: bool,
}

impl<R: io::Read> Iterator for Rows<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let mut fields = StringRecord::new();
        match self.reader.read_record(&mut fields) {
            Ok(true) => {}
            Ok(false) => {
                self.finished = true;
                return None;
            }
            Err(e) => {
                self.finished = true;
                return Some(Err(e.into()));
            }
        }

        // The csv reader skips blank lines silently. A record consumes its own
        // line terminator, so more than one new line since the previous
        // record means a blank line came first.
        let line = self.reader.position().line();
        let consumed = line.saturating_sub(self.line);
        self.line = line;
        let blank = fields.len() == 1 && fields.get(0) == Some("");
        if consumed > 1 || blank {
            log::debug!("Blank line before record {}, end of data", self.record + 1);
            self.finished = true;
            return None;
        }

        self.record += 1;
        Some(Ok(RawRow {
            row: self.record,
            fields,
        }))
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Find the first `word:word` token in a header field.
pub fn match_object_name(field: &str) -> Option<&str> {
    for (colon, _) in field.match_indices(':') {
        let start = field[..colon]
            .char_indices()
            .rev()
            .take_while(|&(_, c)| is_word_char(c))
            .last()
            .map(|(i, _)| i);
        let end = field[colon + 1..]
            .char_indices()
            .take_while(|&(_, c)| is_word_char(c))
            .last()
            .map(|(i, c)| colon + 1 + i + c.len_utf8());

        if let (Some(start), Some(end)) = (start, end) {
            return Some(&field[start..end]);
        }
    }
    None
}

/// Extract object names from the name row. Fields without a `word:word`
/// token are dropped; surviving objects keep their own column.
pub fn object_names(record: &StringRecord) -> Vec<TrackedObject> {
    (LEADING_COLUMNS..record.len())
        .step_by(FIELDS_PER_OBJECT)
        .filter_map(|column| {
            let name = record.get(column).and_then(match_object_name)?;
            Some(TrackedObject {
                name: name.to_string(),
                column,
            })
        })
        .collect()
}
