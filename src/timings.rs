use std::{fs::File, io, path::Path};

use csv::{ReaderBuilder, Trim};
use serde::{Deserialize, Serialize};

use crate::{sorting::Algorithm, Error};

pub const SIZE_COLUMN: &str = "Size";

/// One line of the timing table: elapsed milliseconds per algorithm for a
/// single input size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingRow {
    #[serde(rename = "Size")]
    pub size: u64,
    #[serde(rename = "Bubble")]
    pub bubble: f64,
    #[serde(rename = "Shaker")]
    pub shaker: f64,
    #[serde(rename = "Heap")]
    pub heap: f64,
    #[serde(rename = "Std")]
    pub std: f64,
}

impl TimingRow {
    pub fn time(&self, algorithm: Algorithm) -> f64 {
        match algorithm {
            Algorithm::Bubble => self.bubble,
            Algorithm::Shaker => self.shaker,
            Algorithm::Heap => self.heap,
            Algorithm::Std => self.std,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimingTable {
    rows: Vec<TimingRow>,
}

impl TimingTable {
    pub fn new(rows: Vec<TimingRow>) -> TimingTable {
        TimingTable { rows }
    }

    pub fn rows(&self) -> &[TimingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn from_path(path: &Path) -> Result<TimingTable, Error> {
        let file = File::open(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        TimingTable::from_reader(io::BufReader::new(file))
    }

    /// Reads a table with a header row. Columns are matched by name, so their
    /// order in the input does not matter and unknown columns are ignored.
    pub fn from_reader<R: io::Read>(reader: R) -> Result<TimingTable, Error> {
        let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

        let headers = rdr.headers()?.clone();
        let missing: Vec<String> = required_columns()
            .filter(|column| !headers.iter().any(|h| h == *column))
            .map(String::from)
            .collect();
        if !missing.is_empty() {
            return Err(Error::MissingColumns(missing));
        }

        let rows = rdr
            .deserialize()
            .collect::<Result<Vec<TimingRow>, csv::Error>>()?;
        Ok(TimingTable { rows })
    }

    pub fn write_path(&self, path: &Path) -> Result<(), Error> {
        let file = File::create(path).map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;
        self.write(file)
    }

    pub fn write<W: io::Write>(&self, writer: W) -> Result<(), Error> {
        let mut wtr = csv::Writer::from_writer(writer);
        // serialize() only emits the header together with the first record
        if self.rows.is_empty() {
            wtr.write_record(required_columns())?;
        }
        for row in &self.rows {
            wtr.serialize(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// `(size, milliseconds)` pairs for one algorithm, in file order.
    pub fn points(&self, algorithm: Algorithm) -> Vec<(f64, f64)> {
        self.rows
            .iter()
            .map(|row| (row.size as f64, row.time(algorithm)))
            .collect()
    }
}

fn required_columns() -> impl Iterator<Item = &'static str> {
    std::iter::once(SIZE_COLUMN).chain(Algorithm::ALL.into_iter().map(Algorithm::column))
}
