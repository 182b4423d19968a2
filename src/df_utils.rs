// df_utils.rs
use crate::error::{Result, UtilsError};
use calamine::{open_workbook, Reader, Xls, Xlsx};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use csv::Writer;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;

/// One column name or many, so callers can pass either form at the boundary
/// of every column-taking operation.
#[derive(Debug, Clone)]
pub enum ColumnSpec {
    One(String),
    Many(Vec<String>),
}

impl ColumnSpec {
    /// Normalizes to a list of column names.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            ColumnSpec::One(column) => vec![column],
            ColumnSpec::Many(columns) => columns,
        }
    }
}

impl From<&str> for ColumnSpec {
    fn from(column: &str) -> Self {
        ColumnSpec::One(column.to_string())
    }
}

impl From<String> for ColumnSpec {
    fn from(column: String) -> Self {
        ColumnSpec::One(column)
    }
}

impl From<Vec<&str>> for ColumnSpec {
    fn from(columns: Vec<&str>) -> Self {
        ColumnSpec::Many(columns.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for ColumnSpec {
    fn from(columns: Vec<String>) -> Self {
        ColumnSpec::Many(columns)
    }
}

/// Identifies a worksheet by name or by 1-based position.
#[derive(Debug, Clone)]
pub enum SheetSpec {
    Name(String),
    Index(usize),
}

/// An in-memory table with named columns and ordered rows of string cells.
///
/// Every operation either returns a new `DfBuilder` or mutates and returns
/// the receiver; a call with an invalid column specification is rejected
/// before any row is touched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DfBuilder {
    headers: Vec<String>,
    data: Vec<Vec<String>>,
}

impl DfBuilder {
    /// Creates a new, empty `DfBuilder`.
    pub fn new() -> Self {
        DfBuilder {
            headers: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Builds a `DfBuilder` from headers and rows. Every row must have as
    /// many cells as there are headers.
    ///
    /// ```
    /// use dautils::df_utils::DfBuilder;
    ///
    /// let df = DfBuilder::from_raw_data(
    ///     vec!["id".to_string(), "name".to_string()],
    ///     vec![vec!["1".to_string(), "ada".to_string()]],
    /// ).unwrap();
    ///
    /// assert_eq!(df.row_count(), 1);
    /// ```
    pub fn from_raw_data(headers: Vec<String>, data: Vec<Vec<String>>) -> Result<Self> {
        for (i, row) in data.iter().enumerate() {
            if row.len() != headers.len() {
                return Err(UtilsError::InvalidShape(format!(
                    "row {} has {} cells, but there are {} headers",
                    i,
                    row.len(),
                    headers.len()
                )));
            }
        }
        Ok(DfBuilder { headers, data })
    }

    /// Sets the header row.
    pub fn set_header(&mut self, header: Vec<&str>) -> &mut Self {
        self.headers = header.into_iter().map(String::from).collect();
        self
    }

    /// Appends a row, which must match the header width.
    pub fn add_row(&mut self, row: Vec<&str>) -> Result<&mut Self> {
        if row.len() != self.headers.len() {
            return Err(UtilsError::InvalidShape(format!(
                "row has {} cells, but there are {} headers",
                row.len(),
                self.headers.len()
            )));
        }
        self.data.push(row.into_iter().map(String::from).collect());
        Ok(self)
    }

    pub fn get_headers(&self) -> &[String] {
        &self.headers
    }

    pub fn get_data(&self) -> &Vec<Vec<String>> {
        &self.data
    }

    pub fn has_data(&self) -> bool {
        !self.data.is_empty()
    }

    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Returns the position of a named column, or an `InvalidShape` error if
    /// the frame has no such column.
    pub fn column_index(&self, column: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| UtilsError::InvalidShape(format!("column '{}' not found", column)))
    }

    fn column_indices(&self, columns: ColumnSpec) -> Result<Vec<usize>> {
        columns
            .into_vec()
            .iter()
            .map(|column| self.column_index(column))
            .collect()
    }

    /// Reads a CSV file at `file_path`. The first record is the header.
    pub fn from_csv(file_path: &str) -> Result<Self> {
        let file = File::open(file_path)?;
        let mut rdr = csv::Reader::from_reader(file);

        let headers = rdr.headers()?.iter().map(String::from).collect();

        let mut data = Vec::new();
        for result in rdr.records() {
            let record = result?;
            data.push(record.iter().map(String::from).collect());
        }

        Ok(DfBuilder { headers, data })
    }

    /// Reads a sheet of an XLS file at `file_path`. The first row is the
    /// header.
    pub fn from_xls(file_path: &str, sheet: SheetSpec) -> Result<Self> {
        let mut workbook: Xls<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsError| UtilsError::Spreadsheet(e.to_string()))?;
        let sheet_name = resolve_sheet_name(&workbook.sheet_names().to_vec(), sheet)?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| UtilsError::Spreadsheet(e.to_string()))?;
        Ok(Self::from_range(&range))
    }

    /// Reads a sheet of an XLSX (or XLSM) file at `file_path`. The first row
    /// is the header.
    pub fn from_xlsx(file_path: &str, sheet: SheetSpec) -> Result<Self> {
        let mut workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| UtilsError::Spreadsheet(e.to_string()))?;
        let sheet_name = resolve_sheet_name(&workbook.sheet_names().to_vec(), sheet)?;
        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| UtilsError::Spreadsheet(e.to_string()))?;
        Ok(Self::from_range(&range))
    }

    fn from_range(range: &calamine::Range<calamine::Data>) -> Self {
        let mut builder = DfBuilder::new();
        for row in range.rows() {
            let row_data: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
            if builder.headers.is_empty() {
                builder.headers = row_data;
            } else {
                builder.data.push(row_data);
            }
        }
        builder
    }

    /// Writes the frame as a CSV file at `file_path`.
    pub fn save_as(&self, file_path: &str) -> Result<()> {
        let file = File::create(file_path)?;
        let mut wtr = Writer::from_writer(file);
        wtr.write_record(&self.headers)?;
        for row in &self.data {
            wtr.write_record(row)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Returns every row that belongs to a duplicate group of size two or
    /// more on the given columns, keeping the original row order. A zero-row
    /// frame is an `EmptyInput` error.
    ///
    /// ```
    /// use dautils::df_utils::DfBuilder;
    ///
    /// let mut df = DfBuilder::new();
    /// df.set_header(vec!["key", "n"]);
    /// df.add_row(vec!["x", "1"]).unwrap();
    /// df.add_row(vec!["x", "2"]).unwrap();
    /// df.add_row(vec!["y", "3"]).unwrap();
    ///
    /// let dups = df.get_all_duplicates("key").unwrap();
    /// assert_eq!(dups.row_count(), 2);
    /// ```
    pub fn get_all_duplicates(&self, columns: impl Into<ColumnSpec>) -> Result<DfBuilder> {
        if self.data.is_empty() {
            return Err(UtilsError::EmptyInput("DataFrame has no rows".to_string()));
        }

        let indices = self.column_indices(columns.into())?;

        let mut group_sizes: HashMap<Vec<&String>, usize> = HashMap::new();
        for row in &self.data {
            let key: Vec<&String> = indices.iter().map(|&i| &row[i]).collect();
            *group_sizes.entry(key).or_insert(0) += 1;
        }

        let data: Vec<Vec<String>> = self
            .data
            .iter()
            .filter(|row| {
                let key: Vec<&String> = indices.iter().map(|&i| &row[i]).collect();
                group_sizes[&key] >= 2
            })
            .cloned()
            .collect();

        Ok(DfBuilder {
            headers: self.headers.clone(),
            data,
        })
    }

    /// Loads and concatenates every CSV and spreadsheet file directly inside
    /// `root_dir` into one frame.
    ///
    /// A file is loaded when its final extension segment contains `csv` (as
    /// CSV) or `xls` (as XLS/XLSX, first sheet); the CSV pass runs before the
    /// spreadsheet pass, each in name order. Subdirectories are ignored.
    /// Columns are aligned by name to the first loaded file's order; a file
    /// with a different column set is an `InvalidShape` error, and a
    /// directory with nothing to load is an `EmptyInput` error.
    pub fn load_dir(root_dir: &str) -> Result<DfBuilder> {
        let files = crate::file_utils::extract_files(root_dir)?;

        let last_segment =
            |name: &str| name.rsplit('.').next().unwrap_or_default().to_lowercase();

        let mut frames: Vec<(String, DfBuilder)> = Vec::new();
        for name in files.iter().filter(|f| last_segment(f).contains("csv")) {
            let path = Path::new(root_dir).join(name);
            tracing::debug!("loading csv file: {}", path.display());
            frames.push((name.clone(), Self::from_csv(&path.to_string_lossy())?));
        }
        for name in files.iter().filter(|f| last_segment(f).contains("xls")) {
            let path = Path::new(root_dir).join(name);
            let path_str = path.to_string_lossy().to_string();
            tracing::debug!("loading spreadsheet file: {}", path.display());
            let frame = if last_segment(name) == "xls" {
                Self::from_xls(&path_str, SheetSpec::Index(1))?
            } else {
                Self::from_xlsx(&path_str, SheetSpec::Index(1))?
            };
            frames.push((name.clone(), frame));
        }

        let mut iter = frames.into_iter();
        let (_, mut merged) = iter
            .next()
            .ok_or_else(|| {
                UtilsError::EmptyInput(format!(
                    "no csv or spreadsheet files found in '{}'",
                    root_dir
                ))
            })?;

        for (name, frame) in iter {
            merged.concat_by_name(&name, frame)?;
        }

        Ok(merged)
    }

    // Row-wise concatenation, reordering the other frame's columns to match
    // self by name. The headers must agree as multisets, so duplicate header
    // names are matched one-to-one in order; anything else is a hard error.
    fn concat_by_name(&mut self, name: &str, other: DfBuilder) -> Result<()> {
        let mut available: HashMap<&String, Vec<usize>> = HashMap::new();
        for (i, header) in other.headers.iter().enumerate().rev() {
            available.entry(header).or_default().push(i);
        }

        let mut positions = Vec::with_capacity(self.headers.len());
        for header in &self.headers {
            match available.get_mut(header).and_then(Vec::pop) {
                Some(i) => positions.push(i),
                None => {
                    return Err(UtilsError::InvalidShape(format!(
                        "cannot concatenate '{}': columns {:?} do not match {:?}",
                        name, other.headers, self.headers
                    )))
                }
            }
        }
        if other.headers.len() != self.headers.len() {
            return Err(UtilsError::InvalidShape(format!(
                "cannot concatenate '{}': columns {:?} do not match {:?}",
                name, other.headers, self.headers
            )));
        }

        for row in other.data {
            self.data
                .push(positions.iter().map(|&i| row[i].clone()).collect());
        }
        Ok(())
    }

    /// Parses every cell of the given columns with the chrono `format`
    /// string and rewrites them as `%Y-%m-%d %H:%M:%S`, in place.
    ///
    /// A date-only format is accepted and completed to midnight. Nothing is
    /// mutated until every targeted cell has parsed; the first malformed
    /// cell fails the whole call with `InvalidFormat`.
    ///
    /// ```
    /// use dautils::df_utils::DfBuilder;
    ///
    /// let mut df = DfBuilder::new();
    /// df.set_header(vec!["when"]);
    /// df.add_row(vec!["2023/01/05 10:30:00"]).unwrap();
    ///
    /// df.convert_column_to_datetime("when", "%Y/%m/%d %H:%M:%S").unwrap();
    /// assert_eq!(df.get_data()[0][0], "2023-01-05 10:30:00");
    /// ```
    pub fn convert_column_to_datetime(
        &mut self,
        columns: impl Into<ColumnSpec>,
        format: &str,
    ) -> Result<&mut Self> {
        let indices = self.column_indices(columns.into())?;

        let mut converted: Vec<(usize, Vec<String>)> = Vec::with_capacity(indices.len());
        for &idx in &indices {
            let mut column_values = Vec::with_capacity(self.data.len());
            for row in &self.data {
                column_values.push(parse_datetime_cell(&row[idx], format)?);
            }
            converted.push((idx, column_values));
        }

        for (idx, column_values) in converted {
            for (row, value) in self.data.iter_mut().zip(column_values) {
                row[idx] = value;
            }
        }

        Ok(self)
    }

    /// One-hot-encodes the given columns and returns a frame of only the
    /// dummy columns, one row per input row.
    ///
    /// Per column, the distinct values are sorted and the first (baseline)
    /// category is dropped; each remaining category becomes a `0`/`1` column
    /// named after the value. A baseline-category row is all-zero.
    ///
    /// ```
    /// use dautils::df_utils::DfBuilder;
    ///
    /// let mut df = DfBuilder::new();
    /// df.set_header(vec!["color"]);
    /// df.add_row(vec!["red"]).unwrap();
    /// df.add_row(vec!["green"]).unwrap();
    /// df.add_row(vec!["blue"]).unwrap();
    ///
    /// let dummies = df.generate_dummies("color").unwrap();
    /// assert_eq!(dummies.get_headers(), &["green".to_string(), "red".to_string()]);
    /// assert_eq!(dummies.get_data()[2], vec!["0".to_string(), "0".to_string()]);
    /// ```
    pub fn generate_dummies(&self, columns: impl Into<ColumnSpec>) -> Result<DfBuilder> {
        let indices = self.column_indices(columns.into())?;

        let mut headers = Vec::new();
        let mut data: Vec<Vec<String>> = vec![Vec::new(); self.data.len()];

        for idx in indices {
            let mut categories: Vec<&String> = self
                .data
                .iter()
                .map(|row| &row[idx])
                .collect::<HashSet<&String>>()
                .into_iter()
                .collect();
            categories.sort();

            // drop_first: the sorted baseline category is encoded as all-zero
            let kept = &categories[usize::min(1, categories.len())..];

            for &category in kept {
                headers.push(category.clone());
            }
            for (row, out) in self.data.iter().zip(data.iter_mut()) {
                for &category in kept {
                    out.push(if &row[idx] == category { "1" } else { "0" }.to_string());
                }
            }
        }

        Ok(DfBuilder { headers, data })
    }

    /// Drops each named column that exists; names with no matching column
    /// are silently ignored, so the call is idempotent.
    ///
    /// ```
    /// use dautils::df_utils::DfBuilder;
    ///
    /// let mut df = DfBuilder::new();
    /// df.set_header(vec!["a", "b"]);
    /// df.add_row(vec!["1", "2"]).unwrap();
    ///
    /// df.drop_columns("a").drop_columns("a");
    /// assert_eq!(df.get_headers(), &["b".to_string()]);
    /// ```
    pub fn drop_columns(&mut self, columns: impl Into<ColumnSpec>) -> &mut Self {
        let columns_set: HashSet<String> = columns.into().into_vec().into_iter().collect();

        let remaining: Vec<(usize, String)> = self
            .headers
            .iter()
            .enumerate()
            .filter(|(_, h)| !columns_set.contains(h.as_str()))
            .map(|(i, h)| (i, h.clone()))
            .collect();

        self.data = self
            .data
            .iter()
            .map(|row| remaining.iter().map(|(i, _)| row[*i].clone()).collect())
            .collect();
        self.headers = remaining.into_iter().map(|(_, h)| h).collect();

        self
    }
}

fn resolve_sheet_name(sheet_names: &[String], sheet: SheetSpec) -> Result<String> {
    match sheet {
        SheetSpec::Name(name) => {
            if sheet_names.contains(&name) {
                Ok(name)
            } else {
                Err(UtilsError::InvalidShape(format!(
                    "sheet '{}' not found",
                    name
                )))
            }
        }
        SheetSpec::Index(index) => {
            if index >= 1 && index <= sheet_names.len() {
                Ok(sheet_names[index - 1].clone())
            } else {
                Err(UtilsError::IndexOutOfRange(format!(
                    "sheet index {} out of 1..={}",
                    index,
                    sheet_names.len()
                )))
            }
        }
    }
}

fn parse_datetime_cell(cell: &str, format: &str) -> Result<String> {
    let parsed = NaiveDateTime::parse_from_str(cell, format)
        .or_else(|_| NaiveDate::parse_from_str(cell, format).map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| UtilsError::InvalidFormat {
            value: cell.to_string(),
            expected: format!("datetime ({})", format),
        })?;
    Ok(parsed.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheets() -> Vec<String> {
        vec![
            "Sheet1".to_string(),
            "Sheet2".to_string(),
            "Sheet3".to_string(),
        ]
    }

    #[test]
    fn sheet_resolves_by_name() {
        let name = resolve_sheet_name(&sheets(), SheetSpec::Name("Sheet2".to_string())).unwrap();
        assert_eq!(name, "Sheet2");
    }

    #[test]
    fn unknown_sheet_name_is_a_shape_error() {
        let err =
            resolve_sheet_name(&sheets(), SheetSpec::Name("Totals".to_string())).unwrap_err();
        assert!(matches!(err, UtilsError::InvalidShape(_)));
    }

    #[test]
    fn sheet_index_is_one_based() {
        let name = resolve_sheet_name(&sheets(), SheetSpec::Index(1)).unwrap();
        assert_eq!(name, "Sheet1");
        let name = resolve_sheet_name(&sheets(), SheetSpec::Index(3)).unwrap();
        assert_eq!(name, "Sheet3");
    }

    #[test]
    fn sheet_index_out_of_bounds_is_rejected() {
        for bad in [0, 4] {
            let err = resolve_sheet_name(&sheets(), SheetSpec::Index(bad)).unwrap_err();
            assert!(matches!(err, UtilsError::IndexOutOfRange(_)), "index {}", bad);
        }
    }
}
