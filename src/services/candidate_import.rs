use std::io::Cursor;
use std::path::Path;

use calamine::{Reader, Xlsx};

use crate::error::{Error, Result};

/// One data row of a candidate roster. Columns are positional:
/// first name, last name, email, phone. The first row is a header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterRow {
    pub row_num: usize,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

impl RosterRow {
    fn from_cells(row_num: usize, cell: impl Fn(usize) -> String) -> Self {
        let phone = cell(3);
        Self {
            row_num,
            first_name: cell(0),
            last_name: cell(1),
            email: cell(2),
            phone: (!phone.is_empty()).then_some(phone),
        }
    }

    fn is_empty(&self) -> bool {
        self.first_name.is_empty()
            && self.last_name.is_empty()
            && self.email.is_empty()
            && self.phone.is_none()
    }
}

pub fn parse_roster(filename: &str, data: &[u8]) -> Result<Vec<RosterRow>> {
    let ext = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let rows = match ext.as_str() {
        "xlsx" => parse_xlsx(data)?,
        "csv" => parse_csv(data)?,
        other => {
            return Err(Error::BadRequest(format!(
                "Unsupported roster format .{}; upload an .xlsx or .csv file",
                other
            )))
        }
    };
    Ok(rows.into_iter().filter(|r| !r.is_empty()).collect())
}

fn parse_csv(data: &[u8]) -> Result<Vec<RosterRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(data));

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result
            .map_err(|e| Error::BadRequest(format!("Row {} could not be read: {}", idx + 2, e)))?;
        rows.push(RosterRow::from_cells(idx + 2, |col| {
            record.get(col).unwrap_or("").trim().to_string()
        }));
    }
    Ok(rows)
}

fn parse_xlsx(data: &[u8]) -> Result<Vec<RosterRow>> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(data))
        .map_err(|e| Error::BadRequest(format!("Could not open spreadsheet: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| Error::BadRequest("Spreadsheet has no worksheets".to_string()))?;
    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| Error::BadRequest(format!("Could not read worksheet: {}", e)))?;

    let rows = range
        .rows()
        .enumerate()
        .skip(1)
        .map(|(idx, row)| {
            RosterRow::from_cells(idx + 1, |col| {
                row.get(col)
                    .map(|c| c.to_string().trim().to_string())
                    .unwrap_or_default()
            })
        })
        .collect();
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_columns_are_positional_and_header_is_skipped() {
        let data = b"First,Last,Email,Phone\nJane,Doe,jane@example.com,555-1234\nJohn,Roe,john@example.com,\n";
        let rows = parse_roster("roster.csv", data).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].first_name, "Jane");
        assert_eq!(rows[0].email, "jane@example.com");
        assert_eq!(rows[0].phone.as_deref(), Some("555-1234"));
        assert_eq!(rows[0].row_num, 2);
        assert_eq!(rows[1].phone, None);
    }

    #[test]
    fn short_rows_and_blank_lines_are_tolerated() {
        let data = b"a,b,c,d\nAnn,Lee\n,,,\n";
        let rows = parse_roster("roster.CSV", data).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].email, "");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            parse_roster("roster.pdf", b"%PDF"),
            Err(Error::BadRequest(_))
        ));
    }

    #[test]
    fn xlsx_rows_are_read_from_first_sheet() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, title) in ["First", "Last", "Email", "Phone"].iter().enumerate() {
            sheet.write_string(0, col as u16, *title).unwrap();
        }
        sheet.write_string(1, 0, "Jane").unwrap();
        sheet.write_string(1, 1, "Doe").unwrap();
        sheet.write_string(1, 2, "jane@example.com").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = parse_roster("roster.xlsx", &bytes).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].last_name, "Doe");
        assert_eq!(rows[0].phone, None);
    }
}
