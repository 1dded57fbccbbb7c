// Primitives for reading ballots out of Excel workbooks.

use calamine::{open_workbook, DataType, Reader, Xlsx};

use borda_count::builder::BallotBuilder;

use crate::borda::*;

/// Reads the ballots of a worksheet laid out like the CSV input: a header
/// row with `Rank N` columns, then one ballot per row.
///
/// Uses the first worksheet unless a name is given.
pub fn read_excel_file(path: &str, worksheet: Option<&str>) -> TallyResult<Vec<Ballot>> {
    let mut workbook: Xlsx<_> = open_workbook(path).context(OpeningExcelSnafu { path })?;
    let wrange = match worksheet {
        Some(name) => workbook
            .worksheet_range(name)
            .context(MissingWorksheetSnafu { name, path })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path })?,
    }
    .context(OpeningExcelSnafu { path })?;

    let mut iter = wrange.rows();
    let header: Vec<String> = match iter.next() {
        Some(row) => read_row(row, 1)?,
        None => {
            info!("read_excel_file: {:?} is empty", path);
            return Ok(Vec::new());
        }
    };
    debug!("read_excel_file: header: {:?}", header);

    let mut builder = BallotBuilder::new(&header);
    for (idx, row) in iter.enumerate() {
        let lineno = (idx + 2) as u64;
        let cells = read_row(row, lineno)?;
        debug!("read_excel_file: lineno: {:?} row: {:?}", lineno, cells);
        builder.add_row(&cells);
    }
    Ok(builder.build())
}

fn read_row(row: &[DataType], lineno: u64) -> TallyResult<Vec<String>> {
    row.iter().map(|cell| read_cell(cell, lineno)).collect()
}

fn read_cell(cell: &DataType, lineno: u64) -> TallyResult<String> {
    match cell {
        DataType::String(s) => Ok(s.clone()),
        DataType::Empty => Ok(String::new()),
        DataType::Int(i) => Ok(i.to_string()),
        DataType::Float(f) => Ok(f.to_string()),
        DataType::Bool(b) => Ok(b.to_string()),
        _ => ExcelWrongCellTypeSnafu {
            lineno,
            content: format!("{:?}", cell),
        }
        .fail(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_as_text() {
        assert_eq!(read_cell(&DataType::String("Anna".into()), 2).unwrap(), "Anna");
        assert_eq!(read_cell(&DataType::Empty, 2).unwrap(), "");
        assert_eq!(read_cell(&DataType::Int(42), 2).unwrap(), "42");
        assert_eq!(read_cell(&DataType::Float(3.0), 2).unwrap(), "3");
        assert_eq!(read_cell(&DataType::Float(2.5), 2).unwrap(), "2.5");
        assert_eq!(read_cell(&DataType::Bool(true), 2).unwrap(), "true");
    }

    #[test]
    fn date_cells_are_rejected() {
        let res = read_cell(&DataType::DateTime(44000.5), 7);
        assert!(matches!(
            res,
            Err(TallyError::ExcelWrongCellType { lineno: 7, .. })
        ));
    }

    #[test]
    fn rows_go_through_the_builder() {
        let header = read_row(
            &[
                DataType::String("Rank 2".into()),
                DataType::String("Rank 1".into()),
            ],
            1,
        )
        .unwrap();
        let mut builder = BallotBuilder::new(&header);
        let row = read_row(&[DataType::Int(7), DataType::String("Ann".into())], 2).unwrap();
        builder.add_row(&row);
        assert_eq!(builder.build()[0].candidates(), &["Ann", "7"]);
    }

    #[test]
    fn missing_workbook() {
        let res = read_excel_file("/nonexistent/ballots.xlsx", None);
        assert!(matches!(res, Err(TallyError::OpeningExcel { .. })));
    }
}
