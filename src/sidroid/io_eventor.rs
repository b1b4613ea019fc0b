// Reading the entry overview exported by Eventor.

use std::collections::HashMap;

use calamine::{open_workbook_auto, DataType, Range, Reader};

use crate::sidroid::{io_common::cell_to_string, *};

/// One row of a worksheet: the text of each cell, keyed by the label of its column.
pub type Record = HashMap<String, String>;

pub fn read_registrations(path: &str, settings: &Settings) -> SidroidResult<Vec<Registration>> {
    let wrange = get_range(path, &settings.worksheet)?;
    let (header, records) = read_records(&wrange, &settings.worksheet)?;
    check_columns(&header, &settings.columns, &settings.worksheet)?;

    let registrations: Vec<Registration> = records
        .iter()
        .map(|record| record_to_registration(record, &settings.columns))
        .collect();
    info!(
        "Read {} registrations from worksheet {:?} of {}",
        registrations.len(),
        settings.worksheet,
        simplify_file_name(path)
    );
    Ok(registrations)
}

fn get_range(path: &str, worksheet: &str) -> SidroidResult<Range<DataType>> {
    debug!("get_range: path: {:?} worksheet: {:?}", path, worksheet);
    let mut workbook = open_workbook_auto(path).context(OpeningWorkbookSnafu { path })?;
    let available = workbook.sheet_names().join(", ");
    match workbook.worksheet_range(worksheet) {
        Some(wrange) => wrange.context(ReadingWorksheetSnafu { worksheet }),
        None => MissingWorksheetSnafu {
            worksheet,
            available,
        }
        .fail(),
    }
}

fn is_blank(cell: &DataType) -> bool {
    matches!(cell, DataType::Empty)
}

/// Reads the first row as the header, and every following row as a record.
///
/// Rows made only of empty cells are skipped. A cell holding spaces is
/// content, and keeps its row. When two columns share a label,
/// the leftmost one is used.
pub fn read_records(
    wrange: &Range<DataType>,
    worksheet: &str,
) -> SidroidResult<(Vec<String>, Vec<Record>)> {
    let mut rows = wrange.rows();
    let header: Vec<String> = rows
        .next()
        .context(EmptyWorksheetSnafu { worksheet })?
        .iter()
        .map(cell_to_string)
        .collect();
    debug!("read_records: header: {:?}", header);

    let mut records: Vec<Record> = Vec::new();
    for (idx, row) in rows.enumerate() {
        // The header is the first line of the range.
        let lineno = idx + 2;
        if row.iter().all(is_blank) {
            debug!("read_records: skipping blank line {}", lineno);
            continue;
        }
        let mut record = Record::new();
        for (label, cell) in header.iter().zip(row.iter()) {
            if label.is_empty() {
                continue;
            }
            record
                .entry(label.clone())
                .or_insert_with(|| cell_to_string(cell));
        }
        debug!("read_records: line {}: {:?}", lineno, record);
        records.push(record);
    }
    Ok((header, records))
}

fn check_columns(header: &[String], labels: &ColumnLabels, worksheet: &str) -> SidroidResult<()> {
    let missing: Vec<&str> = labels
        .all()
        .into_iter()
        .filter(|label| !header.iter().any(|h| h.as_str() == *label))
        .collect();
    if !missing.is_empty() {
        return MissingColumnsSnafu {
            worksheet,
            columns: missing.join(", "),
        }
        .fail();
    }
    Ok(())
}

/// Absent cells give blank fields.
pub fn record_to_registration(record: &Record, labels: &ColumnLabels) -> Registration {
    let field = |label: &str| record.get(label).cloned().unwrap_or_default();
    Registration {
        given_name: field(&labels.given_name),
        surname: field(&labels.surname),
        punch_card_id: field(&labels.punch_card_id),
        club_name: field(&labels.club_name),
        course_name: field(&labels.course_name),
        person_id: field(&labels.person_id),
    }
}
