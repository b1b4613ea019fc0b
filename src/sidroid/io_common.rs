use std::path::Path;
use std::sync::OnceLock;

use calamine::DataType;
use chrono::NaiveDate;
use log::warn;
use regex::Regex;

pub fn simplify_file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// The text of a cell, as it would be typed in the spreadsheet.
pub fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.clone(),
        DataType::Int(i) => i.to_string(),
        // Identifiers are stored as numbers by Excel: 123456 and not 123456.0
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::DateTime(f) => f.to_string(),
        DataType::Empty => "".to_string(),
        DataType::Error(e) => {
            warn!("cell_to_string: error cell {:?} read as blank", e);
            "".to_string()
        }
    }
}

fn first_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("valid pattern"))
}

fn export_file_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)(\d+)\.xlsx?$").expect("valid pattern"))
}

/// The first number found in the text, for instance the id in an Eventor URL.
pub fn event_id_from_text(text: &str) -> Option<String> {
    first_number().find(text).map(|m| m.as_str().to_string())
}

/// The event id at the end of an Eventor export name ("Entry overview 12345.xls").
pub fn event_id_from_file_name(path: &str) -> Option<String> {
    let name = simplify_file_name(path);
    export_file_number()
        .captures(&name)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn lookup_file_name(event_id: Option<&str>, today: NaiveDate) -> String {
    match event_id {
        Some(id) => format!("runners_{}.csv", id),
        None => format!("runners_{}.csv", today.format("%Y%m%d")),
    }
}
