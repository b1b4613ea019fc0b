use log::{debug, info, warn};

use runner_lookup::*;
use snafu::{prelude::*, Snafu};

use std::fs;
use std::path::{Path, PathBuf};

use text_diff::print_diff;

use crate::args::Args;
use crate::sidroid::config_reader::*;
use crate::sidroid::io_common::*;
use crate::sidroid::io_csv::*;
use crate::sidroid::io_eventor::*;

pub mod config_reader;
pub mod io_common;
pub mod io_csv;
pub mod io_eventor;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SidroidError {
    #[snafu(display("Error opening workbook {path}"))]
    OpeningWorkbook {
        source: calamine::Error,
        path: String,
    },
    #[snafu(display("Worksheet {worksheet:?} not found, the workbook contains: {available}"))]
    MissingWorksheet {
        worksheet: String,
        available: String,
    },
    #[snafu(display("Error reading worksheet {worksheet:?}"))]
    ReadingWorksheet {
        source: calamine::Error,
        worksheet: String,
    },
    #[snafu(display("Worksheet {worksheet:?} has no header row"))]
    EmptyWorksheet { worksheet: String },
    #[snafu(display("Columns missing in worksheet {worksheet:?}: {columns}"))]
    MissingColumns { worksheet: String, columns: String },
    #[snafu(display("Error opening configuration {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing a row of the lookup file"))]
    WritingCsv { source: csv::Error },
    #[snafu(display("Error flushing the lookup file"))]
    FlushingCsv { source: std::io::Error },
    #[snafu(display("Error writing {path}"))]
    WritingOutput {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Cannot sort with the requested locale"))]
    Collation { source: LookupErrors },
    #[snafu(display("Error opening reference file {path}"))]
    OpeningReference {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Difference detected between the lookup file and reference {path}"))]
    ReferenceMismatch { path: String },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type SidroidResult<T> = Result<T, SidroidError>;

/// Where the lookup file goes.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

fn output_destination(args: &Args, settings: &Settings, today: chrono::NaiveDate) -> Destination {
    match args.out.as_deref() {
        Some("stdout") => Destination::Stdout,
        Some(p) if !p.is_empty() => Destination::File(PathBuf::from(p)),
        _ => {
            let event_id = args
                .event_id
                .as_deref()
                .and_then(event_id_from_text)
                .or_else(|| event_id_from_file_name(&args.input));
            let file_name = lookup_file_name(event_id.as_deref(), today);
            let dir: PathBuf = match &settings.output_directory {
                Some(d) => PathBuf::from(d),
                None => Path::new(&args.input)
                    .parent()
                    .map(|p| p.to_path_buf())
                    .unwrap_or_default(),
            };
            Destination::File(dir.join(file_name))
        }
    }
}

/// Renders the lookup table as aligned text columns, for review in a terminal.
pub fn preview_table(runners: &[Runner]) -> String {
    let titles = ["Sportident", "Namn", "Klubb", "Eventor Id", "Bana"];
    let mut widths: Vec<usize> = titles.iter().map(|t| t.chars().count()).collect();
    for r in runners {
        for (w, f) in widths.iter_mut().zip(r.fields().iter()) {
            *w = (*w).max(f.chars().count());
        }
    }
    let format_line = |cells: &[&str]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(widths.iter())
            .map(|(c, w)| format!("{}{}", c, " ".repeat(w - c.chars().count())))
            .collect();
        padded.join("  ").trim_end().to_string()
    };
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let rule_cells: Vec<&str> = rule.iter().map(String::as_str).collect();
    let mut lines: Vec<String> = vec![format_line(&titles), format_line(&rule_cells)];
    for r in runners {
        lines.push(format_line(&r.fields()));
    }
    lines.join("\n")
}

/// The table goes to stderr when the lookup file itself is written to stdout.
fn preview_on_stderr(destination: &Destination) -> bool {
    matches!(destination, Destination::Stdout)
}

fn check_reference(reference_path: &str, content: &str) -> SidroidResult<()> {
    let reference = fs::read_to_string(reference_path).context(OpeningReferenceSnafu {
        path: reference_path,
    })?;
    if reference != content {
        warn!("Found differences with the reference file {}", reference_path);
        print_diff(reference.as_str(), content, "\n");
        return ReferenceMismatchSnafu {
            path: reference_path,
        }
        .fail();
    }
    info!("Lookup file matches reference {}", reference_path);
    Ok(())
}

/// Reads the registrations, builds the lookup table and writes it out.
pub fn run_conversion(args: &Args) -> SidroidResult<Destination> {
    let config = match &args.config {
        Some(p) => read_config(p)?,
        None => SidroidConfig::default(),
    };
    debug!("config: {:?}", config);
    let settings = resolve_settings(args, &config);
    info!("settings: {:?}", settings);

    let collation = LocaleCollation::new(&settings.locale).context(CollationSnafu {})?;

    let registrations = read_registrations(&args.input, &settings)?;
    let runners = transform(&registrations, &collation);

    let summary = summarize(&runners);
    info!(
        "{} runners in {} courses ({} without punch card)",
        summary.runners, summary.courses, summary.without_punch_card
    );

    let destination = output_destination(args, &settings, chrono::Local::now().date_naive());
    if args.preview {
        if preview_on_stderr(&destination) {
            eprintln!("{}", preview_table(&runners));
        } else {
            println!("{}", preview_table(&runners));
        }
    }

    let content = runners_to_csv(&runners)?;
    write_lookup_file(&destination, &content)?;

    if let Some(reference_path) = &args.reference {
        check_reference(reference_path, &content)?;
    }

    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    pub fn args(input: &str) -> Args {
        Args {
            input: input.to_string(),
            out: None,
            out_dir: None,
            config: None,
            worksheet: None,
            locale: None,
            event_id: None,
            preview: false,
            reference: None,
            verbose: false,
        }
    }

    fn fixture() -> String {
        format!("{}/tests/data/Entry overview 31337.xlsx", env!("CARGO_MANIFEST_DIR"))
    }

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 18).unwrap()
    }

    #[test]
    fn destination_from_file_name() {
        let a = args("/data/Entry overview 12345.xls");
        let s = resolve_settings(&a, &SidroidConfig::default());
        assert_eq!(
            output_destination(&a, &s, day()),
            Destination::File(PathBuf::from("/data/runners_12345.csv"))
        );
    }

    #[test]
    fn destination_event_id_argument() {
        let mut a = args("/data/Entry overview 12345.xls");
        a.event_id = Some("https://eventor.orientering.se/Events/Show/4242".to_string());
        a.out_dir = Some("/tmp/out".to_string());
        let s = resolve_settings(&a, &SidroidConfig::default());
        assert_eq!(
            output_destination(&a, &s, day()),
            Destination::File(PathBuf::from("/tmp/out/runners_4242.csv"))
        );
    }

    #[test]
    fn destination_falls_back_to_date() {
        let a = args("registrations.xlsx");
        let s = resolve_settings(&a, &SidroidConfig::default());
        assert_eq!(
            output_destination(&a, &s, day()),
            Destination::File(PathBuf::from("runners_20240518.csv"))
        );
    }

    #[test]
    fn destination_explicit() {
        let mut a = args("/data/Entry overview 12345.xls");
        a.out = Some("stdout".to_string());
        let s = resolve_settings(&a, &SidroidConfig::default());
        assert_eq!(output_destination(&a, &s, day()), Destination::Stdout);
        a.out = Some("lookup.csv".to_string());
        assert_eq!(
            output_destination(&a, &s, day()),
            Destination::File(PathBuf::from("lookup.csv"))
        );
    }

    #[test]
    fn preview_alignment() {
        let runners = vec![Runner {
            punch_card_id: "123456".to_string(),
            full_name: "Åsa Öberg".to_string(),
            club_name: "OK".to_string(),
            person_id: "".to_string(),
            course_name: "D21".to_string(),
        }];
        let table = preview_table(&runners);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Sportident  Namn       Klubb  Eventor Id  Bana");
        assert_eq!(lines[1], "----------  ---------  -----  ----------  ----");
        assert_eq!(lines[2], "123456      Åsa Öberg  OK                 D21");
    }

    #[test]
    fn end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(&fixture());
        a.out_dir = Some(dir.path().display().to_string());
        let destination = run_conversion(&a).unwrap();
        let expected_path = dir.path().join("runners_31337.csv");
        assert_eq!(destination, Destination::File(expected_path.clone()));
        let content = fs::read_to_string(expected_path).unwrap();
        assert_eq!(
            content,
            "Sportident,Name,Club,Id,Course\r\n\
             654321,Bo Karlsson,OK Linné,2,D21\r\n\
             123456,Anna Svensson,IFK Göteborg,1,D21\r\n\
             ,Åsa Öberg,OK Ravinen,,D21\r\n\
             8011,Carl Ahl,\"Tumba-Mälarhöjden OK, Team 1\",3,H21"
        );
    }

    #[test]
    fn end_to_end_reference() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("reference.csv");
        fs::write(&reference, "Sportident,Name,Club,Id,Course").unwrap();
        let mut a = args(&fixture());
        a.out = Some(dir.path().join("out.csv").display().to_string());
        a.reference = Some(reference.display().to_string());
        let err = run_conversion(&a).unwrap_err();
        assert!(matches!(err, SidroidError::ReferenceMismatch { .. }));
    }

    #[test]
    fn preview_stays_out_of_the_lookup_stream() {
        assert!(preview_on_stderr(&Destination::Stdout));
        assert!(!preview_on_stderr(&Destination::File(PathBuf::from(
            "runners_1.csv"
        ))));
    }

    #[test]
    fn end_to_end_matching_reference() {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("reference.csv");
        fs::write(
            &reference,
            "Sportident,Name,Club,Id,Course\r\n\
             654321,Bo Karlsson,OK Linné,2,D21\r\n\
             123456,Anna Svensson,IFK Göteborg,1,D21\r\n\
             ,Åsa Öberg,OK Ravinen,,D21\r\n\
             8011,Carl Ahl,\"Tumba-Mälarhöjden OK, Team 1\",3,H21",
        )
        .unwrap();
        let mut a = args(&fixture());
        a.out = Some(dir.path().join("out.csv").display().to_string());
        a.reference = Some(reference.display().to_string());
        a.preview = true;
        assert!(run_conversion(&a).is_ok());
    }

    #[test]
    fn end_to_end_bad_locale() {
        let mut a = args(&fixture());
        a.locale = Some("???".to_string());
        let err = run_conversion(&a).unwrap_err();
        assert!(matches!(err, SidroidError::Collation { .. }));
    }
}
