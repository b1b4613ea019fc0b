// Primitives for writing the lookup file.

use std::io::Write;

use crate::sidroid::*;

/// Whether SI-Droid expects the field between quotes: it holds a comma, a
/// quote or a line break, or it starts or ends with a space.
fn needs_quotes(field: &str) -> bool {
    field.contains(&[',', '"', '\r', '\n', '\u{feff}'][..])
        || field.starts_with(' ')
        || field.ends_with(' ')
}

fn quote_field(field: &str) -> String {
    if needs_quotes(field) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Writes the header line and one line per runner, each ended by CRLF.
///
/// The quoting is done here and not by the csv writer, which does not quote
/// the fields padded with spaces.
pub fn write_runners<W: Write>(writer: W, runners: &[Runner]) -> SidroidResult<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);
    wtr.write_record(Runner::HEADER).context(WritingCsvSnafu {})?;
    for runner in runners {
        let fields: Vec<String> = runner.fields().iter().map(|f| quote_field(f)).collect();
        wtr.write_record(&fields).context(WritingCsvSnafu {})?;
    }
    wtr.flush().context(FlushingCsvSnafu {})?;
    Ok(())
}

/// The content of the lookup file. Lines are separated by CRLF, and the last
/// line has no terminator.
pub fn runners_to_csv(runners: &[Runner]) -> SidroidResult<String> {
    let mut buffer: Vec<u8> = Vec::new();
    write_runners(&mut buffer, runners)?;
    if buffer.ends_with(b"\r\n") {
        buffer.truncate(buffer.len() - 2);
    }
    let content = String::from_utf8(buffer).whatever_context("Lookup file is not valid UTF-8")?;
    Ok(content)
}

pub fn write_lookup_file(destination: &Destination, content: &str) -> SidroidResult<()> {
    match destination {
        Destination::Stdout => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(content.as_bytes())
                .and_then(|_| handle.flush())
                .context(WritingOutputSnafu { path: "stdout" })?;
        }
        Destination::File(path) => {
            info!("Writing lookup file {}", path.display());
            fs::write(path, content).context(WritingOutputSnafu {
                path: path.display().to_string(),
            })?;
        }
    }
    Ok(())
}
