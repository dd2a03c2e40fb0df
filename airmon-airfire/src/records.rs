//! Archive CSV files read into [`RawTable`]s.

use airmon_core::{AirmonError, RawTable};

fn data_err(e: &csv::Error) -> AirmonError {
    let detail = match e.kind() {
        csv::ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => format!("{len} fields, expected {expected_len}"),
        _ => e.to_string(),
    };
    match e.position() {
        Some(pos) => AirmonError::Data(format!("line {}: {detail}", pos.line())),
        None => AirmonError::Data(detail),
    }
}

/// Parse CSV text with a header line into a [`RawTable`].
///
/// Quoted fields may hold commas, newlines and `""` escapes. Empty lines are
/// skipped and CRLF endings are accepted. A leading byte-order mark is removed.
///
/// # Errors
/// `Data` for empty input or a row whose field count differs from the
/// header's. The message starts with the line the row begins on.
pub fn parse_csv(text: &str) -> Result<RawTable, AirmonError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(text.trim_start_matches('\u{feff}').as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| data_err(&e))?
        .iter()
        .map(str::to_owned)
        .collect();
    if headers.is_empty() {
        return Err(AirmonError::Data("empty CSV document".into()));
    }

    let rows = reader
        .records()
        .map(|record| {
            record
                .map(|r| r.iter().map(str::to_owned).collect::<Vec<_>>())
                .map_err(|e| data_err(&e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawTable { headers, rows })
}
