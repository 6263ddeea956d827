//! Output writers for the decoded record stream.
//!
//! These are deliberately thin: the record's own serialization carries the
//! shape, and no writer needs to know any field grammar.

use std::io::Write;

use unihan_d::{CharacterRecord, FieldValue};

/// Writes all records as one pretty-printed JSON array.
pub fn write_json<W: Write>(
    mut out: W,
    records: &[CharacterRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    serde_json::to_writer_pretty(&mut out, records)?;
    writeln!(out)?;
    Ok(())
}

/// Writes one compact JSON record per line.
pub fn write_ndjson<W: Write>(
    mut out: W,
    records: &[CharacterRecord],
) -> Result<(), Box<dyn std::error::Error>> {
    for record in records {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out)?;
    }
    Ok(())
}

/// Writes a CSV table: index columns first, then `fields` in order.
///
/// Cells hold the raw field strings; the CLI keeps the CSV path unexpanded,
/// so structured values never reach this writer in normal use.
pub fn write_csv<W: Write>(
    mut out: W,
    records: &[CharacterRecord],
    fields: &[String],
) -> Result<(), Box<dyn std::error::Error>> {
    let header: Vec<&str> = fields.iter().map(String::as_str).collect();
    writeln!(out, "{}", header.join(","))?;

    for record in records {
        let mut row: Vec<String> = Vec::with_capacity(fields.len());
        for field in fields {
            let cell = match field.as_str() {
                "ucn" => record.ucn.clone(),
                "char" => record.character.to_string(),
                _ => match record.get(field) {
                    None => String::new(),
                    Some(FieldValue::Scalar(s)) => s.clone(),
                    Some(other) => serde_json::to_string(other)?,
                },
            };
            row.push(escape_csv(&cell));
        }
        writeln!(out, "{}", row.join(","))?;
    }
    Ok(())
}

fn escape_csv(cell: &str) -> String {
    if cell.contains(',') || cell.contains('"') || cell.contains('\n') {
        format!("\"{}\"", cell.replace('"', "\"\""))
    } else {
        cell.to_string()
    }
}
