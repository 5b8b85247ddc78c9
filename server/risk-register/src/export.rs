//! Flat CSV export of a record view.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::error::EngineError;
use crate::types::{Column, RiskRecord};

/// Download name offered to the end user.
pub const EXPORT_FILENAME: &str = "risk-register.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv";

/// Header row plus one line per record, in input order.
///
/// Fields holding a comma, quote or line break are quoted; everything else is
/// written as-is. Lines are `\n`-joined with no trailing newline. An empty input
/// is `EngineError::EmptyExport`.
pub fn to_delimited_text(records: &[&RiskRecord], columns: &[Column]) -> Result<String, EngineError> {
  if records.is_empty() {
    return Err(EngineError::EmptyExport);
  }

  let mut wtr = WriterBuilder::new()
    .terminator(Terminator::Any(b'\n'))
    .quote_style(QuoteStyle::Necessary)
    .from_writer(Vec::new());

  wtr.write_record(columns.iter().map(|c| c.label()))?;
  for record in records {
    wtr.write_record(columns.iter().map(|c| c.value(record)))?;
  }

  let data = wtr
    .into_inner()
    .map_err(|e| EngineError::Csv(e.into_error().into()))?;
  let mut text = String::from_utf8(data)?;
  if text.ends_with('\n') {
    text.pop();
  }
  Ok(text)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::types::{Rating, Submission};

  fn record(id: u64, asset: &str, threat: &str, l: i64, i: i64) -> RiskRecord {
    RiskRecord::new(
      id,
      Submission {
        asset: asset.into(),
        threat: threat.into(),
        likelihood: Rating::new(l).unwrap(),
        impact: Rating::new(i).unwrap(),
      },
    )
  }

  #[test]
  fn single_record_export() {
    let rec = record(1, "DB", "Leak", 2, 3);
    let text = to_delimited_text(&[&rec], &Column::ALL).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], "ID,Asset,Threat,Likelihood,Impact,Score,Level,Mitigation Hint");
    assert_eq!(lines[1], "1,DB,Leak,2,3,6,Medium,Plan mitigation within 6 months");
    assert!(!text.ends_with('\n'));
  }

  #[test]
  fn empty_export_is_reported() {
    let err = to_delimited_text(&[], &Column::ALL).unwrap_err();
    assert!(matches!(err, EngineError::EmptyExport));
  }

  #[test]
  fn rows_keep_input_order() {
    let a = record(5, "A", "x", 5, 5);
    let b = record(2, "B", "y", 1, 1);
    let text = to_delimited_text(&[&a, &b], &[Column::Id, Column::Score]).unwrap();
    assert_eq!(text, "ID,Score\n5,25\n2,1");
  }

  #[test]
  fn delimiter_in_field_is_quoted() {
    let rec = record(3, "Payroll, HR", "Insider \"admin\"", 4, 5);
    let text = to_delimited_text(&[&rec], &[Column::Id, Column::Asset, Column::Threat]).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[1], r#"3,"Payroll, HR","Insider ""admin""""#);
  }

  #[test]
  fn line_break_in_field_is_quoted_and_reads_back() {
    let rec = record(6, "Mail relay", "Line1\nLine2", 3, 3);
    let text = to_delimited_text(&[&rec], &Column::ALL).unwrap();
    assert!(text.contains("6,Mail relay,\"Line1\nLine2\",3,3,9,Medium,"), "{}", text);

    let mut rdr = csv::ReaderBuilder::new().from_reader(text.as_bytes());
    let headers = rdr.headers().unwrap().clone();
    assert_eq!(headers.len(), Column::ALL.len());
    let rows: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(&rows[0][0], "6");
    assert_eq!(&rows[0][2], "Line1\nLine2");
    assert_eq!(&rows[0][7], "Plan mitigation within 6 months");
  }

  #[test]
  fn hint_with_punctuation_stays_unquoted() {
    let rec = record(4, "Portal", "Credential stuffing", 4, 4);
    let text = to_delimited_text(&[&rec], &[Column::MitigationHint]).unwrap();
    assert_eq!(
      text,
      "Mitigation Hint\nPrioritize action + compensating controls (NIST PR.AC)"
    );
  }
}
