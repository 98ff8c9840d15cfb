use std::io::Read;
use std::path::Path;

use crate::Error;
use crate::types::SentenceRow;

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(default)]
    sentence: Option<String>,
    #[serde(default, alias = "time", alias = "duration")]
    length: Option<String>,
}

/// Read transcript rows from CSV with a header row.
///
/// Requires a `sentence` column and a `length` column (also accepted as
/// `time` or `duration`) holding seconds. Other columns are ignored. Any
/// malformed row fails the whole load.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<SentenceRow>, Error> {
    let mut csv = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv.deserialize::<CsvRow>().enumerate() {
        let record = record?;

        let text = record
            .sentence
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingText { index })?;

        let raw = record
            .length
            .filter(|s| !s.is_empty())
            .ok_or(Error::MissingDuration { index })?;

        let duration: f64 = raw.parse().map_err(|_| Error::UnparsableDuration {
            index,
            value: raw.clone(),
        })?;

        if !duration.is_finite() || duration < 0.0 {
            return Err(Error::InvalidDuration {
                index,
                value: duration,
            });
        }

        rows.push(SentenceRow { text, duration });
    }

    tracing::debug!(rows = rows.len(), "transcript_rows_loaded");
    Ok(rows)
}

pub fn read_rows_from_path(path: &Path) -> Result<Vec<SentenceRow>, Error> {
    let file = std::fs::File::open(path)?;
    read_rows(std::io::BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_sentence_and_length() {
        let data = "sentence,length\n\"Hello, world.\",1.5\nSecond one?,2\n";
        let rows = read_rows(data.as_bytes()).unwrap();

        assert_eq!(
            rows,
            vec![
                SentenceRow::new("Hello, world.", 1.5),
                SentenceRow::new("Second one?", 2.0),
            ]
        );
    }

    #[test]
    fn accepts_time_alias_and_extra_columns() {
        let data = "idx,sentence,time,speaker\n0,First.,0.75,A\n";
        let rows = read_rows(data.as_bytes()).unwrap();
        assert_eq!(rows, vec![SentenceRow::new("First.", 0.75)]);
    }

    #[test]
    fn missing_duration_column_fails() {
        let data = "sentence\nFirst.\n";
        let err = read_rows(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingDuration { index: 0 }));
    }

    #[test]
    fn empty_text_fails_whole_load() {
        let data = "sentence,length\nFirst.,1\n,2\nThird.,1\n";
        let err = read_rows(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MissingText { index: 1 }));
    }

    #[test]
    fn non_numeric_duration_fails() {
        let data = "sentence,length\nFirst.,soon\n";
        let err = read_rows(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::UnparsableDuration { index: 0, .. }));
    }

    #[test]
    fn negative_duration_fails() {
        let data = "sentence,length\nFirst.,-1\n";
        let err = read_rows(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidDuration { index: 0, .. }));
    }

    #[test]
    fn header_only_is_empty() {
        assert!(read_rows("sentence,length\n".as_bytes()).unwrap().is_empty());
    }
}
