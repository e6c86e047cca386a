use std::collections::HashMap;
use std::mem;


#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: HashMap<String, String>,
}

impl RawRecord {
    pub fn get(&self, column: &str) -> &str {
        self.fields.get(column).map(String::as_str).unwrap_or("")
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

/// Splits delimited text into rows of raw (untrimmed) fields.
///
/// Quotes toggle the quoted state; a doubled quote inside a quoted field is a literal
/// quote. Commas and line terminators (`\n`, `\r`, `\r\n`) only split outside quotes.
/// An unterminated quote swallows the rest of the input into the current field.
pub fn split_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => row.push(mem::take(&mut field)),
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(mem::take(&mut field));
                rows.push(mem::take(&mut row));
            }
            _ => field.push(ch),
        }
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

pub fn decode_records(text: &str) -> Vec<RawRecord> {
    let text = text.strip_prefix('\u{FEFF}').unwrap_or(text);
    let mut rows = split_rows(text.trim()).into_iter();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|header| header.trim().to_string())
        .collect();

    rows.filter(|row| !is_blank_row(row))
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(column, header)| {
                    let value = row.get(column).map(|value| value.trim()).unwrap_or("");
                    (header.clone(), value.to_string())
                })
                .collect()
        })
        .collect()
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|value| value.trim().is_empty())
}
