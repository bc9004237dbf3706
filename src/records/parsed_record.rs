use super::key_part::KeyPart;
use crate::api::errors::ParseError;

/// A single typed column value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Int(i64),
    Float(f64),
}

impl FieldValue {
    pub fn as_f64(&self) -> f64 {
        match self {
            FieldValue::Int(value) => *value as f64,
            FieldValue::Float(value) => *value,
        }
    }
}

/// A result record whose columns were converted to their declared types.
///
/// Fields are stored in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    /// 1-based line number the record was read from.
    pub line: usize,

    /// Typed column values, indexed by column.
    pub fields: Vec<FieldValue>,
}

impl ParsedRecord {
    pub fn new(line: usize, fields: Vec<FieldValue>) -> Self {
        Self { line, fields }
    }

    /// Returns the column at `index`, or [`None`] if the record is shorter.
    pub fn field(&self, index: usize) -> Option<FieldValue> {
        self.fields.get(index).copied()
    }

    /// Converts the column at `index` into a [`KeyPart`].
    ///
    /// # Errors
    ///
    /// [`ParseError::FieldCount`] if the column does not exist and
    /// [`ParseError::NonFiniteKey`] if it holds NaN or an infinity.
    pub fn key_part(&self, index: usize) -> Result<KeyPart, ParseError> {
        match self.field(index) {
            Some(FieldValue::Int(value)) => Ok(KeyPart::Int(value)),
            Some(FieldValue::Float(value)) => {
                KeyPart::float(value).ok_or_else(|| ParseError::NonFiniteKey {
                    line: self.line,
                    index,
                    text: value.to_string(),
                })
            }
            None => Err(ParseError::FieldCount {
                line: self.line,
                expected: index + 1,
                found: self.fields.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_part_rejects_nan() {
        let record = ParsedRecord::new(3, vec![FieldValue::Int(2), FieldValue::Float(f64::NAN)]);
        assert_eq!(record.key_part(0), Ok(KeyPart::Int(2)));
        assert!(matches!(
            record.key_part(1),
            Err(ParseError::NonFiniteKey { line: 3, index: 1, .. })
        ));
    }

    #[test]
    fn key_part_reports_missing_column() {
        let record = ParsedRecord::new(1, vec![FieldValue::Int(2)]);
        assert!(matches!(
            record.key_part(4),
            Err(ParseError::FieldCount { expected: 5, found: 1, .. })
        ));
    }
}
