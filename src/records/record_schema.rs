use super::field_spec::FieldSpec;
use super::group_key::GroupKey;
use super::parsed_record::{FieldValue, ParsedRecord};
use crate::api::enums::{FieldKind, FieldRole, Partition};
use crate::api::errors::{AnalysisError, ParseError};
use crate::api::traits::extracts_observation::ExtractsObservation;
use memchr::Memchr;

/// Delimiter between the columns of a record.
pub const FIELD_DELIMITER: u8 = b',';

/// The declared column layout of a result record.
///
/// Records have no header, so the schema is the only description of what each
/// column means. A schema is validated on construction:
///
/// - Column indices are contiguous, starting at 0.
/// - There is exactly one [`FieldRole::Inner`] and one [`FieldRole::Value`] column.
/// - There is at most one [`FieldRole::Outer`] and one [`FieldRole::Split`] column.
/// - The [`FieldRole::Split`] column is an integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSchema {
    fields: Vec<FieldSpec>,
    outer: Option<usize>,
    inner: usize,
    split: Option<usize>,
    value: usize,
}

impl RecordSchema {
    /// Creates and validates a new schema.
    ///
    /// # Errors
    ///
    /// [`AnalysisError::InvalidSchema`] if any of the rules listed on [`RecordSchema`] is broken.
    pub fn new(fields: impl Into<Vec<FieldSpec>>) -> Result<Self, AnalysisError> {
        let mut fields = fields.into();
        fields.sort_by_key(|field| field.index);

        for (expected, field) in fields.iter().enumerate() {
            if field.index != expected {
                return Err(AnalysisError::InvalidSchema(format!(
                    "column indices must be unique and contiguous from 0, found {} at position {}",
                    field.index, expected
                )));
            }
        }

        let outer = single_role(&fields, FieldRole::Outer)?;
        let inner = single_role(&fields, FieldRole::Inner)?
            .ok_or_else(|| AnalysisError::InvalidSchema("missing inner key column".into()))?;
        let split = single_role(&fields, FieldRole::Split)?;
        let value = single_role(&fields, FieldRole::Value)?
            .ok_or_else(|| AnalysisError::InvalidSchema("missing value column".into()))?;

        if let Some(split) = split {
            if fields[split].kind != FieldKind::Int {
                return Err(AnalysisError::InvalidSchema(
                    "split column must be an integer".into(),
                ));
            }
        }

        Ok(Self {
            fields,
            outer,
            inner,
            split,
            value,
        })
    }

    /// Number of columns every record must have.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Column specifications, ordered by index.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// True if records are routed into training/testing partitions.
    pub fn has_split(&self) -> bool {
        self.split.is_some()
    }

    /// True if group keys have an outer condition.
    pub fn has_outer(&self) -> bool {
        self.outer.is_some()
    }

    /// Splits a line on [`FIELD_DELIMITER`] and converts each column to its declared type.
    ///
    /// Surrounding whitespace (including a trailing `\r`) is ignored for every column.
    ///
    /// # Arguments
    /// * `line` - A single record, without quoting or escaping.
    /// * `line_number` - 1-based line number, used for error reporting.
    pub fn parse_line(&self, line: &str, line_number: usize) -> Result<ParsedRecord, ParseError> {
        let expected = self.field_count();
        let mut columns: Vec<&str> = Vec::with_capacity(expected);
        let mut start = 0;
        for position in Memchr::new(FIELD_DELIMITER, line.as_bytes()) {
            columns.push(&line[start..position]);
            start = position + 1;
        }
        columns.push(&line[start..]);

        if columns.len() != expected {
            return Err(ParseError::FieldCount {
                line: line_number,
                expected,
                found: columns.len(),
            });
        }

        let mut values = Vec::with_capacity(expected);
        for (spec, column) in self.fields.iter().zip(columns) {
            let text = column.trim();
            let value = match spec.kind {
                FieldKind::Int => {
                    FieldValue::Int(text.parse().map_err(|_| ParseError::InvalidInteger {
                        line: line_number,
                        index: spec.index,
                        text: text.to_string(),
                    })?)
                }
                FieldKind::Float => {
                    FieldValue::Float(text.parse().map_err(|_| ParseError::InvalidFloat {
                        line: line_number,
                        index: spec.index,
                        text: text.to_string(),
                    })?)
                }
            };
            values.push(value);
        }

        Ok(ParsedRecord::new(line_number, values))
    }

    fn missing_column(&self, record: &ParsedRecord) -> ParseError {
        ParseError::FieldCount {
            line: record.line,
            expected: self.field_count(),
            found: record.fields.len(),
        }
    }
}

impl ExtractsObservation for RecordSchema {
    fn key(&self, record: &ParsedRecord) -> Result<GroupKey, ParseError> {
        let outer = self
            .outer
            .map(|index| record.key_part(index))
            .transpose()?;
        let inner = record.key_part(self.inner)?;
        Ok(GroupKey::new(outer, inner))
    }

    fn value(&self, record: &ParsedRecord) -> Result<f64, ParseError> {
        record
            .field(self.value)
            .map(|value| value.as_f64())
            .ok_or_else(|| self.missing_column(record))
    }

    fn partition(&self, record: &ParsedRecord) -> Result<Partition, ParseError> {
        let Some(split) = self.split else {
            return Ok(Partition::All);
        };

        match record.field(split) {
            Some(FieldValue::Int(flag)) => Ok(Partition::from_split_flag(flag)),
            Some(FieldValue::Float(flag)) => Err(ParseError::InvalidInteger {
                line: record.line,
                index: split,
                text: flag.to_string(),
            }),
            None => Err(self.missing_column(record)),
        }
    }
}

/// Returns the index of the only field with `role`, if any.
fn single_role(fields: &[FieldSpec], role: FieldRole) -> Result<Option<usize>, AnalysisError> {
    let mut matching = fields.iter().filter(|field| field.role == role);
    let first = matching.next().map(|field| field.index);
    if matching.next().is_some() {
        return Err(AnalysisError::InvalidSchema(format!(
            "more than one {:?} column",
            role
        )));
    }

    Ok(first)
}
