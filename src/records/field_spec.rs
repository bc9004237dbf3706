use crate::api::enums::{FieldKind, FieldRole};
use derive_new::new;

/// Declares the position, type and purpose of one column in a result record.
#[derive(new, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Zero based column index within the comma separated record.
    pub index: usize,

    /// Type the column is parsed as.
    pub kind: FieldKind,

    /// How the column participates in aggregation.
    pub role: FieldRole,
}
