/// Numeric type a record column is parsed as.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FieldKind {
    /// Signed integer, e.g. a sample count or a split flag.
    Int,

    /// Floating point number, e.g. a discount factor or a loss.
    Float,
}
