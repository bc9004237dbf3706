/// What a record column is used for during aggregation.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum FieldRole {
    /// Outer condition of the group key, e.g. sample or trajectory count.
    Outer,

    /// Inner condition of the group key; the swept parameter plotted on the X axis.
    Inner,

    /// Training/testing flag; routes the record into a [`Partition`].
    ///
    /// [`Partition`]: crate::api::enums::partition::Partition
    Split,

    /// The measured value that gets summarized.
    Value,
}
