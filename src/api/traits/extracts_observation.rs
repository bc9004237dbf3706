use crate::api::enums::partition::Partition;
use crate::api::errors::ParseError;
use crate::records::group_key::GroupKey;
use crate::records::parsed_record::ParsedRecord;

/// Turns a parsed record into an observation: which group it belongs to and what
/// value it contributes.
///
/// [`RecordSchema`] implements this from its declared field roles; callers with
/// unusual layouts may supply their own implementation.
///
/// [`RecordSchema`]: crate::records::record_schema::RecordSchema
pub trait ExtractsObservation {
    /// Returns the key of the group the record belongs to.
    fn key(&self, record: &ParsedRecord) -> Result<GroupKey, ParseError>;

    /// Returns the measured value to summarize.
    fn value(&self, record: &ParsedRecord) -> Result<f64, ParseError>;

    /// Returns the set of groups the record is routed into.
    fn partition(&self, _record: &ParsedRecord) -> Result<Partition, ParseError> {
        Ok(Partition::All)
    }
}
