/*!
 * # HL7v2 Field Preparation Library
 *
 * A Rust library for normalizing HL7v2 composite field values into
 * flat, storage-ready key/value records.
 *
 * ## Features
 *
 * - 🧩 **Six datatype families**: coded concepts (CWE), identifiers
 *   (CX), person names (XCN), addresses (XAD), telecom entries (XTN),
 *   and locations (PL)
 * - 🔧 **Fluent configuration**: chain positional metadata (message id,
 *   segment, sequence, group indices) onto each preparer
 * - 🛡️ **Type safe**: composite values are tagged with their family; a
 *   mismatched input degrades to "no data" instead of failing
 * - 💾 **Storage ready**: each record is a flat column/value mapping
 *   that serializes to a flat JSON object
 * - 🤫 **Null suppression**: absent, empty, or whitespace sub-fields
 *   collapse to null columns or suppress the record entirely
 *
 * ## Quick Start
 *
 * ```
 * use hl7prep::prelude::*;
 *
 * # fn main() -> Result<()> {
 * let address = Xad {
 *     street_address: Some("123 Main St".into()),
 *     city: Some("Springfield".into()),
 *     state_or_province: Some("IL".into()),
 *     zip_or_postal_code: Some("62704-1234".into()),
 *     ..Default::default()
 * };
 *
 * let records = FieldPreparer::address("patient_address", address.into())?
 *     .with_message_id("MSG0001")
 *     .with_segment("PID")
 *     .with_sequence_id(11)
 *     .prepare()?;
 *
 * assert_eq!(records.len(), 1);
 * assert_eq!(
 *     records[0].get("xad_normalized_zip").unwrap().as_text(),
 *     Some("62704")
 * );
 * # Ok(())
 * # }
 * ```
 *
 * ## Record shape
 *
 * Every record carries the positional metadata columns (`msg_id`,
 * `msg_segment`, `msg_sid`, `msg_group_id`, `msg_group_entry`,
 * `msg_field_entry`, `msg_field_type`) merged with the datatype-specific
 * payload columns. Metadata always wins a key collision. A coded-concept
 * preparer can emit up to three records (primary, alternate, second
 * alternate); every other family emits zero or one.
 *
 * ## Error model
 *
 * Only two conditions are hard errors: a blank field tag at
 * construction, and calling [`prepare::FieldPreparer::prepare`] before the
 * message id and segment are set. Everything else — family mismatches,
 * missing sub-fields, undecodable sub-composites — degrades to fewer
 * records or null columns, because absent clinical data is routine.
 */

// Re-export error types from root
pub use error::{PrepareError, Result};

// Public modules
pub mod data_types;
pub mod error;
pub mod prepare;
pub mod record;
pub mod typecast;
pub mod validate;

/// Prelude module for convenient imports
///
/// Import everything you need with:
/// ```
/// use hl7prep::prelude::*;
/// ```
pub mod prelude {
    pub use crate::data_types::*;
    pub use crate::error::{PrepareError, Result};
    pub use crate::prepare::{FieldPreparer, GroupId};
    pub use crate::record::{PreparedRecord, ScalarValue};
    pub use crate::typecast::{Hd, Sad, TypeCastError};
}

/// Storage column names and sentinels
pub mod constants {
    /// Message identity column
    pub const MESSAGE_ID_COLUMN: &str = "msg_id";

    /// Segment name column
    pub const SEGMENT_COLUMN: &str = "msg_segment";

    /// Sequence id column
    pub const SEQUENCE_ID_COLUMN: &str = "msg_sid";

    /// Group id column
    pub const GROUP_ID_COLUMN: &str = "msg_group_id";

    /// Group entry column
    pub const GROUP_ENTRY_COLUMN: &str = "msg_group_entry";

    /// Field entry ordinal column
    pub const FIELD_ENTRY_COLUMN: &str = "msg_field_entry";

    /// Field tag column
    pub const FIELD_TYPE_COLUMN: &str = "msg_field_type";

    /// Group id sentinel for fields outside any repeating group
    pub const NO_GROUP: &str = "PARENT";

    /// All metadata columns present on every prepared record
    pub const METADATA_COLUMNS: [&str; 7] = [
        MESSAGE_ID_COLUMN,
        SEGMENT_COLUMN,
        SEQUENCE_ID_COLUMN,
        GROUP_ID_COLUMN,
        GROUP_ENTRY_COLUMN,
        FIELD_ENTRY_COLUMN,
        FIELD_TYPE_COLUMN,
    ];
}
