/*!
 * Field preparation engine
 *
 * A [`FieldPreparer`] is constructed once per field occurrence with a
 * field tag and a composite value, configured through fluent setters,
 * and consumed through [`FieldPreparer::prepare`], which yields zero,
 * one, or (for coded concepts) up to three flat records.
 *
 * A composite whose datatype family does not match the preparer is
 * treated as "no data": the preparer stays constructible and yields an
 * empty record set rather than an error.
 */

use crate::constants::*;
use crate::data_types::{CompositeValue, Cwe, Cx, DatatypeFamily, Pl, Xad, Xcn, Xtn};
use crate::error::{PrepareError, Result};
use crate::record::{PreparedRecord, ScalarValue};
use crate::typecast;
use crate::validate::{flatten_complex, validate_datetime, validate_full_name, validate_string};

/// Datatype-specific payload columns for one record
type Payload = Vec<(&'static str, ScalarValue)>;

/// Group membership of a field occurrence
///
/// Fields outside any repeating group carry the `PARENT` sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupId {
    Parent,
    Name(String),
    Number(i64),
}

impl Default for GroupId {
    fn default() -> Self {
        GroupId::Parent
    }
}

impl GroupId {
    fn to_scalar(&self) -> ScalarValue {
        match self {
            GroupId::Parent => ScalarValue::Text(NO_GROUP.to_string()),
            GroupId::Name(name) => ScalarValue::Text(name.clone()),
            GroupId::Number(number) => ScalarValue::Integer(*number),
        }
    }
}

impl From<&str> for GroupId {
    fn from(value: &str) -> Self {
        GroupId::Name(value.to_string())
    }
}

impl From<String> for GroupId {
    fn from(value: String) -> Self {
        GroupId::Name(value)
    }
}

impl From<i64> for GroupId {
    fn from(value: i64) -> Self {
        GroupId::Number(value)
    }
}

/// Per-field configuration accumulated through the fluent setters
#[derive(Debug, Clone)]
struct FieldConfig {
    field_tag: String,
    message_id: Option<String>,
    segment: Option<String>,
    sequence_id: i64,
    group_id: GroupId,
    group_entry: i64,
    entry_count: i64,
}

impl FieldConfig {
    fn new(field_tag: String) -> Self {
        Self {
            field_tag,
            message_id: None,
            segment: None,
            sequence_id: 1,
            group_id: GroupId::Parent,
            group_entry: 1,
            entry_count: 1,
        }
    }

    /// Resolve the accumulated configuration into an immutable snapshot
    ///
    /// Fails when the message id or segment was never set; set-time is
    /// unvalidated, so this is the single precondition gate.
    fn snapshot(&self) -> Result<ConfigSnapshot<'_>> {
        let message_id = self
            .message_id
            .as_deref()
            .ok_or_else(|| PrepareError::missing_message_id(&self.field_tag))?;
        let segment = self
            .segment
            .as_deref()
            .ok_or_else(|| PrepareError::missing_segment(&self.field_tag))?;
        Ok(ConfigSnapshot {
            field_tag: &self.field_tag,
            message_id,
            segment,
            sequence_id: self.sequence_id,
            group_id: &self.group_id,
            group_entry: self.group_entry,
            entry_count: self.entry_count,
        })
    }
}

/// Fully-resolved configuration consumed by record assembly
#[derive(Debug, Clone, Copy)]
struct ConfigSnapshot<'a> {
    field_tag: &'a str,
    message_id: &'a str,
    segment: &'a str,
    sequence_id: i64,
    group_id: &'a GroupId,
    group_entry: i64,
    entry_count: i64,
}

impl ConfigSnapshot<'_> {
    /// Merge the metadata columns over one datatype payload
    ///
    /// Metadata is written last, so it wins any key collision with the
    /// payload.
    fn assemble(&self, payload: Payload) -> PreparedRecord {
        let mut record = PreparedRecord::new();
        for (column, value) in payload {
            record.set(column, value);
        }
        record.set(MESSAGE_ID_COLUMN, self.message_id);
        record.set(SEGMENT_COLUMN, self.segment);
        record.set(SEQUENCE_ID_COLUMN, self.sequence_id);
        record.set(GROUP_ID_COLUMN, self.group_id.to_scalar());
        record.set(GROUP_ENTRY_COLUMN, self.group_entry);
        record.set(FIELD_ENTRY_COLUMN, self.entry_count);
        record.set(FIELD_TYPE_COLUMN, self.field_tag);
        record
    }
}

/// Prepares one composite field value for storage
///
/// # Example
///
/// ```
/// use hl7prep::prelude::*;
///
/// # fn main() -> Result<()> {
/// let identifier = Cx {
///     id_number: Some("12345".into()),
///     ..Default::default()
/// };
///
/// let records = FieldPreparer::identifier("patient_id", identifier.into())?
///     .with_message_id("MSG0001")
///     .with_segment("PID")
///     .prepare()?;
///
/// assert_eq!(records.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FieldPreparer {
    config: FieldConfig,
    expected: DatatypeFamily,
    /// `None` when the supplied composite did not match the expected
    /// family; the preparer then yields no records.
    input: Option<CompositeValue>,
}

impl FieldPreparer {
    /// Create a coded-concept (CWE) preparer
    pub fn coded_concept(field_tag: impl Into<String>, value: CompositeValue) -> Result<Self> {
        Self::new(field_tag.into(), DatatypeFamily::CodedConcept, value)
    }

    /// Create an identifier (CX) preparer
    pub fn identifier(field_tag: impl Into<String>, value: CompositeValue) -> Result<Self> {
        Self::new(field_tag.into(), DatatypeFamily::Identifier, value)
    }

    /// Create a person-name (XCN) preparer
    pub fn person_name(field_tag: impl Into<String>, value: CompositeValue) -> Result<Self> {
        Self::new(field_tag.into(), DatatypeFamily::PersonName, value)
    }

    /// Create an address (XAD) preparer
    pub fn address(field_tag: impl Into<String>, value: CompositeValue) -> Result<Self> {
        Self::new(field_tag.into(), DatatypeFamily::Address, value)
    }

    /// Create a telecom (XTN) preparer
    pub fn telecom(field_tag: impl Into<String>, value: CompositeValue) -> Result<Self> {
        Self::new(field_tag.into(), DatatypeFamily::Telecom, value)
    }

    /// Create a location (PL) preparer
    pub fn location(field_tag: impl Into<String>, value: CompositeValue) -> Result<Self> {
        Self::new(field_tag.into(), DatatypeFamily::Location, value)
    }

    fn new(field_tag: String, expected: DatatypeFamily, value: CompositeValue) -> Result<Self> {
        if field_tag.trim().is_empty() {
            return Err(PrepareError::missing_field_tag());
        }
        let input = if value.family() == expected {
            Some(value)
        } else {
            tracing::debug!(
                field_tag = %field_tag,
                expected = %expected,
                found = %value.family(),
                "composite family mismatch, treating field as empty"
            );
            None
        };
        Ok(Self {
            config: FieldConfig::new(field_tag),
            expected,
            input,
        })
    }

    /// Set the message id
    pub fn with_message_id(mut self, message_id: impl Into<String>) -> Self {
        self.config.message_id = Some(message_id.into());
        self
    }

    /// Set the segment name
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        self.config.segment = Some(segment.into());
        self
    }

    /// Set the sequence id (defaults to 1)
    pub fn with_sequence_id(mut self, sequence_id: i64) -> Self {
        self.config.sequence_id = sequence_id;
        self
    }

    /// Set the group id (defaults to the `PARENT` sentinel)
    pub fn with_group_id(mut self, group_id: impl Into<GroupId>) -> Self {
        self.config.group_id = group_id.into();
        self
    }

    /// Set the group entry (defaults to 1)
    pub fn with_group_entry(mut self, group_entry: i64) -> Self {
        self.config.group_entry = group_entry;
        self
    }

    /// Set the field-entry ordinal within the group (defaults to 1)
    pub fn with_entry_count(mut self, entry_count: i64) -> Self {
        self.config.entry_count = entry_count;
        self
    }

    /// The field tag supplied at construction
    pub fn field_tag(&self) -> &str {
        &self.config.field_tag
    }

    /// The datatype family this preparer accepts
    pub fn expected_family(&self) -> DatatypeFamily {
        self.expected
    }

    /// Whether the composite supplied at construction matched the
    /// expected family
    pub fn is_active(&self) -> bool {
        self.input.is_some()
    }

    /// Produce the storage-ready records for this field occurrence
    ///
    /// Fails only when the message id or segment was never set. An
    /// inactive preparer, or a composite without the sub-fields its
    /// family requires, yields an empty record set. Repeated calls on
    /// the same instance return identical record sets.
    pub fn prepare(&self) -> Result<Vec<PreparedRecord>> {
        let snapshot = self.config.snapshot()?;
        let Some(value) = self.input.as_ref() else {
            return Ok(Vec::new());
        };
        let payloads: Vec<Payload> = match value {
            CompositeValue::CodedConcept(cwe) => coded_concept_payloads(cwe),
            CompositeValue::Identifier(cx) => identifier_payload(cx).into_iter().collect(),
            CompositeValue::PersonName(xcn) => person_name_payload(xcn).into_iter().collect(),
            CompositeValue::Address(xad) => address_payload(xad).into_iter().collect(),
            CompositeValue::Telecom(xtn) => telecom_payload(xtn).into_iter().collect(),
            CompositeValue::Location(pl) => location_payload(pl).into_iter().collect(),
        };
        Ok(payloads
            .into_iter()
            .map(|payload| snapshot.assemble(payload))
            .collect())
    }
}

/// One payload per repetition whose identifier or display text is
/// non-blank, in primary, alternate, second-alternate order
fn coded_concept_payloads(cwe: &Cwe) -> Vec<Payload> {
    let shared_text = validate_string(cwe.original_text.as_ref());
    let mut payloads = Vec::new();
    for (identifier, text, system) in cwe.repetitions() {
        let has_code = validate_string(identifier).is_some();
        let has_display = validate_string(text).is_some();
        if !has_code && !has_display {
            continue;
        }
        // code and display keys are always present, even when one of
        // them is the empty string
        let code = identifier.map(|c| c.to_string()).unwrap_or_default();
        let display = text.map(|c| c.to_string()).unwrap_or_default();
        let mut payload: Payload = vec![("code", code.into()), ("display", display.into())];
        if let Some(system) = validate_string(system) {
            payload.push(("system", system.into()));
        }
        if let Some(text) = shared_text.clone() {
            payload.push(("text", text.into()));
        }
        payloads.push(payload);
    }
    payloads
}

/// Gated on a non-blank id number; every other column is independently
/// nullable
fn identifier_payload(cx: &Cx) -> Option<Payload> {
    let id_number = validate_string(cx.id_number.as_ref())?;
    Some(vec![
        ("cx_id_number", id_number.into()),
        (
            "cx_id_assign_auth",
            flatten_complex(cx.assigning_authority.as_ref()).into(),
        ),
        (
            "cx_id_type",
            flatten_complex(cx.identifier_type_code.as_ref()).into(),
        ),
        (
            "cx_id_effective_date",
            validate_datetime(cx.effective_date.as_ref()).into(),
        ),
        (
            "cx_id_expiry_date",
            validate_datetime(cx.expiration_date.as_ref()).into(),
        ),
    ])
}

/// Gated on any of identifier, family name, or given name
fn person_name_payload(xcn: &Xcn) -> Option<Payload> {
    let identifier = validate_string(xcn.id_number.as_ref());
    let family_name = validate_full_name(xcn.family_name.as_ref());
    let given_name = validate_string(xcn.given_name.as_ref());
    if identifier.is_none() && family_name.is_none() && given_name.is_none() {
        return None;
    }
    Some(vec![
        ("person_identifier", identifier.into()),
        ("person_family_name", family_name.into()),
        ("person_given_name", given_name.into()),
        (
            "person_middle_name",
            validate_string(xcn.second_and_further_given_names.as_ref()).into(),
        ),
        ("person_prefix", validate_string(xcn.prefix.as_ref()).into()),
        ("person_suffix", validate_string(xcn.suffix.as_ref()).into()),
        (
            "person_assigning_authority",
            flatten_complex(xcn.assigning_authority.as_ref()).into(),
        ),
        (
            "person_identifier_type_code",
            flatten_complex(xcn.identifier_type_code.as_ref()).into(),
        ),
    ])
}

/// Gated on the street sub-composite decoding to a non-blank mailing
/// line; the normalized zip is a plain five-character truncation
fn address_payload(xad: &Xad) -> Option<Payload> {
    let street = xad.street_address.as_ref()?;
    let sad = match typecast::decode_sad(street) {
        Ok(sad) => sad,
        Err(err) => {
            tracing::debug!(error = %err, "street address decode failed, skipping record");
            return None;
        }
    };
    let mailing_address = validate_string(sad.street_or_mailing_address.as_ref())?;
    let zip = validate_string(xad.zip_or_postal_code.as_ref());
    let normalized_zip = zip
        .as_ref()
        .map(|zip| zip.chars().take(5).collect::<String>());
    Some(vec![
        ("xad_mailing_address", mailing_address.into()),
        (
            "xad_street_name",
            validate_string(sad.street_name.as_ref()).into(),
        ),
        (
            "xad_dwelling_number",
            validate_string(sad.dwelling_number.as_ref()).into(),
        ),
        (
            "xad_other_designation",
            validate_string(xad.other_designation.as_ref()).into(),
        ),
        ("xad_city", validate_string(xad.city.as_ref()).into()),
        (
            "xad_state",
            validate_string(xad.state_or_province.as_ref()).into(),
        ),
        ("xad_zip", zip.into()),
        ("xad_normalized_zip", normalized_zip.into()),
        ("xad_country", validate_string(xad.country.as_ref()).into()),
        (
            "xad_address_type",
            validate_string(xad.address_type.as_ref()).into(),
        ),
    ])
}

/// Gated on either the unformatted or the structured telephone number;
/// the structured number becomes the local-number column and both may
/// be present at once
fn telecom_payload(xtn: &Xtn) -> Option<Payload> {
    let unformatted = validate_string(xtn.unformatted_telephone_number.as_ref());
    let local_number = validate_string(xtn.phone_number.as_ref());
    if unformatted.is_none() && local_number.is_none() {
        return None;
    }
    Some(vec![
        (
            "xtn_type",
            validate_string(xtn.telecommunication_equipment_type.as_ref()).into(),
        ),
        (
            "xtn_address",
            validate_string(xtn.communication_address.as_ref()).into(),
        ),
        (
            "xtn_email_address",
            validate_string(xtn.email_address.as_ref()).into(),
        ),
        (
            "xtn_country_code",
            validate_string(xtn.country_code.as_ref()).into(),
        ),
        (
            "xtn_city_code",
            validate_string(xtn.area_city_code.as_ref()).into(),
        ),
        ("xtn_local_number", local_number.into()),
        (
            "xtn_prefix",
            validate_string(xtn.extension_prefix.as_ref()).into(),
        ),
        ("xtn_unformatted_no", unformatted.into()),
    ])
}

/// Gated on at least one of the seven designators decoding to a
/// non-blank namespace id; all seven columns are present when emitted
fn location_payload(pl: &Pl) -> Option<Payload> {
    let payload: Payload = vec![
        ("pl_point_of_care", hd_namespace(pl.point_of_care.as_ref()).into()),
        ("pl_room", hd_namespace(pl.room.as_ref()).into()),
        ("pl_bed", hd_namespace(pl.bed.as_ref()).into()),
        ("pl_building", hd_namespace(pl.building.as_ref()).into()),
        ("pl_floor", hd_namespace(pl.floor.as_ref()).into()),
        ("pl_facility", hd_namespace(pl.facility.as_ref()).into()),
        (
            "pl_person_location_type",
            hd_namespace(pl.person_location_type.as_ref()).into(),
        ),
    ];
    if payload.iter().all(|(_, value)| value.is_null()) {
        return None;
    }
    Some(payload)
}

/// Namespace id of a hierarchical designator; a failed decode is logged
/// and becomes a null column value rather than aborting the record
fn hd_namespace(component: Option<&crate::data_types::Component>) -> Option<String> {
    let component = component?;
    match typecast::decode_hd(component) {
        Ok(hd) => validate_string(hd.namespace_id.as_ref()),
        Err(err) => {
            tracing::debug!(error = %err, "hierarchical designator decode failed");
            None
        }
    }
}
