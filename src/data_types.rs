/*!
 * Data type definitions for HL7v2 composite field values
 *
 * This module contains type-safe representations of the composite
 * datatypes consumed by the field preparers: coded concepts (CWE),
 * identifiers (CX), person names (XCN), addresses (XAD), telecom
 * entries (XTN), and locations (PL). Sub-fields are modelled as
 * [`Component`] values so that nested sub-composites survive parsing
 * and can be decoded where a preparer needs their structure.
 */

use serde::{Deserialize, Serialize};

/// A single sub-field of a composite: scalar text or nested subcomponents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Component {
    Text(String),
    Composite(Vec<Component>),
}

impl Component {
    /// Create a scalar component from text
    pub fn text(value: impl Into<String>) -> Self {
        Component::Text(value.into())
    }

    /// Create a composite component from scalar subcomponents
    pub fn composite<I, S>(parts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Component::Composite(parts.into_iter().map(|p| Component::Text(p.into())).collect())
    }

    /// Check whether the component carries no data at all
    pub fn is_empty(&self) -> bool {
        match self {
            Component::Text(value) => value.trim().is_empty(),
            Component::Composite(parts) => parts.iter().all(Component::is_empty),
        }
    }

    /// Subcomponents of a composite; a scalar has none
    pub fn subcomponents(&self) -> &[Component] {
        match self {
            Component::Text(_) => &[],
            Component::Composite(parts) => parts,
        }
    }
}

impl std::fmt::Display for Component {
    /// Renders the HL7 string form: subcomponents joined with `&`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Component::Text(value) => write!(f, "{}", value),
            Component::Composite(parts) => {
                let rendered: Vec<String> = parts.iter().map(|p| p.to_string()).collect();
                write!(f, "{}", rendered.join("&"))
            }
        }
    }
}

impl From<&str> for Component {
    fn from(value: &str) -> Self {
        Component::Text(value.to_string())
    }
}

impl From<String> for Component {
    fn from(value: String) -> Self {
        Component::Text(value)
    }
}

/// Coded concept (CWE): three parallel code/display/system repetitions
/// plus one shared free-text field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cwe {
    pub identifier: Option<Component>,
    pub text: Option<Component>,
    pub name_of_coding_system: Option<Component>,
    pub alternate_identifier: Option<Component>,
    pub alternate_text: Option<Component>,
    pub alternate_name_of_coding_system: Option<Component>,
    pub second_alternate_identifier: Option<Component>,
    pub second_alternate_text: Option<Component>,
    pub second_alternate_name_of_coding_system: Option<Component>,
    pub original_text: Option<Component>,
}

impl Cwe {
    /// The three repetitions in emission order: primary, alternate,
    /// second alternate. Each entry is (identifier, text, coding system).
    pub fn repetitions(
        &self,
    ) -> [(Option<&Component>, Option<&Component>, Option<&Component>); 3] {
        [
            (
                self.identifier.as_ref(),
                self.text.as_ref(),
                self.name_of_coding_system.as_ref(),
            ),
            (
                self.alternate_identifier.as_ref(),
                self.alternate_text.as_ref(),
                self.alternate_name_of_coding_system.as_ref(),
            ),
            (
                self.second_alternate_identifier.as_ref(),
                self.second_alternate_text.as_ref(),
                self.second_alternate_name_of_coding_system.as_ref(),
            ),
        ]
    }
}

/// Identifier (CX): an id number with authority, type, and date bounds
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cx {
    pub id_number: Option<Component>,
    pub assigning_authority: Option<Component>,
    pub identifier_type_code: Option<Component>,
    pub effective_date: Option<Component>,
    pub expiration_date: Option<Component>,
}

/// Person name (XCN): an identified person name with authority data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Xcn {
    pub id_number: Option<Component>,
    pub family_name: Option<Component>,
    pub given_name: Option<Component>,
    pub second_and_further_given_names: Option<Component>,
    pub prefix: Option<Component>,
    pub suffix: Option<Component>,
    pub assigning_authority: Option<Component>,
    pub identifier_type_code: Option<Component>,
}

/// Address (XAD): a street sub-composite plus flat address parts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Xad {
    pub street_address: Option<Component>,
    pub other_designation: Option<Component>,
    pub city: Option<Component>,
    pub state_or_province: Option<Component>,
    pub zip_or_postal_code: Option<Component>,
    pub country: Option<Component>,
    pub address_type: Option<Component>,
}

/// Telecom entry (XTN): telephone/e-mail contact data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Xtn {
    pub unformatted_telephone_number: Option<Component>,
    pub phone_number: Option<Component>,
    pub telecommunication_equipment_type: Option<Component>,
    pub communication_address: Option<Component>,
    pub email_address: Option<Component>,
    pub country_code: Option<Component>,
    pub area_city_code: Option<Component>,
    pub extension_prefix: Option<Component>,
}

/// Location (PL): seven hierarchical-designator sub-composites
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pl {
    pub point_of_care: Option<Component>,
    pub room: Option<Component>,
    pub bed: Option<Component>,
    pub building: Option<Component>,
    pub floor: Option<Component>,
    pub facility: Option<Component>,
    pub person_location_type: Option<Component>,
}

/// Datatype family of a composite value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatatypeFamily {
    CodedConcept,
    Identifier,
    PersonName,
    Address,
    Telecom,
    Location,
}

impl DatatypeFamily {
    /// The HL7v2 datatype code for this family
    pub fn as_code(&self) -> &'static str {
        match self {
            DatatypeFamily::CodedConcept => "CWE",
            DatatypeFamily::Identifier => "CX",
            DatatypeFamily::PersonName => "XCN",
            DatatypeFamily::Address => "XAD",
            DatatypeFamily::Telecom => "XTN",
            DatatypeFamily::Location => "PL",
        }
    }
}

impl std::fmt::Display for DatatypeFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_code())
    }
}

/// A composite field value tagged with its datatype family
///
/// The parser layer produces one of these per field occurrence; each
/// preparer accepts only the variant matching its declared family and
/// treats anything else as "no data".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CompositeValue {
    CodedConcept(Cwe),
    Identifier(Cx),
    PersonName(Xcn),
    Address(Xad),
    Telecom(Xtn),
    Location(Pl),
}

impl CompositeValue {
    /// The datatype family this value belongs to
    pub fn family(&self) -> DatatypeFamily {
        match self {
            CompositeValue::CodedConcept(_) => DatatypeFamily::CodedConcept,
            CompositeValue::Identifier(_) => DatatypeFamily::Identifier,
            CompositeValue::PersonName(_) => DatatypeFamily::PersonName,
            CompositeValue::Address(_) => DatatypeFamily::Address,
            CompositeValue::Telecom(_) => DatatypeFamily::Telecom,
            CompositeValue::Location(_) => DatatypeFamily::Location,
        }
    }
}

impl From<Cwe> for CompositeValue {
    fn from(value: Cwe) -> Self {
        CompositeValue::CodedConcept(value)
    }
}

impl From<Cx> for CompositeValue {
    fn from(value: Cx) -> Self {
        CompositeValue::Identifier(value)
    }
}

impl From<Xcn> for CompositeValue {
    fn from(value: Xcn) -> Self {
        CompositeValue::PersonName(value)
    }
}

impl From<Xad> for CompositeValue {
    fn from(value: Xad) -> Self {
        CompositeValue::Address(value)
    }
}

impl From<Xtn> for CompositeValue {
    fn from(value: Xtn) -> Self {
        CompositeValue::Telecom(value)
    }
}

impl From<Pl> for CompositeValue {
    fn from(value: Pl) -> Self {
        CompositeValue::Location(value)
    }
}
