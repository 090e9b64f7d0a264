/*!
 * Sub-composite decoders
 *
 * A parser may deliver a street address or hierarchical designator as
 * either a bare scalar or a nested sub-composite. The decoders here
 * resolve both shapes into a typed value, or report a typed failure for
 * the caller to log and degrade on.
 */

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::data_types::Component;

/// Non-fatal decode failures for sub-composites
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeCastError {
    #[error("empty component cannot be decoded as {target}")]
    Empty { target: &'static str },

    #[error("{target} allows at most {max} subcomponents, found {found}")]
    TooManyComponents {
        target: &'static str,
        max: usize,
        found: usize,
    },
}

/// Street address (SAD): mailing line plus optional street parts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sad {
    pub street_or_mailing_address: Option<Component>,
    pub street_name: Option<Component>,
    pub dwelling_number: Option<Component>,
}

/// Hierarchical designator (HD): namespace plus optional universal id
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hd {
    pub namespace_id: Option<Component>,
    pub universal_id: Option<Component>,
    pub universal_id_type: Option<Component>,
}

/// Decode a street-address sub-composite
///
/// A scalar becomes the mailing-address line; a composite maps its first
/// three subcomponents onto mailing line, street name, and dwelling
/// number.
pub fn decode_sad(component: &Component) -> Result<Sad, TypeCastError> {
    let parts = decode_parts(component, "SAD", 3)?;
    let mut parts = parts.into_iter();
    Ok(Sad {
        street_or_mailing_address: parts.next().flatten(),
        street_name: parts.next().flatten(),
        dwelling_number: parts.next().flatten(),
    })
}

/// Decode a hierarchical-designator sub-composite
///
/// A scalar becomes the namespace id; a composite maps its first three
/// subcomponents onto namespace id, universal id, and universal id type.
pub fn decode_hd(component: &Component) -> Result<Hd, TypeCastError> {
    let parts = decode_parts(component, "HD", 3)?;
    let mut parts = parts.into_iter();
    Ok(Hd {
        namespace_id: parts.next().flatten(),
        universal_id: parts.next().flatten(),
        universal_id_type: parts.next().flatten(),
    })
}

fn decode_parts(
    component: &Component,
    target: &'static str,
    max: usize,
) -> Result<Vec<Option<Component>>, TypeCastError> {
    if component.is_empty() {
        return Err(TypeCastError::Empty { target });
    }
    match component {
        Component::Text(_) => Ok(vec![Some(component.clone())]),
        Component::Composite(parts) => {
            if parts.len() > max {
                return Err(TypeCastError::TooManyComponents {
                    target,
                    max,
                    found: parts.len(),
                });
            }
            Ok(parts
                .iter()
                .map(|part| (!part.is_empty()).then(|| part.clone()))
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_sad_from_scalar() {
        let sad = decode_sad(&Component::text("123 Main St")).unwrap();
        assert_eq!(sad.street_or_mailing_address, Some(Component::text("123 Main St")));
        assert_eq!(sad.street_name, None);
        assert_eq!(sad.dwelling_number, None);
    }

    #[test]
    fn test_decode_sad_from_composite() {
        let street = Component::composite(["123 Main St", "Main St", "123"]);
        let sad = decode_sad(&street).unwrap();
        assert_eq!(sad.street_name, Some(Component::text("Main St")));
        assert_eq!(sad.dwelling_number, Some(Component::text("123")));
    }

    #[test]
    fn test_decode_hd_blank_parts_become_none() {
        let hd = decode_hd(&Component::composite(["ICU", "", "ISO"])).unwrap();
        assert_eq!(hd.namespace_id, Some(Component::text("ICU")));
        assert_eq!(hd.universal_id, None);
        assert_eq!(hd.universal_id_type, Some(Component::text("ISO")));
    }

    #[test]
    fn test_decode_rejects_empty() {
        let err = decode_hd(&Component::text("  ")).unwrap_err();
        assert_eq!(err, TypeCastError::Empty { target: "HD" });
    }

    #[test]
    fn test_decode_rejects_oversized_composite() {
        let wide = Component::composite(["a", "b", "c", "d"]);
        let err = decode_sad(&wide).unwrap_err();
        assert!(matches!(
            err,
            TypeCastError::TooManyComponents { target: "SAD", max: 3, found: 4 }
        ));
    }
}
