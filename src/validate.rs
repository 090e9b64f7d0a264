/*!
 * Scalar validation and flattening helpers
 *
 * These decide structural presence only: a value that is absent, empty,
 * or whitespace collapses to `None`. Content beyond that is not policed
 * here except for DTM timestamps, where the calendar part must parse.
 */

use chrono::{NaiveDate, NaiveDateTime};

use crate::data_types::Component;

/// Validate a scalar sub-field, returning its trimmed string form
///
/// Nested subcomponents are rendered in HL7 string form (`&`-joined)
/// before trimming, mirroring how a parser would stringify them.
pub fn validate_string(component: Option<&Component>) -> Option<String> {
    let rendered = component?.to_string();
    let trimmed = rendered.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Flatten a family-name sub-composite into a single display name
///
/// Non-blank name parts are joined with a space; a scalar surname passes
/// through trimmed.
pub fn validate_full_name(component: Option<&Component>) -> Option<String> {
    let component = component?;
    match component {
        Component::Text(_) => validate_string(Some(component)),
        Component::Composite(parts) => {
            let joined: Vec<String> = parts
                .iter()
                .filter_map(|part| validate_string(Some(part)))
                .collect();
            if joined.is_empty() {
                None
            } else {
                Some(joined.join(" "))
            }
        }
    }
}

/// Validate an HL7 DTM timestamp, returning the trimmed original string
///
/// Accepted precisions: `YYYY`, `YYYYMM`, `YYYYMMDD`, `YYYYMMDDHH`,
/// `YYYYMMDDHHMM`, `YYYYMMDDHHMMSS`, optionally followed by fractional
/// seconds (`.S+`) and a UTC offset (`+/-ZZZZ`). The calendar part must
/// be a real date; anything else collapses to `None`.
pub fn validate_datetime(component: Option<&Component>) -> Option<String> {
    let raw = validate_string(component)?;
    let base = dtm_base(&raw)?;
    let valid = match base.len() {
        4 => parse_date(&format!("{}0101", base)),
        6 => parse_date(&format!("{}01", base)),
        8 => parse_date(base),
        10 => parse_datetime(&format!("{}00", base), "%Y%m%d%H%M"),
        12 => parse_datetime(base, "%Y%m%d%H%M"),
        14 => parse_datetime(base, "%Y%m%d%H%M%S"),
        _ => false,
    };
    valid.then_some(raw)
}

/// Flatten an authority or type-code sub-composite into storage form
///
/// Subcomponents keep their `&` separators so the namespace, universal
/// id, and id type survive as one column value; trailing separators are
/// trimmed away.
pub fn flatten_complex(component: Option<&Component>) -> Option<String> {
    let rendered = component?.to_string();
    let flattened = rendered.trim().trim_end_matches('&');
    if flattened.trim().is_empty() {
        None
    } else {
        Some(flattened.to_string())
    }
}

fn parse_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y%m%d").is_ok()
}

fn parse_datetime(value: &str, format: &str) -> bool {
    NaiveDateTime::parse_from_str(value, format).is_ok()
}

/// The leading digit run of a DTM, provided the tail is a well-formed
/// fractional-seconds and/or four-digit UTC offset suffix
fn dtm_base(raw: &str) -> Option<&str> {
    let digits_end = raw
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(raw.len());
    let (base, mut rest) = raw.split_at(digits_end);
    if base.is_empty() {
        return None;
    }
    if let Some(tail) = rest.strip_prefix('.') {
        let fraction_end = tail
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(tail.len());
        if fraction_end == 0 {
            return None;
        }
        rest = &tail[fraction_end..];
    }
    if !rest.is_empty() {
        let offset = rest.strip_prefix(['+', '-'])?;
        if offset.len() != 4 || !offset.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
    }
    Some(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str) -> Option<Component> {
        Some(Component::text(value))
    }

    #[test]
    fn test_validate_string_trims_and_suppresses_blank() {
        assert_eq!(validate_string(text(" 12345 ").as_ref()), Some("12345".to_string()));
        assert_eq!(validate_string(text("   ").as_ref()), None);
        assert_eq!(validate_string(None), None);
    }

    #[test]
    fn test_validate_string_renders_subcomponents() {
        let hd = Component::composite(["HOSP", "1.2", "ISO"]);
        assert_eq!(validate_string(Some(&hd)), Some("HOSP&1.2&ISO".to_string()));
    }

    #[test]
    fn test_validate_full_name_joins_parts() {
        let family = Component::composite(["van", "Helsing"]);
        assert_eq!(validate_full_name(Some(&family)), Some("van Helsing".to_string()));
        assert_eq!(validate_full_name(text("Smith").as_ref()), Some("Smith".to_string()));
        let blank = Component::composite(["", " "]);
        assert_eq!(validate_full_name(Some(&blank)), None);
    }

    #[test]
    fn test_validate_datetime_precisions() {
        assert_eq!(validate_datetime(text("2024").as_ref()), Some("2024".to_string()));
        assert_eq!(validate_datetime(text("202402").as_ref()), Some("202402".to_string()));
        assert_eq!(validate_datetime(text("20240229").as_ref()), Some("20240229".to_string()));
        assert_eq!(validate_datetime(text("2024022912").as_ref()), Some("2024022912".to_string()));
        assert_eq!(
            validate_datetime(text("20240229123045").as_ref()),
            Some("20240229123045".to_string())
        );
    }

    #[test]
    fn test_validate_datetime_offset_and_fraction() {
        assert_eq!(
            validate_datetime(text("20240101120000.1234+0530").as_ref()),
            Some("20240101120000.1234+0530".to_string())
        );
        assert_eq!(
            validate_datetime(text("202401011200-0800").as_ref()),
            Some("202401011200-0800".to_string())
        );
    }

    #[test]
    fn test_validate_datetime_rejects_bad_input() {
        // 2023 was not a leap year
        assert_eq!(validate_datetime(text("20230229").as_ref()), None);
        assert_eq!(validate_datetime(text("20241301").as_ref()), None);
        assert_eq!(validate_datetime(text("not-a-date").as_ref()), None);
        assert_eq!(validate_datetime(text("2024-01-01").as_ref()), None);
        assert_eq!(validate_datetime(text("2024010").as_ref()), None);
        assert_eq!(validate_datetime(text("20240101+05").as_ref()), None);
        assert_eq!(validate_datetime(None), None);
    }

    #[test]
    fn test_flatten_complex_trims_trailing_separators() {
        let authority = Component::composite(["HOSP", "", ""]);
        assert_eq!(flatten_complex(Some(&authority)), Some("HOSP".to_string()));
        let full = Component::composite(["HOSP", "1.2.3", "ISO"]);
        assert_eq!(flatten_complex(Some(&full)), Some("HOSP&1.2.3&ISO".to_string()));
        let empty = Component::composite(["", ""]);
        assert_eq!(flatten_complex(Some(&empty)), None);
        assert_eq!(flatten_complex(None), None);
    }
}
