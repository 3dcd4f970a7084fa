//! Validation of user-supplied value fields.

use crate::error::{Error, Result};

/// Number of value fields a run is started from.
pub const FIELD_COUNT: usize = 5;

/// Parse the raw text fields into the integer sequence for a run.
///
/// Fields are reported 1-based so the offending field can be pointed at
/// directly. A blank field (after trimming) is distinguished from one that
/// holds non-integer text.
pub fn parse_fields(fields: &[String]) -> Result<Vec<i64>> {
    if fields.len() != FIELD_COUNT {
        return Err(Error::FieldCount { expected: FIELD_COUNT, got: fields.len() });
    }

    let mut values = Vec::with_capacity(fields.len());
    for (position, raw) in fields.iter().enumerate() {
        let field = position + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::MissingField { field });
        }
        let value = trimmed
            .parse::<i64>()
            .map_err(|_| Error::InvalidInteger { field, value: trimmed.to_string() })?;
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(raw: [&str; FIELD_COUNT]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn valid_fields_parse_in_order() {
        let parsed = parse_fields(&fields(["8", " 12", "88 ", "-75", "106"])).unwrap();
        assert_eq!(parsed, vec![8, 12, 88, -75, 106]);
    }

    #[test]
    fn blank_field_is_reported_by_position() {
        let err = parse_fields(&fields(["1", "2", "  ", "4", "5"])).unwrap_err();
        assert_eq!(err, Error::MissingField { field: 3 });
    }

    #[test]
    fn non_integer_field_keeps_the_offending_text() {
        let err = parse_fields(&fields(["1", "2", "3", "4x", "5"])).unwrap_err();
        assert_eq!(
            err,
            Error::InvalidInteger { field: 4, value: "4x".to_string() }
        );
    }

    #[test]
    fn wrong_field_count_is_rejected() {
        let err = parse_fields(&["1".to_string(), "2".to_string()]).unwrap_err();
        assert_eq!(err, Error::FieldCount { expected: FIELD_COUNT, got: 2 });
    }
}
