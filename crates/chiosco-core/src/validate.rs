use crate::error::ValidationError;

/// Parses user-typed toggle input against an accepted domain.
///
/// Only the canonical decimal rendering of a domain member passes:
/// `"0"` and `"1"` for the standard toggles. Anything that round-trips
/// differently ("01", "+1", " 1") is rejected as malformed rather than
/// silently normalised, and well-formed integers outside the domain
/// ("2", "-1") are rejected with the list of accepted values.
pub fn parse_toggle_value(raw: &str, domain: &[u32]) -> Result<u32, ValidationError> {
    let value: i64 = raw.parse().map_err(|_| ValidationError::NotAnInteger {
        raw: raw.to_string(),
    })?;

    // "01" and "+1" parse fine but are not canonical decimals.
    if value.to_string() != raw {
        return Err(ValidationError::NotAnInteger {
            raw: raw.to_string(),
        });
    }

    match u32::try_from(value) {
        Ok(candidate) if domain.contains(&candidate) => Ok(candidate),
        _ => Err(ValidationError::OutOfDomain {
            value,
            allowed: domain.to_vec(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BINARY: &[u32] = &[0, 1];

    #[test]
    fn accepts_each_domain_member() {
        assert_eq!(parse_toggle_value("0", BINARY), Ok(0));
        assert_eq!(parse_toggle_value("1", BINARY), Ok(1));
    }

    #[test]
    fn rejects_integers_outside_the_domain() {
        assert_eq!(
            parse_toggle_value("2", BINARY),
            Err(ValidationError::OutOfDomain {
                value: 2,
                allowed: vec![0, 1],
            })
        );
        assert_eq!(
            parse_toggle_value("-1", BINARY),
            Err(ValidationError::OutOfDomain {
                value: -1,
                allowed: vec![0, 1],
            })
        );
    }

    #[test]
    fn rejects_non_numeric_input() {
        for raw in ["", "abc", "one", "0x1", "1.0"] {
            assert_eq!(
                parse_toggle_value(raw, BINARY),
                Err(ValidationError::NotAnInteger { raw: raw.into() }),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn rejects_non_canonical_renderings() {
        // These parse as integers but are not what the user should type.
        for raw in ["01", "+1", " 1", "1 ", "00"] {
            assert_eq!(
                parse_toggle_value(raw, BINARY),
                Err(ValidationError::NotAnInteger { raw: raw.into() }),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn rejects_values_beyond_u32() {
        let raw = "4294967296"; // u32::MAX + 1
        assert_eq!(
            parse_toggle_value(raw, BINARY),
            Err(ValidationError::OutOfDomain {
                value: 4_294_967_296,
                allowed: vec![0, 1],
            })
        );
    }

    #[test]
    fn wider_domains_accept_their_members() {
        let domain: &[u32] = &[0, 1, 2];

        assert_eq!(parse_toggle_value("2", domain), Ok(2));
        assert!(parse_toggle_value("3", domain).is_err());
    }

    #[test]
    fn error_messages_name_the_problem() {
        let malformed = parse_toggle_value("01", BINARY).unwrap_err();
        assert_eq!(malformed.to_string(), "'01' is not a plain decimal integer");

        let out_of_domain = parse_toggle_value("2", BINARY).unwrap_err();
        assert_eq!(
            out_of_domain.to_string(),
            "2 is not one of the accepted values [0, 1]"
        );
    }
}
