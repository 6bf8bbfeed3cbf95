use serde::Serialize;
use utoipa::ToSchema;

pub const NAME_MIN: usize = 5;
pub const NAME_MAX: usize = 50;
pub const DESCRIPTION_MIN: usize = 10;
pub const DESCRIPTION_MAX: usize = 500;

/// A single failed constraint. The violation list is returned to the
/// client verbatim as the 400 body.
#[derive(Serialize, Debug, PartialEq, ToSchema)]
pub struct Violation {
    pub field: &'static str,
    pub message: String,
}

fn check_length(field: &'static str, value: &str, min: usize, max: usize) -> Option<Violation> {
    let len = value.chars().count();
    if len < min || len > max {
        Some(Violation {
            field,
            message: format!("{field} must be between {min} and {max} characters"),
        })
    } else {
        None
    }
}

/// Length checks for a candidate task. Empty result means valid. Called on
/// creation only; updates are persisted unchecked.
pub fn validate_task(name: &str, description: &str) -> Vec<Violation> {
    [
        check_length("name", name, NAME_MIN, NAME_MAX),
        check_length("description", description, DESCRIPTION_MIN, DESCRIPTION_MAX),
    ]
    .into_iter()
    .flatten()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_lengths_at_the_bounds() {
        assert!(validate_task(&"a".repeat(5), &"b".repeat(10)).is_empty());
        assert!(validate_task(&"a".repeat(50), &"b".repeat(500)).is_empty());
    }

    #[test]
    fn rejects_name_outside_bounds() {
        let short = validate_task("abcd", &"b".repeat(10));
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].field, "name");

        let long = validate_task(&"a".repeat(51), &"b".repeat(10));
        assert_eq!(long.len(), 1);
        assert_eq!(long[0].field, "name");
    }

    #[test]
    fn rejects_description_outside_bounds() {
        let short = validate_task("abcde", "123456789");
        assert_eq!(short.len(), 1);
        assert_eq!(short[0].field, "description");

        let long = validate_task("abcde", &"b".repeat(501));
        assert_eq!(long.len(), 1);
        assert_eq!(long[0].field, "description");
    }

    #[test]
    fn reports_both_fields_when_both_fail() {
        let violations = validate_task("ab", "short");
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].field, "name");
        assert_eq!(violations[1].field, "description");
    }

    #[test]
    fn counts_characters_not_bytes() {
        // five chars, more than five bytes
        assert!(validate_task("日本語です", &"b".repeat(10)).is_empty());
    }
}
