use quiz_core::model::QuizId;

use super::CommandError;

/// Turn a raw `<id>` argument into a `QuizId`.
///
/// Only the leading integer matters (`"3abc"` is 3, `"-3"` is -3). Whether the
/// quiz exists is left to the lookup that follows, except for integers no quiz
/// can ever have (negative, or too large for an id): those are reported as not
/// found right away.
///
/// # Errors
///
/// `MissingParameter` when no argument was given, `NotANumber` when it does not
/// start with an integer, `RecordNotFound` when that integer cannot be an id.
pub fn validate_id(raw: Option<&str>) -> Result<QuizId, CommandError> {
    let raw = raw.ok_or(CommandError::MissingParameter)?;

    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return Err(CommandError::NotANumber {
            raw: raw.to_string(),
        });
    }

    // Canonical form of the integer, as the client would read it back.
    let magnitude = unsigned[..digits].trim_start_matches('0');
    let magnitude = if magnitude.is_empty() { "0" } else { magnitude };
    if negative && magnitude != "0" {
        return Err(CommandError::RecordNotFound(format!("-{magnitude}")));
    }

    magnitude
        .parse::<u64>()
        .map(QuizId::new)
        .map_err(|_| CommandError::RecordNotFound(magnitude.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> u64 {
        validate_id(Some(raw)).unwrap().value()
    }

    fn unreachable_id(raw: &str) -> String {
        match validate_id(Some(raw)) {
            Err(CommandError::RecordNotFound(shown)) => shown,
            other => panic!("{raw:?} gave {other:?}"),
        }
    }

    #[test]
    fn missing_argument() {
        assert!(matches!(validate_id(None), Err(CommandError::MissingParameter)));
    }

    #[test]
    fn non_numeric_arguments() {
        for raw in ["", "abc", "x1", "+", "-", " ", "x10", "--3", "-x"] {
            let err = validate_id(Some(raw)).unwrap_err();
            assert!(matches!(err, CommandError::NotANumber { .. }), "{raw:?}");
        }
    }

    #[test]
    fn leading_integer_wins() {
        assert_eq!(id("3abc"), 3);
        assert_eq!(id("42"), 42);
        assert_eq!(id("  7 "), 7);
        assert_eq!(id("+5"), 5);
        assert_eq!(id("007"), 7);
        assert_eq!(id("0x10"), 0);
        assert_eq!(id("-0"), 0);
        assert_eq!(id("12.9"), 12);
    }

    #[test]
    fn negative_integers_are_numbers_without_a_quiz() {
        assert_eq!(unreachable_id("-3"), "-3");
        assert_eq!(unreachable_id("-007abc"), "-7");
    }

    #[test]
    fn overflowing_integers_are_numbers_without_a_quiz() {
        assert_eq!(
            unreachable_id("99999999999999999999999"),
            "99999999999999999999999"
        );
        assert_eq!(unreachable_id("18446744073709551616"), "18446744073709551616");
        assert_eq!(id("18446744073709551615"), u64::MAX);
    }
}
