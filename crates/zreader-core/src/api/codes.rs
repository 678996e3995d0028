//! Business codes returned in the envelope `code` field and their
//! user-facing messages.

/// Operation succeeded
pub const SUCCESS: &str = "2000";

/// Wrong username or password
pub const INVALID_CREDENTIALS: &str = "A1001";

/// Not logged in, or the session has expired
pub const SESSION_EXPIRED: &str = "A1004";

/// No such user
pub const USER_NOT_FOUND: &str = "U2001";

/// Message returned for any code not in the table
pub const FALLBACK_MESSAGE: &str = "Operation failed, please try again later";

/// Static code to message table.
pub const ERROR_MESSAGES: &[(&str, &str)] = &[
    (INVALID_CREDENTIALS, "Incorrect username or password"),
    (SESSION_EXPIRED, "Not logged in or session expired"),
    (USER_NOT_FOUND, "User does not exist"),
    (SUCCESS, "Operation succeeded"),
];

/// Look up the message for a business code. Never fails.
pub fn message_for(code: &str) -> &'static str {
    ERROR_MESSAGES
        .iter()
        .find(|(known, _)| *known == code)
        .map(|(_, message)| *message)
        .unwrap_or(FALLBACK_MESSAGE)
}

pub fn is_known(code: &str) -> bool {
    ERROR_MESSAGES.iter().any(|(known, _)| *known == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_for_known_codes() {
        assert_eq!(message_for("A1001"), "Incorrect username or password");
        for (code, message) in ERROR_MESSAGES {
            assert_eq!(message_for(code), *message);
            assert!(is_known(code));
        }
    }

    #[test]
    fn test_message_for_unknown_codes_falls_back() {
        assert_eq!(message_for("ZZZZ"), FALLBACK_MESSAGE);
        assert_eq!(message_for(""), FALLBACK_MESSAGE);
        // Lookup is exact, not case-folded
        assert_eq!(message_for("a1001"), FALLBACK_MESSAGE);
        assert!(!is_known("ZZZZ"));
        assert!(!FALLBACK_MESSAGE.is_empty());
    }

    #[test]
    fn test_table_has_no_duplicate_codes() {
        for (i, (code, _)) in ERROR_MESSAGES.iter().enumerate() {
            assert!(
                ERROR_MESSAGES[i + 1..].iter().all(|(other, _)| other != code),
                "duplicate code {}",
                code
            );
        }
    }
}
