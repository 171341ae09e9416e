//! Character rules - checks for whitespace, digits, uppercase and lowercase.

/// Returns `true` if the password contains no whitespace at all.
pub fn has_no_whitespace(password: &str) -> bool {
    !password.chars().any(char::is_whitespace)
}

/// Returns `true` if the password contains at least one decimal digit.
pub fn has_digit(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_digit())
}

/// Returns `true` if the password contains at least one uppercase Latin letter.
pub fn has_uppercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_uppercase())
}

/// Returns `true` if the password contains at least one lowercase Latin letter.
pub fn has_lowercase(password: &str) -> bool {
    password.chars().any(|c| c.is_ascii_lowercase())
}
