//! Length rules - bounds on the number of characters.

pub(crate) const MIN_LENGTH: usize = 10;
pub(crate) const MAX_LENGTH: usize = 24;

/// Returns `true` if the password has at least [`MIN_LENGTH`] characters.
///
/// Length is counted in `char`s, so a multi-byte letter counts once.
pub fn meets_min_length(password: &str) -> bool {
    password.chars().count() >= MIN_LENGTH
}

/// Returns `true` if the password has at most [`MAX_LENGTH`] characters.
pub fn within_max_length(password: &str) -> bool {
    password.chars().count() <= MAX_LENGTH
}
