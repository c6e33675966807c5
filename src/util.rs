//! Shared utility helpers.

/// Case-insensitive string equality without allocating lowercase copies.
#[inline]
pub fn eq_ci(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Two-part bracket-quoted name, e.g. `[dbo].[Users]`.
#[inline]
pub fn two_part(owner: &str, name: &str) -> String {
    format!("[{}].[{}]", owner, name)
}
