//! Phone number predicates and display names.
//!
//! The canonical form of a phone number is its digits alone, which is also how
//! the remote service stores [`User::phone_number`].  Everything that looks up
//! users by phone goes through [`canonical_phone_number`] first.

use tgbridge_types::User;

const SEPARATORS: &[char] = &[' ', '-', '.', '(', ')'];

/// `true` if `s` is already canonical: non-empty and ASCII digits only.
pub fn is_canonical_phone_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `true` if `s` looks like a phone number: an optional leading `+`, then
/// digits, optionally broken up by spaces, dashes, dots or parentheses.
pub fn is_phone_number(s: &str) -> bool {
    let body = s.trim().strip_prefix('+').unwrap_or(s.trim());
    let mut digits = 0usize;
    for c in body.chars() {
        if c.is_ascii_digit() {
            digits += 1;
        } else if !SEPARATORS.contains(&c) {
            return false;
        }
    }
    digits > 0
}

/// The canonical (digits-only) form of `s`, or `None` if `s` is not a phone
/// number.  Canonicalising a canonical number returns it unchanged.
pub fn canonical_phone_number(s: &str) -> Option<String> {
    if !is_phone_number(s) {
        return None;
    }
    Some(s.chars().filter(char::is_ascii_digit).collect())
}

/// Human-readable label for a user.
///
/// Prefers the full name; falls back to `+<phone>`, then `@<username>`.
/// Returns an empty string if the user has none of those.
pub fn display_name(user: &User) -> String {
    let name = user.full_name();
    if !name.is_empty() {
        return name;
    }
    if let Some(phone) = canonical_phone_number(&user.phone_number) {
        return format!("+{phone}");
    }
    if !user.username.is_empty() {
        return format!("@{}", user.username);
    }
    String::new()
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_is_digits_only() {
        assert!(is_canonical_phone_number("15551234567"));
        assert!(!is_canonical_phone_number("+15551234567"));
        assert!(!is_canonical_phone_number(""));
        assert!(!is_canonical_phone_number("555 1234"));
    }

    #[test]
    fn phone_number_accepts_formatting() {
        assert!(is_phone_number("+1 (555) 123-4567"));
        assert!(is_phone_number("15551234567"));
        assert!(is_phone_number("+44.20.7946.0958"));
        assert!(!is_phone_number("+"));
        assert!(!is_phone_number(""));
        assert!(!is_phone_number("alice"));
        assert!(!is_phone_number("+1 555 CALL-NOW"));
        assert!(!is_phone_number("1+555"));
    }

    #[test]
    fn canonicalisation_is_idempotent() {
        for s in ["+1 (555) 123-4567", "15551234567", " +7 900 000-00-00 ", "1"] {
            let once = canonical_phone_number(s).unwrap();
            assert!(is_canonical_phone_number(&once));
            assert_eq!(canonical_phone_number(&once).as_deref(), Some(once.as_str()));
        }
        assert_eq!(canonical_phone_number("+1 (555) 123-4567").as_deref(), Some("15551234567"));
        assert_eq!(canonical_phone_number("nope"), None);
    }

    #[test]
    fn display_name_prefers_full_name() {
        let mut u = User::new(1, "Ada", "15550001");
        u.last_name = "Lovelace".into();
        assert_eq!(display_name(&u), "Ada Lovelace");

        u.first_name.clear();
        u.last_name.clear();
        assert_eq!(display_name(&u), "+15550001");

        u.phone_number.clear();
        u.username = "ada".into();
        assert_eq!(display_name(&u), "@ada");

        u.username.clear();
        assert_eq!(display_name(&u), "");
    }
}
