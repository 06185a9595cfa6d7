//! PII redaction applied to every answer before it leaves the platform.
//!
//! Best effort only. Email addresses and phone-like digit runs are replaced;
//! names, postal addresses and most international phone layouts are not
//! recognised and pass through untouched.

use once_cell::sync::Lazy;
use regex::Regex;

/// Replacement for email addresses.
pub const EMAIL_PLACEHOLDER: &str = "[EMAIL]";

/// Replacement for phone numbers.
pub const PHONE_PLACEHOLDER: &str = "[PHONE]";

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});

// Either a 3-3-4 grouping with optional country code and separators, or a
// bare run of ten or more digits.
static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:\+\d{1,3}[\s.-]?)?(?:\(\d{3}\)|\b\d{3})[\s.-]?\d{3}[\s.-]?\d{4}\b|\b\d{10,}\b")
        .expect("valid phone regex")
});

/// Replaces emails with `[EMAIL]` and phone numbers with `[PHONE]`.
///
/// Emails are redacted first so digits inside an address are never read as
/// a phone number. Idempotent: the placeholders contain no digits or `@`.
pub fn redact_pii(text: &str) -> String {
    let without_emails = EMAIL.replace_all(text, EMAIL_PLACEHOLDER);
    PHONE
        .replace_all(&without_emails, PHONE_PLACEHOLDER)
        .into_owned()
}
