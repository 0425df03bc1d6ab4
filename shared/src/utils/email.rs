//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Domain accepted for reservations
pub const ALLOWED_EMAIL_DOMAIN: &str = "gmail.com";

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap()
});

/// Trim and lowercase an email address; the stored and looked-up form
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic shape check (local@domain.tld)
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(&normalize_email(email))
}

/// Check the address belongs to the allowed mailbox provider
pub fn is_gmail_address(email: &str) -> bool {
    let normalized = normalize_email(email);
    is_valid_email(&normalized)
        && normalized.ends_with(&format!("@{}", ALLOWED_EMAIL_DOMAIN))
}

/// Mask an email address for logs (e.g., jo***@gmail.com)
pub fn mask_email(email: &str) -> String {
    let normalized = normalize_email(email);
    match normalized.split_once('@') {
        Some((local, domain)) => {
            let visible: String = local.chars().take(2).collect();
            format!("{}***@{}", visible, domain)
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Ada.Obi@Gmail.COM "), "ada.obi@gmail.com");
    }

    #[test]
    fn test_is_gmail_address() {
        assert!(is_gmail_address("ada.obi@gmail.com"));
        assert!(is_gmail_address("ADA@GMAIL.COM"));
        assert!(!is_gmail_address("ada@yahoo.com"));
        assert!(!is_gmail_address("ada@notgmail.com"));
        assert!(!is_gmail_address("@gmail.com"));
        assert!(!is_gmail_address("ada obi@gmail.com"));
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("ada.obi@gmail.com"), "ad***@gmail.com");
        assert_eq!(mask_email("a@gmail.com"), "a***@gmail.com");
        assert_eq!(mask_email("invalid"), "***");
    }
}
