// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Form validation
//!
//! Checks run before a form is submitted: the generator's requirement
//! field, the registration form, profile field edits and the password
//! strength meter. Lengths are counted in UTF-16 code units, as the
//! browser counts them.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{CodegenError, Result};

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Minimum length of a profile's full name
pub const MIN_FULL_NAME_LEN: usize = 2;

fn username_regex() -> &'static Regex {
    static USERNAME_REGEX: OnceLock<Regex> = OnceLock::new();
    USERNAME_REGEX.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_.-]{3,20}$").unwrap())
}

fn email_regex() -> &'static Regex {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

fn uppercase_regex() -> &'static Regex {
    static UPPERCASE_REGEX: OnceLock<Regex> = OnceLock::new();
    UPPERCASE_REGEX.get_or_init(|| Regex::new(r"[A-Z]").unwrap())
}

fn digit_regex() -> &'static Regex {
    static DIGIT_REGEX: OnceLock<Regex> = OnceLock::new();
    DIGIT_REGEX.get_or_init(|| Regex::new(r"[0-9]").unwrap())
}

fn symbol_regex() -> &'static Regex {
    static SYMBOL_REGEX: OnceLock<Regex> = OnceLock::new();
    SYMBOL_REGEX.get_or_init(|| Regex::new(r"[^A-Za-z0-9]").unwrap())
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// The generator refuses to run on a blank task description
pub fn validate_requirement(requirement: &str) -> Result<()> {
    if requirement.trim().is_empty() {
        return Err(CodegenError::InvalidInput(
            "Please enter a task description".to_string(),
        ));
    }
    Ok(())
}

/// 3-20 latin letters, digits, `_`, `.` or `-`
pub fn is_valid_username(username: &str) -> bool {
    username_regex().is_match(username)
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Strength band shown under the password field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLevel {
    Weak,
    Medium,
    Strong,
}

/// Password strength: 25 points each for length, an uppercase letter, a
/// digit and a symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordStrength {
    pub score: u8,
    pub level: StrengthLevel,
}

pub fn password_strength(password: &str) -> PasswordStrength {
    let checks = [
        utf16_len(password) >= MIN_PASSWORD_LEN,
        uppercase_regex().is_match(password),
        digit_regex().is_match(password),
        symbol_regex().is_match(password),
    ];
    let score = checks.iter().filter(|&&passed| passed).count() as u8 * 25;

    let level = if score >= 75 {
        StrengthLevel::Strong
    } else if score >= 50 {
        StrengthLevel::Medium
    } else {
        StrengthLevel::Weak
    };

    PasswordStrength { score, level }
}

/// Fields of the sign-up form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: String,
    pub agree_terms: bool,
}

impl RegistrationForm {
    /// Check the form, reporting the first problem in the order the
    /// sign-up page reports them.
    pub fn validate(&self) -> Result<()> {
        let required = [
            &self.username,
            &self.email,
            &self.password,
            &self.confirm_password,
            &self.role,
        ];
        if required.iter().any(|field| field.is_empty()) {
            return Err(invalid("Please fill in all required fields"));
        }
        if !self.agree_terms {
            return Err(invalid("You must accept the terms of use"));
        }
        if !is_valid_username(&self.username) {
            return Err(invalid(
                "Username must be 3 to 20 characters (latin letters, digits, _ . -)",
            ));
        }
        if !is_valid_email(&self.email) {
            return Err(invalid("Enter a valid email address"));
        }
        if utf16_len(&self.password) < MIN_PASSWORD_LEN {
            return Err(invalid("Password must be at least 6 characters"));
        }
        if self.password != self.confirm_password {
            return Err(invalid("Passwords do not match"));
        }
        Ok(())
    }
}

/// Check an inline profile edit. Fields without rules are accepted.
pub fn validate_profile_field(field: &str, value: &str) -> Result<()> {
    match field {
        "email" if !is_valid_email(value) => Err(invalid("Enter a valid email address")),
        "full_name" if utf16_len(value) < MIN_FULL_NAME_LEN => {
            Err(invalid("Name must be at least 2 characters"))
        }
        _ => Ok(()),
    }
}

fn invalid(message: &str) -> CodegenError {
    CodegenError::InvalidInput(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> RegistrationForm {
        RegistrationForm {
            username: "ada.l".to_string(),
            email: "ada@example.com".to_string(),
            password: "Secret1!".to_string(),
            confirm_password: "Secret1!".to_string(),
            role: "developer".to_string(),
            agree_terms: true,
        }
    }

    fn message(result: Result<()>) -> String {
        match result {
            Err(CodegenError::InvalidInput(msg)) => msg,
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_requirement_blank() {
        assert!(validate_requirement("").is_err());
        assert!(validate_requirement("  \n\t ").is_err());
        assert!(validate_requirement(" sort a list ").is_ok());
    }

    #[test]
    fn test_username_rules() {
        assert!(is_valid_username("abc"));
        assert!(is_valid_username("user_name.with-20ch"));
        assert!(!is_valid_username("ab"));
        assert!(!is_valid_username(&"a".repeat(21)));
        assert!(!is_valid_username("bad name"));
        assert!(!is_valid_username("имя"));
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("@b.co"));
        assert!(!is_valid_email("a@@b.co"));
    }

    #[test]
    fn test_password_strength_bands() {
        let weak = password_strength("abc");
        assert_eq!(weak.score, 0);
        assert_eq!(weak.level, StrengthLevel::Weak);

        assert_eq!(password_strength("abcdef").score, 25);
        assert_eq!(password_strength("abcdef").level, StrengthLevel::Weak);

        let medium = password_strength("Abcdef");
        assert_eq!(medium.score, 50);
        assert_eq!(medium.level, StrengthLevel::Medium);

        let strong = password_strength("Abcde1");
        assert_eq!(strong.score, 75);
        assert_eq!(strong.level, StrengthLevel::Strong);

        assert_eq!(password_strength("Abcde1!").score, 100);
    }

    #[test]
    fn test_password_strength_symbol_includes_non_ascii() {
        assert_eq!(password_strength("ж").score, 25);
    }

    #[test]
    fn test_registration_valid() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn test_registration_missing_field() {
        let mut f = form();
        f.role.clear();
        assert_eq!(message(f.validate()), "Please fill in all required fields");
    }

    #[test]
    fn test_registration_terms_checked_before_format() {
        let mut f = form();
        f.agree_terms = false;
        f.username = "x".to_string();
        assert_eq!(message(f.validate()), "You must accept the terms of use");
    }

    #[test]
    fn test_registration_bad_username_and_email() {
        let mut f = form();
        f.username = "no spaces".to_string();
        assert!(message(f.validate()).starts_with("Username must be"));

        let mut f = form();
        f.email = "not-an-email".to_string();
        assert_eq!(message(f.validate()), "Enter a valid email address");
    }

    #[test]
    fn test_registration_password_rules() {
        let mut f = form();
        f.password = "Ab1!".to_string();
        f.confirm_password = "Ab1!".to_string();
        assert_eq!(message(f.validate()), "Password must be at least 6 characters");

        let mut f = form();
        f.confirm_password = "Secret2!".to_string();
        assert_eq!(message(f.validate()), "Passwords do not match");
    }

    #[test]
    fn test_profile_fields() {
        assert!(validate_profile_field("email", "ada@example.com").is_ok());
        assert!(validate_profile_field("email", "ada").is_err());
        assert!(validate_profile_field("full_name", "Al").is_ok());
        assert!(validate_profile_field("full_name", "A").is_err());
        assert!(validate_profile_field("bio", "").is_ok());
    }
}
