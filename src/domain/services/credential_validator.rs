use crate::domain::models::{
    account::EmailAddress,
    credential::{CredentialInput, ValidatedCredential},
};

pub const MIN_PASSWORD_LENGTH: usize = 8;

const EMAIL_REQUIRED: &str = "Email address required!";
const EMAIL_INVALID: &str = "This email address is invalid!";
const PASSWORDS_DONT_MATCH: &str = "Passwords don't match";

/// Input field an error is attached to; `as_str` gives its wire name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Email,
    Password,
    ConfirmPassword,
}

impl Field {
    pub fn as_str(self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

impl FieldError {
    fn new(field: Field, message: &'static str) -> Self {
        Self { field, message }
    }
}

pub type FieldErrors = Vec<FieldError>;

struct StrengthMessages {
    required: &'static str,
    too_short: &'static str,
}

const PASSWORD_MESSAGES: StrengthMessages = StrengthMessages {
    required: "Password required!",
    too_short: "Password must be 8 characters or longer!",
};

const CONFIRM_PASSWORD_MESSAGES: StrengthMessages = StrengthMessages {
    required: "Confirm Password required!",
    too_short: "Confirm Password must be 8 characters or longer!",
};

const CHARACTER_CLASSES: [(fn(&char) -> bool, &str); 4] = [
    (char::is_ascii_lowercase, "Please use at least one lowercase letter!"),
    (char::is_ascii_uppercase, "Please use at least one capital letter!"),
    (char::is_ascii_digit, "Please use at least one number!"),
    (is_special, "Please use at least one special character!"),
];

fn is_special(c: &char) -> bool {
    !c.is_ascii_alphanumeric()
}

/// Check a signup submission against every rule.
///
/// All violations are collected, one entry per rule, rather than stopping at
/// the first. A password mismatch is attached to `confirmPassword`.
pub fn validate(input: CredentialInput) -> Result<ValidatedCredential, FieldErrors> {
    let mut errors = FieldErrors::new();

    let email = check_email(&input.email, &mut errors);
    check_strength(
        Field::Password,
        &input.password,
        &PASSWORD_MESSAGES,
        &mut errors,
    );
    check_strength(
        Field::ConfirmPassword,
        &input.confirm_password,
        &CONFIRM_PASSWORD_MESSAGES,
        &mut errors,
    );
    if input.password != input.confirm_password {
        errors.push(FieldError::new(Field::ConfirmPassword, PASSWORDS_DONT_MATCH));
    }

    match email {
        Some(email) if errors.is_empty() => Ok(ValidatedCredential::new(email, input.password)),
        _ => Err(errors),
    }
}

fn check_email(raw: &str, errors: &mut FieldErrors) -> Option<EmailAddress> {
    if raw.trim().is_empty() {
        errors.push(FieldError::new(Field::Email, EMAIL_REQUIRED));
    }
    match EmailAddress::parse(raw) {
        Ok(email) => Some(email),
        Err(_) => {
            errors.push(FieldError::new(Field::Email, EMAIL_INVALID));
            None
        }
    }
}

fn check_strength(
    field: Field,
    value: &str,
    messages: &StrengthMessages,
    errors: &mut FieldErrors,
) {
    if value.is_empty() {
        errors.push(FieldError::new(field, messages.required));
    }
    if value.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(field, messages.too_short));
    }
    for (in_class, message) in CHARACTER_CLASSES {
        if !value.chars().any(|c| in_class(&c)) {
            errors.push(FieldError::new(field, message));
        }
    }
}
