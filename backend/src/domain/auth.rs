//! Authentication primitives such as sign-up and sign-in credentials.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to the auth service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{Email, UserValidationError};

/// Minimum accepted password length.
pub const PASSWORD_MIN: usize = 8;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// Email was missing or structurally invalid.
    InvalidEmail,
    /// Password was blank or shorter than [`PASSWORD_MIN`].
    PasswordTooShort,
    /// Name was missing or blank once trimmed.
    EmptyName,
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email address is not valid"),
            Self::PasswordTooShort => {
                write!(f, "password must be at least {PASSWORD_MIN} characters")
            }
            Self::EmptyName => write!(f, "name must not be empty"),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

impl From<UserValidationError> for CredentialValidationError {
    fn from(_: UserValidationError) -> Self {
        Self::InvalidEmail
    }
}

/// Validated sign-in credentials.
///
/// ## Invariants
/// - `email` is validated and lowercased.
/// - `password` is non-empty; caller-provided whitespace is preserved so
///   credential comparisons never surprise the user.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    email: Email,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    ///
    /// Sign-in deliberately skips the password length check: the stored hash
    /// decides, and rejecting short input early would reveal policy history.
    pub fn try_from_parts(
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        let email = Email::parse(email)?;
        if password.is_empty() {
            return Err(CredentialValidationError::PasswordTooShort);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address used for account lookup.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated sign-up credentials.
#[derive(Debug, Clone)]
pub struct SignupCredentials {
    email: Email,
    name: String,
    password: Zeroizing<String>,
}

impl SignupCredentials {
    /// Construct credentials from raw email/password/name inputs.
    ///
    /// # Examples
    /// ```
    /// use maintlog::domain::SignupCredentials;
    ///
    /// let creds =
    ///     SignupCredentials::try_from_parts("tech@example.com", "password123", "Test Tech")
    ///         .expect("valid credentials");
    /// assert_eq!(creds.email().as_str(), "tech@example.com");
    /// assert_eq!(creds.name(), "Test Tech");
    /// ```
    pub fn try_from_parts(
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<Self, CredentialValidationError> {
        let email = Email::parse(email)?;
        if password.chars().count() < PASSWORD_MIN {
            return Err(CredentialValidationError::PasswordTooShort);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(CredentialValidationError::EmptyName);
        }
        Ok(Self {
            email,
            name: name.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address for the new account.
    pub fn email(&self) -> &Email {
        &self.email
    }

    /// Display name for the new account.
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("not-an-email", "password123", "Tech", CredentialValidationError::InvalidEmail)]
    #[case(
        "tech@example.com",
        "short",
        "Tech",
        CredentialValidationError::PasswordTooShort
    )]
    #[case(
        "tech@example.com",
        "password123",
        "   ",
        CredentialValidationError::EmptyName
    )]
    fn signup_rejects_invalid_input(
        #[case] email: &str,
        #[case] password: &str,
        #[case] name: &str,
        #[case] expected: CredentialValidationError,
    ) {
        let err = SignupCredentials::try_from_parts(email, password, name)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn signup_trims_name_and_normalises_email() {
        let creds =
            SignupCredentials::try_from_parts("  Tech@Example.COM ", "password123", "  Ada  ")
                .expect("valid credentials");
        assert_eq!(creds.email().as_str(), "tech@example.com");
        assert_eq!(creds.name(), "Ada");
        assert_eq!(creds.password(), "password123");
    }

    #[rstest]
    fn login_accepts_short_passwords() {
        let creds = LoginCredentials::try_from_parts("tech@example.com", "pw")
            .expect("short password accepted at sign-in");
        assert_eq!(creds.password(), "pw");
    }

    #[rstest]
    fn login_rejects_empty_password() {
        let err = LoginCredentials::try_from_parts("tech@example.com", "")
            .expect_err("empty password rejected");
        assert_eq!(err, CredentialValidationError::PasswordTooShort);
    }
}
