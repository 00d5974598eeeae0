//! Session identity and the sign-in forms
//!
//! There is no real authentication here: forms are checked for shape only and
//! admin rights come from comparing the password with a shared demo secret.
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shared demo secret that grants the admin panel.
pub const ADMIN_PASSWORD: &str = "admin123";

pub const GUEST_NAME: &str = "Гость";

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// The signed-in user's display name and admin flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub username: String,
    pub is_admin: bool,
}

impl Identity {
    /// Identity used when the auth modal is dismissed without signing in.
    #[must_use]
    pub fn guest() -> Self {
        Self {
            username: GUEST_NAME.to_string(),
            is_admin: false,
        }
    }

    fn from_credentials(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            is_admin: password == ADMIN_PASSWORD,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    Register,
    Login,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("name is required")]
    EmptyName,
    #[error("nickname is required")]
    EmptyUsername,
    #[error("nickname must be at least {MIN_USERNAME_LEN} characters")]
    UsernameTooShort,
    #[error("password is required")]
    EmptyPassword,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
    #[error("passwords do not match")]
    PasswordMismatch,
}

impl AuthError {
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::EmptyName => "auth.errors.name",
            Self::EmptyUsername => "auth.errors.username_empty",
            Self::UsernameTooShort => "auth.errors.username_short",
            Self::EmptyPassword => "auth.errors.password_empty",
            Self::PasswordTooShort => "auth.errors.password_short",
            Self::PasswordMismatch => "auth.errors.mismatch",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub username: String,
    pub password: String,
    pub confirm: String,
}

impl RegisterForm {
    /// # Errors
    ///
    /// Returns the first failing field check, in form order.
    pub fn submit(&self) -> Result<Identity, AuthError> {
        if self.name.trim().is_empty() {
            return Err(AuthError::EmptyName);
        }
        if self.username.chars().count() < MIN_USERNAME_LEN {
            return Err(AuthError::UsernameTooShort);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        if self.password != self.confirm {
            return Err(AuthError::PasswordMismatch);
        }
        Ok(Identity::from_credentials(&self.username, &self.password))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns an error when either field is blank.
    pub fn submit(&self) -> Result<Identity, AuthError> {
        if self.username.trim().is_empty() {
            return Err(AuthError::EmptyUsername);
        }
        if self.password.trim().is_empty() {
            return Err(AuthError::EmptyPassword);
        }
        Ok(Identity::from_credentials(&self.username, &self.password))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(name: &str, username: &str, password: &str, confirm: &str) -> RegisterForm {
        RegisterForm {
            name: name.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            confirm: confirm.to_string(),
        }
    }

    #[test]
    fn register_checks_fields_in_order() {
        assert_eq!(register("", "", "", "").submit(), Err(AuthError::EmptyName));
        assert_eq!(
            register("Иван", "St", "secret1", "secret1").submit(),
            Err(AuthError::UsernameTooShort)
        );
        assert_eq!(
            register("Иван", "Steve", "12345", "12345").submit(),
            Err(AuthError::PasswordTooShort)
        );
        assert_eq!(
            register("Иван", "Steve", "secret1", "secret2").submit(),
            Err(AuthError::PasswordMismatch)
        );
    }

    #[test]
    fn register_grants_admin_only_for_demo_secret() {
        let user = register("Иван", "Steve123", "secret1", "secret1")
            .submit()
            .unwrap();
        assert_eq!(user.username, "Steve123");
        assert!(!user.is_admin);

        let admin = register("Иван", "Boss", ADMIN_PASSWORD, ADMIN_PASSWORD)
            .submit()
            .unwrap();
        assert!(admin.is_admin);
    }

    #[test]
    fn username_length_counts_characters() {
        assert!(register("Иван", "Ёжк", "secret1", "secret1").submit().is_ok());
    }

    #[test]
    fn login_requires_both_fields() {
        let empty = LoginForm::default();
        assert_eq!(empty.submit(), Err(AuthError::EmptyUsername));
        let no_pass = LoginForm {
            username: "Steve".to_string(),
            password: " ".to_string(),
        };
        assert_eq!(no_pass.submit(), Err(AuthError::EmptyPassword));
        let admin = LoginForm {
            username: "Steve".to_string(),
            password: ADMIN_PASSWORD.to_string(),
        };
        assert!(admin.submit().unwrap().is_admin);
    }

    #[test]
    fn guest_is_not_admin() {
        let guest = Identity::guest();
        assert_eq!(guest.username, GUEST_NAME);
        assert!(!guest.is_admin);
    }
}
