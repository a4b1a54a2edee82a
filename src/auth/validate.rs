use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{LoginRequest, RegisterRequest};
use crate::error::{AppError, FieldError};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

const MIN_PASSWORD_LEN: usize = 6;

/// Field-level validation for the registration form. Collects every failing
/// field rather than stopping at the first.
pub fn validate_registration(req: &RegisterRequest) -> Result<(), AppError> {
    let mut fields = Vec::new();

    let name = req.name.trim();
    if name.len() < 3 || name.len() > 100 {
        fields.push(FieldError::new(
            "name",
            "name must be between 3 and 100 characters",
        ));
    }
    if !is_valid_email(&req.email) {
        fields.push(FieldError::new("email", "invalid email address"));
    }
    if req.password.len() < MIN_PASSWORD_LEN {
        fields.push(FieldError::new(
            "password",
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if req.confirm_password != req.password {
        fields.push(FieldError::new("confirm_password", "passwords do not match"));
    }

    if fields.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(fields))
    }
}

pub fn validate_login(req: &LoginRequest) -> Result<(), AppError> {
    let mut fields = Vec::new();
    if !is_valid_email(&req.email) {
        fields.push(FieldError::new("email", "invalid email address"));
    }
    if req.password.is_empty() {
        fields.push(FieldError::new("password", "password is required"));
    }
    if fields.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register_req() -> RegisterRequest {
        RegisterRequest {
            name: "Alice".into(),
            email: "a@x.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
        }
    }

    #[test]
    fn accepts_well_formed_registration() {
        assert!(validate_registration(&register_req()).is_ok());
    }

    #[test]
    fn rejects_malformed_email() {
        for bad in ["", "plainaddress", "no@tld", "two@@x.com", "sp ace@x.com"] {
            let mut req = register_req();
            req.email = bad.into();
            assert!(validate_registration(&req).is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_short_password() {
        let mut req = register_req();
        req.password = "abc".into();
        req.confirm_password = "abc".into();
        let err = validate_registration(&req).unwrap_err();
        match err {
            AppError::Validation(fields) => {
                assert!(fields.iter().any(|f| f.field == "password"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_confirm_mismatch() {
        let mut req = register_req();
        req.confirm_password = "different".into();
        let err = validate_registration(&req).unwrap_err();
        match err {
            AppError::Validation(fields) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "confirm_password");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn collects_all_failing_fields() {
        let req = RegisterRequest {
            name: "ab".into(),
            email: "nope".into(),
            password: "123".into(),
            confirm_password: "456".into(),
        };
        match validate_registration(&req).unwrap_err() {
            AppError::Validation(fields) => assert_eq!(fields.len(), 4),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn login_requires_email_and_password() {
        let req = LoginRequest {
            email: "bad".into(),
            password: "".into(),
        };
        match validate_login(&req).unwrap_err() {
            AppError::Validation(fields) => assert_eq!(fields.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }
}
