//! Field validation for auth requests.
//!
//! Each request type has an ordered rule list; every rule is evaluated and
//! all failures are returned together, before any store access.

use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{FieldError, LoginRequest, RegisterRequest};

pub const MIN_PASSWORD_CHARS: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(concat!(
            r"^[a-zA-Z0-9._%+-]+@",
            r"(?:[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?\.)+",
            r"[a-zA-Z]{2,}$"
        ))
        .expect("email regex compiles");
    }
    email.len() <= 254 && EMAIL_RE.is_match(email)
}

/// Trim and lowercase, the form emails are stored and looked up in.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

struct Rule<T> {
    field: &'static str,
    msg: &'static str,
    check: fn(&T) -> bool,
}

const REGISTER_RULES: &[Rule<RegisterRequest>] = &[
    Rule {
        field: "email",
        msg: "Debe ser un email válido",
        check: |r| is_valid_email(&r.email),
    },
    Rule {
        field: "password",
        msg: "La contraseña debe tener al menos 6 caracteres",
        check: |r| r.password.chars().count() >= MIN_PASSWORD_CHARS,
    },
    Rule {
        field: "nombre",
        msg: "El nombre es obligatorio",
        check: |r| !r.nombre.trim().is_empty(),
    },
];

const LOGIN_RULES: &[Rule<LoginRequest>] = &[
    Rule {
        field: "email",
        msg: "Debe ser un email válido",
        check: |r| is_valid_email(&r.email),
    },
    Rule {
        field: "password",
        msg: "La contraseña es obligatoria",
        check: |r| !r.password.is_empty(),
    },
];

fn run<T>(rules: &[Rule<T>], input: &T) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = rules
        .iter()
        .filter(|rule| !(rule.check)(input))
        .map(|rule| FieldError {
            kind: "field",
            path: rule.field,
            msg: rule.msg,
            location: "body",
        })
        .collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn validate_register(req: &RegisterRequest) -> Result<(), Vec<FieldError>> {
    run(REGISTER_RULES, req)
}

pub fn validate_login(req: &LoginRequest) -> Result<(), Vec<FieldError>> {
    run(LOGIN_RULES, req)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn register(email: &str, password: &str, nombre: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            password: password.into(),
            nombre: nombre.into(),
        }
    }

    #[test]
    fn accepts_reasonable_emails() {
        for email in ["a@x.com", "first.last+tag@sub.example.org", "u_1@mail.co", "a@my-host.com"] {
            assert!(is_valid_email(email), "{email} should be valid");
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        for email in ["", "plain", "a@", "@x.com", "a@x", "a b@x.com", "a@@x.com", "a@x.c", "a@-x.com", "a@x-.com", "a@x..com"] {
            assert!(!is_valid_email(email), "{email} should be invalid");
        }
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  Ana@X.Com "), "ana@x.com");
    }

    #[test]
    fn valid_register_passes() {
        assert!(validate_register(&register("a@x.com", "secret1", "Ana")).is_ok());
    }

    #[test]
    fn register_reports_every_failed_field_in_order() {
        let errors = validate_register(&register("nope", "12345", "   ")).unwrap_err();
        let paths: Vec<_> = errors.iter().map(|e| e.path).collect();
        assert_eq!(paths, vec!["email", "password", "nombre"]);
        assert!(errors.iter().all(|e| e.location == "body" && e.kind == "field"));
    }

    #[test]
    fn password_length_counts_characters_not_bytes() {
        // six characters, eleven bytes
        assert!(validate_register(&register("a@x.com", "ñññññ1", "Ana")).is_ok());
        assert!(validate_register(&register("a@x.com", "ñññññ", "Ana")).is_err());
    }

    #[test]
    fn login_requires_non_empty_password() {
        let errors = validate_login(&LoginRequest {
            email: "a@x.com".into(),
            password: String::new(),
        })
        .unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "password");
        assert_eq!(errors[0].msg, "La contraseña es obligatoria");
    }

    #[test]
    fn login_accepts_short_password() {
        // length is only enforced at registration
        assert!(validate_login(&LoginRequest {
            email: "a@x.com".into(),
            password: "x".into(),
        })
        .is_ok());
    }
}
