//! Contact-form payload and its validation rules.
//!
//! Field names mirror the public form exactly. Every field is optional at
//! the wire level so a missing value is reported per field instead of
//! failing deserialization wholesale.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::errors::FieldErrors;

/// Colombian mobile: optional +57/57 prefix, then 3XX XXX XXXX where the
/// groups may be separated by space, dot or hyphen.
static CEL_CO_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\+?57\s?)?3\d{2}[\s.-]?\d{3}[\s.-]?\d{4}$").expect("celular regex"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex"));

pub const MAX_USER_AGENT_LEN: usize = 500;

const MSG_REQUIRED: &str = "Este campo es requerido.";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactForm {
    pub nombre: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "fechaNacimiento")]
    pub fecha_nacimiento: Option<String>,
    pub celular: Option<String>,
    pub telefono: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: Option<String>,
    pub terminos: Option<bool>,
    pub captcha: Option<String>,
    /// Honeypot. Hidden in the real form; any value means a bot filled it.
    pub website: Option<String>,
}

/// A submission that passed every validation rule.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidContact {
    pub nombre: String,
    pub email: String,
    pub fecha_nacimiento: NaiveDate,
    pub celular: String,
    pub telefono: String,
    pub password: String,
    pub terminos: bool,
    pub captcha: String,
}

/// Completed years between `born` and `today`, comparing (month, day)
/// tuples rather than subtracting years.
fn age_on(today: NaiveDate, born: NaiveDate) -> i32 {
    let mut years = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        years -= 1;
    }
    years
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Run the full validation pipeline.
///
/// Field rules are all evaluated and reported together. A filled honeypot
/// overrides everything with a generic rejection so automated abuse learns
/// nothing. Cross-field password rules run only on otherwise-clean input,
/// first the confirmation match, then the complexity rule.
pub fn validate(form: &ContactForm, today: NaiveDate) -> Result<ValidContact, FieldErrors> {
    let mut errors = FieldErrors::default();

    let nombre = match non_blank(&form.nombre) {
        None => {
            errors.add("nombre", MSG_REQUIRED);
            None
        }
        Some(v) => {
            let len = v.chars().count();
            if !(3..=120).contains(&len) {
                errors.add("nombre", "Debe tener entre 3 y 120 caracteres.");
                None
            } else {
                Some(v.to_string())
            }
        }
    };

    let email = match non_blank(&form.email) {
        None => {
            errors.add("email", MSG_REQUIRED);
            None
        }
        Some(v) if !EMAIL_RE.is_match(v) || v.chars().count() > 254 => {
            errors.add("email", "Correo electrónico inválido.");
            None
        }
        Some(v) => Some(v.to_string()),
    };

    let fecha_nacimiento = match non_blank(&form.fecha_nacimiento) {
        None => {
            errors.add("fechaNacimiento", MSG_REQUIRED);
            None
        }
        Some(v) => match NaiveDate::parse_from_str(v, "%Y-%m-%d") {
            Err(_) => {
                errors.add("fechaNacimiento", "Fecha inválida. Usa el formato YYYY-MM-DD.");
                None
            }
            Ok(d) if age_on(today, d) < 18 => {
                errors.add("fechaNacimiento", "Debes ser mayor de 18 años.");
                None
            }
            Ok(d) => Some(d),
        },
    };

    let celular = match non_blank(&form.celular) {
        None => {
            errors.add("celular", MSG_REQUIRED);
            None
        }
        Some(v) if v.chars().count() > 20 => {
            errors.add("celular", "Máximo 20 caracteres.");
            None
        }
        Some(v) if !CEL_CO_RE.is_match(v) => {
            errors.add("celular", "Celular inválido. Formato CO: 3XX XXX XXXX (opcional +57).");
            None
        }
        Some(v) => Some(v.to_string()),
    };

    let telefono = match non_blank(&form.telefono) {
        None => Some(String::new()),
        Some(v) if v.chars().count() > 30 => {
            errors.add("telefono", "Máximo 30 caracteres.");
            None
        }
        Some(v) => Some(v.to_string()),
    };

    let password = match form.password.as_deref().filter(|v| !v.is_empty()) {
        None => {
            errors.add("password", MSG_REQUIRED);
            None
        }
        Some(v) if v.chars().count() < 8 => {
            errors.add("password", "La contraseña debe tener al menos 8 caracteres.");
            None
        }
        Some(v) => Some(v.to_string()),
    };

    let confirm_password = match form.confirm_password.as_deref().filter(|v| !v.is_empty()) {
        None => {
            errors.add("confirmPassword", MSG_REQUIRED);
            None
        }
        Some(v) if v.chars().count() < 8 => {
            errors.add("confirmPassword", "La contraseña debe tener al menos 8 caracteres.");
            None
        }
        Some(v) => Some(v.to_string()),
    };

    let terminos = match form.terminos {
        None => {
            errors.add("terminos", MSG_REQUIRED);
            None
        }
        Some(false) => {
            errors.add("terminos", "Debes aceptar los términos y condiciones.");
            None
        }
        Some(true) => Some(true),
    };

    let captcha = match non_blank(&form.captcha) {
        None => {
            errors.add("captcha", MSG_REQUIRED);
            None
        }
        Some(v) => Some(v.to_string()),
    };

    // Honeypot wins over everything else and stays deliberately vague.
    if form.website.as_deref().is_some_and(|w| !w.is_empty()) {
        return Err(FieldErrors::non_field("Solicitud rechazada."));
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let (
        Some(nombre),
        Some(email),
        Some(fecha_nacimiento),
        Some(celular),
        Some(telefono),
        Some(password),
        Some(confirm_password),
        Some(terminos),
        Some(captcha),
    ) = (nombre, email, fecha_nacimiento, celular, telefono, password, confirm_password, terminos, captcha)
    else {
        return Err(errors);
    };

    if password != confirm_password {
        return Err(FieldErrors::single("confirmPassword", "Las contraseñas no coinciden."));
    }
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());
    if !(has_upper && has_digit && has_symbol) {
        return Err(FieldErrors::single(
            "password",
            "Incluye 1 mayúscula, 1 número y 1 carácter especial (mín. 8).",
        ));
    }

    Ok(ValidContact {
        nombre,
        email,
        fecha_nacimiento,
        celular,
        telefono,
        password,
        terminos,
        captcha,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 4).unwrap()
    }

    fn valid_form() -> ContactForm {
        ContactForm {
            nombre: Some("Ana María".into()),
            email: Some("ana@example.com".into()),
            fecha_nacimiento: Some("1990-05-20".into()),
            celular: Some("300 123 4567".into()),
            telefono: None,
            password: Some("Abcdefg1!".into()),
            confirm_password: Some("Abcdefg1!".into()),
            terminos: Some(true),
            captcha: Some("token".into()),
            website: None,
        }
    }

    #[test]
    fn valid_form_passes() {
        let v = validate(&valid_form(), today()).unwrap();
        assert_eq!(v.nombre, "Ana María");
        assert_eq!(v.telefono, "");
        assert!(v.terminos);
    }

    #[test]
    fn valid_mobile_formats_accepted() {
        for cel in ["300 123 4567", "+57 3001234567", "300.123.4567", "3001234567", "573001234567", "300-123-4567"] {
            let mut form = valid_form();
            form.celular = Some(cel.into());
            assert!(validate(&form, today()).is_ok(), "expected accept: {cel}");
        }
    }

    #[test]
    fn invalid_mobile_formats_rejected() {
        for cel in ["2001234567", "abc", "3001234", "300 123 45678", "+58 3001234567"] {
            let mut form = valid_form();
            form.celular = Some(cel.into());
            let errors = validate(&form, today()).unwrap_err();
            assert!(errors.contains("celular"), "expected reject: {cel}");
        }
    }

    #[test]
    fn age_boundary_is_calendar_aware() {
        // 18 years minus one day: still 17
        let mut form = valid_form();
        form.fecha_nacimiento = Some("2008-08-05".into());
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.contains("fechaNacimiento"));

        // exactly 18 today: accepted
        form.fecha_nacimiento = Some("2008-08-04".into());
        assert!(validate(&form, today()).is_ok());
    }

    #[test]
    fn weak_password_rejected() {
        let mut form = valid_form();
        form.password = Some("abcdefgh".into());
        form.confirm_password = Some("abcdefgh".into());
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.contains("password"));
    }

    #[test]
    fn password_mismatch_keys_confirmation() {
        let mut form = valid_form();
        form.confirm_password = Some("Abcdefg1?".into());
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.contains("confirmPassword"));
        assert!(!errors.contains("password"));
    }

    #[test]
    fn short_password_reported_at_field_stage() {
        let mut form = valid_form();
        form.password = Some("Ab1!".into());
        form.confirm_password = Some("Ab1!".into());
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.contains("password"));
        assert!(errors.contains("confirmPassword"));
    }

    #[test]
    fn honeypot_rejection_is_generic_even_with_invalid_fields() {
        let mut form = valid_form();
        form.email = Some("no-es-un-correo".into());
        form.website = Some("http://spam.example".into());
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.contains("non_field_errors"));
        assert!(!errors.contains("email"));
    }

    #[test]
    fn terminos_must_be_true() {
        let mut form = valid_form();
        form.terminos = Some(false);
        let errors = validate(&form, today()).unwrap_err();
        assert!(errors.contains("terminos"));
    }

    #[test]
    fn missing_fields_reported_independently() {
        let errors = validate(&ContactForm::default(), today()).unwrap_err();
        for field in ["nombre", "email", "fechaNacimiento", "celular", "password", "confirmPassword", "terminos", "captcha"] {
            assert!(errors.contains(field), "missing error for {field}");
        }
        assert!(!errors.contains("telefono"));
    }

    #[test]
    fn bad_email_rejected() {
        for email in ["plainaddress", "a@b", "a @b.com", "@example.com"] {
            let mut form = valid_form();
            form.email = Some(email.into());
            let errors = validate(&form, today()).unwrap_err();
            assert!(errors.contains("email"), "expected reject: {email}");
        }
    }
}
