use argon2::password_hash::{PasswordHasher, SaltString};
use argon2::Argon2;
use chrono::Utc;
use rand::rngs::OsRng;
use sea_orm::DatabaseConnection;
use tracing::info;

use common::captcha::CaptchaVerifier;
use models::contact_message::{self, NewContactMessage};

use super::domain::{self, ContactForm, MAX_USER_AGENT_LEN};
use crate::errors::{FieldErrors, ServiceError};

pub const SUCCESS_MESSAGE: &str = "Formulario recibido y almacenado.";
const CAPTCHA_FAILED: &str = "Verificación reCAPTCHA falló.";

/// Request-scoped audit data captured by the HTTP layer.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta {
    pub ip: Option<String>,
    pub user_agent: String,
}

/// Validate, verify the CAPTCHA, hash the password and persist.
///
/// The stored record carries a one-way argon2 hash with a per-record salt;
/// the plaintext never leaves this function.
pub async fn submit(
    db: &DatabaseConnection,
    captcha: &CaptchaVerifier,
    form: ContactForm,
    meta: ClientMeta,
) -> Result<contact_message::Model, ServiceError> {
    let valid = domain::validate(&form, Utc::now().date_naive()).map_err(ServiceError::Invalid)?;

    if !captcha.verify(&valid.captcha).await {
        return Err(ServiceError::Invalid(FieldErrors::single("captcha", CAPTCHA_FAILED)));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(valid.password.as_bytes(), &salt)
        .map_err(|e| ServiceError::Hash(e.to_string()))?
        .to_string();

    let user_agent: String = meta.user_agent.chars().take(MAX_USER_AGENT_LEN).collect();

    let record = contact_message::create(
        db,
        NewContactMessage {
            nombre: valid.nombre,
            email: valid.email,
            fecha_nacimiento: valid.fecha_nacimiento,
            celular: valid.celular,
            telefono: valid.telefono,
            password_hash,
            consent_terminos: valid.terminos,
            ip: meta.ip,
            user_agent,
        },
    )
    .await?;

    info!(id = %record.id, "contact message stored");
    Ok(record)
}

/// Every submission, newest first. The HTTP layer is responsible for both
/// the admin gate and for keeping `password_hash` out of the response.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<contact_message::Model>, ServiceError> {
    Ok(contact_message::list_newest_first(db).await?)
}

#[cfg(test)]
mod tests {
    use argon2::password_hash::PasswordVerifier;
    use argon2::PasswordHash;

    use super::*;

    #[test]
    fn argon2_hash_verifies_and_salts_differ() {
        let password = "Abcdefg1!";
        let hash = |p: &str| {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default().hash_password(p.as_bytes(), &salt).unwrap().to_string()
        };
        let h1 = hash(password);
        let h2 = hash(password);
        assert_ne!(h1, h2, "per-record salt must differ");
        assert!(!h1.contains(password));

        let parsed = PasswordHash::new(&h1).unwrap();
        assert!(Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok());
        assert!(Argon2::default().verify_password(b"otra-clave", &parsed).is_err());
    }

    #[test]
    fn user_agent_truncation_is_char_safe() {
        let long = "ñ".repeat(600);
        let truncated: String = long.chars().take(MAX_USER_AGENT_LEN).collect();
        assert_eq!(truncated.chars().count(), MAX_USER_AGENT_LEN);
    }
}
