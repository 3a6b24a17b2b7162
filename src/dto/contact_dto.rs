use serde::Deserialize;
use validator::Validate;

// Request del formulario de contacto
#[derive(Debug, Deserialize, Validate)]
pub struct ContactRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Email must be valid"))]
    pub email: String,
    #[validate(length(min = 1, message = "Message is required"))]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_request_validation() {
        let valid = ContactRequest {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            message: "Hola".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = ContactRequest {
            name: "Ana".to_string(),
            email: "not-an-email".to_string(),
            message: "Hola".to_string(),
        };
        assert!(invalid.validate().is_err());
    }
}
