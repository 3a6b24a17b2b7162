use serde::Deserialize;

// Evento del proveedor de identidad (payload firmado estilo svix)
#[derive(Debug, Deserialize)]
pub struct IdentityEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: IdentityEventData,
}

#[derive(Debug, Deserialize)]
pub struct IdentityEventData {
    pub id: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<IdentityEmail>,
}

#[derive(Debug, Deserialize)]
pub struct IdentityEmail {
    pub email_address: String,
}

impl IdentityEventData {
    /// Nombre completo combinado; "Unknown Member" si viene vacío
    pub fn full_name(&self) -> String {
        let combined = format!(
            "{} {}",
            self.first_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        );
        let trimmed = combined.trim();
        if trimmed.is_empty() {
            "Unknown Member".to_string()
        } else {
            trimmed.to_string()
        }
    }

    /// Email primario (el primero de la lista)
    pub fn primary_email(&self) -> Option<String> {
        self.email_addresses
            .first()
            .map(|e| e.email_address.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_combines_and_trims() {
        let data = IdentityEventData {
            id: "user_1".to_string(),
            first_name: Some("Ana".to_string()),
            last_name: None,
            email_addresses: vec![],
        };
        assert_eq!(data.full_name(), "Ana");
    }

    #[test]
    fn test_full_name_fallback() {
        let data = IdentityEventData {
            id: "user_1".to_string(),
            first_name: None,
            last_name: None,
            email_addresses: vec![],
        };
        assert_eq!(data.full_name(), "Unknown Member");
    }
}
