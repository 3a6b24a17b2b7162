//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validación de datos
//! y normalización de campos de formularios.

use chrono::NaiveDate;

use crate::utils::errors::AppError;

/// Validar y convertir string a fecha (formato YYYY-MM-DD)
pub fn validate_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("{} must be a date (YYYY-MM-DD)", field)))
}

/// Normalizar una matrícula: mayúsculas y sin espacios
pub fn normalize_registration(value: &str) -> String {
    value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase()
}

/// Normalizar valores sentinela de formularios: "" y "-" equivalen a null
pub fn normalize_sentinel(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed == "-" {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parsear un campo numérico entero de forma tolerante (fallos → None)
pub fn parse_int_lenient(value: Option<&str>) -> Option<i32> {
    value.and_then(|v| {
        let digits: String = v
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '-')
            .collect();
        digits.parse::<i32>().ok()
    })
}

/// Extraer la extensión de un nombre de archivo (default "jpg")
pub fn file_extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .filter(|ext| !ext.is_empty() && *ext != filename)
        .map(|ext| ext.to_lowercase())
        .unwrap_or_else(|| "jpg".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_registration() {
        assert_eq!(normalize_registration("ab12 cde"), "AB12CDE");
        assert_eq!(normalize_registration(" AB12  CDE "), "AB12CDE");
    }

    #[test]
    fn test_normalize_sentinel() {
        assert_eq!(normalize_sentinel(""), None);
        assert_eq!(normalize_sentinel("-"), None);
        assert_eq!(normalize_sentinel("  "), None);
        assert_eq!(normalize_sentinel(" Valid "), Some("Valid".to_string()));
    }

    #[test]
    fn test_parse_int_lenient() {
        assert_eq!(parse_int_lenient(Some("6")), Some(6));
        assert_eq!(parse_int_lenient(Some("8 cylinders")), Some(8));
        assert_eq!(parse_int_lenient(Some("n/a")), None);
        assert_eq!(parse_int_lenient(None), None);
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("photo.JPG"), "jpg");
        assert_eq!(file_extension("archive.tar.png"), "png");
        assert_eq!(file_extension("noextension"), "jpg");
    }

    #[test]
    fn test_validate_date() {
        assert!(validate_date("service_date", "2026-01-15").is_ok());
        assert!(validate_date("service_date", "15/01/2026").is_err());
    }
}
