//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para normalizar datos de entrada
//! y convertir importes entre `f64` (JSON) y `Decimal` (almacén).

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

use crate::utils::errors::AppError;

/// Crear un error de validación para un campo concreto
pub fn validation_error(field: &'static str, message: &'static str) -> AppError {
    let mut error = ValidationError::new("custom");
    error.message = Some(message.into());
    error.add_param("field".into(), &field);

    let mut errors = ValidationErrors::new();
    errors.add(field, error);

    AppError::Validation(errors)
}

/// Recortar espacios de un string en su sitio
pub fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Normalizar un texto opcional: recortado, y vacío se trata como ausente
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Mayor importe que cabe en una columna `NUMERIC(12, 2)`
pub const MAX_MONEY: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2); // 9_999_999_999.99

/// Convertir un importe recibido en JSON a `Decimal` con dos decimales
pub fn money_from_f64(field: &'static str, value: f64) -> Result<Decimal, AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(validation_error(field, "must be a non-negative number"));
    }

    let amount = Decimal::from_f64(value)
        .map(|d| d.round_dp(2))
        .ok_or_else(|| validation_error(field, "is not a representable amount"))?;

    if amount > MAX_MONEY {
        return Err(validation_error(field, "exceeds the maximum amount 9999999999.99"));
    }

    Ok(amount)
}

/// Convertir un importe almacenado a `f64` para la respuesta JSON
pub fn money_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

/// Comparación "contiene" sin distinguir mayúsculas
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("  1234 ".to_string())), Some("1234".to_string()));
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(non_empty(None), None);
    }

    #[test]
    fn test_trim_in_place() {
        let mut plate = " 01 A 123 BC  ".to_string();
        trim_in_place(&mut plate);
        assert_eq!(plate, "01 A 123 BC");
    }

    #[test]
    fn test_money_round_trip() {
        let amount = money_from_f64("narxi", 19.99).unwrap();
        assert_eq!(amount.scale(), 2);
        assert_eq!(money_to_f64(amount), 19.99);
        assert_eq!(money_to_f64(money_from_f64("usta_haqi", 150.0).unwrap()), 150.0);
    }

    #[test]
    fn test_money_rejects_negative_and_nan() {
        assert!(money_from_f64("narxi", -1.0).is_err());
        assert!(money_from_f64("narxi", f64::NAN).is_err());
    }

    #[test]
    fn test_money_rejects_amounts_above_column_limit() {
        assert_eq!(MAX_MONEY.to_string(), "9999999999.99");
        assert_eq!(money_from_f64("narxi", 9_999_999_999.99).unwrap(), MAX_MONEY);

        let err = money_from_f64("narxi", 1e11).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
        assert!(money_from_f64("usta_haqi", 1e10).is_err());
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Tormoz kolodkasi", "KOLOD"));
        assert!(contains_ignore_case("anything", ""));
        assert!(!contains_ignore_case("filtr", "moy"));
    }
}
