//! Modelo de SparePart
//!
//! Mapea a la tabla `spare_parts`. La cantidad nunca es negativa.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Repuesto en stock
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SparePart {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub arrival_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl SparePart {
    /// Cantidad tras consumir `count` unidades, con suelo en cero
    pub fn quantity_after_consuming(&self, count: i32) -> i32 {
        self.quantity.saturating_sub(count).max(0)
    }
}

/// Datos para insertar un repuesto nuevo
#[derive(Debug, Clone)]
pub struct NewSparePart {
    pub name: String,
    pub code: String,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub arrival_date: NaiveDate,
}

impl NewSparePart {
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> SparePart {
        SparePart {
            id,
            name: self.name,
            code: self.code,
            quantity: self.quantity,
            unit_price: self.unit_price,
            arrival_date: self.arrival_date,
            created_at,
        }
    }
}

/// Cambios parciales sobre un repuesto existente
#[derive(Debug, Clone, Default)]
pub struct SparePartChanges {
    pub name: Option<String>,
    pub code: Option<String>,
    pub quantity: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub arrival_date: Option<NaiveDate>,
}

impl SparePartChanges {
    pub fn apply(self, current: SparePart) -> SparePart {
        SparePart {
            name: self.name.unwrap_or(current.name),
            code: self.code.unwrap_or(current.code),
            quantity: self.quantity.unwrap_or(current.quantity),
            unit_price: self.unit_price.unwrap_or(current.unit_price),
            arrival_date: self.arrival_date.unwrap_or(current.arrival_date),
            ..current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn part(quantity: i32) -> SparePart {
        NewSparePart {
            name: "Moy filtri".to_string(),
            code: "1234".to_string(),
            quantity,
            unit_price: Decimal::new(1250, 2),
            arrival_date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        }
        .into_record(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_quantity_after_consuming_floors_at_zero() {
        assert_eq!(part(10).quantity_after_consuming(3), 7);
        assert_eq!(part(7).quantity_after_consuming(20), 0);
        assert_eq!(part(0).quantity_after_consuming(i32::MAX), 0);
    }

    #[test]
    fn test_changes_keep_untouched_fields() {
        let current = part(10);
        let updated = SparePartChanges {
            quantity: Some(4),
            ..Default::default()
        }
        .apply(current.clone());

        assert_eq!(updated.quantity, 4);
        assert_eq!(updated.code, current.code);
        assert_eq!(updated.id, current.id);
        assert_eq!(updated.created_at, current.created_at);
    }
}
