//! Modelo de RepairOrder
//!
//! Mapea a la tabla `repair_orders`. `plate_number` es texto libre y
//! `part_code` referencia `spare_parts.code` sin clave foránea.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

/// Orden de reparación
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct RepairOrder {
    pub id: Uuid,
    pub plate_number: String,
    pub description: String,
    pub labor_fee: Option<Decimal>,
    pub service_date: NaiveDate,
    pub part_count: i32,
    pub part_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RepairOrder {
    /// Repuesto y cantidad a descontar del stock, si la orden consume alguno
    pub fn consumed_part(&self) -> Option<(&str, i32)> {
        match self.part_code.as_deref().map(str::trim) {
            Some(code) if !code.is_empty() && self.part_count > 0 => Some((code, self.part_count)),
            _ => None,
        }
    }
}

/// Datos para insertar una orden nueva
#[derive(Debug, Clone)]
pub struct NewRepairOrder {
    pub plate_number: String,
    pub description: String,
    pub labor_fee: Option<Decimal>,
    pub service_date: NaiveDate,
    pub part_count: i32,
    pub part_code: Option<String>,
}

impl NewRepairOrder {
    pub fn into_record(self, id: Uuid, created_at: DateTime<Utc>) -> RepairOrder {
        RepairOrder {
            id,
            plate_number: self.plate_number,
            description: self.description,
            labor_fee: self.labor_fee,
            service_date: self.service_date,
            part_count: self.part_count,
            part_code: self.part_code,
            created_at,
        }
    }
}

/// Cambios parciales sobre una orden existente.
///
/// `part_code: Some(None)` borra el código de repuesto y
/// `labor_fee: Some(None)` borra el pago del mecánico.
#[derive(Debug, Clone, Default)]
pub struct RepairOrderChanges {
    pub plate_number: Option<String>,
    pub description: Option<String>,
    pub labor_fee: Option<Option<Decimal>>,
    pub service_date: Option<NaiveDate>,
    pub part_count: Option<i32>,
    pub part_code: Option<Option<String>>,
}

impl RepairOrderChanges {
    pub fn apply(self, current: RepairOrder) -> RepairOrder {
        RepairOrder {
            plate_number: self.plate_number.unwrap_or(current.plate_number),
            description: self.description.unwrap_or(current.description),
            labor_fee: self.labor_fee.unwrap_or(current.labor_fee),
            service_date: self.service_date.unwrap_or(current.service_date),
            part_count: self.part_count.unwrap_or(current.part_count),
            part_code: self.part_code.unwrap_or(current.part_code),
            ..current
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(part_code: Option<&str>, part_count: i32) -> RepairOrder {
        NewRepairOrder {
            plate_number: "01A123BC".to_string(),
            description: "Tormoz almashtirish".to_string(),
            labor_fee: None,
            service_date: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            part_count,
            part_code: part_code.map(str::to_string),
        }
        .into_record(Uuid::new_v4(), Utc::now())
    }

    #[test]
    fn test_consumed_part() {
        assert_eq!(order(Some("1234"), 3).consumed_part(), Some(("1234", 3)));
        assert_eq!(order(Some("1234"), 0).consumed_part(), None);
        assert_eq!(order(Some("  "), 3).consumed_part(), None);
        assert_eq!(order(None, 3).consumed_part(), None);
    }

    #[test]
    fn test_changes_can_clear_part_code() {
        let updated = RepairOrderChanges {
            part_code: Some(None),
            ..Default::default()
        }
        .apply(order(Some("1234"), 3));

        assert_eq!(updated.part_code, None);
        assert_eq!(updated.part_count, 3);
    }

    #[test]
    fn test_changes_keep_or_clear_labor_fee() {
        let mut current = order(Some("1234"), 3);
        current.labor_fee = Some(Decimal::new(15000, 2));

        let kept = RepairOrderChanges {
            part_count: Some(1),
            ..Default::default()
        }
        .apply(current.clone());
        assert_eq!(kept.labor_fee, Some(Decimal::new(15000, 2)));

        let cleared = RepairOrderChanges {
            labor_fee: Some(None),
            ..Default::default()
        }
        .apply(current);
        assert_eq!(cleared.labor_fee, None);
    }
}
