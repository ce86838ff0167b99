//! Filtros de búsqueda de los listados
//!
//! Todos los filtros son "contiene" sin distinguir mayúsculas; un filtro
//! vacío o ausente deja pasar todo.

use crate::models::{RepairOrder, SparePart, Vehicle};
use crate::utils::validation::contains_ignore_case;

fn term(filter: Option<&str>) -> &str {
    filter.map(str::trim).unwrap_or("")
}

/// Vehículos cuya matrícula contiene `q`
pub fn filter_vehicles(vehicles: Vec<Vehicle>, q: Option<&str>) -> Vec<Vehicle> {
    let q = term(q);
    vehicles
        .into_iter()
        .filter(|v| contains_ignore_case(&v.plate_number, q))
        .collect()
}

/// Repuestos cuyo nombre o código contiene `q`
pub fn filter_spare_parts(parts: Vec<SparePart>, q: Option<&str>) -> Vec<SparePart> {
    let q = term(q);
    parts
        .into_iter()
        .filter(|p| contains_ignore_case(&p.name, q) || contains_ignore_case(&p.code, q))
        .collect()
}

/// Órdenes cuya matrícula contiene `plate` y cuyo código de repuesto contiene `part_code`
pub fn filter_repair_orders(
    orders: Vec<RepairOrder>,
    plate: Option<&str>,
    part_code: Option<&str>,
) -> Vec<RepairOrder> {
    let plate = term(plate);
    let part_code = term(part_code);
    orders
        .into_iter()
        .filter(|o| contains_ignore_case(&o.plate_number, plate))
        .filter(|o| contains_ignore_case(o.part_code.as_deref().unwrap_or(""), part_code))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn vehicle(plate: &str) -> Vehicle {
        Vehicle {
            id: Uuid::new_v4(),
            plate_number: plate.to_string(),
            created_at: Utc::now(),
        }
    }

    fn part(name: &str, code: &str) -> SparePart {
        SparePart {
            id: Uuid::new_v4(),
            name: name.to_string(),
            code: code.to_string(),
            quantity: 1,
            unit_price: Decimal::ZERO,
            arrival_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn order(plate: &str, part_code: Option<&str>) -> RepairOrder {
        RepairOrder {
            id: Uuid::new_v4(),
            plate_number: plate.to_string(),
            description: "Servis".to_string(),
            labor_fee: None,
            service_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            part_count: 1,
            part_code: part_code.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_filter_vehicles() {
        let vehicles = vec![vehicle("01A123BC"), vehicle("10B777CA")];
        let found = filter_vehicles(vehicles.clone(), Some("a1"));
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].plate_number, "01A123BC");

        assert_eq!(filter_vehicles(vehicles, None).len(), 2);
    }

    #[test]
    fn test_filter_spare_parts_by_name_or_code() {
        let parts = vec![part("Tormoz kolodkasi", "TK-01"), part("Moy filtri", "MF-22")];
        assert_eq!(filter_spare_parts(parts.clone(), Some("kolod")).len(), 1);
        assert_eq!(filter_spare_parts(parts.clone(), Some("mf-")).len(), 1);
        assert_eq!(filter_spare_parts(parts, Some("  ")).len(), 2);
    }

    #[test]
    fn test_filter_repair_orders_requires_both() {
        let orders = vec![
            order("01A123BC", Some("1234")),
            order("01A123BC", None),
            order("10B777CA", Some("1234")),
        ];

        assert_eq!(filter_repair_orders(orders.clone(), Some("01a"), Some("12")).len(), 1);
        assert_eq!(filter_repair_orders(orders.clone(), Some("01a"), None).len(), 2);
        assert_eq!(filter_repair_orders(orders, None, Some("1234")).len(), 2);
    }
}
