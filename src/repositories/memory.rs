//! Almacén en memoria
//!
//! Implementa los tres repositorios con las mismas reglas que el esquema
//! PostgreSQL: claves únicas, orden por `created_at` descendente y stock
//! con suelo en cero. Se usa en tests y con `STORE_BACKEND=memory`.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{
    NewRepairOrder, NewSparePart, NewVehicle, RepairOrder, RepairOrderChanges, SparePart,
    SparePartChanges, Vehicle, VehicleChanges,
};
use crate::utils::errors::{duplicate_key_error, not_found_error, AppResult};

use super::{RepairOrderRepository, SparePartRepository, VehicleRepository};

/// Las filas nuevas se insertan al principio, así la lista queda ordenada
/// de la más reciente a la más antigua sin reordenar.
fn insert_newest<T>(rows: &mut Vec<T>, row: T) {
    rows.insert(0, row);
}

#[derive(Default)]
pub struct InMemoryVehicleRepository {
    rows: RwLock<Vec<Vehicle>>,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn list(&self) -> AppResult<Vec<Vehicle>> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        Ok(self.rows.read().await.iter().find(|v| v.id == id).cloned())
    }

    async fn plate_taken(&self, plate_number: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let rows = self.rows.read().await;
        Ok(rows
            .iter()
            .any(|v| v.plate_number == plate_number && Some(v.id) != exclude))
    }

    async fn create(&self, vehicle: NewVehicle) -> AppResult<Vehicle> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|v| v.plate_number == vehicle.plate_number) {
            return Err(duplicate_key_error("Vehicle", "plate number", &vehicle.plate_number));
        }

        let record = vehicle.into_record(Uuid::new_v4(), Utc::now());
        insert_newest(&mut rows, record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> AppResult<Vehicle> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|v| v.id == id)
            .ok_or_else(|| not_found_error("Vehicle", &id.to_string()))?;

        let next = changes.apply(rows[index].clone());
        if rows.iter().any(|v| v.id != id && v.plate_number == next.plate_number) {
            return Err(duplicate_key_error("Vehicle", "plate number", &next.plate_number));
        }

        rows[index] = next.clone();
        Ok(next)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|v| v.id != id);

        if rows.len() == before {
            return Err(not_found_error("Vehicle", &id.to_string()));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemorySparePartRepository {
    rows: RwLock<Vec<SparePart>>,
}

impl InMemorySparePartRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SparePartRepository for InMemorySparePartRepository {
    async fn list(&self) -> AppResult<Vec<SparePart>> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SparePart>> {
        Ok(self.rows.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn code_taken(&self, code: &str, exclude: Option<Uuid>) -> AppResult<bool> {
        let rows = self.rows.read().await;
        Ok(rows.iter().any(|p| p.code == code && Some(p.id) != exclude))
    }

    async fn create(&self, part: NewSparePart) -> AppResult<SparePart> {
        let mut rows = self.rows.write().await;
        if rows.iter().any(|p| p.code == part.code) {
            return Err(duplicate_key_error("Spare part", "code", &part.code));
        }

        let record = part.into_record(Uuid::new_v4(), Utc::now());
        insert_newest(&mut rows, record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, changes: SparePartChanges) -> AppResult<SparePart> {
        let mut rows = self.rows.write().await;
        let index = rows
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| not_found_error("Spare part", &id.to_string()))?;

        let next = changes.apply(rows[index].clone());
        if rows.iter().any(|p| p.id != id && p.code == next.code) {
            return Err(duplicate_key_error("Spare part", "code", &next.code));
        }

        rows[index] = next.clone();
        Ok(next)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|p| p.id != id);

        if rows.len() == before {
            return Err(not_found_error("Spare part", &id.to_string()));
        }
        Ok(())
    }

    async fn decrement_stock(&self, code: &str, count: i32) -> AppResult<Option<SparePart>> {
        let mut rows = self.rows.write().await;
        let Some(part) = rows.iter_mut().find(|p| p.code == code) else {
            return Ok(None);
        };

        part.quantity = part.quantity_after_consuming(count);
        Ok(Some(part.clone()))
    }
}

#[derive(Default)]
pub struct InMemoryRepairOrderRepository {
    rows: RwLock<Vec<RepairOrder>>,
}

impl InMemoryRepairOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RepairOrderRepository for InMemoryRepairOrderRepository {
    async fn list(&self) -> AppResult<Vec<RepairOrder>> {
        Ok(self.rows.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<RepairOrder>> {
        Ok(self.rows.read().await.iter().find(|o| o.id == id).cloned())
    }

    async fn create(&self, order: NewRepairOrder) -> AppResult<RepairOrder> {
        let record = order.into_record(Uuid::new_v4(), Utc::now());
        insert_newest(&mut *self.rows.write().await, record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, changes: RepairOrderChanges) -> AppResult<RepairOrder> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| not_found_error("Repair order", &id.to_string()))?;

        *row = changes.apply(row.clone());
        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|o| o.id != id);

        if rows.len() == before {
            return Err(not_found_error("Repair order", &id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::errors::AppError;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn new_part(code: &str, quantity: i32) -> NewSparePart {
        NewSparePart {
            name: format!("Part {}", code),
            code: code.to_string(),
            quantity,
            unit_price: Decimal::ZERO,
            arrival_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = InMemoryVehicleRepository::new();
        let first = repo.create(NewVehicle { plate_number: "01A111AA".into() }).await.unwrap();
        let second = repo.create(NewVehicle { plate_number: "01A222AA".into() }).await.unwrap();

        let ids: Vec<Uuid> = repo.list().await.unwrap().iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn test_unique_plate_enforced_by_store() {
        let repo = InMemoryVehicleRepository::new();
        repo.create(NewVehicle { plate_number: "01A111AA".into() }).await.unwrap();

        let err = repo.create(NewVehicle { plate_number: "01A111AA".into() }).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
    }

    #[tokio::test]
    async fn test_decrement_stock_floors_at_zero() {
        let repo = InMemorySparePartRepository::new();
        repo.create(new_part("1234", 10)).await.unwrap();

        let part = repo.decrement_stock("1234", 3).await.unwrap().unwrap();
        assert_eq!(part.quantity, 7);

        let part = repo.decrement_stock("1234", 20).await.unwrap().unwrap();
        assert_eq!(part.quantity, 0);

        assert!(repo.decrement_stock("9999", 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_missing_order_is_not_found() {
        let repo = InMemoryRepairOrderRepository::new();
        let err = repo
            .update(Uuid::new_v4(), RepairOrderChanges::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_code_collision() {
        let repo = InMemorySparePartRepository::new();
        repo.create(new_part("A1", 1)).await.unwrap();
        let other = repo.create(new_part("B2", 1)).await.unwrap();

        let changes = SparePartChanges {
            code: Some("A1".into()),
            ..Default::default()
        };
        let err = repo.update(other.id, changes).await.unwrap_err();
        assert!(matches!(err, AppError::DuplicateKey(_)));
    }
}
