pub mod dashboard_routes;
pub mod repair_order_routes;
pub mod spare_part_routes;
pub mod vehicle_routes;
