use super::{VehicleId, VehicleTypeId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DoorOperationMode {
    #[default]
    Serial,
    Parallel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleType {
    pub id: VehicleTypeId,
    pub seats: u32,
    pub standing_room: u32,
    #[serde(default)]
    pub door_operation: DoorOperationMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    pub vehicle_type: VehicleTypeId,
}

/// transit vehicle fleet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vehicles {
    pub types: BTreeMap<VehicleTypeId, VehicleType>,
    pub vehicles: BTreeMap<VehicleId, Vehicle>,
}

impl Vehicles {
    pub fn add_type(&mut self, vehicle_type: VehicleType) {
        self.types.insert(vehicle_type.id.clone(), vehicle_type);
    }

    pub fn add_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicles.insert(vehicle.id.clone(), vehicle);
    }
}
