use crate::{
    define_index_newtype,
    problem::{Units, time_of_day::Minutes},
};

define_index_newtype!(VehicleIdx, Vehicle);

#[derive(Debug, Clone)]
pub struct Vehicle {
    external_id: String,
    capacity: Units,
    loading_duration: Minutes,
}

impl Vehicle {
    pub fn external_id(&self) -> &str {
        &self.external_id
    }

    pub fn capacity(&self) -> Units {
        self.capacity
    }

    /// Time the vehicle occupies the loading dock before it can leave.
    pub fn loading_duration(&self) -> Minutes {
        self.loading_duration
    }
}

#[derive(Default)]
pub struct VehicleBuilder {
    external_id: Option<String>,
    capacity: Option<Units>,
    loading_duration: Option<Minutes>,
}

impl VehicleBuilder {
    pub fn set_vehicle_id(&mut self, external_id: impl Into<String>) -> &mut VehicleBuilder {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn set_capacity(&mut self, capacity: Units) -> &mut VehicleBuilder {
        self.capacity = Some(capacity);
        self
    }

    pub fn set_loading_duration(&mut self, loading_duration: Minutes) -> &mut VehicleBuilder {
        self.loading_duration = Some(loading_duration);
        self
    }

    pub fn build(self) -> Vehicle {
        Vehicle {
            external_id: self.external_id.unwrap_or_default(),
            capacity: self.capacity.unwrap_or(0),
            loading_duration: self.loading_duration.unwrap_or(0),
        }
    }
}
