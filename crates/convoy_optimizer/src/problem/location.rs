use crate::{
    define_index_newtype,
    problem::{Units, time_of_day::Minutes, time_window::TimeWindow},
};

define_index_newtype!(LocationIdx, Location);

/// A delivery stop, or the depot when stored at index 0.
#[derive(Debug, Clone)]
pub struct Location {
    name: String,
    address: String,
    demand: Units,
    time_window: TimeWindow,
    service_duration: Minutes,
}

impl Location {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw address or `lat,lon` coordinate, as given by the data source.
    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn demand(&self) -> Units {
        self.demand
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn service_duration(&self) -> Minutes {
        self.service_duration
    }
}

#[derive(Default)]
pub struct LocationBuilder {
    name: Option<String>,
    address: Option<String>,
    demand: Option<Units>,
    time_window: Option<TimeWindow>,
    service_duration: Option<Minutes>,
}

impl LocationBuilder {
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut LocationBuilder {
        self.name = Some(name.into());
        self
    }

    pub fn set_address(&mut self, address: impl Into<String>) -> &mut LocationBuilder {
        self.address = Some(address.into());
        self
    }

    pub fn set_demand(&mut self, demand: Units) -> &mut LocationBuilder {
        self.demand = Some(demand);
        self
    }

    pub fn set_time_window(&mut self, time_window: TimeWindow) -> &mut LocationBuilder {
        self.time_window = Some(time_window);
        self
    }

    pub fn set_service_duration(&mut self, service_duration: Minutes) -> &mut LocationBuilder {
        self.service_duration = Some(service_duration);
        self
    }

    pub fn build(self) -> Location {
        let name = self.name.unwrap_or_default();
        Location {
            address: self.address.unwrap_or_else(|| name.clone()),
            name,
            demand: self.demand.unwrap_or(0),
            time_window: self.time_window.unwrap_or_default(),
            service_duration: self.service_duration.unwrap_or(0),
        }
    }
}
