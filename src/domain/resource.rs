use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Resource expense row bound by the resource tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResourceRecord {
    pub id: String,
    pub cloud_resource_id: String,
    pub name: Option<String>,
    pub cloud_account_id: Option<String>,
    pub cloud_account_name: Option<String>,
    pub cloud_type: Option<String>,
    pub region: Option<String>,
    pub folder_id: Option<String>,
    pub zone_id: Option<String>,
    pub cost: f64,
    pub owner: Option<String>,
    pub pool: Option<String>,
    pub tags: IndexMap<String, String>,
}

/// Power schedule switching attached instances on and off.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PowerSchedule {
    pub id: String,
    pub name: String,
    pub enabled: bool,
    pub power_on: String,
    pub power_off: String,
    pub timezone: String,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub resources_count: u32,
}

/// Instance flagged by the inactivity recommendation, with the weekly
/// windows in which it could be shut down.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InactiveInstance {
    pub resource_id: String,
    pub cloud_resource_id: String,
    pub resource_name: Option<String>,
    pub cloud_account_name: Option<String>,
    pub region: Option<String>,
    pub saving: f64,
    pub inactivity_periods: Vec<ShutdownPeriod>,
}

/// Point in the week. `day_of_week` counts from Monday = 0.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct WeekTime {
    pub day_of_week: u8,
    pub hour: u8,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ShutdownPeriod {
    pub start: WeekTime,
    pub end: WeekTime,
}
