use serde::{Deserialize, Serialize};

#[cfg(feature = "graphql")]
use async_graphql::{Enum, SimpleObject};

#[cfg_attr(feature = "graphql", derive(Enum))]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventLevel {
    Info,
    Warning,
    Error,
    Debug,
}

impl EventLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventLevel::Info => "INFO",
            EventLevel::Warning => "WARNING",
            EventLevel::Error => "ERROR",
            EventLevel::Debug => "DEBUG",
        }
    }
}

/// Organization event as stored by the keeper service.
#[cfg_attr(feature = "graphql", derive(SimpleObject))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: String,
    pub time: i64,
    pub level: EventLevel,
    #[serde(default)]
    pub evt_class: Option<String>,
    #[serde(default)]
    pub object_id: Option<String>,
    #[serde(default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub object_name: Option<String>,
    pub organization_id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub ack: bool,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub acknowledged_user: Option<String>,
    #[serde(default)]
    pub localized: Option<String>,
}

/// Filters for the events listing. Absent fields are not sent upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventsRequestParams {
    pub limit: Option<i32>,
    pub time_start: Option<i64>,
    pub time_end: Option<i64>,
    pub last_id: Option<String>,
    pub include_read: Option<bool>,
    pub read_on_get: Option<bool>,
    pub description_like: Option<String>,
    pub levels: Vec<EventLevel>,
}

impl EventsRequestParams {
    /// Flattens the filters into query pairs; `levels` repeats as `level=`.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(time_start) = self.time_start {
            query.push(("time_start", time_start.to_string()));
        }
        if let Some(time_end) = self.time_end {
            query.push(("time_end", time_end.to_string()));
        }
        if let Some(last_id) = &self.last_id {
            query.push(("last_id", last_id.clone()));
        }
        if let Some(include_read) = self.include_read {
            query.push(("include_read", include_read.to_string()));
        }
        if let Some(read_on_get) = self.read_on_get {
            query.push(("read_on_get", read_on_get.to_string()));
        }
        if let Some(description_like) = &self.description_like {
            query.push(("description_like", description_like.clone()));
        }
        for level in &self.levels {
            query.push(("level", level.as_str().to_string()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_only_include_present_filters() {
        let params = EventsRequestParams {
            limit: Some(80),
            include_read: Some(true),
            levels: vec![EventLevel::Warning, EventLevel::Error],
            ..Default::default()
        };

        assert_eq!(
            params.to_query(),
            vec![
                ("limit", "80".to_string()),
                ("include_read", "true".to_string()),
                ("level", "WARNING".to_string()),
                ("level", "ERROR".to_string()),
            ]
        );
    }

    #[test]
    fn empty_params_produce_no_query() {
        assert!(EventsRequestParams::default().to_query().is_empty());
    }
}
