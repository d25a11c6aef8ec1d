use std::cmp::Ordering;

use crate::domain::ResourceRecord;
use crate::table::column::{
    compare_optional, contains_ignore_case, CellContent, CellStrategy, ColumnDescriptor,
};

/// Where a resource lives, as shown in the location column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLocation {
    pub name: Option<String>,
    pub region: Option<String>,
    pub folder_id: Option<String>,
    pub zone_id: Option<String>,
}

impl ResourceLocation {
    /// Space-joined present parts; the text global search runs against.
    pub fn search_text(&self) -> String {
        [&self.name, &self.region, &self.folder_id, &self.zone_id]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(name) = &self.name {
            lines.push(name.clone());
        }
        if let Some(region) = &self.region {
            lines.push(format!("Region: {}", region));
        }
        if let Some(folder_id) = &self.folder_id {
            lines.push(format!("Folder: {}", folder_id));
        }
        if let Some(zone_id) = &self.zone_id {
            lines.push(format!("Zone: {}", zone_id));
        }
        lines
    }
}

pub trait HasLocation {
    fn location(&self) -> ResourceLocation;
}

impl HasLocation for ResourceRecord {
    fn location(&self) -> ResourceLocation {
        ResourceLocation {
            name: self.cloud_account_name.clone(),
            region: self.region.clone(),
            folder_id: self.folder_id.clone(),
            zone_id: self.zone_id.clone(),
        }
    }
}

struct LocationCell;

impl<T: HasLocation> CellStrategy<T> for LocationCell {
    fn render(&self, row: &T) -> CellContent {
        let lines = row.location().lines();
        if lines.is_empty() {
            CellContent::Empty
        } else {
            CellContent::Lines(lines)
        }
    }

    fn sort(&self, a: &T, b: &T) -> Option<Ordering> {
        let (a, b) = (a.location(), b.location());
        Some(
            compare_optional(a.name, b.name, Ord::cmp)
                .then_with(|| compare_optional(a.region, b.region, Ord::cmp)),
        )
    }

    fn filter(&self, row: &T, query: &str) -> Option<bool> {
        Some(contains_ignore_case(&row.location().search_text(), query))
    }
}

pub fn resource_location_column<T: HasLocation>() -> ColumnDescriptor<T> {
    ColumnDescriptor::new("location", "Location", LocationCell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> ResourceRecord {
        ResourceRecord {
            id: "res-1".to_string(),
            cloud_resource_id: "epd4q1".to_string(),
            cloud_account_name: Some("Nebius prod".to_string()),
            region: Some("eu-north1".to_string()),
            folder_id: Some("b1gfolder".to_string()),
            zone_id: Some("eu-north1-c".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn search_text_joins_present_parts() {
        assert_eq!(
            record().location().search_text(),
            "Nebius prod eu-north1 b1gfolder eu-north1-c"
        );

        let partial = ResourceRecord {
            cloud_account_name: Some("AWS".to_string()),
            zone_id: Some("use1-az1".to_string()),
            ..Default::default()
        };
        assert_eq!(partial.location().search_text(), "AWS use1-az1");
    }

    #[test]
    fn filter_matches_any_part_ignoring_case() {
        let column = resource_location_column::<ResourceRecord>();
        assert_eq!(column.matches(&record(), "NEBIUS"), Some(true));
        assert_eq!(column.matches(&record(), "B1GFOLDER"), Some(true));
        assert_eq!(column.matches(&record(), "north1-c"), Some(true));
        assert_eq!(column.matches(&record(), "us-east"), Some(false));
    }

    #[test]
    fn renders_labelled_lines() {
        let column = resource_location_column::<ResourceRecord>();
        assert_eq!(
            column.render(&record()),
            CellContent::Lines(vec![
                "Nebius prod".to_string(),
                "Region: eu-north1".to_string(),
                "Folder: b1gfolder".to_string(),
                "Zone: eu-north1-c".to_string(),
            ])
        );
        assert_eq!(column.render(&ResourceRecord::default()), CellContent::Empty);
    }
}
