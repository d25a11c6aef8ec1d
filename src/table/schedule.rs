//! Columns built from weekly time windows and date ranges: possible shutdown
//! periods of inactive resources and the validity period of power schedules.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{InactiveInstance, PowerSchedule, ShutdownPeriod, WeekTime};
use crate::table::column::{compare_optional, CellContent, CellStrategy, ColumnDescriptor};

/// Entries shown before the "show more" toggle appears.
pub const DEFAULT_PERIODS_LIMIT: usize = 10;

const DAYS_OF_WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub fn week_time_label(time: &WeekTime) -> String {
    let day = DAYS_OF_WEEK
        .get(usize::from(time.day_of_week))
        .copied()
        .unwrap_or("Unknown day");
    format!("{} {:02}:00", day, time.hour)
}

pub fn shutdown_period_label(period: &ShutdownPeriod) -> String {
    format!(
        "{} - {}",
        week_time_label(&period.start),
        week_time_label(&period.end)
    )
}

/// List truncated to `limit` entries with a show more / show less toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpandableList {
    items: Vec<String>,
    limit: usize,
    expanded: bool,
}

impl ExpandableList {
    pub fn new(items: Vec<String>, limit: usize) -> Self {
        Self {
            items,
            limit,
            expanded: false,
        }
    }

    pub fn visible(&self) -> &[String] {
        if self.expanded || self.items.len() <= self.limit {
            &self.items
        } else {
            &self.items[..self.limit]
        }
    }

    pub fn has_toggle(&self) -> bool {
        self.items.len() > self.limit
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// No-op when every entry already fits.
    pub fn toggle(&mut self) {
        if self.has_toggle() {
            self.expanded = !self.expanded;
        }
    }

    pub fn toggle_label(&self) -> Option<&'static str> {
        match (self.has_toggle(), self.expanded) {
            (false, _) => None,
            (true, false) => Some("Show more"),
            (true, true) => Some("Show less"),
        }
    }
}

/// Sorts by start day of week, then start hour, and formats each period.
pub fn shutdown_periods_list(periods: &[ShutdownPeriod], limit: usize) -> ExpandableList {
    let mut sorted = periods.to_vec();
    sorted.sort_by_key(|period| period.start);
    ExpandableList::new(sorted.iter().map(shutdown_period_label).collect(), limit)
}

pub trait HasShutdownPeriods {
    fn shutdown_periods(&self) -> &[ShutdownPeriod];
}

impl HasShutdownPeriods for InactiveInstance {
    fn shutdown_periods(&self) -> &[ShutdownPeriod] {
        &self.inactivity_periods
    }
}

struct ShutdownPeriodsCell {
    limit: usize,
}

impl<T: HasShutdownPeriods> CellStrategy<T> for ShutdownPeriodsCell {
    fn render(&self, row: &T) -> CellContent {
        let periods = row.shutdown_periods();
        if periods.is_empty() {
            return CellContent::Empty;
        }
        CellContent::List(shutdown_periods_list(periods, self.limit))
    }
}

pub fn possible_shutdown_periods_column<T: HasShutdownPeriods>(limit: usize) -> ColumnDescriptor<T> {
    ColumnDescriptor::new(
        "possibleShutdownPeriods",
        "Possible shutdown periods",
        ShutdownPeriodsCell { limit },
    )
}

/// Date range a power schedule applies to, in unix seconds.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct ValidityPeriod {
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

fn format_date(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|date| date.format("%m/%d/%Y").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

pub fn format_validity_period(period: &ValidityPeriod) -> String {
    match (period.start_date, period.end_date) {
        (Some(start), Some(end)) => format!("{} - {}", format_date(start), format_date(end)),
        (Some(start), None) => format!("From {}", format_date(start)),
        (None, Some(end)) => format!("Until {}", format_date(end)),
        (None, None) => "-".to_string(),
    }
}

pub trait HasValidityPeriod {
    fn validity_period(&self) -> ValidityPeriod;
}

impl HasValidityPeriod for PowerSchedule {
    fn validity_period(&self) -> ValidityPeriod {
        ValidityPeriod {
            start_date: self.start_date,
            end_date: self.end_date,
        }
    }
}

struct ValidityPeriodCell;

impl<T: HasValidityPeriod> CellStrategy<T> for ValidityPeriodCell {
    fn render(&self, row: &T) -> CellContent {
        CellContent::Text(format_validity_period(&row.validity_period()))
    }

    fn sort(&self, a: &T, b: &T) -> Option<Ordering> {
        let (a, b) = (a.validity_period(), b.validity_period());
        Some(
            compare_optional(a.start_date, b.start_date, Ord::cmp)
                .then_with(|| compare_optional(a.end_date, b.end_date, Ord::cmp)),
        )
    }
}

pub fn power_schedule_validity_period_column<T: HasValidityPeriod>() -> ColumnDescriptor<T> {
    ColumnDescriptor::new("validityPeriod", "Validity period", ValidityPeriodCell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(start_day: u8, start_hour: u8, end_day: u8, end_hour: u8) -> ShutdownPeriod {
        ShutdownPeriod {
            start: WeekTime {
                day_of_week: start_day,
                hour: start_hour,
            },
            end: WeekTime {
                day_of_week: end_day,
                hour: end_hour,
            },
        }
    }

    #[test]
    fn formats_period_with_day_names() {
        assert_eq!(
            shutdown_period_label(&period(0, 22, 1, 6)),
            "Monday 22:00 - Tuesday 06:00"
        );
        assert_eq!(
            shutdown_period_label(&period(6, 0, 6, 23)),
            "Sunday 00:00 - Sunday 23:00"
        );
    }

    #[test]
    fn sorts_by_day_then_hour() {
        let list = shutdown_periods_list(
            &[period(2, 1, 2, 5), period(0, 20, 0, 23), period(0, 3, 0, 6)],
            DEFAULT_PERIODS_LIMIT,
        );

        assert_eq!(
            list.visible(),
            &[
                "Monday 03:00 - Monday 06:00".to_string(),
                "Monday 20:00 - Monday 23:00".to_string(),
                "Wednesday 01:00 - Wednesday 05:00".to_string(),
            ]
        );
        assert!(!list.has_toggle());
        assert_eq!(list.toggle_label(), None);
    }

    #[test]
    fn truncates_above_limit_and_toggles() {
        let periods: Vec<ShutdownPeriod> = (0..12u8)
            .rev()
            .map(|hour| period(3, hour, 3, hour + 1))
            .collect();
        let mut list = shutdown_periods_list(&periods, DEFAULT_PERIODS_LIMIT);

        assert_eq!(list.visible().len(), 10);
        assert!(list.has_toggle());
        assert_eq!(list.toggle_label(), Some("Show more"));
        assert_eq!(list.visible()[0], "Thursday 00:00 - Thursday 01:00");

        list.toggle();
        assert_eq!(list.visible().len(), 12);
        assert_eq!(list.visible()[11], "Thursday 11:00 - Thursday 12:00");
        assert_eq!(list.toggle_label(), Some("Show less"));

        list.toggle();
        assert_eq!(list.visible().len(), 10);
    }

    #[test]
    fn exactly_limit_entries_has_no_toggle() {
        let periods: Vec<ShutdownPeriod> = (0..10u8).map(|h| period(0, h, 0, h + 1)).collect();
        let mut list = shutdown_periods_list(&periods, 10);
        assert!(!list.has_toggle());
        list.toggle();
        assert!(!list.is_expanded());
    }

    fn schedule(id: &str, start_date: Option<i64>, end_date: Option<i64>) -> PowerSchedule {
        PowerSchedule {
            id: id.to_string(),
            start_date,
            end_date,
            ..Default::default()
        }
    }

    #[test]
    fn validity_period_column_renders_and_sorts() {
        let column = power_schedule_validity_period_column::<PowerSchedule>();
        let open_ended = schedule("open", None, Some(1_706_745_600));
        let january = schedule("jan", Some(1_704_067_200), Some(1_706_745_600));
        let january_short = schedule("jan-short", Some(1_704_067_200), Some(1_705_000_000));
        let january_forever = schedule("jan-forever", Some(1_704_067_200), None);

        assert_eq!(column.id, "validityPeriod");
        assert_eq!(
            column.render(&january),
            CellContent::Text("01/01/2024 - 02/01/2024".to_string())
        );
        assert_eq!(
            column.render(&schedule("none", None, None)),
            CellContent::Text("-".to_string())
        );

        // missing start ranks first
        assert_eq!(column.compare(&open_ended, &january), Some(Ordering::Less));
        assert_eq!(column.compare(&january, &open_ended), Some(Ordering::Greater));
        // equal starts fall back to end date, missing end first
        assert_eq!(column.compare(&january_short, &january), Some(Ordering::Less));
        assert_eq!(column.compare(&january_forever, &january_short), Some(Ordering::Less));
        assert_eq!(column.compare(&january, &january), Some(Ordering::Equal));
        assert_eq!(column.matches(&january, "2024"), None);
    }

    #[test]
    fn validity_period_variants() {
        let start = 1_704_067_200; // 2024-01-01
        let end = 1_706_745_600; // 2024-02-01

        assert_eq!(
            format_validity_period(&ValidityPeriod {
                start_date: Some(start),
                end_date: Some(end)
            }),
            "01/01/2024 - 02/01/2024"
        );
        assert_eq!(
            format_validity_period(&ValidityPeriod {
                start_date: Some(start),
                end_date: None
            }),
            "From 01/01/2024"
        );
        assert_eq!(
            format_validity_period(&ValidityPeriod {
                start_date: None,
                end_date: Some(end)
            }),
            "Until 02/01/2024"
        );
        assert_eq!(format_validity_period(&ValidityPeriod::default()), "-");
    }
}
