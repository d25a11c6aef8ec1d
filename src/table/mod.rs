//! Column descriptors binding records to table cells, and the small table
//! model that applies their sort and global filter behaviour.

pub mod column;
pub mod goals;
pub mod location;
pub mod schedule;

pub use column::{
    money_column, text_column, CellContent, CellStrategy, ColumnDescriptor, SortDirection,
};
pub use goals::{compare_metric_values, goals_column, GoalsColumnOptions, HasMetrics};
pub use location::{resource_location_column, HasLocation, ResourceLocation};
pub use schedule::{
    possible_shutdown_periods_column, power_schedule_validity_period_column, ExpandableList,
    HasShutdownPeriods, HasValidityPeriod, ValidityPeriod, DEFAULT_PERIODS_LIMIT,
};

use std::fmt;

use tracing::debug;

pub struct Table<T> {
    columns: Vec<ColumnDescriptor<T>>,
}

impl<T> fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Table").field("columns", &self.columns).finish()
    }
}

impl<T> Table<T> {
    pub fn new(columns: Vec<ColumnDescriptor<T>>) -> Self {
        Self { columns }
    }

    pub fn column(&self, id: &str) -> Option<&ColumnDescriptor<T>> {
        self.columns.iter().find(|column| column.id == id)
    }

    /// First column declaring a default sort.
    pub fn default_sort(&self) -> Option<(&str, SortDirection)> {
        self.columns.iter().find_map(|column| {
            column
                .default_sort
                .map(|direction| (column.id.as_str(), direction))
        })
    }

    /// Keeps rows matched by at least one filterable column. An empty query
    /// keeps everything.
    pub fn filter_rows<'a>(&self, rows: &'a [T], query: &str) -> Vec<&'a T> {
        let query = query.trim();
        if query.is_empty() {
            return rows.iter().collect();
        }

        rows.iter()
            .filter(|row| {
                self.columns
                    .iter()
                    .any(|column| column.matches(row, query).unwrap_or(false))
            })
            .collect()
    }

    /// Stable sort by the given column. Unknown or unsortable columns leave
    /// the order untouched.
    pub fn sort_rows(&self, rows: &mut [&T], column_id: &str, direction: SortDirection) {
        let Some(column) = self.column(column_id) else {
            debug!("Ignoring sort on unknown column '{}'", column_id);
            return;
        };

        rows.sort_by(|a, b| {
            column
                .compare(a, b)
                .map(|ordering| direction.apply(ordering))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    }

    /// Filtered then sorted rows; `sort` falls back to the default sort.
    pub fn view<'a>(
        &self,
        rows: &'a [T],
        query: &str,
        sort: Option<(&str, SortDirection)>,
    ) -> Vec<&'a T> {
        let mut visible = self.filter_rows(rows, query);
        if let Some((column_id, direction)) = sort.or_else(|| self.default_sort()) {
            self.sort_rows(&mut visible, column_id, direction);
        }
        visible
    }

    pub fn render_row(&self, row: &T) -> Vec<(String, CellContent)> {
        self.columns
            .iter()
            .map(|column| (column.id.clone(), column.render(row)))
            .collect()
    }
}
