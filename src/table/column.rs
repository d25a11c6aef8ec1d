use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::ml::GoalEvaluation;
use crate::table::schedule::ExpandableList;

/// What a cell renders to. Front-ends map each variant onto a widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellContent {
    Empty,
    Text(String),
    Number(f64),
    Money(f64),
    Lines(Vec<String>),
    List(ExpandableList),
    Goals(Vec<GoalEvaluation>),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }
}

/// Render, sort and filter behaviour of a column.
///
/// `sort` and `filter` return `None` when the column does not take part in
/// sorting or global filtering.
pub trait CellStrategy<T>: Send + Sync {
    fn render(&self, row: &T) -> CellContent;

    fn sort(&self, _a: &T, _b: &T) -> Option<Ordering> {
        None
    }

    fn filter(&self, _row: &T, _query: &str) -> Option<bool> {
        None
    }
}

pub struct ColumnDescriptor<T> {
    pub id: String,
    pub header: String,
    pub default_sort: Option<SortDirection>,
    pub enable_sorting: bool,
    strategy: Arc<dyn CellStrategy<T>>,
}

impl<T> Clone for ColumnDescriptor<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            default_sort: self.default_sort,
            enable_sorting: self.enable_sorting,
            strategy: Arc::clone(&self.strategy),
        }
    }
}

impl<T> fmt::Debug for ColumnDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("default_sort", &self.default_sort)
            .field("enable_sorting", &self.enable_sorting)
            .finish_non_exhaustive()
    }
}

impl<T> ColumnDescriptor<T> {
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        strategy: impl CellStrategy<T> + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            default_sort: None,
            enable_sorting: true,
            strategy: Arc::new(strategy),
        }
    }

    pub fn with_default_sort(mut self, direction: SortDirection) -> Self {
        self.default_sort = Some(direction);
        self
    }

    pub fn without_sorting(mut self) -> Self {
        self.enable_sorting = false;
        self.default_sort = None;
        self
    }

    pub fn render(&self, row: &T) -> CellContent {
        self.strategy.render(row)
    }

    pub fn compare(&self, a: &T, b: &T) -> Option<Ordering> {
        if !self.enable_sorting {
            return None;
        }
        self.strategy.sort(a, b)
    }

    pub fn matches(&self, row: &T, query: &str) -> Option<bool> {
        self.strategy.filter(row, query)
    }
}

/// Orders optional values with a missing value ranked before any present one.
pub fn compare_optional<V, F>(a: Option<V>, b: Option<V>, cmp: F) -> Ordering
where
    F: FnOnce(&V, &V) -> Ordering,
{
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => cmp(&a, &b),
    }
}

/// Total order over floats, so NaN never breaks a sort.
pub fn compare_f64(a: &f64, b: &f64) -> Ordering {
    a.total_cmp(b)
}

/// Case-insensitive substring match used by global filters.
pub fn contains_ignore_case(haystack: &str, query: &str) -> bool {
    haystack.to_lowercase().contains(&query.to_lowercase())
}

struct TextCell<F> {
    accessor: F,
}

impl<T, F> CellStrategy<T> for TextCell<F>
where
    F: Fn(&T) -> Option<String> + Send + Sync,
{
    fn render(&self, row: &T) -> CellContent {
        match (self.accessor)(row) {
            Some(text) => CellContent::Text(text),
            None => CellContent::Empty,
        }
    }

    fn sort(&self, a: &T, b: &T) -> Option<Ordering> {
        Some(compare_optional(
            (self.accessor)(a),
            (self.accessor)(b),
            |a, b| a.to_lowercase().cmp(&b.to_lowercase()),
        ))
    }

    fn filter(&self, row: &T, query: &str) -> Option<bool> {
        Some(
            (self.accessor)(row)
                .map(|text| contains_ignore_case(&text, query))
                .unwrap_or(false),
        )
    }
}

pub fn text_column<T, F>(id: &str, header: &str, accessor: F) -> ColumnDescriptor<T>
where
    F: Fn(&T) -> Option<String> + Send + Sync + 'static,
{
    ColumnDescriptor::new(id, header, TextCell { accessor })
}

struct MoneyCell<F> {
    accessor: F,
}

impl<T, F> CellStrategy<T> for MoneyCell<F>
where
    F: Fn(&T) -> f64 + Send + Sync,
{
    fn render(&self, row: &T) -> CellContent {
        CellContent::Money((self.accessor)(row))
    }

    fn sort(&self, a: &T, b: &T) -> Option<Ordering> {
        Some(compare_f64(&(self.accessor)(a), &(self.accessor)(b)))
    }
}

/// Cost column; sorted descending unless the table overrides it.
pub fn money_column<T, F>(id: &str, header: &str, accessor: F) -> ColumnDescriptor<T>
where
    F: Fn(&T) -> f64 + Send + Sync + 'static,
{
    ColumnDescriptor::new(id, header, MoneyCell { accessor }).with_default_sort(SortDirection::Desc)
}
