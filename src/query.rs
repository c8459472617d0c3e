//! Pure filter/sort/paginate pipeline for list views.
//!
//! Derivation only: the same (rows, spec, page, page size) always produce
//! the same page. Callers may memoize for performance, never for
//! correctness.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Rows that can be filtered, searched, and sorted by named field.
pub trait Queryable {
    /// Fields the free-text search runs over.
    const SEARCH_FIELDS: &'static [&'static str];

    /// All values this row carries for a field. Multi-valued fields
    /// (a client's tags) return one entry per value; unknown fields
    /// return nothing and so never match.
    fn field(&self, name: &str) -> Vec<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Declarative filter/sort specification.
///
/// Selected values within one category are OR-ed; distinct categories are
/// AND-ed; the free-text search is a case-insensitive substring match over
/// the row type's `SEARCH_FIELDS`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSpec {
    pub filters: BTreeMap<String, Vec<String>>,
    pub search: Option<String>,
    pub sort: Option<(String, SortDirection)>,
}

impl FilterSpec {
    pub fn new() -> Self {
        FilterSpec::default()
    }

    pub fn with_filter(
        mut self,
        field: impl Into<String>,
        values: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.filters
            .insert(field.into(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    pub fn with_sort(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.sort = Some((field.into(), direction));
        self
    }
}

/// One page of a filtered list, plus the counts the view derives badges
/// and pagers from.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Rows matching the spec, across all pages.
    pub total: usize,
    pub total_pages: usize,
    /// The 1-based page actually served (clamped into range).
    pub page: usize,
}

/// Filter, sort, and slice `rows` according to `spec`.
///
/// `page` is 1-based and clamped into range; a `page_size` of zero serves
/// everything on one page.
pub fn run_query<T: Queryable + Clone>(
    rows: &[T],
    spec: &FilterSpec,
    page: usize,
    page_size: usize,
) -> Page<T> {
    let mut matched: Vec<T> = rows
        .iter()
        .filter(|row| matches(*row, spec))
        .cloned()
        .collect();

    if let Some((field, direction)) = &spec.sort {
        matched.sort_by(|a, b| {
            let left = a.field(field).into_iter().next().unwrap_or_default();
            let right = b.field(field).into_iter().next().unwrap_or_default();
            match direction {
                SortDirection::Ascending => compare_values(&left, &right),
                SortDirection::Descending => compare_values(&right, &left),
            }
        });
    }

    let total = matched.len();
    if page_size == 0 {
        return Page {
            items: matched,
            total,
            total_pages: if total == 0 { 0 } else { 1 },
            page: 1,
        };
    }

    let total_pages = total.div_ceil(page_size);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * page_size;
    let items = matched
        .into_iter()
        .skip(start)
        .take(page_size)
        .collect();

    Page {
        items,
        total,
        total_pages,
        page,
    }
}

fn matches<T: Queryable>(row: &T, spec: &FilterSpec) -> bool {
    for (field, selected) in &spec.filters {
        if selected.is_empty() {
            continue;
        }
        let values = row.field(field);
        let hit = selected
            .iter()
            .any(|wanted| values.iter().any(|value| value == wanted));
        if !hit {
            return false;
        }
    }

    if let Some(needle) = &spec.search {
        let needle = needle.trim().to_lowercase();
        if !needle.is_empty() {
            let hit = T::SEARCH_FIELDS.iter().any(|field| {
                row.field(field)
                    .iter()
                    .any(|value| value.to_lowercase().contains(&needle))
            });
            if !hit {
                return false;
            }
        }
    }

    true
}

/// Numeric comparison when both sides parse as numbers, lexicographic
/// otherwise — so year and price columns sort sensibly.
fn compare_values(left: &str, right: &str) -> Ordering {
    match (left.parse::<f64>(), right.parse::<f64>()) {
        (Ok(l), Ok(r)) => l.partial_cmp(&r).unwrap_or(Ordering::Equal),
        _ => left.cmp(right),
    }
}
