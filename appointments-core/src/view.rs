//! Filter, sort and paginate over a loaded snapshot.
//!
//! Everything here is pure: a [`ViewState`] is recomputed from the full
//! snapshot and a [`ViewQuery`] every time, applying filter, then sort, then
//! pagination.

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions};

use crate::appointment::{Appointment, Column, parse_time};

/// Page sizes the list offers.
pub const PAGE_SIZE_OPTIONS: [usize; 4] = [5, 10, 25, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// The single active sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: Column,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(column: Column) -> Self {
        SortSpec {
            column,
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(column: Column) -> Self {
        SortSpec {
            column,
            direction: SortDirection::Descending,
        }
    }

    /// Sort after the user selects `column`.
    ///
    /// The same column cycles ascending → descending → unsorted. Another
    /// column always starts at ascending.
    pub fn toggle(current: Option<SortSpec>, column: Column) -> Option<SortSpec> {
        match current {
            Some(spec) if spec.column == column => match spec.direction {
                SortDirection::Ascending => Some(SortSpec::descending(column)),
                SortDirection::Descending => None,
            },
            _ => Some(SortSpec::ascending(column)),
        }
    }
}

/// User-controlled inputs of the list view.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewQuery {
    pub filter: String,
    pub sort: Option<SortSpec>,
    pub page_size: usize,
    pub page_index: usize,
}

impl Default for ViewQuery {
    fn default() -> Self {
        ViewQuery {
            filter: String::new(),
            sort: None,
            page_size: PAGE_SIZE_OPTIONS[0],
            page_index: 0,
        }
    }
}

impl ViewQuery {
    pub fn with_page_size(page_size: usize) -> Self {
        ViewQuery {
            page_size,
            ..ViewQuery::default()
        }
    }
}

/// What the list currently shows.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Rows of the current page.
    pub rows: Vec<Appointment>,
    /// Records left after filtering, across all pages.
    pub matched: usize,
    /// Records in the snapshot.
    pub total: usize,
    pub page_index: usize,
    pub page_count: usize,
    pub page_size: usize,
    pub sort: Option<SortSpec>,
}

impl ViewState {
    /// One-based positions of the first and last row shown, if any.
    pub fn row_range(&self) -> Option<(usize, usize)> {
        if self.rows.is_empty() {
            return None;
        }
        let first = self.page_index * self.page_size + 1;
        Some((first, first + self.rows.len() - 1))
    }

    pub fn has_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count
    }

    pub fn has_previous_page(&self) -> bool {
        self.page_index > 0
    }
}

/// Derive the visible page from the snapshot.
pub fn derive_view(snapshot: &[Appointment], query: &ViewQuery) -> ViewState {
    let mut rows = filter(snapshot, &query.filter);

    if let Some(spec) = query.sort {
        sort(&mut rows, spec);
    }

    let page_size = query.page_size.max(1);
    let matched = rows.len();
    let page_count = page_count(matched, page_size);
    let page_index = clamp_page(query.page_index, page_count);

    let rows = rows
        .into_iter()
        .skip(page_index * page_size)
        .take(page_size)
        .cloned()
        .collect();

    ViewState {
        rows,
        matched,
        total: snapshot.len(),
        page_index,
        page_count,
        page_size,
        sort: query.sort,
    }
}

/// Records whose search text contains the trimmed, lowercased query.
pub fn filter<'a>(snapshot: &'a [Appointment], query: &str) -> Vec<&'a Appointment> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return snapshot.iter().collect();
    }

    snapshot
        .iter()
        .filter(|a| a.search_text().contains(&needle))
        .collect()
}

/// Stable sort by one column.
pub fn sort(rows: &mut [&Appointment], spec: SortSpec) {
    let text = TextOrder::new();
    match spec.direction {
        SortDirection::Ascending => rows.sort_by(|a, b| compare(a, b, spec.column, &text)),
        SortDirection::Descending => {
            rows.sort_by(|a, b| compare(a, b, spec.column, &text).reverse())
        }
    }
}

/// Order two records by the semantic type of `column`.
pub fn compare(a: &Appointment, b: &Appointment, column: Column, text: &TextOrder) -> Ordering {
    match column {
        Column::Date => a.date.cmp(&b.date),
        Column::Time => parse_time(&a.time)
            .cmp(&parse_time(&b.time))
            .then_with(|| a.time.cmp(&b.time)),
        Column::CustomerName => text.compare(&a.customer_name, &b.customer_name),
        Column::Address => text.compare(&a.address, &b.address),
        Column::City => text.compare(&a.city, &b.city),
        Column::Cost => a.cost.total_cmp(&b.cost),
    }
}

/// Locale-aware ordering for text columns.
///
/// Uses the root collation, so `Élise` sorts next to `Elise` rather than
/// after `Zanetti`. Strings the collator considers equal fall back to code
/// point order, which keeps the result total.
pub struct TextOrder {
    collator: Option<Collator>,
}

impl TextOrder {
    pub fn new() -> Self {
        let collator = Collator::try_new(&Default::default(), CollatorOptions::new())
            .inspect_err(|e| {
                tracing::warn!(error = %e, "collation data unavailable, sorting by code point");
            })
            .ok();
        TextOrder { collator }
    }

    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let order = match &self.collator {
            Some(collator) => collator.compare(a, b),
            None => a.to_lowercase().cmp(&b.to_lowercase()),
        };
        order.then_with(|| a.cmp(b))
    }
}

impl Default for TextOrder {
    fn default() -> Self {
        Self::new()
    }
}

/// Number of pages needed for `len` rows.
pub fn page_count(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Keep a page index inside `[0, page_count - 1]`; zero when there are no pages.
pub fn clamp_page(page_index: usize, page_count: usize) -> usize {
    page_index.min(page_count.saturating_sub(1))
}
