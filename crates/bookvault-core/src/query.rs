//! Query pipeline: filter then sort
//!
//! Derives the view-ready record order from the full record set, the
//! current search state, and the sort settings. Holds no state of its own;
//! callers re-run it whenever records, search, or settings change.

use std::cmp::Ordering;

use crate::models::{Book, SearchState, Settings, SortDirection, SortField};
use crate::search::matches;

/// Filter records through the matcher, then stable-sort by the configured
/// field.
///
/// String fields compare case-insensitively; pages compare numerically;
/// dates compare lexicographically on the ISO string. Equal keys keep
/// their insertion order.
pub fn run_query<'a>(
    books: &'a [Book],
    search: &SearchState,
    settings: &Settings,
) -> Vec<&'a Book> {
    let mut view: Vec<&Book> = books
        .iter()
        .filter(|b| matches(b, &search.query, search.case_sensitive))
        .collect();

    view.sort_by(|a, b| {
        let ord = compare_by_field(a, b, settings.sort_field);
        match settings.sort_direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });

    view
}

fn compare_by_field(a: &Book, b: &Book, field: SortField) -> Ordering {
    match field {
        SortField::Title => fold(&a.title).cmp(&fold(&b.title)),
        SortField::Author => fold(&a.author).cmp(&fold(&b.author)),
        SortField::Pages => a.pages.cmp(&b.pages),
        SortField::Tag => fold(&a.tag).cmp(&fold(&b.tag)),
        SortField::DateAdded => a.date_added.cmp(&b.date_added),
    }
}

fn fold(s: &str) -> String {
    s.to_lowercase()
}
