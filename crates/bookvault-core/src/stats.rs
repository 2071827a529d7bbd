//! Aggregate reading statistics
//!
//! Pure derivations over a record set: totals, top tag, reading-time
//! estimate, goal progress, and the trailing 7-day trend. `today` is passed
//! in by the caller so the computation stays deterministic and testable.

use chrono::{Days, NaiveDate};

use crate::models::{Book, Settings, TimeUnit};

/// Fallback reading speed when settings hold a non-positive value
const DEFAULT_PAGES_PER_UNIT: f64 = 30.0;

/// Reading-time estimate in whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingEstimate {
    pub value: u64,
    pub unit: TimeUnit,
}

/// Summary statistics over a record set
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryStats {
    /// Total number of records
    pub total_count: usize,
    /// Sum of pages over all records
    pub total_pages: u64,
    /// Tag with the highest occurrence count; `None` for an empty set
    pub top_tag: Option<String>,
    /// Estimated reading time for the whole collection
    pub estimate: ReadingEstimate,
    /// Goal progress as a percentage, capped at 100
    pub goal_percent: f64,
    /// Records added on each of the trailing 7 days, oldest first
    pub trend: [u32; 7],
}

/// Compute summary statistics for a record set.
pub fn compute_stats(books: &[Book], settings: &Settings, today: NaiveDate) -> LibraryStats {
    let total_count = books.len();
    let total_pages: u64 = books.iter().map(|b| u64::from(b.pages)).sum();

    let top_tag = top_tag(books);

    let speed = if settings.pages_per_unit > 0.0 {
        settings.pages_per_unit
    } else {
        DEFAULT_PAGES_PER_UNIT
    };
    let estimate = ReadingEstimate {
        value: (total_pages as f64 / speed).round() as u64,
        unit: settings.unit,
    };

    let goal_percent = if settings.target > 0 {
        (total_count as f64 / f64::from(settings.target) * 100.0).min(100.0)
    } else {
        0.0
    };

    let mut trend = [0u32; 7];
    for (slot, day) in trend_days(today).iter().enumerate() {
        let iso = day.format("%Y-%m-%d").to_string();
        trend[slot] = books.iter().filter(|b| b.date_added == iso).count() as u32;
    }

    LibraryStats {
        total_count,
        total_pages,
        top_tag,
        estimate,
        goal_percent,
        trend,
    }
}

/// The trailing 7 calendar days ending at `today`, oldest first
pub fn trend_days(today: NaiveDate) -> [NaiveDate; 7] {
    let mut days = [today; 7];
    for (slot, offset) in (0..7u64).rev().enumerate() {
        days[slot] = today - Days::new(offset);
    }
    days
}

/// Tag occurrence counts in first-encountered order
pub fn tag_counts(books: &[Book]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for book in books {
        match counts.iter_mut().find(|(tag, _)| *tag == book.tag) {
            Some((_, count)) => *count += 1,
            None => counts.push((book.tag.clone(), 1)),
        }
    }
    counts
}

/// Highest-count tag; ties go to the first-encountered tag.
fn top_tag(books: &[Book]) -> Option<String> {
    let mut top: Option<(String, usize)> = None;
    for (tag, count) in tag_counts(books) {
        let beats = match &top {
            Some((_, top_count)) => count > *top_count,
            None => true,
        };
        if beats {
            top = Some((tag, count));
        }
    }
    top.map(|(tag, _)| tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn book(tag: &str, pages: u32, date: &str) -> Book {
        let now = Utc::now();
        Book {
            id: format!("{}-{}", tag, pages),
            title: "Title".to_string(),
            author: "Author".to_string(),
            pages,
            tag: tag.to_string(),
            date_added: date.to_string(),
            cover_image: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap()
    }

    #[test]
    fn test_empty_set() {
        let stats = compute_stats(&[], &Settings::default(), today());
        assert_eq!(stats.total_count, 0);
        assert_eq!(stats.total_pages, 0);
        assert_eq!(stats.top_tag, None);
        assert_eq!(stats.goal_percent, 0.0);
        assert_eq!(stats.trend, [0; 7]);
    }

    #[test]
    fn test_empty_set_with_zero_target() {
        let settings = Settings {
            target: 0,
            ..Settings::default()
        };
        let stats = compute_stats(&[], &settings, today());
        assert_eq!(stats.goal_percent, 0.0);
    }

    #[test]
    fn test_totals() {
        let books = vec![
            book("SciFi", 412, "2024-01-01"),
            book("Fantasy", 310, "2024-01-02"),
        ];
        let stats = compute_stats(&books, &Settings::default(), today());
        assert_eq!(stats.total_count, 2);
        assert_eq!(stats.total_pages, 722);
    }

    #[test]
    fn test_top_tag_by_count() {
        let books = vec![
            book("Fantasy", 100, "2024-01-01"),
            book("SciFi", 100, "2024-01-01"),
            book("SciFi", 100, "2024-01-02"),
        ];
        let stats = compute_stats(&books, &Settings::default(), today());
        assert_eq!(stats.top_tag.as_deref(), Some("SciFi"));
    }

    #[test]
    fn test_top_tag_tie_goes_to_first_encountered() {
        let books = vec![
            book("Fantasy", 100, "2024-01-01"),
            book("SciFi", 100, "2024-01-01"),
            book("SciFi", 100, "2024-01-02"),
            book("Fantasy", 100, "2024-01-03"),
        ];
        let stats = compute_stats(&books, &Settings::default(), today());
        assert_eq!(stats.top_tag.as_deref(), Some("Fantasy"));
    }

    #[test]
    fn test_estimate_rounds_to_nearest_unit() {
        // 412 + 310 = 722 pages at 30 pages/hour = 24.07 -> 24
        let books = vec![
            book("SciFi", 412, "2024-01-01"),
            book("Fantasy", 310, "2024-01-02"),
        ];
        let stats = compute_stats(&books, &Settings::default(), today());
        assert_eq!(stats.estimate.value, 24);
        assert_eq!(stats.estimate.unit, TimeUnit::Hours);

        // 100 pages at 3/min = 33.33 -> 33; at 8/min = 12.5 -> 13 (round half up)
        let one = vec![book("SciFi", 100, "2024-01-01")];
        let settings = Settings {
            pages_per_unit: 8.0,
            unit: TimeUnit::Minutes,
            ..Settings::default()
        };
        let stats = compute_stats(&one, &settings, today());
        assert_eq!(stats.estimate.value, 13);
        assert_eq!(stats.estimate.unit, TimeUnit::Minutes);
    }

    #[test]
    fn test_estimate_guards_non_positive_speed() {
        let books = vec![book("SciFi", 300, "2024-01-01")];
        let settings = Settings {
            pages_per_unit: 0.0,
            ..Settings::default()
        };
        let stats = compute_stats(&books, &settings, today());
        // Falls back to the default speed of 30
        assert_eq!(stats.estimate.value, 10);
    }

    #[test]
    fn test_goal_percent_caps_at_100() {
        let books: Vec<Book> = (0..5).map(|i| book("Tag", i + 1, "2024-01-01")).collect();
        let settings = Settings {
            target: 4,
            ..Settings::default()
        };
        let stats = compute_stats(&books, &settings, today());
        assert_eq!(stats.goal_percent, 100.0);

        let settings = Settings {
            target: 10,
            ..Settings::default()
        };
        let stats = compute_stats(&books, &settings, today());
        assert_eq!(stats.goal_percent, 50.0);
    }

    #[test]
    fn test_trend_counts_exact_days_oldest_first() {
        let books = vec![
            book("Tag", 1, "2024-01-01"), // 6 days before today
            book("Tag", 2, "2024-01-01"),
            book("Tag", 3, "2024-01-07"), // today
            book("Tag", 4, "2023-12-31"), // outside the window
            book("Tag", 5, "2024-01-08"), // future, outside the window
        ];
        let stats = compute_stats(&books, &Settings::default(), today());
        assert_eq!(stats.trend, [2, 0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_trend_requires_exact_string_equality() {
        // A syntactically different spelling of the same day does not count
        let books = vec![book("Tag", 1, "2024-1-7")];
        let stats = compute_stats(&books, &Settings::default(), today());
        assert_eq!(stats.trend, [0; 7]);
    }

    #[test]
    fn test_trend_days_window() {
        let days = trend_days(today());
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(days[6], today());
    }

    #[test]
    fn test_tag_counts_first_encounter_order() {
        let books = vec![
            book("Fantasy", 1, "2024-01-01"),
            book("SciFi", 2, "2024-01-01"),
            book("Fantasy", 3, "2024-01-02"),
        ];
        let counts = tag_counts(&books);
        assert_eq!(
            counts,
            vec![("Fantasy".to_string(), 2), ("SciFi".to_string(), 1)]
        );
    }
}
