//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)

use chrono::NaiveDate;

use bookvault_core::{
    highlight, trend_days, Book, LibraryStats, Settings, ValidationReport, MARK_CLOSE, MARK_OPEN,
};

/// ANSI sequence substituted for the opening highlight marker
const ANSI_MARK: &str = "\x1b[1;33m";
/// ANSI reset substituted for the closing highlight marker
const ANSI_RESET: &str = "\x1b[0m";

/// Sentinel shown when there is no data for the top tag
const NO_DATA: &str = "\u{2014}";

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single book with all its fields
    pub fn print_book(&self, book: &Book) {
        match self.format {
            OutputFormat::Human => {
                println!("ID:       {}", book.id);
                println!("Title:    {}", book.title);
                println!("Author:   {}", book.author);
                println!("Pages:    {}", book.pages);
                println!("Tag:      {}", book.tag);
                println!("Added:    {}", book.date_added);
                if book.cover_image.is_some() {
                    println!("Cover:    (attached)");
                }
                println!("Created:  {}", book.created_at.format("%Y-%m-%d %H:%M"));
                println!("Updated:  {}", book.updated_at.format("%Y-%m-%d %H:%M"));
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(book).unwrap());
            }
            OutputFormat::Quiet => {
                println!("{}", book.id);
            }
        }
    }

    /// Print a list of books, one row per record
    pub fn print_books(&self, books: &[&Book]) {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No books found.");
                    return;
                }
                for book in books {
                    println!(
                        "{} | {} | {} | {:>4}p | {} | {}",
                        short_id(&book.id),
                        truncate(&book.title, 35),
                        truncate(&book.author, 20),
                        book.pages,
                        truncate(&book.tag, 12),
                        book.date_added
                    );
                }
                println!("\n{} book(s)", books.len());
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(books).unwrap());
            }
            OutputFormat::Quiet => {
                for book in books {
                    println!("{}", book.id);
                }
            }
        }
    }

    /// Print search results with matched spans emphasized
    pub fn print_matches(&self, books: &[&Book], query: &str, case_sensitive: bool) {
        match self.format {
            OutputFormat::Human => {
                if books.is_empty() {
                    println!("No books matched.");
                    return;
                }
                for book in books {
                    let title = highlight(&book.title, query, case_sensitive);
                    let author = highlight(&book.author, query, case_sensitive);
                    let tag = highlight(&book.tag, query, case_sensitive);
                    println!(
                        "{} | {} | {} | {}",
                        short_id(&book.id),
                        render_marks(&title),
                        render_marks(&author),
                        render_marks(&tag)
                    );
                }
                println!("\n{} match(es)", books.len());
            }
            _ => self.print_books(books),
        }
    }

    /// Print the statistics panel
    pub fn print_stats(&self, stats: &LibraryStats, settings: &Settings, today: NaiveDate) {
        match self.format {
            OutputFormat::Human => {
                println!("Books:       {}", stats.total_count);
                println!(
                    "Total pages: {} ({} {})",
                    stats.total_pages,
                    stats.estimate.value,
                    stats.estimate.unit.label()
                );
                println!(
                    "Top tag:     {}",
                    stats.top_tag.as_deref().unwrap_or(NO_DATA)
                );
                println!(
                    "Goal:        {} / {} ({:.0}%)",
                    stats.total_count, settings.target, stats.goal_percent
                );
                println!();
                println!("Last 7 days:");
                for (day, count) in trend_days(today).iter().zip(stats.trend.iter()) {
                    println!(
                        "  {}  {:<2} {}",
                        day.format("%Y-%m-%d"),
                        count,
                        "\u{2587}".repeat(*count as usize)
                    );
                }
            }
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({
                        "totalCount": stats.total_count,
                        "totalPages": stats.total_pages,
                        "topTag": stats.top_tag,
                        "estimate": {
                            "value": stats.estimate.value,
                            "unit": stats.estimate.unit.as_str()
                        },
                        "goalPercent": stats.goal_percent,
                        "trend": stats.trend
                    })
                );
            }
            OutputFormat::Quiet => {
                println!("{}", stats.total_count);
            }
        }
    }

    /// Print a list of tags with usage counts
    pub fn print_tags(&self, tags: &[(String, usize)]) {
        match self.format {
            OutputFormat::Human => {
                if tags.is_empty() {
                    println!("No tags found.");
                    return;
                }
                for (name, count) in tags {
                    println!("{} ({})", name, count);
                }
                println!("\n{} tag(s)", tags.len());
            }
            OutputFormat::Json => {
                let json_tags: Vec<_> = tags
                    .iter()
                    .map(|(name, count)| serde_json::json!({"name": name, "count": count}))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&json_tags).unwrap());
            }
            OutputFormat::Quiet => {
                for (name, _) in tags {
                    println!("{}", name);
                }
            }
        }
    }

    /// Print per-field validation failures
    pub fn print_validation_errors(&self, report: &ValidationReport) {
        match self.format {
            OutputFormat::Human => {
                for (field, message) in report.errors() {
                    println!("  {}: {}", field, message);
                }
            }
            OutputFormat::Json => {
                let errors: serde_json::Map<String, serde_json::Value> = report
                    .errors()
                    .iter()
                    .map(|(field, message)| {
                        (field.name().to_string(), serde_json::Value::from(*message))
                    })
                    .collect();
                println!(
                    "{}",
                    serde_json::json!({"status": "error", "errors": errors})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("\u{2713} {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

/// Swap highlight markers for ANSI emphasis
fn render_marks(s: &str) -> String {
    s.replace(MARK_OPEN, ANSI_MARK).replace(MARK_CLOSE, ANSI_RESET)
}

/// First 8 characters of an id; imported ids may be short or non-ASCII
pub(crate) fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Truncate a string to max length, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
