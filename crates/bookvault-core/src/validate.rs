//! Field validation for book records
//!
//! Each field is checked against a fixed set of pattern rules; the first
//! failing rule wins and its message is reported back for display next to
//! the input. `validate_all` collects failures for every field so a form
//! can mark all of them at once, in a fixed declaration order that makes
//! the "first invalid field" deterministic.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Title: no leading/trailing whitespace
    static ref RE_TITLE_TRIM: Regex = Regex::new(r"^\S(.*\S)?$").unwrap();
    /// Word runs, used by the consecutive-duplicate check
    static ref RE_WORD: Regex = Regex::new(r"\w+").unwrap();
    /// Author/Tag: letter runs joined by a single space or hyphen
    static ref RE_NAME: Regex = Regex::new(r"^[A-Za-z]+(?:[ -][A-Za-z]+)*$").unwrap();
    /// Pages: positive integer with no leading zero
    static ref RE_PAGES: Regex = Regex::new(r"^[1-9]\d*$").unwrap();
    /// Date: YYYY-MM-DD with month 01-12 and day 01-31
    ///
    /// Deliberately unaware of month lengths and leap years; the day range
    /// is checked syntactically for every month.
    static ref RE_DATE: Regex =
        Regex::new(r"^\d{4}-(0[1-9]|1[0-2])-(0[1-9]|[12]\d|3[01])$").unwrap();
}

/// Maximum accepted title length in characters
const TITLE_MAX_LEN: usize = 200;

/// A validatable book field, in fixed declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Title,
    Author,
    Pages,
    Tag,
    DateAdded,
}

impl Field {
    /// All fields in declaration order
    pub const ALL: [Field; 5] = [
        Field::Title,
        Field::Author,
        Field::Pages,
        Field::Tag,
        Field::DateAdded,
    ];

    /// Field name as used in persisted data and error listings
    pub fn name(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Author => "author",
            Field::Pages => "pages",
            Field::Tag => "tag",
            Field::DateAdded => "dateAdded",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw form input for a book, exactly as the user typed it
#[derive(Debug, Clone, Default)]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub pages: String,
    pub tag: String,
    pub date_added: String,
}

/// Outcome of validating every field of a form
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    errors: Vec<(Field, &'static str)>,
}

impl ValidationReport {
    /// True when every field passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Failing fields with their messages, in declaration order
    pub fn errors(&self) -> &[(Field, &'static str)] {
        &self.errors
    }

    /// The first failing field, for focus-on-error behavior
    pub fn first_error(&self) -> Option<(Field, &'static str)> {
        self.errors.first().copied()
    }

    /// Message for a specific field, if it failed
    pub fn message(&self, field: Field) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, msg)| *msg)
    }
}

/// Validate the title field
pub fn validate_title(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err("Title is required.");
    }
    if value.chars().count() > TITLE_MAX_LEN {
        return Err("Title must be 200 characters or fewer.");
    }
    if !RE_TITLE_TRIM.is_match(value) {
        return Err("Title must not start or end with spaces.");
    }
    if has_duplicate_word(value) {
        return Err("Title contains duplicate consecutive words.");
    }
    Ok(())
}

/// Validate the author field
pub fn validate_author(value: &str) -> Result<(), &'static str> {
    let v = value.trim();
    if v.is_empty() {
        return Err("Author is required.");
    }
    if !RE_NAME.is_match(v) {
        return Err("Author must contain only letters, spaces, and hyphens.");
    }
    Ok(())
}

/// Validate the pages field (raw text, possibly from an input widget)
pub fn validate_pages(value: &str) -> Result<(), &'static str> {
    let v = value.trim();
    if v.is_empty() {
        return Err("Pages is required.");
    }
    if !RE_PAGES.is_match(v) {
        return Err("Pages must be a positive whole number.");
    }
    Ok(())
}

/// Validate the tag field
pub fn validate_tag(value: &str) -> Result<(), &'static str> {
    let v = value.trim();
    if v.is_empty() {
        return Err("Tag is required.");
    }
    if !RE_NAME.is_match(v) {
        return Err("Tag must contain only letters, spaces, and hyphens.");
    }
    Ok(())
}

/// Validate the date-added field
pub fn validate_date(value: &str) -> Result<(), &'static str> {
    let v = value.trim();
    if v.is_empty() {
        return Err("Date is required.");
    }
    if !RE_DATE.is_match(v) {
        return Err("Date must be in YYYY-MM-DD format.");
    }
    Ok(())
}

/// Validate a single field by name
pub fn validate_field(field: Field, value: &str) -> Result<(), &'static str> {
    match field {
        Field::Title => validate_title(value),
        Field::Author => validate_author(value),
        Field::Pages => validate_pages(value),
        Field::Tag => validate_tag(value),
        Field::DateAdded => validate_date(value),
    }
}

/// Validate every field of a form, collecting all failures
pub fn validate_all(form: &BookForm) -> ValidationReport {
    let mut report = ValidationReport::default();
    for field in Field::ALL {
        let value = match field {
            Field::Title => &form.title,
            Field::Author => &form.author,
            Field::Pages => &form.pages,
            Field::Tag => &form.tag,
            Field::DateAdded => &form.date_added,
        };
        if let Err(msg) = validate_field(field, value) {
            report.errors.push((field, msg));
        }
    }
    report
}

/// Check for the same word repeated back-to-back, case-insensitively.
///
/// Equivalent to the back-reference pattern `\b(\w+)\s+\1\b`: two word runs
/// count as duplicates only when nothing but whitespace separates them.
fn has_duplicate_word(text: &str) -> bool {
    let mut prev: Option<(usize, &str)> = None;
    for m in RE_WORD.find_iter(text) {
        if let Some((prev_end, prev_word)) = prev {
            let gap = &text[prev_end..m.start()];
            if !gap.is_empty()
                && gap.chars().all(char::is_whitespace)
                && m.as_str().to_lowercase() == prev_word.to_lowercase()
            {
                return true;
            }
        }
        prev = Some((m.end(), m.as_str()));
    }
    false
}
