//! Record matching and match highlighting
//!
//! The query is treated as a regular expression when it compiles; when it
//! does not, matching degrades to plain substring containment so a
//! half-typed pattern never breaks the search. Highlighting wraps matched
//! spans in `<mark>` markers; the display layer decides how to render them.

use regex::RegexBuilder;

use crate::models::Book;

/// Opening marker placed around highlighted spans
pub const MARK_OPEN: &str = "<mark>";
/// Closing marker placed around highlighted spans
pub const MARK_CLOSE: &str = "</mark>";

/// Does a record match the query?
///
/// An empty query matches everything. Otherwise the query is tested as a
/// regular expression (case-insensitive unless `case_sensitive`) against
/// title, author, and tag; a hit on any field is a match. Invalid patterns
/// fall back to substring containment over the same fields.
pub fn matches(book: &Book, query: &str, case_sensitive: bool) -> bool {
    if query.is_empty() {
        return true;
    }

    match RegexBuilder::new(query)
        .case_insensitive(!case_sensitive)
        .build()
    {
        Ok(re) => {
            re.is_match(&book.title) || re.is_match(&book.author) || re.is_match(&book.tag)
        }
        Err(_) => {
            let fields = [&book.title, &book.author, &book.tag];
            if case_sensitive {
                fields.iter().any(|f| f.contains(query))
            } else {
                let q = query.to_lowercase();
                fields.iter().any(|f| f.to_lowercase().contains(&q))
            }
        }
    }
}

/// Wrap every non-overlapping occurrence of `query` in highlight markers.
///
/// Returns the text unchanged for an empty query or a pattern that does not
/// compile. Never panics regardless of query content.
pub fn highlight(text: &str, query: &str, case_sensitive: bool) -> String {
    if query.is_empty() {
        return text.to_string();
    }

    match RegexBuilder::new(query)
        .case_insensitive(!case_sensitive)
        .build()
    {
        Ok(re) => re
            .replace_all(text, format!("{}$0{}", MARK_OPEN, MARK_CLOSE).as_str())
            .into_owned(),
        Err(_) => text.to_string(),
    }
}
