//! Book extraction from HTML documents
//!
//! Finds `<h3>` headings and pairs each with an immediately following
//! element carrying the `author` class. Headings without a title text are
//! skipped; missing authors fall back to a placeholder.

use scraper::{ElementRef, Html, Selector};

/// Author used when no `.author` element follows a heading
const UNKNOWN_AUTHOR: &str = "Unknown Author";

/// A title/author pair found in a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedBook {
    pub title: String,
    pub author: String,
}

/// Extract candidate books from an HTML fragment or document.
pub fn extract_books(html: &str) -> Vec<ScrapedBook> {
    let document = Html::parse_document(html);
    let Ok(heading) = Selector::parse("h3") else {
        return Vec::new();
    };

    let mut books = Vec::new();
    for h in document.select(&heading) {
        let title = h.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            continue;
        }

        let author = h
            .next_siblings()
            .find_map(ElementRef::wrap)
            .filter(|el| el.value().classes().any(|c| c == "author"))
            .map(|el| el.text().collect::<String>().trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());

        books.push(ScrapedBook { title, author });
    }

    books
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_title_author_pairs() {
        let html = r#"
            <h3>Dune</h3><p class="author">Frank Herbert</p>
            <h3>The Hobbit</h3><p class="author">Tolkien</p>
        "#;
        let books = extract_books(html);
        assert_eq!(books.len(), 2);
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[0].author, "Frank Herbert");
        assert_eq!(books[1].author, "Tolkien");
    }

    #[test]
    fn test_missing_author_gets_placeholder() {
        let html = "<h3>Dune</h3><p>Not an author element</p>";
        let books = extract_books(html);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].author, "Unknown Author");
    }

    #[test]
    fn test_author_must_immediately_follow() {
        // An .author element that is not the next sibling does not pair up
        let html = r#"<h3>Dune</h3><p>filler</p><p class="author">Herbert</p>"#;
        let books = extract_books(html);
        assert_eq!(books[0].author, "Unknown Author");
    }

    #[test]
    fn test_skips_empty_headings() {
        let html = r#"<h3>  </h3><h3>Dune</h3>"#;
        let books = extract_books(html);
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune");
    }

    #[test]
    fn test_no_headings_yields_nothing() {
        assert!(extract_books("<p>plain text</p>").is_empty());
    }
}
