//! Book command handlers

use anyhow::{bail, Context, Result};
use chrono::Local;

use bookvault_core::{
    run_query, validate_all, validate_author, validate_date, validate_pages, validate_tag,
    validate_title, Book, BookForm, BookPatch, BookStore, NewBook, SearchState, SortDirection,
    SortField,
};

use crate::output::{short_id, Output};
use crate::prompt::confirm;
use crate::storage::VaultStorage;

/// Fields collected for `book add`
pub struct CreateArgs {
    pub title: String,
    pub author: String,
    pub pages: String,
    pub tag: String,
    pub date: Option<String>,
    pub cover_image: Option<String>,
}

/// Optional fields collected for `book edit`
#[derive(Default)]
pub struct EditArgs {
    pub title: Option<String>,
    pub author: Option<String>,
    pub pages: Option<String>,
    pub tag: Option<String>,
    pub date: Option<String>,
    pub cover_image: Option<String>,
}

/// Add a new book after validating every field
pub fn create(storage: &VaultStorage, args: CreateArgs, output: &Output) -> Result<()> {
    let mut store = storage.load_library()?;

    let form = BookForm {
        title: args.title,
        author: args.author,
        pages: args.pages,
        tag: args.tag,
        date_added: args.date.unwrap_or_else(today_iso),
    };

    let report = validate_all(&form);
    if !report.is_valid() {
        output.print_validation_errors(&report);
        bail!("Validation failed");
    }

    let pages: u32 = form
        .pages
        .trim()
        .parse()
        .context("Pages value is out of range")?;

    let book = store.add(NewBook {
        title: form.title,
        author: form.author.trim().to_string(),
        pages,
        tag: form.tag.trim().to_string(),
        date_added: form.date_added.trim().to_string(),
        cover_image: args.cover_image,
    });
    let id = book.id.clone();
    let title = book.title.clone();

    storage.save_library(&store).context("Failed to save library")?;

    output.success(&format!("Added \"{}\" ({})", title, short_id(&id)));
    Ok(())
}

/// List books through the query pipeline
pub fn list(
    storage: &VaultStorage,
    query: Option<String>,
    case_sensitive: bool,
    sort: Option<String>,
    direction: Option<String>,
    output: &Output,
) -> Result<()> {
    let store = storage.load_library()?;
    let mut settings = storage.load_settings()?;

    // Command-line flags override the stored sort settings for this run only
    if let Some(field) = sort {
        settings.sort_field = field.parse::<SortField>().map_err(anyhow::Error::msg)?;
    }
    if let Some(dir) = direction {
        settings.sort_direction = dir.parse::<SortDirection>().map_err(anyhow::Error::msg)?;
    }

    let search = SearchState::new(query.unwrap_or_default(), case_sensitive);
    let view = run_query(store.list(), &search, &settings);
    output.print_books(&view);
    Ok(())
}

/// Show a single book
pub fn show(storage: &VaultStorage, id: String, output: &Output) -> Result<()> {
    let store = storage.load_library()?;
    let book = resolve_id(&store, &id)?;
    output.print_book(book);
    Ok(())
}

/// Edit a book, validating only the fields provided
pub fn edit(storage: &VaultStorage, id: String, args: EditArgs, output: &Output) -> Result<()> {
    let mut store = storage.load_library()?;
    let book_id = resolve_id(&store, &id)?.id.clone();

    if let Some(ref title) = args.title {
        if let Err(msg) = validate_title(title) {
            bail!("title: {}", msg);
        }
    }
    if let Some(ref author) = args.author {
        if let Err(msg) = validate_author(author) {
            bail!("author: {}", msg);
        }
    }
    if let Some(ref pages) = args.pages {
        if let Err(msg) = validate_pages(pages) {
            bail!("pages: {}", msg);
        }
    }
    if let Some(ref tag) = args.tag {
        if let Err(msg) = validate_tag(tag) {
            bail!("tag: {}", msg);
        }
    }
    if let Some(ref date) = args.date {
        if let Err(msg) = validate_date(date) {
            bail!("dateAdded: {}", msg);
        }
    }

    let pages = match args.pages {
        Some(raw) => Some(
            raw.trim()
                .parse::<u32>()
                .context("Pages value is out of range")?,
        ),
        None => None,
    };

    let patch = BookPatch {
        title: args.title,
        author: args.author.map(|a| a.trim().to_string()),
        pages,
        tag: args.tag.map(|t| t.trim().to_string()),
        date_added: args.date.map(|d| d.trim().to_string()),
        cover_image: args.cover_image,
    };

    if !store.update(&book_id, patch) {
        bail!("Book not found: {}", id);
    }

    storage.save_library(&store).context("Failed to save library")?;

    output.success("Book updated");
    if let Some(book) = store.get(&book_id) {
        output.print_book(book);
    }
    Ok(())
}

/// Delete a book, asking for confirmation on a TTY
pub fn delete(storage: &VaultStorage, id: String, output: &Output) -> Result<()> {
    let mut store = storage.load_library()?;
    let book = resolve_id(&store, &id)?;
    let book_id = book.id.clone();
    let title = book.title.clone();

    if output.should_prompt() {
        println!("Delete book: {} - {}", short_id(&book_id), title);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.remove(&book_id);
    storage.save_library(&store).context("Failed to save library")?;

    output.success(&format!("Deleted \"{}\"", title));
    Ok(())
}

/// Search books and emphasize the matched spans
pub fn search(
    storage: &VaultStorage,
    query: String,
    case_sensitive: bool,
    output: &Output,
) -> Result<()> {
    let store = storage.load_library()?;
    let settings = storage.load_settings()?;

    let search = SearchState::new(query.clone(), case_sensitive);
    let view = run_query(store.list(), &search, &settings);
    output.print_matches(&view, &query, case_sensitive);
    Ok(())
}

/// Resolve a full id or a unique id prefix to a record
fn resolve_id<'a>(store: &'a BookStore, input: &str) -> Result<&'a Book> {
    if let Some(book) = store.get(input) {
        return Ok(book);
    }

    let matches: Vec<&Book> = store
        .list()
        .iter()
        .filter(|b| b.id.starts_with(input))
        .collect();

    match matches.len() {
        0 => bail!("Book not found: {}", input),
        1 => Ok(matches[0]),
        n => bail!("Ambiguous id prefix '{}' matches {} books", input, n),
    }
}

/// Today's local date in ISO format
pub fn today_iso() -> String {
    Local::now().date_naive().format("%Y-%m-%d").to_string()
}
