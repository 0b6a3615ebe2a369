//! Legal book catalog records and the list-view transforms over them.
//!
//! DESIGN
//! ======
//! Field names on the wire follow the remote `biblioteca_juridica` table so
//! rows deserialize without an intermediate DTO. Ordering uses a folded
//! collation key instead of raw byte order so accented Portuguese titles
//! ("Ética", "Órgãos") land next to their unaccented neighbours.

#[cfg(test)]
#[path = "book_test.rs"]
mod book_test;

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Number of cover thumbnails shown on an area card.
pub const AREA_PREVIEW_LEN: usize = 3;

/// A book in the legal library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Row identifier in the remote catalog.
    pub id: i64,
    /// Cover image URL; empty when the row has no cover.
    #[serde(rename = "imagem", default, deserialize_with = "string_or_null")]
    pub cover_url: String,
    /// Book title.
    #[serde(rename = "livro")]
    pub title: String,
    #[serde(rename = "autor", default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Subject area (e.g. `"Direito Civil"`).
    pub area: String,
    #[serde(rename = "sobre", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// External reading link, rendered inside the reader frame.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download: Option<String>,
}

impl Book {
    /// Whether the reader can embed this book.
    #[must_use]
    pub fn has_reader_link(&self) -> bool {
        self.link.as_deref().is_some_and(|l| !l.trim().is_empty())
    }

    #[must_use]
    pub fn has_download(&self) -> bool {
        self.download.as_deref().is_some_and(|d| !d.trim().is_empty())
    }

    #[must_use]
    pub fn has_cover(&self) -> bool {
        !self.cover_url.trim().is_empty()
    }

    /// Case-insensitive match of `term` against title, author or description.
    ///
    /// Only the empty term matches every book; whitespace is part of the term.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        let needle = term.to_lowercase();
        if needle.is_empty() {
            return true;
        }
        let contains = |field: &str| field.to_lowercase().contains(&needle);
        contains(&self.title)
            || self.author.as_deref().is_some_and(contains)
            || self.description.as_deref().is_some_and(contains)
    }
}

/// Ordering applied to the book list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    #[default]
    Title,
    Author,
}

impl SortKey {
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::Title,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "Ordenar por Título",
            Self::Author => "Ordenar por Autor",
        }
    }

    /// Parse the select-box value (`"title"` / `"author"`).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "title" | "titulo" => Some(Self::Title),
            "author" | "autor" => Some(Self::Author),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
        }
    }
}

/// Summary shown on an area card in the library grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AreaSummary {
    pub area: String,
    pub count: usize,
    /// Cover URLs of the first books in the area (empty string for coverless rows).
    pub preview: Vec<String>,
    /// Books not shown in `preview`.
    pub overflow: usize,
}

/// Books whose title, author or description contain `term`, in input order.
#[must_use]
pub fn filter_books(books: &[Book], term: &str) -> Vec<Book> {
    books.iter().filter(|b| b.matches(term)).cloned().collect()
}

/// Stable sort by the collation key of the chosen field.
///
/// Books without an author compare as the empty string.
pub fn sort_books(books: &mut [Book], key: SortKey) {
    books.sort_by(|a, b| match key {
        SortKey::Title => collate(&a.title, &b.title),
        SortKey::Author => collate(a.author.as_deref().unwrap_or(""), b.author.as_deref().unwrap_or("")),
    });
}

/// The list view pipeline: filter, then sort.
#[must_use]
pub fn filter_and_sort(books: &[Book], term: &str, key: SortKey) -> Vec<Book> {
    let mut out = filter_books(books, term);
    sort_books(&mut out, key);
    out
}

/// Group books by subject area. Each group keeps catalog order.
#[must_use]
pub fn group_by_area(books: &[Book]) -> BTreeMap<String, Vec<Book>> {
    let mut groups: BTreeMap<String, Vec<Book>> = BTreeMap::new();
    for book in books {
        groups.entry(book.area.clone()).or_default().push(book.clone());
    }
    groups
}

/// Distinct areas in collation order.
#[must_use]
pub fn areas(books: &[Book]) -> Vec<String> {
    let mut out: Vec<String> = group_by_area(books).into_keys().collect();
    out.sort_by(|a, b| collate(a, b));
    out
}

/// Per-area card data, in the same order as [`areas`].
#[must_use]
pub fn area_summaries(books: &[Book]) -> Vec<AreaSummary> {
    let mut groups = group_by_area(books);
    areas(books)
        .into_iter()
        .map(|area| {
            let items = groups.remove(&area).unwrap_or_default();
            let preview: Vec<String> = items
                .iter()
                .take(AREA_PREVIEW_LEN)
                .map(|b| b.cover_url.clone())
                .collect();
            AreaSummary { count: items.len(), overflow: items.len().saturating_sub(preview.len()), preview, area }
        })
        .collect()
}

/// Books belonging to `area`, in catalog order.
#[must_use]
pub fn books_in_area(books: &[Book], area: &str) -> Vec<Book> {
    books.iter().filter(|b| b.area == area).cloned().collect()
}

/// Result-count caption for the list header.
#[must_use]
pub fn book_count_label(count: usize) -> String {
    if count == 1 {
        "1 livro encontrado".to_owned()
    } else {
        format!("{count} livros encontrados")
    }
}

/// Compare two strings the way a reader expects a Portuguese index to read.
#[must_use]
pub fn collate(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.cmp(b))
}

/// Lowercased, accent-folded form of `s` used as the primary sort key.
#[must_use]
pub fn collation_key(s: &str) -> String {
    s.chars().flat_map(char::to_lowercase).map(fold_accent).collect()
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

fn string_or_null<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
