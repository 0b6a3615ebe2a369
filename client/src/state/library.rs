//! Library catalog state: area grid, filtered list and reader selection.
//!
//! SYSTEM CONTEXT
//! ==============
//! The catalog is fetched once per visit; every view (areas, list, reader)
//! is derived from the cached rows plus the user's search and sort choices.

#[cfg(test)]
#[path = "library_test.rs"]
mod library_test;

use models::book::{AreaSummary, Book, SortKey, area_summaries, books_in_area, filter_and_sort};
use models::chat::{LIBRARY_AREA, TutorContext};

#[derive(Clone, Debug, Default)]
pub struct LibraryState {
    pub books: Vec<Book>,
    pub loading: bool,
    pub loaded: bool,
    pub error: Option<String>,
    pub area: Option<String>,
    pub search: String,
    pub sort: SortKey,
    /// Book shown in the preview dialog.
    pub preview: Option<Book>,
}

impl LibraryState {
    pub fn begin_load(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn finish_load(&mut self, result: Result<Vec<Book>, String>) {
        self.loading = false;
        match result {
            Ok(books) => {
                self.books = books;
                self.loaded = true;
            }
            Err(e) => self.error = Some(e),
        }
    }

    /// Enter an area's list view. Search and preview are reset on change.
    pub fn select_area(&mut self, area: Option<String>) {
        if self.area != area {
            self.search.clear();
            self.preview = None;
        }
        self.area = area;
    }

    pub fn toggle_sort(&mut self) {
        self.sort = self.sort.toggle();
    }

    /// Books in the selected area (or the whole catalog), filtered and sorted.
    #[must_use]
    pub fn visible_books(&self) -> Vec<Book> {
        match &self.area {
            Some(area) => filter_and_sort(&books_in_area(&self.books, area), &self.search, self.sort),
            None => filter_and_sort(&self.books, &self.search, self.sort),
        }
    }

    #[must_use]
    pub fn area_summaries(&self) -> Vec<AreaSummary> {
        area_summaries(&self.books)
    }

    #[must_use]
    pub fn find(&self, id: i64) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    pub fn open_preview(&mut self, id: i64) {
        self.preview = self.find(id).cloned();
    }

    pub fn close_preview(&mut self) {
        self.preview = None;
    }
}

/// Tutor context for the reader page.
#[must_use]
pub fn reader_context(book: &Book) -> TutorContext {
    TutorContext::Book {
        title: book.title.clone(),
        area: Some(book.area.clone()).filter(|a| !a.is_empty()),
        author: book.author.clone(),
    }
}

/// Tutor context for the library browsing views.
#[must_use]
pub fn browsing_context() -> TutorContext {
    TutorContext::General { area: Some(LIBRARY_AREA.to_owned()) }
}
