use super::*;

fn book(id: i64, title: &str, author: Option<&str>, area: &str) -> Book {
    Book {
        id,
        cover_url: format!("https://covers.example/{id}.jpg"),
        title: title.to_owned(),
        author: author.map(str::to_owned),
        area: area.to_owned(),
        description: None,
        link: None,
        download: None,
    }
}

fn loaded() -> LibraryState {
    let mut state = LibraryState::default();
    state.begin_load();
    state.finish_load(Ok(vec![
        book(1, "Processo Civil", Some("Didier"), "Civil"),
        book(2, "Direito Penal", Some("Greco"), "Penal"),
        book(3, "Ética Profissional", Some("Lôbo"), "Civil"),
        book(4, "Contratos", None, "Civil"),
    ]));
    state
}

#[test]
fn finish_load_success_and_failure() {
    let state = loaded();
    assert!(!state.loading);
    assert!(state.loaded);
    assert_eq!(state.books.len(), 4);

    let mut failed = LibraryState::default();
    failed.begin_load();
    failed.finish_load(Err("offline".to_owned()));
    assert!(!failed.loaded);
    assert_eq!(failed.error.as_deref(), Some("offline"));
}

#[test]
fn visible_books_scopes_to_area_and_sorts_by_title() {
    let mut state = loaded();
    state.select_area(Some("Civil".to_owned()));
    let titles: Vec<String> = state.visible_books().into_iter().map(|b| b.title).collect();
    assert_eq!(titles, ["Contratos", "Ética Profissional", "Processo Civil"]);
}

#[test]
fn visible_books_applies_search_and_author_sort() {
    let mut state = loaded();
    state.select_area(Some("Civil".to_owned()));
    state.toggle_sort();
    assert_eq!(state.sort, SortKey::Author);
    let ids: Vec<i64> = state.visible_books().into_iter().map(|b| b.id).collect();
    assert_eq!(ids, [4, 1, 3]);

    state.search = "didier".to_owned();
    let ids: Vec<i64> = state.visible_books().into_iter().map(|b| b.id).collect();
    assert_eq!(ids, [1]);
}

#[test]
fn changing_area_resets_search_and_preview() {
    let mut state = loaded();
    state.select_area(Some("Civil".to_owned()));
    state.search = "ética".to_owned();
    state.open_preview(3);
    assert!(state.preview.is_some());

    state.select_area(Some("Civil".to_owned()));
    assert_eq!(state.search, "ética");

    state.select_area(Some("Penal".to_owned()));
    assert!(state.search.is_empty());
    assert!(state.preview.is_none());
}

#[test]
fn open_preview_ignores_unknown_id() {
    let mut state = loaded();
    state.open_preview(99);
    assert!(state.preview.is_none());
    state.open_preview(2);
    assert_eq!(state.preview.as_ref().map(|b| b.id), Some(2));
    state.close_preview();
    assert!(state.preview.is_none());
}

#[test]
fn area_summaries_cover_every_area() {
    let summaries = loaded().area_summaries();
    let areas: Vec<&str> = summaries.iter().map(|s| s.area.as_str()).collect();
    assert_eq!(areas, ["Civil", "Penal"]);
    assert_eq!(summaries[0].count, 3);
}

#[test]
fn reader_context_carries_book_details() {
    let state = loaded();
    let ctx = reader_context(state.find(2).unwrap());
    assert_eq!(
        ctx,
        TutorContext::Book { title: "Direito Penal".to_owned(), area: Some("Penal".to_owned()), author: Some("Greco".to_owned()) }
    );
    assert!(browsing_context().supports_image_explain());
}
