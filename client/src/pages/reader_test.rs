use super::*;
use models::book::Book;

fn library() -> LibraryState {
    let mut state = LibraryState::default();
    state.finish_load(Ok(vec![Book {
        id: 7,
        cover_url: String::new(),
        title: "Manual de Direito Constitucional".to_owned(),
        author: Some("Mendes".to_owned()),
        area: "Constitucional".to_owned(),
        description: None,
        link: Some("https://reader.example/7".to_owned()),
        download: None,
    }]));
    state
}

#[test]
fn parse_book_id_accepts_numeric_param() {
    assert_eq!(parse_book_id(Some("42".to_owned())), Some(42));
    assert_eq!(parse_book_id(Some("abc".to_owned())), None);
    assert_eq!(parse_book_id(None), None);
}

#[test]
fn context_for_known_book_is_book_context() {
    let ctx = context_for(&library(), Some(7));
    assert!(matches!(ctx, TutorContext::Book { ref title, .. } if title == "Manual de Direito Constitucional"));
}

#[test]
fn context_for_unknown_book_falls_back_to_library() {
    assert_eq!(context_for(&library(), Some(8)), browsing_context());
    assert_eq!(context_for(&library(), None), browsing_context());
}
