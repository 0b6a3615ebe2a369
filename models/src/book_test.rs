use super::*;

// =============================================================
// Helpers
// =============================================================

fn book(id: i64, title: &str, author: Option<&str>, area: &str, about: Option<&str>) -> Book {
    Book {
        id,
        cover_url: format!("https://covers.test/{id}.jpg"),
        title: title.to_owned(),
        author: author.map(str::to_owned),
        area: area.to_owned(),
        description: about.map(str::to_owned),
        link: None,
        download: None,
    }
}

fn catalog() -> Vec<Book> {
    vec![
        book(1, "Curso de Direito Civil", Some("Flávio Tartuce"), "Direito Civil", Some("Parte geral e contratos")),
        book(2, "Ética Profissional", Some("Paulo Lôbo"), "Ética", None),
        book(3, "Manual de Processo Penal", Some("Renato Brasileiro"), "Processo Penal", Some("Inquérito e ação penal")),
        book(4, "Direito Constitucional Esquematizado", None, "Direito Constitucional", None),
        book(5, "Execução Penal", Some("Alexis Couto"), "Processo Penal", Some("Lei de execução comentada")),
    ]
}

fn ids(books: &[Book]) -> Vec<i64> {
    books.iter().map(|b| b.id).collect()
}

// =============================================================
// Filtering
// =============================================================

#[test]
fn filter_matches_title_case_insensitively() {
    let out = filter_books(&catalog(), "PROCESSO");
    assert_eq!(ids(&out), vec![3]);
}

#[test]
fn filter_matches_author() {
    let out = filter_books(&catalog(), "tartuce");
    assert_eq!(ids(&out), vec![1]);
}

#[test]
fn filter_matches_description() {
    let out = filter_books(&catalog(), "COMENTADA");
    assert_eq!(ids(&out), vec![5]);
}

#[test]
fn filter_with_empty_term_keeps_everything_in_order() {
    let out = filter_books(&catalog(), "");
    assert_eq!(ids(&out), vec![1, 2, 3, 4, 5]);
}

#[test]
fn filter_keeps_whitespace_in_the_term() {
    let books = vec![
        book(1, "Direito Civil", None, "Direito Civil", None),
        book(2, "Penal", None, "Direito Penal", None),
    ];
    assert!(filter_books(&books, "civil ").is_empty());
    assert_eq!(ids(&filter_books(&books, " ")), vec![1]);
}

#[test]
fn filter_results_all_contain_the_term() {
    let term = "penal";
    for b in filter_books(&catalog(), term) {
        let hit = b.title.to_lowercase().contains(term)
            || b.author.as_deref().is_some_and(|a| a.to_lowercase().contains(term))
            || b.description.as_deref().is_some_and(|d| d.to_lowercase().contains(term));
        assert!(hit, "book {} does not contain {term}", b.id);
    }
}

#[test]
fn filter_without_hits_is_empty() {
    assert!(filter_books(&catalog(), "tributário").is_empty());
}

// =============================================================
// Sorting
// =============================================================

#[test]
fn sort_by_title_folds_accents() {
    let mut books = catalog();
    sort_books(&mut books, SortKey::Title);
    // "Ética" sorts with the e's, not after "Z".
    assert_eq!(ids(&books), vec![1, 4, 2, 5, 3]);
}

#[test]
fn sort_by_author_puts_missing_author_first() {
    let mut books = catalog();
    sort_books(&mut books, SortKey::Author);
    assert_eq!(ids(&books), vec![4, 5, 1, 2, 3]);
}

#[test]
fn sort_key_toggles_between_title_and_author() {
    assert_eq!(SortKey::Title.toggle(), SortKey::Author);
    assert_eq!(SortKey::Author.toggle(), SortKey::Title);
    assert_eq!(SortKey::default(), SortKey::Title);
}

#[test]
fn sort_key_parses_select_values() {
    assert_eq!(SortKey::parse("title"), Some(SortKey::Title));
    assert_eq!(SortKey::parse("Autor"), Some(SortKey::Author));
    assert_eq!(SortKey::parse("year"), None);
}

#[test]
fn filter_and_sort_combines_both_steps() {
    let out = filter_and_sort(&catalog(), "penal", SortKey::Title);
    assert_eq!(ids(&out), vec![5, 3]);
}

#[test]
fn collate_is_case_insensitive_with_raw_tie_break() {
    assert_eq!(collate("abc", "ABD"), Ordering::Less);
    assert_eq!(collate("Órgão", "orgaos"), Ordering::Less);
    assert_eq!(collate("Ética", "Execução"), Ordering::Less);
    assert_eq!(collate("same", "same"), Ordering::Equal);
}

// =============================================================
// Areas
// =============================================================

#[test]
fn areas_are_distinct_and_collated() {
    assert_eq!(
        areas(&catalog()),
        vec!["Direito Civil", "Direito Constitucional", "Ética", "Processo Penal"]
    );
}

#[test]
fn area_summaries_cap_preview_and_count_overflow() {
    let mut books = catalog();
    for id in 10..13 {
        books.push(book(id, &format!("Penal {id}"), None, "Processo Penal", None));
    }
    let summaries = area_summaries(&books);
    let penal = summaries
        .iter()
        .find(|s| s.area == "Processo Penal")
        .expect("penal area");
    assert_eq!(penal.count, 5);
    assert_eq!(penal.preview.len(), AREA_PREVIEW_LEN);
    assert_eq!(penal.overflow, 2);
    assert_eq!(penal.preview[0], "https://covers.test/3.jpg");
}

#[test]
fn books_in_area_keeps_catalog_order() {
    assert_eq!(ids(&books_in_area(&catalog(), "Processo Penal")), vec![3, 5]);
}

#[test]
fn count_label_handles_singular() {
    assert_eq!(book_count_label(1), "1 livro encontrado");
    assert_eq!(book_count_label(0), "0 livros encontrados");
    assert_eq!(book_count_label(7), "7 livros encontrados");
}

// =============================================================
// Wire format
// =============================================================

#[test]
fn book_deserializes_from_catalog_row() {
    let row = serde_json::json!({
        "id": 9,
        "imagem": "https://covers.test/9.jpg",
        "livro": "Direito Tributário",
        "autor": null,
        "area": "Direito Tributário",
        "link": "https://reader.test/9",
    });
    let b: Book = serde_json::from_value(row).unwrap();
    assert_eq!(b.title, "Direito Tributário");
    assert!(b.author.is_none());
    assert!(b.has_reader_link());
    assert!(!b.has_download());
}

#[test]
fn book_without_cover_reports_it() {
    let mut b = book(1, "x", None, "a", None);
    b.cover_url = "  ".to_owned();
    assert!(!b.has_cover());
}

#[test]
fn null_cover_deserializes_as_empty() {
    let row = serde_json::json!({ "id": 1, "imagem": null, "livro": "x", "area": "a" });
    let b: Book = serde_json::from_value(row).unwrap();
    assert!(!b.has_cover());
}
