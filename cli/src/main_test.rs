use super::*;

fn book(id: i64, title: &str, author: Option<&str>, area: &str) -> Book {
    Book {
        id,
        cover_url: String::new(),
        title: title.to_owned(),
        author: author.map(str::to_owned),
        area: area.to_owned(),
        description: None,
        link: None,
        download: None,
    }
}

fn catalog() -> Vec<Book> {
    vec![
        book(1, "Manual de Direito Penal", Some("Zaffaroni"), "Direito Penal"),
        book(2, "Curso de Direito Civil", Some("Tartuce"), "Direito Civil"),
        book(3, "Álgebra Penal", Some("Bitencourt"), "Direito Penal"),
    ]
}

#[test]
fn cli_parses_books_flags() {
    let cli = Cli::try_parse_from(["lexdesk-cli", "books", "--area", "Direito Penal", "--sort", "author"])
        .expect("valid args");
    match cli.command {
        Command::Books { area, search, sort } => {
            assert_eq!(area.as_deref(), Some("Direito Penal"));
            assert!(search.is_none());
            assert_eq!(sort, SortArg::Author);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn cli_mind_map_defaults_to_text() {
    let cli = Cli::try_parse_from(["lexdesk-cli", "mind-map", "aula.pdf"]).expect("valid args");
    assert!(matches!(cli.command, Command::MindMap { format: MapFormat::Text, .. }));
}

#[test]
fn cli_signin_requires_password() {
    assert!(Cli::try_parse_from(["lexdesk-cli", "signin", "--email", "a@b.c"]).is_err());
}

#[test]
fn select_books_scopes_to_area_and_sorts() {
    let selected = select_books(&catalog(), Some("Direito Penal"), "", SortKey::Title);
    let titles: Vec<_> = selected.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, ["Álgebra Penal", "Manual de Direito Penal"]);
}

#[test]
fn select_books_searches_whole_catalog_without_area() {
    let selected = select_books(&catalog(), None, "tartuce", SortKey::Author);
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].id, 2);
}

#[test]
fn book_line_marks_missing_author() {
    let line = book_line(&book(9, "Sem Autor", None, "Direito Civil"));
    assert!(line.contains("Autor desconhecido"));
    assert!(line.contains("Direito Civil"));
}

#[test]
fn ask_context_prefers_book() {
    let ctx = ask_context(Some("Curso".into()), Some("Direito Civil".into()));
    assert_eq!(ctx, TutorContext::Book { title: "Curso".into(), area: Some("Direito Civil".into()), author: None });
    assert_eq!(ask_context(None, None), TutorContext::General { area: None });
}

#[test]
fn mime_for_path_is_case_insensitive() {
    assert_eq!(mime_for_path("notas/Aula.PDF"), "application/pdf");
    assert_eq!(mime_for_path("resumo.txt"), "text/plain");
    assert_eq!(mime_for_path("sem_extensao"), "application/octet-stream");
}

#[test]
fn file_data_encodes_base64_and_keeps_file_name() {
    let data = file_data("/tmp/docs/resumo.txt", b"lei");
    assert_eq!(data.data, "bGVp");
    assert_eq!(data.name, "resumo.txt");
    assert_eq!(data.mime_type, "text/plain");
}

#[test]
fn error_message_prefers_gateway_error_body() {
    assert_eq!(error_message(r#"{"error":"Sessão expirada"}"#), "Sessão expirada");
    assert_eq!(error_message(" bad gateway \n"), "bad gateway");
}

#[test]
fn url_joins_without_double_slash() {
    let ctx = CliContext { base_url: "http://localhost:3000/".into(), session_token: None };
    assert_eq!(url(&ctx, "/api/books"), "http://localhost:3000/api/books");
}

#[test]
fn render_map_text_starts_with_title() {
    let map = MindMap::create("m".into(), "Contratos", "Resumo", 0).expect("valid title");
    let text = render_map(&map, MapFormat::Text).expect("text render");
    assert!(text.starts_with("Contratos\n"));
    let json = render_map(&map, MapFormat::Json).expect("json render");
    assert!(json.contains("\"titulo\": \"Contratos\""));
}
