use std::path::Path;

use base64::{Engine as _, engine::general_purpose};
use clap::{Parser, Subcommand, ValueEnum};
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

use models::api::{
    ErrorBody, MindMapRequest, MindMapResponse, SessionResponse, SignInRequest, TutorRequest, TutorResponse,
};
use models::book::{self, Book, SortKey};
use models::chat::{FileData, TutorContext};
use models::mind_map::{MindMap, MindMapError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing session token; pass --session-token or set LEXDESK_SESSION_TOKEN")]
    MissingSessionToken,
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),
    #[error("server returned HTTP {status}: {message}")]
    ServerError { status: u16, message: String },
    #[error("missing expected field `{0}`")]
    MissingField(&'static str),
    #[error("cannot read {path}: {source}")]
    ReadFile { path: String, source: std::io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("mind map export failed: {0}")]
    MindMap(#[from] MindMapError),
}

#[derive(Parser, Debug)]
#[command(name = "lexdesk-cli", about = "LexDesk gateway command-line client")]
struct Cli {
    #[arg(long, env = "LEXDESK_BASE_URL", default_value = "http://127.0.0.1:3000")]
    base_url: String,

    #[arg(long, env = "LEXDESK_SESSION_TOKEN")]
    session_token: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone)]
struct CliContext {
    base_url: String,
    session_token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Ping,
    /// Sign in and print the session token for `LEXDESK_SESSION_TOKEN`.
    Signin {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Print the signed-in user and profile.
    Session,
    /// List catalog books.
    Books {
        #[arg(long)]
        area: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value_t = SortArg::Title)]
        sort: SortArg,
    },
    /// Ask the tutor a question.
    Ask {
        question: String,
        /// Title of the book being studied.
        #[arg(long)]
        book: Option<String>,
        #[arg(long)]
        area: Option<String>,
    },
    /// Generate a mind map from a document.
    MindMap {
        file: String,
        #[arg(long, value_enum, default_value_t = MapFormat::Text)]
        format: MapFormat,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum SortArg {
    Title,
    Author,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Title => Self::Title,
            SortArg::Author => Self::Author,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum MapFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let ctx = CliContext { base_url: cli.base_url, session_token: cli.session_token };

    match cli.command {
        Command::Ping => run_ping(&ctx).await,
        Command::Signin { email, password } => run_signin(&ctx, email, password).await,
        Command::Session => run_session(&ctx).await,
        Command::Books { area, search, sort } => run_books(&ctx, area, search, sort.into()).await,
        Command::Ask { question, book, area } => run_ask(&ctx, question, book, area).await,
        Command::MindMap { file, format } => run_mind_map(&ctx, &file, format).await,
    }
}

async fn run_ping(cli: &CliContext) -> Result<(), CliError> {
    let client = reqwest::Client::new();
    let response = client.get(url(cli, "/healthz")).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: "health check failed".to_owned() });
    }
    println!("ok");
    Ok(())
}

async fn run_signin(cli: &CliContext, email: String, password: String) -> Result<(), CliError> {
    let body = SignInRequest { email, password };
    let session: SessionResponse =
        send_json(cli, reqwest::Method::POST, "/api/auth/signin", Some(&body), false).await?;
    let token = session.access_token.ok_or(CliError::MissingField("access_token"))?;
    eprintln!("signed in as {}", session.profile.full_name);
    println!("{token}");
    Ok(())
}

async fn run_session(cli: &CliContext) -> Result<(), CliError> {
    let session: SessionResponse =
        send_json::<(), _>(cli, reqwest::Method::GET, "/api/auth/session", None, true).await?;
    print_json(&session)
}

async fn run_books(
    cli: &CliContext,
    area: Option<String>,
    search: Option<String>,
    sort: SortKey,
) -> Result<(), CliError> {
    let books: Vec<Book> = send_json::<(), _>(cli, reqwest::Method::GET, "/api/books", None, false).await?;
    let selected = select_books(&books, area.as_deref(), search.as_deref().unwrap_or(""), sort);
    for line in selected.iter().map(book_line) {
        println!("{line}");
    }
    eprintln!("{}", book::book_count_label(selected.len()));
    Ok(())
}

async fn run_ask(
    cli: &CliContext,
    question: String,
    book: Option<String>,
    area: Option<String>,
) -> Result<(), CliError> {
    let request = TutorRequest { context: ask_context(book, area), question, image_data: None, history: Vec::new() };
    let response: TutorResponse = send_json(cli, reqwest::Method::POST, "/api/tutor", Some(&request), true).await?;
    println!("{}", response.reply);
    Ok(())
}

async fn run_mind_map(cli: &CliContext, path: &str, format: MapFormat) -> Result<(), CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| CliError::ReadFile { path: path.to_owned(), source })?;
    let request = MindMapRequest { file: file_data(path, &bytes) };
    let response: MindMapResponse =
        send_json(cli, reqwest::Method::POST, "/api/mind-maps/generate", Some(&request), true).await?;
    println!("{}", render_map(&response.map, format)?);
    Ok(())
}

fn url(cli: &CliContext, path: &str) -> String {
    format!("{}{}", cli.base_url.trim_end_matches('/'), path)
}

async fn send_json<B, T>(
    cli: &CliContext,
    method: reqwest::Method,
    path: &str,
    body: Option<&B>,
    authenticated: bool,
) -> Result<T, CliError>
where
    B: Serialize + ?Sized,
    T: DeserializeOwned,
{
    let mut headers = HeaderMap::new();
    if let Some(session_token) = cli.session_token.as_deref() {
        headers.insert(COOKIE, HeaderValue::from_str(&format!("session_token={session_token}"))?);
    } else if authenticated {
        return Err(CliError::MissingSessionToken);
    }

    let client = reqwest::Client::builder().default_headers(headers).build()?;
    let request = client.request(method, url(cli, path));
    let request = if let Some(json) = body { request.json(json) } else { request };

    let response = request.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(CliError::ServerError { status: status.as_u16(), message: error_message(&text) });
    }

    Ok(serde_json::from_str(&text)?)
}

/// The gateway's `{ "error": ... }` message, or the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body).map_or_else(|_| body.trim().to_owned(), |e| e.error)
}

fn select_books(books: &[Book], area: Option<&str>, search: &str, sort: SortKey) -> Vec<Book> {
    let scoped = match area {
        Some(area) => book::books_in_area(books, area),
        None => books.to_vec(),
    };
    book::filter_and_sort(&scoped, search, sort)
}

fn book_line(book: &Book) -> String {
    let author = book.author.as_deref().unwrap_or("Autor desconhecido");
    format!("{:>5}  {} | {} | {}", book.id, book.title, author, book.area)
}

fn ask_context(book: Option<String>, area: Option<String>) -> TutorContext {
    match book {
        Some(title) => TutorContext::Book { title, area, author: None },
        None => TutorContext::General { area },
    }
}

fn file_data(path: &str, bytes: &[u8]) -> FileData {
    let name = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path)
        .to_owned();
    FileData { data: general_purpose::STANDARD.encode(bytes), mime_type: mime_for_path(path).to_owned(), name }
}

fn mime_for_path(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

fn render_map(map: &MindMap, format: MapFormat) -> Result<String, CliError> {
    Ok(match format {
        MapFormat::Text => map.to_text(),
        MapFormat::Json => map.to_json()?,
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
