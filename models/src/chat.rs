//! Tutor conversation records and prompt assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser keeps the ordered message list; the server turns the latest
//! question plus the study context into the single prompt string the hosted
//! chat function expects. Both sides share the strings defined here so the
//! greeting shown to the student and the context sent to the model agree.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use serde::{Deserialize, Serialize};

/// Messages of prior conversation forwarded with each question.
pub const HISTORY_WINDOW: usize = 5;

/// Upper bound on characters sent to speech synthesis.
pub const SPEECH_MAX_CHARS: usize = 500;

/// Area name under which the library-wide tutor allows image explanations.
pub const LIBRARY_AREA: &str = "Biblioteca Jurídica";

/// Assistant reply shown whenever the chat function fails.
pub const FALLBACK_REPLY: &str = "Desculpe, houve um erro temporário. A professora IA está se reconectando. Tente novamente em alguns segundos.";

/// User-side text recorded when the student sends an image instead of a question.
pub const IMAGE_QUESTION: &str = "Pode explicar esta parte?";

/// Who authored a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    /// Role name used by the hosted chat function's history format.
    #[must_use]
    pub fn history_role(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "model",
        }
    }
}

/// A single tutor conversation message.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp_ms: i64,
    /// `data:` URL of an attached image, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
}

impl ChatMessage {
    #[must_use]
    pub fn user(id: String, content: String, timestamp_ms: i64, image_data: Option<String>) -> Self {
        Self { id, role: Role::User, content, timestamp_ms, image_data }
    }

    #[must_use]
    pub fn assistant(id: String, content: String, timestamp_ms: i64) -> Self {
        Self { id, role: Role::Assistant, content, timestamp_ms, image_data: None }
    }
}

/// One turn of prior conversation in the chat function's history format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTurn {
    /// `"user"` or `"model"`.
    pub role: String,
    pub content: String,
}

/// A file forwarded to a hosted function as base64.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileData {
    /// Base64 payload without any `data:` prefix.
    pub data: String,
    pub mime_type: String,
    pub name: String,
}

impl FileData {
    /// Build from a `data:<mime>;base64,<payload>` URL.
    #[must_use]
    pub fn from_data_url(url: &str, name: &str) -> Option<Self> {
        let (mime_type, data) = split_data_url(url)?;
        Some(Self { data: data.to_owned(), mime_type: mime_type.to_owned(), name: name.to_owned() })
    }
}

/// What the student is studying when the tutor is opened.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TutorContext {
    /// Free-form study, optionally within an area.
    General { area: Option<String> },
    /// Reading a library book.
    Book { title: String, area: Option<String>, author: Option<String> },
    /// Watching a video lesson.
    Video { title: String, area: Option<String>, channel: Option<String> },
}

impl Default for TutorContext {
    fn default() -> Self {
        Self::General { area: None }
    }
}

impl TutorContext {
    /// Whether the overlay offers the "explain this part" image action.
    #[must_use]
    pub fn supports_image_explain(&self) -> bool {
        match self {
            Self::Book { .. } => true,
            Self::General { area } => area.as_deref() == Some(LIBRARY_AREA),
            Self::Video { .. } => false,
        }
    }

    /// Input placeholder for the overlay.
    #[must_use]
    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Book { .. } => "Digite sua dúvida sobre o livro...",
            Self::Video { .. } => "Digite sua dúvida sobre a videoaula...",
            Self::General { .. } => "Digite sua dúvida...",
        }
    }

    /// Opening assistant message.
    #[must_use]
    pub fn greeting(&self) -> String {
        match self {
            Self::Video { title, area, .. } => format!(
                "👋 Olá! Sou a Professora IA e estou aqui para ajudar você com a videoaula \"{title}\"{}.\n\n\
                 📖 Posso explicar conceitos jurídicos desta videoaula\n\
                 📝 Esclarecer dúvidas sobre o conteúdo apresentado\n\
                 🔍 Dar exemplos práticos dos temas abordados\n\
                 📚 Criar exercícios para fixar o aprendizado\n\
                 💡 Conectar este conteúdo com outras matérias\n\n\
                 O que você gostaria de saber sobre esta videoaula?",
                suffix(" da área de ", area.as_deref()),
            ),
            Self::Book { title, area, author } => format!(
                "👋 Olá! Sou a Professora IA e estou aqui para ajudar você com o livro \"{title}\"{}{}.\n\n\
                 📖 Posso explicar conceitos e capítulos do livro\n\
                 📝 Esclarecer dúvidas sobre a obra\n\
                 🔍 Dar exemplos práticos dos temas abordados\n\
                 📚 Sugerir exercícios baseados no conteúdo\n\
                 💡 Relacionar com jurisprudência e casos práticos\n\n\
                 O que você gostaria de saber sobre este livro?",
                suffix(" da área de ", area.as_deref()),
                suffix(" do autor ", author.as_deref()),
            ),
            Self::General { area } => format!(
                "👋 Olá! Sou a Professora IA especializada em Direito{}.\n\n\
                 📖 Posso explicar conceitos jurídicos\n\
                 📝 Esclarecer dúvidas\n\
                 🔍 Dar exemplos práticos\n\
                 📚 Criar exercícios\n\
                 💡 Conectar diferentes áreas do Direito\n\n\
                 Como posso ajudar você hoje?",
                suffix(" com foco em ", area.as_deref()),
            ),
        }
    }

    /// One-line description of the study context sent ahead of every prompt.
    #[must_use]
    pub fn context_line(&self) -> String {
        match self {
            Self::Video { title, area, channel } => format!(
                "Contexto: O usuário está assistindo à videoaula \"{title}\"{}{}.",
                suffix(" da área de ", area.as_deref()),
                suffix(" do canal ", channel.as_deref()),
            ),
            Self::Book { title, area, author } => format!(
                "Contexto: O usuário está lendo o livro \"{title}\"{}{}.",
                suffix(" da área de ", area.as_deref()),
                suffix(" do autor ", author.as_deref()),
            ),
            Self::General { area } => match non_empty(area.as_deref()) {
                Some(area) => format!("Contexto: O usuário está estudando na área de {area}."),
                None => "Contexto: O usuário está estudando Direito.".to_owned(),
            },
        }
    }
}

/// Prompt for a typed question.
#[must_use]
pub fn build_question_prompt(context: &TutorContext, question: &str) -> String {
    format!(
        "{}\n\nComo Professora IA especializada em Direito, responda de forma didática, clara e amigável. \
         Use exemplos práticos quando possível e conecte com o conteúdo específico que o usuário está estudando.\n\n\
         Pergunta do usuário: {question}",
        context.context_line()
    )
}

/// Prompt accompanying an attached image.
#[must_use]
pub fn build_image_prompt(context: &TutorContext) -> String {
    format!(
        "{}\n\nComo Professora IA especializada em Direito, analise a imagem anexada e explique de forma didática, \
         clara e amigável o conteúdo mostrado. Se for parte de um livro ou documento jurídico, contextualize com a \
         obra que o usuário está estudando.\n\n\
         Foque especificamente na área selecionada da imagem e forneça uma explicação detalhada dos conceitos apresentados.",
        context.context_line()
    )
}

/// The last [`HISTORY_WINDOW`] messages in the chat function's history format.
#[must_use]
pub fn history_window(messages: &[ChatMessage]) -> Vec<HistoryTurn> {
    let start = messages.len().saturating_sub(HISTORY_WINDOW);
    messages[start..]
        .iter()
        .map(|m| HistoryTurn { role: m.role.history_role().to_owned(), content: m.content.clone() })
        .collect()
}

/// Split `data:<mime>;base64,<payload>` into `(mime, payload)`.
#[must_use]
pub fn split_data_url(url: &str) -> Option<(&str, &str)> {
    let rest = url.strip_prefix("data:")?;
    let (header, payload) = rest.split_once(',')?;
    let mime = header.strip_suffix(";base64")?;
    if payload.is_empty() {
        return None;
    }
    Some((if mime.is_empty() { "application/octet-stream" } else { mime }, payload))
}

/// Build a `data:` URL from a mime type and base64 payload.
#[must_use]
pub fn data_url(mime_type: &str, base64: &str) -> String {
    format!("data:{mime_type};base64,{base64}")
}

/// Prefix of `text` short enough for speech synthesis.
#[must_use]
pub fn speech_excerpt(text: &str) -> &str {
    match text.char_indices().nth(SPEECH_MAX_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

fn suffix(prefix: &str, value: Option<&str>) -> String {
    non_empty(value).map(|v| format!("{prefix}{v}")).unwrap_or_default()
}
