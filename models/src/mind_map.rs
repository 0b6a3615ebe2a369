//! Mind-map trees: interactive editing, export, and parsing of generated maps.
//!
//! DESIGN
//! ======
//! A map owns a forest of root nodes; every node owns its children, so the
//! structure is a plain tree with no back references. Mutation goes through
//! [`MindMap::add_child`], which walks the tree by id and appends in place.
//!
//! Generated maps arrive as free text from the hosted model. Parsing is
//! best-effort: the outermost `{ ... }` span is decoded and, when that fails,
//! a single-node map summarizing the raw reply is synthesized instead so the
//! student always gets something to edit.

#[cfg(test)]
#[path = "mind_map_test.rs"]
mod mind_map_test;

use std::fmt::Write as _;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Title of the root node of a freshly created map.
pub const ROOT_TITLE: &str = "Tópico Central";
/// Title given to nodes added with the "+" action.
pub const NEW_NODE_TITLE: &str = "Novo Tópico";
/// Title used when the caller leaves the map title blank.
pub const DEFAULT_MAP_TITLE: &str = "Novo Mapa Mental";
/// Characters of the raw reply kept in a fallback map.
pub const FALLBACK_EXCERPT_CHARS: usize = 200;

/// Instruction sent with an uploaded document to the generation function.
pub const GENERATION_PROMPT: &str = r#"Analise este documento e crie um mapa mental detalhado em formato JSON. O mapa deve ter:
1. Um nó central com o tema principal
2. Nós filhos com os subtemas principais
3. Até 3 níveis de profundidade
4. Conteúdo resumido em cada nó

Retorne apenas o JSON no formato:
{
  "titulo": "Título do Mapa",
  "descricao": "Descrição breve",
  "nodes": [
    {
      "id": "1",
      "title": "Tópico Central",
      "content": "Conteúdo resumido",
      "children": [...],
      "level": 0
    }
  ]
}"#;

/// Errors from mind-map construction and parsing.
#[derive(Debug, thiserror::Error)]
pub enum MindMapError {
    #[error("mind map title is empty")]
    EmptyTitle,
    #[error("no JSON object found in response")]
    NoJsonObject,
    #[error("invalid mind map JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("mind map has no nodes")]
    NoNodes,
}

/// A node in a mind map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMapNode {
    /// Generated maps may carry numeric ids; they are kept as their decimal text.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub children: Vec<MindMapNode>,
    /// Depth from the root, starting at 0.
    #[serde(default, deserialize_with = "lenient_level")]
    pub level: u32,
}

impl MindMapNode {
    #[must_use]
    pub fn new(id: String, title: &str, level: u32) -> Self {
        Self { id, title: title.to_owned(), content: String::new(), children: Vec::new(), level }
    }

    fn count(&self) -> usize {
        1 + self.children.iter().map(Self::count).sum::<usize>()
    }

    fn depth(&self) -> usize {
        1 + self.children.iter().map(Self::depth).max().unwrap_or(0)
    }

    fn find(&self, id: &str) -> Option<&MindMapNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(id))
    }

    fn find_mut(&mut self, id: &str) -> Option<&mut MindMapNode> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|c| c.find_mut(id))
    }

    fn normalize_levels(&mut self, level: u32) {
        self.level = level;
        for child in &mut self.children {
            child.normalize_levels(level + 1);
        }
    }

    fn write_text(&self, out: &mut String, indent: &str) {
        let _ = write!(out, "{indent}• {}", self.title);
        if !self.content.is_empty() {
            let _ = write!(out, "\n{indent}  {}", self.content);
        }
        if !self.children.is_empty() {
            out.push('\n');
            write_forest(&self.children, out, &format!("{indent}  "));
        }
    }
}

/// A titled mind map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MindMap {
    pub id: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    pub nodes: Vec<MindMapNode>,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "createdAt", default)]
    pub created_at_ms: i64,
}

impl MindMap {
    /// A map holding a single central topic.
    #[must_use]
    pub fn new_empty(id: String, title: &str, description: &str, created_at_ms: i64) -> Self {
        let title = if title.trim().is_empty() { DEFAULT_MAP_TITLE } else { title.trim() };
        Self {
            id,
            title: title.to_owned(),
            description: description.trim().to_owned(),
            nodes: vec![MindMapNode::new("1".to_owned(), ROOT_TITLE, 0)],
            created_at_ms,
        }
    }

    /// Create a map from the "create" form, rejecting a blank title.
    ///
    /// # Errors
    ///
    /// Returns [`MindMapError::EmptyTitle`] when `title` is blank.
    pub fn create(id: String, title: &str, description: &str, created_at_ms: i64) -> Result<Self, MindMapError> {
        if title.trim().is_empty() {
            return Err(MindMapError::EmptyTitle);
        }
        Ok(Self::new_empty(id, title, description, created_at_ms))
    }

    /// Append a new child under `parent_id`.
    ///
    /// Returns `false` (and leaves the tree untouched) when no node has that id.
    pub fn add_child(&mut self, parent_id: &str, child_id: String) -> bool {
        let Some(parent) = self.nodes.iter_mut().find_map(|n| n.find_mut(parent_id)) else {
            return false;
        };
        let level = parent.level + 1;
        parent.children.push(MindMapNode::new(child_id, NEW_NODE_TITLE, level));
        true
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&MindMapNode> {
        self.nodes.iter().find_map(|n| n.find(id))
    }

    /// Total number of nodes in the map.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.iter().map(MindMapNode::count).sum()
    }

    /// Number of levels in the deepest branch.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(MindMapNode::depth).max().unwrap_or(0)
    }

    /// Indented bullet outline for the clipboard.
    ///
    /// Node ids and levels are not written, so the outline cannot be read back.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = format!("{}\n{}\n\n", self.title, self.description);
        write_forest(&self.nodes, &mut out, "");
        out
    }

    /// Pretty JSON document for download.
    ///
    /// # Errors
    ///
    /// Returns an error only if serialization fails.
    pub fn to_json(&self) -> Result<String, MindMapError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// File name used when downloading [`MindMap::to_json`].
    #[must_use]
    pub fn export_file_name(&self) -> String {
        let stem: String = self
            .title
            .chars()
            .map(|c| if matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') { '_' } else { c })
            .collect();
        format!("{}.json", stem.trim())
    }
}

/// Body of a generated map before it is given an id and timestamp.
#[derive(Debug, Deserialize)]
struct GeneratedMap {
    #[serde(default)]
    titulo: Option<String>,
    #[serde(default)]
    descricao: Option<String>,
    #[serde(default)]
    nodes: Vec<MindMapNode>,
}

/// Decode the outermost JSON object of a model reply.
///
/// # Errors
///
/// Fails when the reply holds no `{ ... }` span, the span is not a valid map,
/// or the map has no nodes.
fn extract_generated(response: &str) -> Result<GeneratedMap, MindMapError> {
    let start = response.find('{').ok_or(MindMapError::NoJsonObject)?;
    let end = response.rfind('}').ok_or(MindMapError::NoJsonObject)?;
    if end < start {
        return Err(MindMapError::NoJsonObject);
    }
    let generated: GeneratedMap = serde_json::from_str(&response[start..=end])?;
    if generated.nodes.is_empty() {
        return Err(MindMapError::NoNodes);
    }
    Ok(generated)
}

/// Turn a generation reply into a map, falling back to a one-node summary.
#[must_use]
pub fn parse_generated(response: &str, file_name: &str, id: String, created_at_ms: i64) -> MindMap {
    match extract_generated(response) {
        Ok(generated) => {
            let mut nodes = generated.nodes;
            for node in &mut nodes {
                node.normalize_levels(0);
            }
            MindMap {
                id,
                title: generated
                    .titulo
                    .filter(|t| !t.trim().is_empty())
                    .unwrap_or_else(|| fallback_title(file_name)),
                description: generated.descricao.unwrap_or_default(),
                nodes,
                created_at_ms,
            }
        }
        Err(_) => fallback_map(response, file_name, id, created_at_ms),
    }
}

fn fallback_map(response: &str, file_name: &str, id: String, created_at_ms: i64) -> MindMap {
    let excerpt: String = response.chars().take(FALLBACK_EXCERPT_CHARS).collect();
    let mut root = MindMapNode::new("1".to_owned(), "Documento Analisado", 0);
    root.content = format!("{excerpt}...");
    MindMap {
        id,
        title: fallback_title(file_name),
        description: "Gerado automaticamente a partir do documento".to_owned(),
        nodes: vec![root],
        created_at_ms,
    }
}

fn fallback_title(file_name: &str) -> String {
    format!("Mapa Mental - {file_name}")
}

fn write_forest(nodes: &[MindMapNode], out: &mut String, indent: &str) {
    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        node.write_text(out, indent);
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!("node id must be a string or number, got {other}"))),
    }
}

/// Any non-numeric or out-of-range level reads as 0; generated trees are re-levelled anyway.
fn lenient_level<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let level = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(level.and_then(|l| u32::try_from(l).ok()).unwrap_or(0))
}
