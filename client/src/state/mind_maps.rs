//! Mind-map editor state.
//!
//! DESIGN
//! ======
//! Saved maps live only for the page session. The current map is referenced
//! by id into `maps` so edits and the saved list never diverge.

#[cfg(test)]
#[path = "mind_maps_test.rs"]
mod mind_maps_test;

use models::mind_map::{MindMap, MindMapError};

/// Tabs on the mind-map page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MindMapTab {
    #[default]
    Create,
    Generate,
    View,
}

impl MindMapTab {
    pub const ALL: [Self; 3] = [Self::Create, Self::Generate, Self::View];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Create => "Criar",
            Self::Generate => "Gerar com IA",
            Self::View => "Visualizar",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MindMapsState {
    pub maps: Vec<MindMap>,
    pub current_id: Option<String>,
    pub tab: MindMapTab,
    pub draft_title: String,
    pub draft_description: String,
    pub generating: bool,
}

impl MindMapsState {
    /// Create an empty map from the draft fields and make it current.
    ///
    /// # Errors
    ///
    /// Returns [`MindMapError::EmptyTitle`] when the draft title is blank; the
    /// drafts are kept so the user can correct them.
    pub fn create(&mut self, id: String, now_ms: i64) -> Result<(), MindMapError> {
        let map = MindMap::create(id, &self.draft_title, &self.draft_description, now_ms)?;
        self.current_id = Some(map.id.clone());
        self.maps.push(map);
        self.draft_title.clear();
        self.draft_description.clear();
        Ok(())
    }

    /// Add a child under `parent_id` in the current map.
    pub fn add_child(&mut self, parent_id: &str, child_id: String) -> bool {
        let Some(current) = self.current_id.as_deref() else {
            return false;
        };
        self.maps
            .iter_mut()
            .find(|m| m.id == current)
            .is_some_and(|map| map.add_child(parent_id, child_id))
    }

    /// Make a saved map current and switch to the viewer.
    pub fn select(&mut self, id: &str) -> bool {
        if !self.maps.iter().any(|m| m.id == id) {
            return false;
        }
        self.current_id = Some(id.to_owned());
        self.tab = MindMapTab::View;
        true
    }

    /// Mark a generation in flight. Returns `false` if one is already running.
    pub fn begin_generate(&mut self) -> bool {
        if self.generating {
            return false;
        }
        self.generating = true;
        true
    }

    /// Store a generated map, make it current and show it.
    pub fn insert_generated(&mut self, map: MindMap) {
        self.current_id = Some(map.id.clone());
        self.maps.push(map);
        self.tab = MindMapTab::View;
        self.generating = false;
    }

    pub fn fail_generate(&mut self) {
        self.generating = false;
    }

    #[must_use]
    pub fn current(&self) -> Option<&MindMap> {
        let id = self.current_id.as_deref()?;
        self.maps.iter().find(|m| m.id == id)
    }
}
