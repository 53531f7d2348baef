use std::collections::BTreeMap;

use crate::{
    animation::panel::StrokePanel, foundation::core::Viewport, foundation::error::InklineResult,
    render::backend::LineBackend,
};

/// Process-wide lookup from animation identifier to its panel.
///
/// Everything here runs on the single UI thread; panels never share state
/// with each other, the registry is just the page's address book (one entry
/// per canvas).
#[derive(Debug, Default)]
pub struct PanelRegistry<B: LineBackend> {
    panels: BTreeMap<String, StrokePanel<B>>,
}

impl<B: LineBackend> PanelRegistry<B> {
    pub fn new() -> Self {
        Self {
            panels: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, id: impl Into<String>, panel: StrokePanel<B>) {
        self.panels.insert(id.into(), panel);
    }

    pub fn get(&self, id: &str) -> Option<&StrokePanel<B>> {
        self.panels.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut StrokePanel<B>> {
        self.panels.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.panels.keys().map(String::as_str)
    }

    /// Start the panel's run immediately. False for unknown ids or panels
    /// that already ran.
    pub fn start(&mut self, id: &str) -> bool {
        self.panels.get_mut(id).is_some_and(StrokePanel::start)
    }

    /// Forward a visibility signal; the panel starts on its next tick.
    pub fn mark_visible(&mut self, id: &str) -> bool {
        match self.panels.get_mut(id) {
            Some(panel) => {
                panel.mark_visible();
                true
            }
            None => false,
        }
    }

    /// Re-frame one panel against its container's new viewport.
    pub fn resize(&mut self, id: &str, viewport: Viewport) -> bool {
        match self.panels.get_mut(id) {
            Some(panel) => {
                panel.resize(viewport);
                true
            }
            None => false,
        }
    }

    /// Tick every panel once; returns how many still want further frames.
    pub fn tick_all(&mut self) -> InklineResult<usize> {
        let mut active = 0;
        for panel in self.panels.values_mut() {
            if panel.tick()? {
                active += 1;
            }
        }
        Ok(active)
    }
}
