use std::collections::BTreeMap;
use std::fmt;

use crate::{
    animation::props::VisualState,
    page::model::{PanelContent, SectionSpec},
};

/// Animated element inside one panel.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ElementId {
    /// Primary content block (the dashboard card).
    Primary,
    /// Secondary content block (the image card).
    Secondary,
    /// `n`-th child of the text block, animated as a cascade.
    Text(usize),
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => f.write_str("primary"),
            Self::Secondary => f.write_str("secondary"),
            Self::Text(i) => write!(f, "text[{i}]"),
        }
    }
}

/// Visual target a panel writes interpolated states into.
///
/// Implemented by the platform layer (DOM bindings, a retained scene graph, ...).
pub trait PanelSurface {
    /// Return `true` once the panel's visual root exists.
    fn is_attached(&self) -> bool;

    /// Return `true` when `element` exists and can be animated.
    fn has_element(&self, element: ElementId) -> bool;

    /// Number of children in the text block.
    fn text_len(&self) -> usize;

    /// Write the interpolated state of `element`.
    fn write(&mut self, element: ElementId, state: &VisualState);
}

/// In-memory [`PanelSurface`] that records the last state written per element.
#[derive(Clone, Debug)]
pub struct MemorySurface {
    attached: bool,
    primary: bool,
    secondary: bool,
    text_len: usize,
    states: BTreeMap<ElementId, VisualState>,
    writes: u64,
}

impl MemorySurface {
    /// Attached surface with both content blocks and `text_len` text children.
    pub fn new(text_len: usize) -> Self {
        Self {
            attached: true,
            primary: true,
            secondary: true,
            text_len,
            states: BTreeMap::new(),
            writes: 0,
        }
    }

    /// Surface shaped like the markup of `section`: both blocks plus the text block for
    /// panels, only the revealed items for flowing sections.
    pub fn for_section(section: &SectionSpec) -> Self {
        match section {
            SectionSpec::Hero(_) | SectionSpec::Feature(_) => {
                Self::new(PanelContent::TEXT_BLOCK_LEN)
            }
            SectionSpec::Flow(f) => {
                let items = f.reveal.as_ref().map_or(0, |r| r.motion.items);
                Self::new(items)
                    .without(ElementId::Primary)
                    .without(ElementId::Secondary)
            }
        }
    }

    /// Surface whose visual root is not mounted yet.
    pub fn detached(text_len: usize) -> Self {
        Self {
            attached: false,
            ..Self::new(text_len)
        }
    }

    /// Remove a content block (text children are controlled by `text_len`).
    pub fn without(mut self, element: ElementId) -> Self {
        match element {
            ElementId::Primary => self.primary = false,
            ElementId::Secondary => self.secondary = false,
            ElementId::Text(_) => {}
        }
        self
    }

    /// Mount the visual root.
    pub fn attach(&mut self) {
        self.attached = true;
    }

    /// Last state written to `element`.
    pub fn state(&self, element: ElementId) -> Option<&VisualState> {
        self.states.get(&element)
    }

    /// Every element's last written state.
    pub fn states(&self) -> &BTreeMap<ElementId, VisualState> {
        &self.states
    }

    /// Total number of writes received.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl PanelSurface for MemorySurface {
    fn is_attached(&self) -> bool {
        self.attached
    }

    fn has_element(&self, element: ElementId) -> bool {
        match element {
            ElementId::Primary => self.primary,
            ElementId::Secondary => self.secondary,
            ElementId::Text(i) => i < self.text_len,
        }
    }

    fn text_len(&self) -> usize {
        self.text_len
    }

    fn write(&mut self, element: ElementId, state: &VisualState) {
        self.states.insert(element, *state);
        self.writes += 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/panel/surface.rs"]
mod tests;
