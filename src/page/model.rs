use std::collections::BTreeSet;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::{
    foundation::core::Length,
    foundation::error::{ScrollpinError, ScrollpinResult},
    panel::motion::{LayoutVariant, PanelKind, PhaseSchedule},
    scroll::driver::ScrollConfig,
    scroll::reveal::RevealMotion,
    snap::coordinator::SnapConfig,
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// A complete scroll-choreographed page.
///
/// A page is a pure data model that can be:
/// - built programmatically (see [`crate::PageBuilder`])
/// - serialized/deserialized via Serde (JSON)
///
/// Running a page is performed by [`crate::PageSession`].
pub struct PageSpec {
    /// Sections in document order.
    pub sections: Vec<SectionSpec>,
    /// Snap tuning.
    #[serde(default)]
    pub snap: SnapConfig,
    /// Scroll-driver tuning.
    #[serde(default)]
    pub scroll: ScrollConfig,
    /// Phase bands shared by every pinned panel.
    #[serde(default)]
    pub schedule: PhaseSchedule,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// One vertically stacked section of a page.
pub enum SectionSpec {
    /// Opening pinned panel (exit-only choreography).
    Hero(PanelSpec),
    /// Pinned panel with entrance, settle and exit.
    Feature(PanelSpec),
    /// Free-scrolling section.
    Flow(FlowSpec),
}

impl SectionSpec {
    /// Section identifier (also the navigation anchor).
    pub fn id(&self) -> &str {
        match self {
            Self::Hero(p) | Self::Feature(p) => &p.id,
            Self::Flow(f) => &f.id,
        }
    }

    /// Pinned panel description, with its choreography family.
    pub fn panel(&self) -> Option<(PanelKind, &PanelSpec)> {
        match self {
            Self::Hero(p) => Some((PanelKind::Hero, p)),
            Self::Feature(p) => Some((PanelKind::Feature, p)),
            Self::Flow(_) => None,
        }
    }

    /// Flowing section description.
    pub fn flow(&self) -> Option<&FlowSpec> {
        match self {
            Self::Flow(f) => Some(f),
            _ => None,
        }
    }

    /// Visible height of the section.
    pub fn height(&self) -> Length {
        match self {
            Self::Hero(p) | Self::Feature(p) => p.height,
            Self::Flow(f) => f.height,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A full-viewport panel pinned while scroll passes through it.
pub struct PanelSpec {
    /// Stable identifier and anchor.
    pub id: String,
    /// Side the primary block rests on.
    #[serde(default)]
    pub layout: LayoutVariant,
    /// Scroll distance the panel stays pinned for.
    #[serde(default = "default_pin_length")]
    pub pin_length: Length,
    /// Visible height.
    #[serde(default = "default_section_height")]
    pub height: Length,
    /// Stacking order; later panels cover earlier ones.
    #[serde(default)]
    pub z_index: i32,
    /// Text and media shown by the panel.
    #[serde(default)]
    pub content: PanelContent,
}

fn default_pin_length() -> Length {
    Length::Vh(1.3)
}

fn default_section_height() -> Length {
    Length::Vh(1.0)
}

fn default_reveal_start() -> Length {
    Length::Vh(0.8)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Content collaborator data of a panel.
pub struct PanelContent {
    /// Small uppercase label above the card.
    pub label: String,
    /// Card headline.
    pub headline: String,
    /// Card body copy.
    pub body: String,
    /// Caption under the image card.
    pub caption: String,
    /// Image URL of the secondary block.
    pub image_src: String,
    /// Chart drawn inside the primary block.
    pub chart: ChartVariant,
}

impl PanelContent {
    /// Animated children in every panel's text block: headline, body and chart.
    pub const TEXT_BLOCK_LEN: usize = 3;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Chart style inside a panel's primary block.
pub enum ChartVariant {
    /// Vertical bars.
    Bars,
    /// Line chart.
    Line,
    /// Bars with a line overlay.
    #[default]
    Mixed,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A section that scrolls normally.
pub struct FlowSpec {
    /// Stable identifier and anchor.
    pub id: String,
    /// Section height.
    #[serde(default = "default_section_height")]
    pub height: Length,
    /// Optional one-shot reveal of the section's items.
    #[serde(default)]
    pub reveal: Option<RevealSpec>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Reveal trigger of a flowing section.
pub struct RevealSpec {
    /// Distance from the viewport top at which the section's top fires the reveal.
    #[serde(default = "default_reveal_start")]
    pub start: Length,
    /// Item motion.
    #[serde(flatten)]
    pub motion: RevealMotion,
}

impl Default for RevealSpec {
    fn default() -> Self {
        Self {
            start: default_reveal_start(),
            motion: RevealMotion::default(),
        }
    }
}

impl PageSpec {
    /// Parse a page from a JSON string.
    pub fn from_json(json: &str) -> ScrollpinResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| ScrollpinError::serde(format!("parse page JSON: {e}")))
    }

    /// Parse a page from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> ScrollpinResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ScrollpinError::serde(format!("parse page JSON: {e}")))
    }

    /// Parse a page from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> ScrollpinResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ScrollpinError::validation(format!("open page JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Pinned panels in document order.
    pub fn panels(&self) -> impl Iterator<Item = (PanelKind, &PanelSpec)> + '_ {
        self.sections.iter().filter_map(SectionSpec::panel)
    }

    /// Validate ids, lengths and tuning blocks.
    pub fn validate(&self) -> ScrollpinResult<()> {
        self.snap.validate()?;
        self.scroll.validate()?;
        self.schedule.validate()?;

        let mut seen = BTreeSet::new();
        for section in &self.sections {
            let id = section.id();
            if id.trim().is_empty() {
                return Err(ScrollpinError::validation("section id must be non-empty"));
            }
            if !seen.insert(id) {
                return Err(ScrollpinError::validation(format!(
                    "duplicate section id '{id}'"
                )));
            }
            section
                .height()
                .validate(&format!("section '{id}' height"))?;

            match section {
                SectionSpec::Hero(p) | SectionSpec::Feature(p) => {
                    p.pin_length
                        .validate(&format!("panel '{id}' pin_length"))?;
                }
                SectionSpec::Flow(f) => {
                    if let Some(reveal) = &f.reveal {
                        reveal
                            .start
                            .validate(&format!("section '{id}' reveal start"))?;
                        reveal.motion.validate()?;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/model.rs"]
mod tests;
