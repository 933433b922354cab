use crate::{
    foundation::core::Length,
    foundation::error::ScrollpinResult,
    page::model::{FlowSpec, PageSpec, PanelContent, PanelSpec, RevealSpec, SectionSpec},
    panel::motion::{LayoutVariant, PhaseSchedule},
    scroll::driver::ScrollConfig,
    snap::coordinator::SnapConfig,
};

/// Programmatic builder for [`PageSpec`]; `build` validates.
#[derive(Clone, Debug, Default)]
pub struct PageBuilder {
    spec: PageSpec,
}

impl PageBuilder {
    /// Start an empty page with default tuning.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace snap tuning.
    pub fn snap(mut self, snap: SnapConfig) -> Self {
        self.spec.snap = snap;
        self
    }

    /// Replace scroll-driver tuning.
    pub fn scroll(mut self, scroll: ScrollConfig) -> Self {
        self.spec.scroll = scroll;
        self
    }

    /// Replace the phase schedule.
    pub fn schedule(mut self, schedule: PhaseSchedule) -> Self {
        self.spec.schedule = schedule;
        self
    }

    /// Append a hero panel.
    pub fn hero(mut self, panel: PanelBuilder) -> Self {
        self.spec.sections.push(SectionSpec::Hero(panel.build()));
        self
    }

    /// Append a feature panel.
    pub fn feature(mut self, panel: PanelBuilder) -> Self {
        self.spec.sections.push(SectionSpec::Feature(panel.build()));
        self
    }

    /// Append a flowing section.
    pub fn flow(mut self, flow: FlowSpec) -> Self {
        self.spec.sections.push(SectionSpec::Flow(flow));
        self
    }

    /// Validate and return the page.
    pub fn build(self) -> ScrollpinResult<PageSpec> {
        self.spec.validate()?;
        Ok(self.spec)
    }
}

/// Builder for one pinned panel.
#[derive(Clone, Debug)]
pub struct PanelBuilder {
    spec: PanelSpec,
}

impl PanelBuilder {
    /// Left-layout panel with default pin length and height.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            spec: PanelSpec {
                id: id.into(),
                layout: LayoutVariant::Left,
                pin_length: Length::Vh(1.3),
                height: Length::Vh(1.0),
                z_index: 0,
                content: PanelContent::default(),
            },
        }
    }

    /// Side the primary block rests on.
    pub fn layout(mut self, layout: LayoutVariant) -> Self {
        self.spec.layout = layout;
        self
    }

    /// Scroll distance the panel stays pinned for.
    pub fn pin_length(mut self, length: Length) -> Self {
        self.spec.pin_length = length;
        self
    }

    /// Visible height.
    pub fn height(mut self, length: Length) -> Self {
        self.spec.height = length;
        self
    }

    /// Stacking order.
    pub fn z_index(mut self, z: i32) -> Self {
        self.spec.z_index = z;
        self
    }

    /// Text and media.
    pub fn content(mut self, content: PanelContent) -> Self {
        self.spec.content = content;
        self
    }

    /// Finish without validation (the page validates on build).
    pub fn build(self) -> PanelSpec {
        self.spec
    }
}

/// Flowing section of `height` without a reveal.
pub fn flow(id: impl Into<String>, height: Length) -> FlowSpec {
    FlowSpec {
        id: id.into(),
        height,
        reveal: None,
    }
}

/// Flowing section of `height` revealing `items` with default motion.
pub fn flow_with_reveal(id: impl Into<String>, height: Length, items: usize) -> FlowSpec {
    let mut reveal = RevealSpec::default();
    reveal.motion.items = items;
    FlowSpec {
        id: id.into(),
        height,
        reveal: Some(reveal),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/dsl.rs"]
mod tests;
