use crate::{
    foundation::core::{PinRange, ViewportSize},
    foundation::error::{ScrollpinError, ScrollpinResult},
    page::model::{PageSpec, SectionSpec},
};

/// Resolved vertical placement of one section.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SectionBox {
    /// Section identifier.
    pub id: String,
    /// Document offset of the section's top.
    pub top: f64,
    /// Visible height.
    pub height: f64,
    /// Flow distance reserved in the document (height plus pin spacing).
    pub span: f64,
    /// Scroll range the section is pinned for; `None` for flowing sections.
    pub pin: Option<PinRange>,
}

/// Sections stacked for one viewport size.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PageLayout {
    /// Viewport the layout was solved for.
    pub viewport: ViewportSize,
    /// Section boxes in document order.
    pub sections: Vec<SectionBox>,
    /// Full document height.
    pub content_height: f64,
    /// Largest reachable scroll position.
    pub max_scroll: f64,
}

impl PageLayout {
    /// Stack `spec`'s sections top to bottom for `viewport`.
    ///
    /// A pinned section of height `h` and pin length `l` reserves `h + l` of flow and is
    /// pinned for scroll positions `[top, top + l]`.
    #[tracing::instrument(skip(spec), fields(sections = spec.sections.len()))]
    pub fn solve(spec: &PageSpec, viewport: ViewportSize) -> ScrollpinResult<Self> {
        ViewportSize::new(viewport.width, viewport.height)
            .map_err(|e| ScrollpinError::layout(e.to_string()))?;

        let mut sections = Vec::with_capacity(spec.sections.len());
        let mut top = 0.0;
        for section in &spec.sections {
            let height = section.height().resolve(viewport);
            let pin_length = match section {
                SectionSpec::Hero(p) | SectionSpec::Feature(p) => {
                    Some(p.pin_length.resolve(viewport))
                }
                SectionSpec::Flow(_) => None,
            };
            if !height.is_finite() || height < 0.0 {
                return Err(ScrollpinError::layout(format!(
                    "section '{}' resolves to an invalid height",
                    section.id()
                )));
            }

            let (span, pin) = match pin_length {
                Some(l) => {
                    let range = PinRange::new(top, top + l).map_err(|e| {
                        ScrollpinError::layout(format!("section '{}': {e}", section.id()))
                    })?;
                    (height + l, Some(range))
                }
                None => (height, None),
            };
            sections.push(SectionBox {
                id: section.id().to_owned(),
                top,
                height,
                span,
                pin,
            });
            top += span;
        }

        let max_scroll = (top - viewport.height).max(0.0);
        tracing::debug!(content_height = top, max_scroll, "layout solved");
        Ok(Self {
            viewport,
            sections,
            content_height: top,
            max_scroll,
        })
    }

    /// Box of section `id`.
    pub fn section(&self, id: &str) -> Option<&SectionBox> {
        self.sections.iter().find(|s| s.id == id)
    }

    /// Pin ranges of pinned sections in document order.
    pub fn pin_ranges(&self) -> Vec<PinRange> {
        self.sections.iter().filter_map(|s| s.pin).collect()
    }

    /// Scroll position that brings section `id` to the viewport top, clamped to the extent.
    pub fn scroll_target(&self, id: &str) -> Option<f64> {
        self.section(id).map(|s| s.top.clamp(0.0, self.max_scroll))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/layout.rs"]
mod tests;
