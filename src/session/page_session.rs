use crate::{
    foundation::core::{PinRange, ViewportSize},
    foundation::error::{ScrollpinError, ScrollpinResult},
    page::layout::PageLayout,
    page::model::{PageSpec, SectionSpec},
    panel::controller::PanelController,
    panel::motion::LayoutVariant,
    panel::surface::PanelSurface,
    scroll::driver::ScrollDriver,
    scroll::reveal::RevealTrigger,
    snap::coordinator::SnapCoordinator,
};

/// Pin registrations collected before the snap table may be built.
///
/// Startup is two-phase: every panel registers, then [`Registration::seal`] hands the
/// complete set over. Sealing an incomplete registration is an error instead of a silently
/// partial snap table.
#[derive(Clone, Debug)]
pub struct Registration {
    ranges: Vec<Option<PinRange>>,
}

impl Registration {
    /// Expect `expected` panels.
    pub fn new(expected: usize) -> Self {
        Self {
            ranges: vec![None; expected],
        }
    }

    /// Record the pin range of panel `index`.
    pub fn register(&mut self, index: usize, range: PinRange) -> ScrollpinResult<()> {
        let expected = self.ranges.len();
        let slot = self.ranges.get_mut(index).ok_or_else(|| {
            ScrollpinError::lifecycle(format!(
                "panel index {index} out of range (expected {expected} panels)"
            ))
        })?;
        if slot.is_some() {
            return Err(ScrollpinError::lifecycle(format!(
                "panel index {index} registered twice"
            )));
        }
        *slot = Some(range);
        Ok(())
    }

    /// Number of panels registered so far.
    pub fn registered(&self) -> usize {
        self.ranges.iter().filter(|r| r.is_some()).count()
    }

    /// Return `true` once every expected panel has registered.
    pub fn is_complete(&self) -> bool {
        self.ranges.iter().all(Option::is_some)
    }

    /// Every registered range in panel order; fails unless complete.
    pub fn seal(self) -> ScrollpinResult<Vec<PinRange>> {
        let expected = self.ranges.len();
        let registered = self.registered();
        if registered != expected {
            return Err(ScrollpinError::lifecycle(format!(
                "only {registered} of {expected} panels registered"
            )));
        }
        Ok(self.ranges.into_iter().flatten().collect())
    }
}

/// Composition root for one mounted page.
///
/// Owns the panels, the reveals, the snap coordinator and the scroll driver, and wires
/// platform events into them. Time is always passed in by the caller.
#[derive(Debug)]
pub struct PageSession<S> {
    spec: PageSpec,
    layout: PageLayout,
    panels: Vec<PanelController<S>>,
    panel_sections: Vec<usize>,
    reveals: Vec<RevealTrigger<S>>,
    reveal_sections: Vec<usize>,
    coordinator: SnapCoordinator,
    driver: ScrollDriver,
    last_frame_at: Option<f64>,
    live: bool,
}

impl<S> PageSession<S>
where
    S: PanelSurface,
{
    #[tracing::instrument(skip(spec, surface_for), fields(sections = spec.sections.len()))]
    /// Validate `spec`, lay it out for `viewport` and start choreographing at scroll `0`.
    ///
    /// `surface_for` is called once per pinned panel and once per flowing section with a
    /// reveal, in document order.
    pub fn mount(
        spec: PageSpec,
        viewport: ViewportSize,
        mut surface_for: impl FnMut(&SectionSpec) -> S,
    ) -> ScrollpinResult<Self> {
        spec.validate()?;
        let layout = PageLayout::solve(&spec, viewport)?;

        let mut registration = Registration::new(spec.panels().count());
        let mut panels = Vec::new();
        let mut panel_sections = Vec::new();
        let mut reveals = Vec::new();
        let mut reveal_sections = Vec::new();

        for (index, (section, bx)) in spec.sections.iter().zip(&layout.sections).enumerate() {
            if let Some((kind, p)) = section.panel() {
                let pin = bx.pin.ok_or_else(|| {
                    ScrollpinError::layout(format!("panel '{}' has no pin range", p.id))
                })?;
                let mut panel = PanelController::new(p.id.clone(), kind, surface_for(section))
                    .with_schedule(spec.schedule);
                let range = panel.register_pin(pin)?;
                registration.register(panels.len(), range)?;
                panels.push(panel);
                panel_sections.push(index);
            } else if let Some(flow) = section.flow()
                && let Some(reveal) = &flow.reveal
            {
                let threshold = bx.top - reveal.start.resolve(viewport);
                reveals.push(RevealTrigger::new(
                    flow.id.clone(),
                    threshold,
                    reveal.motion,
                    surface_for(section),
                )?);
                reveal_sections.push(index);
            }
        }

        let ranges = registration.seal()?;
        let mut coordinator = SnapCoordinator::new(spec.snap);
        coordinator.rebuild(layout.max_scroll, &ranges);

        for (panel, &section) in panels.iter_mut().zip(&panel_sections) {
            let variant = panel_layout(&spec, section);
            panel.build_timeline(variant);
        }

        let mut driver = ScrollDriver::new(spec.scroll, viewport.height, layout.max_scroll);
        driver.sync(&mut panels);
        for reveal in &mut reveals {
            reveal.on_scroll(driver.scroll_y());
        }

        tracing::debug!(
            panels = panels.len(),
            reveals = reveals.len(),
            max_scroll = layout.max_scroll,
            "page mounted"
        );
        Ok(Self {
            spec,
            layout,
            panels,
            panel_sections,
            reveals,
            reveal_sections,
            coordinator,
            driver,
            last_frame_at: None,
            live: true,
        })
    }

    /// Handle a user-originated scroll position at time `now`.
    pub fn on_user_scroll(&mut self, scroll_y: f64, now: f64) {
        if !self.live {
            return;
        }
        self.driver.on_user_scroll(scroll_y, now, &mut self.panels);
        let y = self.driver.scroll_y();
        for reveal in &mut self.reveals {
            reveal.on_scroll(y);
        }
    }

    /// Start the load intro of every hero panel. Returns how many started.
    ///
    /// Call once after mount; the intros advance with [`Self::on_frame`].
    pub fn play_intro(&mut self) -> usize {
        if !self.live {
            return 0;
        }
        let started = self.panels.iter_mut().map(|p| p.play_intro()).filter(|started| *started).count();
        tracing::debug!(started, "intros started");
        started
    }

    /// Advance snap, smoothing, intros and reveals to `now`.
    ///
    /// Returns a scroll position the platform must apply (and not echo back as user input).
    pub fn on_frame(&mut self, now: f64) -> Option<f64> {
        if !self.live {
            return None;
        }
        let write = self
            .driver
            .on_frame(now, &mut self.panels, &self.coordinator);

        let dt = self.last_frame_at.map_or(0.0, |t| (now - t).max(0.0));
        self.last_frame_at = Some(now);
        for panel in &mut self.panels {
            panel.advance_intro(dt);
        }
        let y = self.driver.scroll_y();
        for reveal in &mut self.reveals {
            reveal.on_scroll(y);
            reveal.advance(dt);
        }
        write
    }

    #[tracing::instrument(skip(self))]
    /// Re-solve the layout for a new viewport and rebuild the snap table.
    pub fn on_resize(&mut self, viewport: ViewportSize) -> ScrollpinResult<()> {
        if !self.live {
            return Ok(());
        }
        let layout = PageLayout::solve(&self.spec, viewport)?;

        for (panel, &section) in self.panels.iter_mut().zip(&self.panel_sections) {
            if let Some(pin) = layout.sections.get(section).and_then(|bx| bx.pin) {
                panel.refresh_pin(pin)?;
            }
        }
        for (reveal, &section) in self.reveals.iter_mut().zip(&self.reveal_sections) {
            let start = self
                .spec
                .sections
                .get(section)
                .and_then(SectionSpec::flow)
                .and_then(|f| f.reveal.as_ref())
                .map_or(0.0, |r| r.start.resolve(viewport));
            if let Some(bx) = layout.sections.get(section) {
                reveal.set_threshold(bx.top - start);
            }
        }

        let ranges: Vec<PinRange> = self.panels.iter().filter_map(|p| p.pin_range()).collect();
        self.coordinator.rebuild(layout.max_scroll, &ranges);
        self.driver.set_extent(viewport.height, layout.max_scroll);
        self.driver.sync(&mut self.panels);
        let y = self.driver.scroll_y();
        for reveal in &mut self.reveals {
            reveal.on_scroll(y);
        }
        self.layout = layout;
        Ok(())
    }

    /// Scroll position for a navigation jump to section `id`.
    pub fn scroll_target(&self, id: &str) -> Option<f64> {
        self.layout.scroll_target(id)
    }

    /// Kill the snap, release every panel and reveal. Later calls are no-ops.
    pub fn teardown(&mut self) {
        if !self.live {
            return;
        }
        self.live = false;
        self.driver.teardown();
        self.coordinator.clear();
        for panel in &mut self.panels {
            panel.teardown();
        }
        for reveal in &mut self.reveals {
            reveal.teardown();
        }
        tracing::debug!("page torn down");
    }

    /// Return `true` until torn down.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Pinned panels in document order.
    pub fn panels(&self) -> &[PanelController<S>] {
        &self.panels
    }

    /// Panel with section id `id`.
    pub fn panel(&self, id: &str) -> Option<&PanelController<S>> {
        self.panels.iter().find(|p| p.id() == id)
    }

    /// Reveals in document order.
    pub fn reveals(&self) -> &[RevealTrigger<S>] {
        &self.reveals
    }

    /// Snap coordinator.
    pub fn coordinator(&self) -> &SnapCoordinator {
        &self.coordinator
    }

    /// Scroll driver.
    pub fn driver(&self) -> &ScrollDriver {
        &self.driver
    }

    /// Current layout.
    pub fn layout(&self) -> &PageLayout {
        &self.layout
    }

    /// Page description.
    pub fn spec(&self) -> &PageSpec {
        &self.spec
    }

    /// Last tracked scroll position.
    pub fn scroll_y(&self) -> f64 {
        self.driver.scroll_y()
    }
}

fn panel_layout(spec: &PageSpec, section: usize) -> LayoutVariant {
    spec.sections
        .get(section)
        .and_then(SectionSpec::panel)
        .map_or(LayoutVariant::Left, |(_, p)| p.layout)
}

#[cfg(test)]
#[path = "../../tests/unit/session/page_session.rs"]
mod tests;
