use crate::{
    animation::stroke::{Phase, StrokeAnimator, Tick},
    foundation::{core::Viewport, error::InklineResult},
    model::{PanelConfig, SegmentSet},
    render::backend::{LineBackend, LineId},
    svg::loader::{TextFetcher, load_segments},
};

/// Collects a visibility signal and releases it on the following tick, so a
/// start triggered from an observation callback never re-enters layout on the
/// same pass.
#[derive(Debug, Default)]
pub struct VisibilityGate {
    pending: bool,
}

impl VisibilityGate {
    pub fn mark_visible(&mut self) {
        self.pending = true;
    }

    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }
}

/// One stroke animation: an SVG document revealed over a frame budget on its
/// own backend and viewport.
///
/// The panel keeps two copies of the loaded geometry. `template` stays
/// pristine; `working` is what the current viewport's framing produced and
/// what vertices are written from. A resize throws `working` away and
/// re-frames a fresh clone of `template`, so layout never compounds.
#[derive(Debug)]
pub struct StrokePanel<B: LineBackend> {
    config: PanelConfig,
    viewport: Viewport,
    backend: B,
    template: SegmentSet,
    working: SegmentSet,
    lines: Vec<LineId>,
    drawn: Vec<usize>, // per-segment reveal cursor
    animator: StrokeAnimator,
    gate: VisibilityGate,
}

impl<B: LineBackend> StrokePanel<B> {
    /// Fetch and flatten `config.svg_url`, returning `Ok(None)` when the
    /// document yields nothing to animate (failed fetch, no usable paths) so
    /// the caller simply skips this panel.
    pub async fn load<F: TextFetcher>(
        fetcher: &F,
        config: PanelConfig,
        viewport: Viewport,
        backend: B,
    ) -> InklineResult<Option<Self>> {
        config.validate()?;
        let template = load_segments(fetcher, &config.svg_url, config.scale).await;
        if template.is_empty() {
            return Ok(None);
        }
        Self::from_segments(template, config, viewport, backend).map(Some)
    }

    /// Build a panel from already-flattened segments.
    pub fn from_segments(
        template: SegmentSet,
        config: PanelConfig,
        viewport: Viewport,
        mut backend: B,
    ) -> InklineResult<Self> {
        config.timing.validate()?;

        let mut working = template.clone();
        config.framing.apply(&mut working, viewport);

        let lines: Vec<LineId> = working
            .segments
            .iter()
            .map(|seg| backend.alloc_polyline(seg.len(), &config.style))
            .collect();
        let drawn = vec![0; working.len()];
        let animator = StrokeAnimator::new(working.total_points(), config.timing.total_frames())?;

        Ok(Self {
            config,
            viewport,
            backend,
            template,
            working,
            lines,
            drawn,
            animator,
            gate: VisibilityGate::default(),
        })
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn phase(&self) -> Phase {
        self.animator.phase()
    }

    pub fn total_points(&self) -> usize {
        self.animator.total_points()
    }

    pub fn revealed_points(&self) -> usize {
        self.animator.revealed()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Begin the reveal immediately (hero behavior). False if already run.
    pub fn start(&mut self) -> bool {
        self.animator.start()
    }

    /// Record that the panel scrolled into view; the run starts on the next
    /// tick (preview behavior). Signals after the single run are ignored.
    pub fn mark_visible(&mut self) {
        self.gate.mark_visible();
    }

    /// Advance one display frame: drain a pending visibility start, reveal
    /// this frame's point budget, render. Returns whether another tick should
    /// be scheduled; an idle or finished panel asks the loop to stop.
    pub fn tick(&mut self) -> InklineResult<bool> {
        if self.gate.take_pending() {
            self.animator.start();
        }
        match self.animator.tick() {
            Tick::Idle => Ok(false),
            Tick::Finished => {
                self.backend.render(&self.viewport)?;
                Ok(false)
            }
            Tick::Reveal(budget) => {
                self.advance_reveal(budget);
                self.backend.render(&self.viewport)?;
                Ok(true)
            }
        }
    }

    /// Re-frame against a new viewport. Vertices are rewritten from a fresh
    /// layout of the template; a completed panel shows its full point set at
    /// once, a running or idle one keeps its reveal cursor untouched.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;

        let mut fresh = self.template.clone();
        self.config.framing.apply(&mut fresh, viewport);
        self.working = fresh;

        let completed = self.animator.phase() == Phase::Completed;
        for (i, seg) in self.working.segments.iter().enumerate() {
            for (j, p) in seg.points.iter().enumerate() {
                self.backend.write_vertex(self.lines[i], j, p.x, p.y);
            }
            if completed {
                self.drawn[i] = seg.len();
                self.backend.set_draw_range(self.lines[i], seg.len());
            }
        }
    }

    /// Walk the reveal frontier forward by `budget` points: skip fully
    /// revealed segments, fill the first incomplete one, spill the remainder
    /// into the next.
    fn advance_reveal(&mut self, budget: usize) {
        let mut left = budget;
        for (i, seg) in self.working.segments.iter().enumerate() {
            if left == 0 {
                break;
            }
            let drawn = self.drawn[i];
            if drawn >= seg.len() {
                continue;
            }

            let n = left.min(seg.len() - drawn);
            for k in 0..n {
                let p = seg.points[drawn + k];
                self.backend.write_vertex(self.lines[i], drawn + k, p.x, p.y);
            }
            self.drawn[i] += n;
            self.backend.set_draw_range(self.lines[i], self.drawn[i]);
            left -= n;
        }
    }
}
