use std::collections::HashMap;

use futures::executor::block_on;
use inkline::{
    BufferBackend, PanelConfig, PanelRegistry, Phase, StrokePanel, TextFetcher, Viewport, load_all,
};

#[derive(Default)]
struct MapFetcher {
    assets: HashMap<String, String>,
}

impl MapFetcher {
    fn with(mut self, url: &str, body: &str) -> Self {
        self.assets.insert(url.to_string(), body.to_string());
        self
    }
}

impl TextFetcher for MapFetcher {
    async fn fetch_text(&self, url: &str) -> anyhow::Result<String> {
        self.assets
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("404 not found: {url}"))
    }
}

const PORTRAIT: &str = r#"<svg viewBox="0 0 200 200">
    <path d="M40,40 C60,10 140,10 160,40 C180,90 140,120 100,120 Z"/>
    <path d="M60,140 Q100,180 140,140"/>
    <path d="M90,90 L95,95"/>
</svg>"#;

const TITLE: &str = r#"<svg viewBox="0 0 400 80">
    <path d="M10,60 L30,20 L50,60 M40,45 H21"/>
    <path d="M70,20 V60 H110"/>
</svg>"#;

fn viewport() -> Viewport {
    Viewport::with_aspect(16.0 / 9.0).unwrap()
}

fn load_panel(url: &str, body: &str, config: PanelConfig) -> StrokePanel<BufferBackend> {
    let fetcher = MapFetcher::default().with(url, body);
    block_on(StrokePanel::load(
        &fetcher,
        config,
        viewport(),
        BufferBackend::new(),
    ))
    .unwrap()
    .expect("document has drawable paths")
}

#[test]
fn full_run_reveals_every_point_exactly_once() {
    let mut panel = load_panel("portrait.svg", PORTRAIT, PanelConfig::portrait("portrait.svg"));
    let total = panel.total_points();
    let total_frames = panel.config().timing.total_frames();
    assert!(total > 0);

    panel.start();
    let mut frame = 0u64;
    let mut last_visible = 0usize;
    while panel.tick().unwrap() {
        let expected = if frame >= total_frames {
            total
        } else {
            (frame as f64 / total_frames as f64 * total as f64).floor() as usize
        };
        assert_eq!(panel.revealed_points(), expected);

        let visible = panel.backend().visible_total();
        assert_eq!(visible, expected);
        assert!(visible >= last_visible);
        last_visible = visible;
        frame += 1;
    }

    assert_eq!(panel.phase(), Phase::Completed);
    assert_eq!(panel.backend().visible_total(), total);
    // One render per reveal frame plus the finishing frame.
    assert_eq!(panel.backend().frames_rendered(), total_frames + 2);
}

#[test]
fn empty_or_missing_documents_produce_no_panel() {
    let fetcher = MapFetcher::default().with("empty.svg", r#"<svg viewBox="0 0 10 10"/>"#);

    let none = block_on(StrokePanel::load(
        &fetcher,
        PanelConfig::preview("empty.svg"),
        viewport(),
        BufferBackend::new(),
    ))
    .unwrap();
    assert!(none.is_none());

    let missing = block_on(StrokePanel::load(
        &fetcher,
        PanelConfig::preview("absent.svg"),
        viewport(),
        BufferBackend::new(),
    ))
    .unwrap();
    assert!(missing.is_none());
}

#[test]
fn hero_documents_load_jointly_then_animate_together() {
    let fetcher = MapFetcher::default()
        .with("portrait.svg", PORTRAIT)
        .with("title.svg", TITLE);

    let sets = block_on(load_all(&fetcher, &[("portrait.svg", 2.0), ("title.svg", 1.8)]));
    assert_eq!(sets.len(), 2);
    assert!(!sets[0].is_empty() && !sets[1].is_empty());

    let mut registry = PanelRegistry::new();
    for (set, config, id) in [
        (sets[0].clone(), PanelConfig::portrait("portrait.svg"), "portrait"),
        (sets[1].clone(), PanelConfig::title("title.svg"), "title"),
    ] {
        let panel =
            StrokePanel::from_segments(set, config, viewport(), BufferBackend::new()).unwrap();
        registry.insert(id, panel);
    }

    // Hero animations start unconditionally at load.
    assert!(registry.start("portrait"));
    assert!(registry.start("title"));

    while registry.tick_all().unwrap() > 0 {}

    for id in ["portrait", "title"] {
        let panel = registry.get(id).unwrap();
        assert_eq!(panel.phase(), Phase::Completed);
        assert_eq!(panel.backend().visible_total(), panel.total_points());
    }
}

#[test]
fn preview_waits_for_visibility_then_runs_once() {
    let mut registry = PanelRegistry::new();
    registry.insert(
        "preview",
        load_panel("p.svg", PORTRAIT, PanelConfig::preview("p.svg")),
    );

    // Off-screen: ticking does nothing.
    assert_eq!(registry.tick_all().unwrap(), 0);
    assert_eq!(registry.get("preview").unwrap().phase(), Phase::Idle);

    // Scrolled into view: the start lands on the next tick.
    assert!(registry.mark_visible("preview"));
    assert_eq!(registry.get("preview").unwrap().phase(), Phase::Idle);
    assert_eq!(registry.tick_all().unwrap(), 1);
    assert_eq!(registry.get("preview").unwrap().phase(), Phase::Running);

    while registry.tick_all().unwrap() > 0 {}
    assert_eq!(registry.get("preview").unwrap().phase(), Phase::Completed);

    // A second visibility signal cannot replay the run.
    assert!(registry.mark_visible("preview"));
    assert_eq!(registry.tick_all().unwrap(), 0);
    assert_eq!(registry.get("preview").unwrap().phase(), Phase::Completed);
}

#[test]
fn resize_during_and_after_run_follows_replay_rules() {
    let mut panel = load_panel("p.svg", PORTRAIT, PanelConfig::preview("p.svg"));
    panel.start();
    for _ in 0..40 {
        panel.tick().unwrap();
    }
    let mid_visible = panel.backend().visible_total();
    assert!(mid_visible > 0 && mid_visible < panel.total_points());

    // Mid-run resize refreshes positions but not the reveal cursor.
    panel.resize(Viewport::with_aspect(1.0).unwrap());
    assert_eq!(panel.backend().visible_total(), mid_visible);
    assert_eq!(panel.phase(), Phase::Running);

    while panel.tick().unwrap() {}
    assert_eq!(panel.phase(), Phase::Completed);

    // Post-completion resize shows the whole drawing immediately.
    panel.resize(Viewport::with_aspect(2.0).unwrap());
    assert_eq!(panel.backend().visible_total(), panel.total_points());
    assert_eq!(panel.backend().last_viewport(), Some(Viewport::with_aspect(1.0).unwrap()));
}
