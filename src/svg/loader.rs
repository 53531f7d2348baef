use std::path::PathBuf;

use anyhow::Context as _;

use crate::{
    foundation::error::{InklineError, InklineResult},
    model::{Segment, SegmentSet},
    path::flatten::PathFlattener,
};

/// One-shot fetch of a static text asset by URL.
///
/// The crate is transport-agnostic: pages hand in whatever reaches their
/// assets (filesystem, HTTP, embedded). A fetch error is the "HTTP non-OK"
/// case of the loader's soft-failure policy.
pub trait TextFetcher {
    fn fetch_text(&self, url: &str) -> impl Future<Output = anyhow::Result<String>>;
}

/// Fetcher serving files below a root directory; `url` is a relative path.
#[derive(Clone, Debug)]
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TextFetcher for FsFetcher {
    async fn fetch_text(&self, url: &str) -> anyhow::Result<String> {
        let path = self.root.join(url);
        std::fs::read_to_string(&path).with_context(|| format!("reading '{}'", path.display()))
    }
}

const DEFAULT_VIEW_BOX: &str = "0 0 300 300";

/// Load one SVG document and flatten every `<path>` into a segment.
///
/// Never fails: fetch or parse problems are logged and degrade to an empty
/// set, which callers must treat as "nothing to animate".
#[tracing::instrument(skip(fetcher))]
pub async fn load_segments<F: TextFetcher>(fetcher: &F, url: &str, scale: f64) -> SegmentSet {
    match try_load(fetcher, url, scale).await {
        Ok(set) => {
            tracing::debug!(
                url,
                segments = set.len(),
                points = set.total_points(),
                "svg loaded"
            );
            set
        }
        Err(err) => {
            tracing::warn!(url, error = %err, "svg load failed; treating as empty");
            SegmentSet::default()
        }
    }
}

/// Load several documents as jointly-awaited independent fetches, so one slow
/// or failing asset never blocks a sibling animation. Results keep request
/// order; a failed load is an empty set in its slot.
pub async fn load_all<F: TextFetcher>(fetcher: &F, requests: &[(&str, f64)]) -> Vec<SegmentSet> {
    futures::future::join_all(
        requests
            .iter()
            .map(|&(url, scale)| load_segments(fetcher, url, scale)),
    )
    .await
}

async fn try_load<F: TextFetcher>(fetcher: &F, url: &str, scale: f64) -> InklineResult<SegmentSet> {
    let text = fetcher.fetch_text(url).await?;
    parse_document(&text, scale)
}

/// Parse SVG text into flattened segments. Exposed for callers that already
/// hold the document body (tests, embedded assets).
pub fn parse_document(text: &str, scale: f64) -> InklineResult<SegmentSet> {
    let doc = roxmltree::Document::parse(text)
        .map_err(|e| InklineError::parse(format!("invalid svg document: {e}")))?;
    let root = doc.root_element();

    let view_box = parse_view_box(root.attribute("viewBox").unwrap_or(DEFAULT_VIEW_BOX))?;
    // A zero attribute defers to the viewBox, like the unusable-attribute case.
    let width = attr_leading_f64(&root, "width")
        .filter(|w| *w != 0.0)
        .unwrap_or(view_box.0);
    let height = attr_leading_f64(&root, "height")
        .filter(|h| *h != 0.0)
        .unwrap_or(view_box.1);
    if !(width > 0.0 && height > 0.0) {
        return Err(InklineError::parse(format!(
            "unusable svg dimensions {width}x{height}"
        )));
    }

    let mut segments = Vec::new();
    // Document order is render and animation order.
    for node in root
        .descendants()
        .filter(|n| n.is_element() && n.has_tag_name("path"))
    {
        let d = node.attribute("d").unwrap_or("");
        let segment = Segment::new(PathFlattener::new(width, height, scale).flatten(d));
        if !segment.is_degenerate() {
            segments.push(segment);
        }
    }

    Ok(SegmentSet::new(segments))
}

/// Extract (width, height) from a viewBox attribute.
fn parse_view_box(raw: &str) -> InklineResult<(f64, f64)> {
    let parts: Vec<f64> = raw
        .split([' ', ','])
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| InklineError::parse(format!("invalid viewBox number '{s}'")))
        })
        .collect::<InklineResult<_>>()?;
    if parts.len() != 4 {
        return Err(InklineError::parse(format!(
            "viewBox must have 4 numbers, got {}",
            parts.len()
        )));
    }
    Ok((parts[2], parts[3]))
}

/// Lenient numeric attribute read: takes the longest parseable leading number,
/// so `width="300px"` resolves to 300 and garbage falls back to the viewBox.
fn attr_leading_f64(node: &roxmltree::Node<'_, '_>, name: &str) -> Option<f64> {
    let raw = node.attribute(name)?.trim_start();
    let mut end = 0;
    let bytes = raw.as_bytes();
    if end < bytes.len() && (bytes[end] == b'+' || bytes[end] == b'-') {
        end += 1;
    }
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    raw[..end].parse::<f64>().ok()
}
