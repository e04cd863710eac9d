//! Mode-selected rendering of annotated text.

use serde::{Deserialize, Serialize};

use crate::markup::parser::{changes, clean, Segment, SegmentKind};

/// View toggle supplied by the UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    Clean,
    #[default]
    Changes,
}

/// Count of tagged spans per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeSummary {
    pub additions: usize,
    pub deletions: usize,
    pub rewrites: usize,
}

impl ChangeSummary {
    pub fn from_segments(segments: &[Segment<'_>]) -> Self {
        segments
            .iter()
            .fold(ChangeSummary::default(), |mut acc, s| {
                match s.kind {
                    SegmentKind::Added => acc.additions += 1,
                    SegmentKind::Deleted => acc.deletions += 1,
                    SegmentKind::Rewritten => acc.rewrites += 1,
                    SegmentKind::Plain => {}
                }
                acc
            })
    }

    pub fn total(&self) -> usize {
        self.additions + self.deletions + self.rewrites
    }
}

/// Output of a render pass.
///
/// In `Clean` mode `segments` omits deleted runs and `text` is the merged result.
/// In `Changes` mode every run is kept and `text` is the delimiter-stripped concatenation.
#[derive(Debug, Clone, Serialize)]
pub struct Rendering<'a> {
    pub mode: RenderMode,
    pub segments: Vec<Segment<'a>>,
    pub text: String,
    pub html: String,
    pub summary: ChangeSummary,
}

pub fn render(text: &str, mode: RenderMode) -> Rendering<'_> {
    let all = changes(text);
    let summary = ChangeSummary::from_segments(&all);

    let segments: Vec<Segment<'_>> = match mode {
        RenderMode::Changes => all,
        RenderMode::Clean => all
            .into_iter()
            .filter(|s| s.kind != SegmentKind::Deleted)
            .map(|s| Segment {
                kind: SegmentKind::Plain,
                text: s.text,
            })
            .collect(),
    };

    let flat: String = segments.iter().map(|s| s.text).collect();
    let html = render_html(&segments);

    Rendering {
        mode,
        segments,
        text: flat,
        html,
        summary,
    }
}

/// Both views of one annotated text, for payloads that embed it.
#[derive(Debug, Clone, Serialize)]
pub struct MarkupViews<'a> {
    pub clean: String,
    pub changes: Vec<Segment<'a>>,
    pub html: String,
    pub summary: ChangeSummary,
}

impl<'a> MarkupViews<'a> {
    pub fn of(text: &'a str) -> Self {
        let segments = changes(text);
        Self {
            clean: clean(text),
            html: render_html(&segments),
            summary: ChangeSummary::from_segments(&segments),
            changes: segments,
        }
    }
}

/// CSS class and hover title for a tagged span.
fn span_style(kind: SegmentKind) -> Option<(&'static str, &'static str)> {
    match kind {
        SegmentKind::Plain => None,
        SegmentKind::Added => Some(("markup-add", "Added content")),
        SegmentKind::Deleted => Some(("markup-del", "Removed content")),
        SegmentKind::Rewritten => Some(("markup-rewrite", "Rewritten for impact")),
    }
}

/// Renders segments as inline HTML. Plain runs are escaped and emitted bare.
pub fn render_html(segments: &[Segment<'_>]) -> String {
    let mut out = String::new();
    for segment in segments {
        match span_style(segment.kind) {
            None => out.push_str(&html_escape(segment.text)),
            Some((class, title)) => {
                out.push_str(&format!(
                    r#"<span class="{class}" title="{title}">{}</span>"#,
                    html_escape(segment.text)
                ));
            }
        }
    }
    out
}

fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
