//! Scene composition: turns the visible tokens and the playback progress into
//! draw instructions for an external renderer.
//!
//! One arrow per visible token, chained from the origin; one label per token
//! at its arrow's midpoint, except where consecutive tokens land on the same
//! point (zero-length arrows). Those are merged per run of same-type tokens
//! and laid out side by side, centered on the shared point. While gathering,
//! every label also gets a transient copy flying toward the target point.

use glam::Vec3;
use smallvec::SmallVec;

use crate::constants::{
    CHAR_WIDTH_RATIO, DEFAULT_FONT_SIZE, GATHERING_TOKEN_FONT_SIZE, GATHERING_TOKEN_OPACITY_BASE,
    GATHERING_TOKEN_OPACITY_FADE_START, GATHERING_TOKEN_SCALE_SHRINK_START, INPUT_TOKEN_COLOR,
    MAX_FONT_SIZE, MIN_FONT_SIZE, OUTPUT_TOKEN_COLOR, SPACE_WIDTH_RATIO, TEXT_OFFSET_Y,
};
use crate::engine::Phase;
use crate::geometry::{lerp, midpoint, vector_length};
use crate::projector::VisibleToken;
use crate::record::TokenRecord;

/// Presentation settings handed to the composer explicitly.
#[derive(Clone, Debug)]
pub struct SceneConfig {
    pub font_size: f32,
    pub gathering_font_size: f32,
    pub input_color: [f32; 3],
    pub output_color: [f32; 3],
    /// Renderers lift labels this far above their anchor.
    pub text_offset_y: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            gathering_font_size: GATHERING_TOKEN_FONT_SIZE,
            input_color: INPUT_TOKEN_COLOR,
            output_color: OUTPUT_TOKEN_COLOR,
            text_offset_y: TEXT_OFFSET_Y,
        }
    }
}

impl SceneConfig {
    pub fn set_font_size(&mut self, size: f32) {
        if size.is_finite() {
            self.font_size = size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
        }
    }

    #[inline]
    pub fn color_for(&self, is_input: bool) -> [f32; 3] {
        if is_input {
            self.input_color
        } else {
            self.output_color
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ArrowDraw {
    pub start: Vec3,
    pub end: Vec3,
    pub color: [f32; 3],
    /// 1 for settled arrows, the grow progress for the in-flight one.
    pub grow_fraction: f32,
}

impl ArrowDraw {
    /// Where the arrow currently ends.
    pub fn tip(&self) -> Vec3 {
        lerp(self.start, self.end, self.grow_fraction.clamp(0.0, 1.0))
    }

    /// Nothing to draw: zero length or not grown yet.
    pub fn is_degenerate(&self) -> bool {
        self.grow_fraction <= 0.0 || vector_length(self.start, self.tip()) == 0.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelKind {
    Settled,
    Gathering,
}

#[derive(Clone, Debug, PartialEq)]
pub struct LabelDraw {
    pub position: Vec3,
    pub text: String,
    pub color: [f32; 3],
    pub opacity: f32,
    pub scale: f32,
    pub font_size: f32,
    pub kind: LabelKind,
}

/// Rendering capability supplied by a frontend.
pub trait SceneRenderer {
    fn draw_arrow(&mut self, arrow: &ArrowDraw);
    fn draw_label(&mut self, label: &LabelDraw);
}

/// Everything to draw for one frame.
#[derive(Clone, Debug, Default)]
pub struct ScenePlan {
    pub arrows: Vec<ArrowDraw>,
    pub labels: Vec<LabelDraw>,
    pub gathering: Vec<LabelDraw>,
}

impl ScenePlan {
    pub fn is_empty(&self) -> bool {
        self.arrows.is_empty() && self.labels.is_empty() && self.gathering.is_empty()
    }

    /// Issue the draw calls, skipping degenerate arrows.
    pub fn submit<R: SceneRenderer + ?Sized>(&self, renderer: &mut R) {
        for arrow in self.arrows.iter().filter(|a| !a.is_degenerate()) {
            renderer.draw_arrow(arrow);
        }
        for label in self.labels.iter().chain(self.gathering.iter()) {
            renderer.draw_label(label);
        }
    }
}

/// Inputs for composing one frame.
#[derive(Clone, Copy, Debug)]
pub struct SceneFrame<'a> {
    pub visible: &'a [VisibleToken<'a>],
    pub phase: Phase,
    pub gather_progress: f32,
    pub grow_progress: f32,
    pub target: Vec3,
}

/// A label anchored in world space before styling.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLabel {
    pub position: Vec3,
    pub text: String,
    pub is_input: bool,
}

/// Approximate rendered width of `text` in world units.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: f32 = text
        .chars()
        .map(|c| {
            if c == ' ' {
                SPACE_WIDTH_RATIO
            } else {
                CHAR_WIDTH_RATIO
            }
        })
        .sum();
    units * font_size
}

/// Place one label per token, merging runs that share a point.
pub fn layout_labels(tokens: &[&TokenRecord], font_size: f32) -> Vec<PlacedLabel> {
    let mut labels = Vec::with_capacity(tokens.len());
    let mut start = Vec3::ZERO;
    let mut i = 0;
    while i < tokens.len() {
        let record = tokens[i];
        if vector_length(start, record.destination) > 0.0 {
            labels.push(PlacedLabel {
                position: midpoint(start, record.destination),
                text: record.token.trim().to_string(),
                is_input: record.is_input,
            });
            start = record.destination;
            i += 1;
            continue;
        }

        let mut end = i;
        while end < tokens.len() && vector_length(start, tokens[end].destination) == 0.0 {
            end += 1;
        }
        place_stacked_run(&tokens[i..end], start, font_size, &mut labels);
        i = end;
    }
    labels
}

// Every token in `run` sits on `anchor`. Merge consecutive same-type tokens
// into one text and center the row of texts on the anchor along X.
fn place_stacked_run(
    run: &[&TokenRecord],
    anchor: Vec3,
    font_size: f32,
    out: &mut Vec<PlacedLabel>,
) {
    let mut groups: SmallVec<[(String, bool); 4]> = SmallVec::new();
    for record in run {
        let text = record.token.trim();
        match groups.last_mut() {
            Some((joined, is_input)) if *is_input == record.is_input => {
                joined.push(' ');
                joined.push_str(text);
            }
            _ => groups.push((text.to_string(), record.is_input)),
        }
    }

    // groups are separated by exactly one gap; no extra per-group spacing
    let gap = font_size * SPACE_WIDTH_RATIO;
    let widths: SmallVec<[f32; 4]> = groups
        .iter()
        .map(|(text, _)| text_width(text, font_size))
        .collect();
    let total = widths.iter().sum::<f32>() + gap * groups.len().saturating_sub(1) as f32;

    let mut x = -total / 2.0;
    for ((text, is_input), width) in groups.into_iter().zip(widths) {
        out.push(PlacedLabel {
            position: anchor + Vec3::new(x + width / 2.0, 0.0, 0.0),
            text,
            is_input,
        });
        x += width + gap;
    }
}

/// Gathering label opacity: held at the base value, then fading to 0 from
/// the fade start.
pub fn gathering_opacity(progress: f32) -> f32 {
    if progress < GATHERING_TOKEN_OPACITY_FADE_START {
        GATHERING_TOKEN_OPACITY_BASE
    } else {
        let per_unit = GATHERING_TOKEN_OPACITY_BASE / (1.0 - GATHERING_TOKEN_OPACITY_FADE_START);
        ((1.0 - progress) * per_unit).max(0.0)
    }
}

/// Gathering label scale: 1 until the shrink start, then down to 0 at the end.
pub fn gathering_scale(progress: f32) -> f32 {
    if progress < GATHERING_TOKEN_SCALE_SHRINK_START {
        1.0
    } else {
        let shrink =
            (progress - GATHERING_TOKEN_SCALE_SHRINK_START) / (1.0 - GATHERING_TOKEN_SCALE_SHRINK_START);
        (1.0 - shrink).clamp(0.0, 1.0)
    }
}

pub fn compose(frame: &SceneFrame<'_>, config: &SceneConfig) -> ScenePlan {
    let mut arrows = Vec::with_capacity(frame.visible.len());
    let mut start = Vec3::ZERO;
    for token in frame.visible {
        let record = token.record;
        arrows.push(ArrowDraw {
            start,
            end: record.destination,
            color: config.color_for(record.is_input),
            grow_fraction: if token.in_flight && frame.phase == Phase::Growing {
                frame.grow_progress.clamp(0.0, 1.0)
            } else {
                1.0
            },
        });
        start = record.destination;
    }

    let records: Vec<&TokenRecord> = frame.visible.iter().map(|t| t.record).collect();
    let placed = layout_labels(&records, config.font_size);

    let gathering = if frame.phase == Phase::Gathering {
        let progress = frame.gather_progress.clamp(0.0, 1.0);
        let opacity = gathering_opacity(progress);
        let scale = gathering_scale(progress);
        placed
            .iter()
            .map(|p| LabelDraw {
                position: lerp(p.position, frame.target, progress),
                text: p.text.clone(),
                color: config.color_for(p.is_input),
                opacity,
                scale,
                font_size: config.gathering_font_size,
                kind: LabelKind::Gathering,
            })
            .collect()
    } else {
        Vec::new()
    };

    let labels = placed
        .into_iter()
        .map(|p| LabelDraw {
            position: p.position,
            color: config.color_for(p.is_input),
            text: p.text,
            opacity: 1.0,
            scale: 1.0,
            font_size: config.font_size,
            kind: LabelKind::Settled,
        })
        .collect();

    ScenePlan {
        arrows,
        labels,
        gathering,
    }
}
