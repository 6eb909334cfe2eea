// Tests for the derived views: visible tokens, target position and scene
// composition.

use glam::Vec3;
use trails_core::*;

fn input(token: &str, x: f32, y: f32, z: f32) -> TokenRecord {
    TokenRecord::new(token, Vec3::new(x, y, z), true)
}

fn output(token: &str, x: f32, y: f32, z: f32) -> TokenRecord {
    TokenRecord::new(token, Vec3::new(x, y, z), false)
}

fn approx(a: Vec3, b: Vec3) -> bool {
    (a - b).length() < 1e-5
}

#[derive(Default)]
struct RecordingRenderer {
    arrows: Vec<ArrowDraw>,
    labels: Vec<LabelDraw>,
}

impl SceneRenderer for RecordingRenderer {
    fn draw_arrow(&mut self, arrow: &ArrowDraw) {
        self.arrows.push(arrow.clone());
    }
    fn draw_label(&mut self, label: &LabelDraw) {
        self.labels.push(label.clone());
    }
}

#[test]
fn midpoint_and_lerp_of_known_points() {
    let a = Vec3::ZERO;
    let b = Vec3::new(2.0, 4.0, 6.0);
    assert_eq!(midpoint(a, b), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(lerp(a, b, 0.5), Vec3::new(1.0, 2.0, 3.0));
    assert!((vector_length(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)) - 5.0).abs() < 1e-6);
    let dir = direction(Vec3::ZERO, Vec3::new(0.0, 0.0, 9.0)).unwrap();
    assert!(approx(dir, Vec3::Z));
}

fn names(visible: &[VisibleToken<'_>]) -> Vec<String> {
    visible.iter().map(|t| t.record.token.clone()).collect()
}

#[test]
fn visible_tokens_follow_step_and_phase() {
    let inputs = vec![input("a", 1.0, 0.0, 0.0), input("b", 2.0, 0.0, 0.0)];
    let outputs = vec![
        output("c", 3.0, 0.0, 0.0),
        output("d", 4.0, 0.0, 0.0),
        output("e", 5.0, 0.0, 0.0),
    ];
    let idle = visible_tokens(&inputs, &outputs, 1, Phase::Idle);
    assert_eq!(names(&idle), ["a", "b", "c"]);
    assert!(idle.iter().all(|t| !t.in_flight));

    let gathering = visible_tokens(&inputs, &outputs, 1, Phase::Gathering);
    assert_eq!(names(&gathering), ["a", "b", "c"]);

    let growing = visible_tokens(&inputs, &outputs, 1, Phase::Growing);
    assert_eq!(names(&growing), ["a", "b", "c", "d"]);
    assert!(growing.last().unwrap().in_flight);

    let done = visible_tokens(&inputs, &outputs, 3, Phase::Growing);
    assert_eq!(names(&done), ["a", "b", "c", "d", "e"]);

    let overshoot = visible_tokens(&inputs, &outputs, 10, Phase::Idle);
    assert_eq!(overshoot.len(), 5);
}

#[test]
fn target_is_midpoint_of_next_arrow() {
    let inputs = vec![input("a", 2.0, 0.0, 0.0)];
    let outputs = vec![output("b", 2.0, 2.0, 0.0), output("c", 0.0, 2.0, 0.0)];

    // first output starts at the last input
    assert_eq!(
        target_position(&inputs, &outputs, 0),
        Vec3::new(2.0, 1.0, 0.0)
    );
    // later outputs start at the previous output
    assert_eq!(
        target_position(&inputs, &outputs, 1),
        Vec3::new(1.0, 2.0, 0.0)
    );
    // past the end falls back to the origin
    assert_eq!(target_position(&inputs, &outputs, 2), Vec3::ZERO);
    // no inputs: first arrow starts at the origin
    assert_eq!(target_position(&[], &outputs, 0), Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn arrows_chain_from_origin_and_only_in_flight_grows() {
    let inputs = vec![input("a", 1.0, 0.0, 0.0)];
    let outputs = vec![output("b", 1.0, 1.0, 0.0)];
    let visible = visible_tokens(&inputs, &outputs, 0, Phase::Growing);
    let frame = SceneFrame {
        visible: &visible,
        phase: Phase::Growing,
        gather_progress: 0.0,
        grow_progress: 0.4,
        target: Vec3::ZERO,
    };
    let config = SceneConfig::default();
    let plan = compose(&frame, &config);

    assert_eq!(plan.arrows.len(), 2);
    assert_eq!(plan.arrows[0].start, Vec3::ZERO);
    assert_eq!(plan.arrows[0].end, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(plan.arrows[0].grow_fraction, 1.0);
    assert_eq!(plan.arrows[0].color, config.input_color);
    assert_eq!(plan.arrows[1].start, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(plan.arrows[1].grow_fraction, 0.4);
    assert_eq!(plan.arrows[1].color, config.output_color);
    assert!(approx(plan.arrows[1].tip(), Vec3::new(1.0, 0.4, 0.0)));

    assert_eq!(plan.labels.len(), 2);
    assert!(approx(plan.labels[0].position, Vec3::new(0.5, 0.0, 0.0)));
    assert!(approx(plan.labels[1].position, Vec3::new(1.0, 0.5, 0.0)));
    assert!(plan.gathering.is_empty());
}

#[test]
fn consecutive_zero_length_outputs_share_one_label() {
    let tokens = vec![
        input("Hi", 1.0, 1.0, 0.0),
        output("tokenA", 1.0, 1.0, 0.0),
        output(" tokenB", 1.0, 1.0, 0.0),
    ];
    let refs: Vec<&TokenRecord> = tokens.iter().collect();
    let labels = layout_labels(&refs, TOKEN_FONT_SIZE);

    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].text, "Hi");
    assert!(approx(labels[0].position, Vec3::new(0.5, 0.5, 0.0)));
    assert_eq!(labels[1].text, "tokenA tokenB");
    assert!(!labels[1].is_input);
    assert!(approx(labels[1].position, Vec3::new(1.0, 1.0, 0.0)));
}

#[test]
fn mixed_type_run_is_centered_on_shared_point() {
    let tokens = vec![
        input("in", 0.0, 0.0, 0.0),
        output("out", 0.0, 0.0, 0.0),
        output("more", 0.0, 0.0, 0.0),
    ];
    let refs: Vec<&TokenRecord> = tokens.iter().collect();
    let font = 0.1;
    let labels = layout_labels(&refs, font);

    assert_eq!(labels.len(), 2);
    assert_eq!(labels[0].text, "in");
    assert!(labels[0].is_input);
    assert_eq!(labels[1].text, "out more");
    assert!(labels[0].position.x < 0.0 && labels[1].position.x > 0.0);
    assert_eq!(labels[0].position.y, 0.0);
    assert_eq!(labels[1].position.z, 0.0);

    // row is centered: left edge and right edge are symmetric
    let w0 = text_width("in", font);
    let w1 = text_width("out more", font);
    let left = labels[0].position.x - w0 / 2.0;
    let right = labels[1].position.x + w1 / 2.0;
    assert!((left + right).abs() < 1e-5);
}

#[test]
fn gathering_copies_fly_toward_target() {
    let inputs = vec![input("a", 2.0, 0.0, 0.0)];
    let outputs = vec![output("b", 2.0, 2.0, 0.0)];
    let visible = visible_tokens(&inputs, &outputs, 0, Phase::Gathering);
    let target = target_position(&inputs, &outputs, 0);
    let frame = SceneFrame {
        visible: &visible,
        phase: Phase::Gathering,
        gather_progress: 0.5,
        grow_progress: 0.0,
        target,
    };
    let plan = compose(&frame, &SceneConfig::default());

    assert_eq!(plan.labels.len(), 1);
    assert_eq!(plan.gathering.len(), 1);
    let copy = &plan.gathering[0];
    assert_eq!(copy.kind, LabelKind::Gathering);
    assert!(approx(copy.position, lerp(Vec3::new(1.0, 0.0, 0.0), target, 0.5)));
    assert!((copy.opacity - GATHERING_TOKEN_OPACITY_BASE).abs() < 1e-6);
    assert_eq!(copy.scale, 1.0);
    assert_eq!(copy.font_size, GATHERING_TOKEN_FONT_SIZE);
}

#[test]
fn gathering_fade_and_shrink_thresholds() {
    assert_eq!(gathering_opacity(0.0), GATHERING_TOKEN_OPACITY_BASE);
    assert_eq!(gathering_opacity(0.89), GATHERING_TOKEN_OPACITY_BASE);
    assert!((gathering_opacity(0.9) - GATHERING_TOKEN_OPACITY_BASE).abs() < 1e-4);
    assert!((gathering_opacity(0.95) - 0.35).abs() < 1e-4);
    assert!(gathering_opacity(1.0).abs() < 1e-6);

    assert_eq!(gathering_scale(0.5), 1.0);
    assert_eq!(gathering_scale(0.79), 1.0);
    assert!((gathering_scale(0.9) - 0.5).abs() < 1e-4);
    assert!(gathering_scale(1.0).abs() < 1e-6);
}

#[test]
fn submit_skips_degenerate_arrows() {
    let inputs = vec![input("a", 0.0, 0.0, 0.0), input("b", 1.0, 0.0, 0.0)];
    let outputs = vec![output("c", 1.0, 1.0, 0.0)];
    let visible = visible_tokens(&inputs, &outputs, 0, Phase::Growing);
    let frame = SceneFrame {
        visible: &visible,
        phase: Phase::Growing,
        gather_progress: 0.0,
        grow_progress: 0.0,
        target: Vec3::ZERO,
    };
    let plan = compose(&frame, &SceneConfig::default());
    assert_eq!(plan.arrows.len(), 3);

    let mut renderer = RecordingRenderer::default();
    plan.submit(&mut renderer);
    // "a" has zero length and "c" has not started growing
    assert_eq!(renderer.arrows.len(), 1);
    assert_eq!(renderer.arrows[0].end, Vec3::new(1.0, 0.0, 0.0));
    assert_eq!(renderer.labels.len(), plan.labels.len());
}

#[test]
fn font_size_is_clamped() {
    let mut config = SceneConfig::default();
    config.set_font_size(1.0);
    assert_eq!(config.font_size, MAX_FONT_SIZE);
    config.set_font_size(0.0);
    assert_eq!(config.font_size, MIN_FONT_SIZE);
    config.set_font_size(f32::NAN);
    assert_eq!(config.font_size, MIN_FONT_SIZE);
}

#[test]
fn stacked_groups_are_one_gap_apart() {
    let tokens = vec![
        input("in", 0.0, 0.0, 0.0),
        output("out", 0.0, 0.0, 0.0),
        output("more", 0.0, 0.0, 0.0),
    ];
    let refs: Vec<&TokenRecord> = tokens.iter().collect();
    let font = 0.1;
    let labels = layout_labels(&refs, font);

    let w0 = text_width("in", font);
    let w1 = text_width("out more", font);
    let gap = font * SPACE_WIDTH_RATIO;
    let spacing = labels[1].position.x - labels[0].position.x;
    assert!((spacing - (w0 / 2.0 + gap + w1 / 2.0)).abs() < 1e-5);
}
