use anyhow::{anyhow, Context};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use trails_core::{
    ArrowDraw, LabelDraw, LabelKind, LoadError, PlaybackEvent, SceneRenderer, Session, TokenRecord,
    VisualizeResponse, DEFAULT_ANIMATION_SPEED, FRAME_INTERVAL,
};

mod demo;

const DEFAULT_SEED: u64 = 42;
// Backstop in case playback never reports finished.
const MAX_RUNTIME: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, PartialEq)]
struct Args {
    path: Option<PathBuf>,
    speed: f32,
    seed: u64,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> anyhow::Result<Args> {
    let mut parsed = Args {
        path: None,
        speed: DEFAULT_ANIMATION_SPEED,
        seed: DEFAULT_SEED,
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--speed" => {
                let v = args.next().ok_or_else(|| anyhow!("--speed needs a value"))?;
                parsed.speed = v.parse().with_context(|| format!("bad --speed {v:?}"))?;
            }
            "--seed" => {
                let v = args.next().ok_or_else(|| anyhow!("--seed needs a value"))?;
                parsed.seed = v.parse().with_context(|| format!("bad --seed {v:?}"))?;
            }
            flag if flag.starts_with("--") => return Err(anyhow!("unknown flag {flag}")),
            _ if parsed.path.is_none() => parsed.path = Some(PathBuf::from(&arg)),
            _ => return Err(anyhow!("unexpected argument {arg:?}")),
        }
    }
    Ok(parsed)
}

fn load_file(path: &Path) -> Result<Vec<TokenRecord>, LoadError> {
    let body = std::fs::read_to_string(path)?;
    Ok(VisualizeResponse::from_json(&body)?.tokens)
}

/// Reports draw calls through the logger instead of a window.
#[derive(Default)]
struct LogRenderer {
    arrows: usize,
    labels: usize,
    gathering: usize,
}

impl SceneRenderer for LogRenderer {
    fn draw_arrow(&mut self, arrow: &ArrowDraw) {
        self.arrows += 1;
        let tip = arrow.tip();
        log::trace!(
            "arrow {:?} -> {:?} grow={:.2}",
            arrow.start,
            tip,
            arrow.grow_fraction
        );
    }

    fn draw_label(&mut self, label: &LabelDraw) {
        match label.kind {
            LabelKind::Settled => self.labels += 1,
            LabelKind::Gathering => self.gathering += 1,
        }
        log::trace!(
            "label {:?} at {:?} alpha={:.2} scale={:.2}",
            label.text,
            label.position,
            label.opacity,
            label.scale
        );
    }
}

fn report(session: &Session, event: &PlaybackEvent) {
    match event {
        PlaybackEvent::GatherStarted { step } => log::debug!("[player] gathering toward step {step}"),
        PlaybackEvent::GrowStarted { step } => {
            let target = session.target_position();
            log::debug!(
                "[player] growing step {step}, gathered at ({:.2},{:.2},{:.2})",
                target.x,
                target.y,
                target.z
            );
        }
        PlaybackEvent::StepAdvanced { .. } => {
            let mut renderer = LogRenderer::default();
            session.compose().submit(&mut renderer);
            log::info!(
                "[player] {} | {} arrows, {} labels | {:?}",
                session.step_label(),
                renderer.arrows,
                renderer.labels,
                session.output_text()
            );
        }
        PlaybackEvent::Finished => log::info!("[player] finished: {:?}", session.output_text()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = parse_args(std::env::args().skip(1))?;
    let records = match &args.path {
        Some(path) => load_file(path).with_context(|| format!("loading {}", path.display()))?,
        None => {
            log::info!("no token file given; playing demo trajectory (seed {})", args.seed);
            demo::demo_records(args.seed)
        }
    };

    let mut session = Session::default();
    session.load_records(records);
    session.set_speed(args.speed);
    log::info!(
        "[player] {} steps at {:.2}x",
        session.engine().total_steps(),
        session.engine().speed()
    );
    if session.engine().total_steps() == 0 {
        log::warn!("[player] sequence has no output tokens; nothing to play");
        return Ok(());
    }
    session.play();

    let started = Instant::now();
    let mut last = started;
    let mut events = Vec::new();
    while session.engine().is_playing() {
        std::thread::sleep(FRAME_INTERVAL);
        let now = Instant::now();
        events.clear();
        session.tick(now - last, &mut events);
        last = now;
        for ev in &events {
            report(&session, ev);
        }

        let mut renderer = LogRenderer::default();
        session.compose().submit(&mut renderer);
        log::trace!(
            "[player] frame: {} arrows, {} labels, {} gathering",
            renderer.arrows,
            renderer.labels,
            renderer.gathering
        );

        if now - started > MAX_RUNTIME {
            return Err(anyhow!("playback did not finish within {:?}", MAX_RUNTIME));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> anyhow::Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_path_and_flags() {
        let parsed = args(&["tokens.json", "--speed", "2", "--seed", "9"]).unwrap();
        assert_eq!(
            parsed,
            Args {
                path: Some(PathBuf::from("tokens.json")),
                speed: 2.0,
                seed: 9,
            }
        );
    }

    #[test]
    fn defaults_without_arguments() {
        let parsed = args(&[]).unwrap();
        assert_eq!(parsed.path, None);
        assert_eq!(parsed.speed, DEFAULT_ANIMATION_SPEED);
        assert_eq!(parsed.seed, DEFAULT_SEED);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(args(&["--speed"]).is_err());
        assert!(args(&["--speed", "fast"]).is_err());
        assert!(args(&["--verbose"]).is_err());
        assert!(args(&["a.json", "b.json"]).is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_file(Path::new("/nonexistent/tokens.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn renderer_counts_draw_calls() {
        let mut session = Session::default();
        session.load_records(demo::demo_records(1));
        session.seek(4);
        let mut renderer = LogRenderer::default();
        session.compose().submit(&mut renderer);
        // four inputs and four outputs; the last two have zero length, so
        // they draw no arrows and share one merged label
        assert_eq!(renderer.arrows, 6);
        assert_eq!(renderer.labels, 7);
        assert_eq!(renderer.gathering, 0);
    }
}
