use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    io::{self, Read, Write},
    time::Duration,
};
use zoomable::{
    input::events::TapEvent, GeometryConfig, GestureEvent, InputHandler, MotionProfile,
    Transform, ZoomEngineBuilder, ZoomObserver,
};

/// A gesture script: geometry, motion and the steps to replay
#[derive(Debug, Deserialize)]
struct Script {
    geometry: GeometryConfig,
    #[serde(default)]
    motion: MotionProfile,
    steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Step {
    /// A decoded gesture, delivered as is
    Event(GestureEvent),
    /// One frame of the given length
    TickMs(u64),
    /// A raw tap that still has to be disambiguated
    Tap(TapEvent),
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Line<'a> {
    Transform { time_ms: u128, transform: &'a Transform },
    Zoom { time_ms: u128, zoomed: bool },
}

/// Prints every observed update as one JSON line
struct JsonLines<W: Write> {
    out: W,
    now: Duration,
}

impl<W: Write> JsonLines<W> {
    fn write(&mut self, line: &Line) {
        let result = serde_json::to_string(line)
            .map_err(io::Error::from)
            .and_then(|json| writeln!(self.out, "{}", json));
        if let Err(e) = result {
            log::warn!("failed to write output line: {}", e);
        }
    }
}

impl<W: Write> ZoomObserver for JsonLines<W> {
    fn on_transform(&mut self, transform: &Transform) {
        let time_ms = self.now.as_millis();
        self.write(&Line::Transform { time_ms, transform });
    }

    fn on_zoom_changed(&mut self, zoomed: bool) {
        let time_ms = self.now.as_millis();
        self.write(&Line::Zoom { time_ms, zoomed });
    }
}

fn read_script() -> Result<String> {
    match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read script {}", path)),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("failed to read script from stdin")?;
            Ok(input)
        }
    }
}

fn run(script: Script) -> Result<()> {
    let engine = ZoomEngineBuilder::new()
        .with_geometry(script.geometry)
        .with_motion(script.motion)
        .build()
        .context("invalid geometry")?;

    let observer = JsonLines {
        out: io::stdout().lock(),
        now: Duration::ZERO,
    };
    let mut handler = InputHandler::with_observer(engine, observer);
    let mut now = Duration::ZERO;

    for (index, step) in script.steps.into_iter().enumerate() {
        log::trace!("step {}: {:?}", index, step);
        match step {
            Step::Event(event) => {
                if handler.handle_event(&event).is_none() {
                    log::debug!("step {} filtered: {:?}", index, event);
                }
            }
            Step::TickMs(ms) => {
                now += Duration::from_millis(ms);
                handler.observer_mut().now = now;
                handler.poll(now);
                handler.tick(Duration::from_millis(ms));
            }
            Step::Tap(tap) => {
                handler.handle_tap(tap.position(), now);
            }
        }
    }

    handler.shutdown();
    let mut observer = handler.into_observer();
    observer.out.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let input = read_script()?;
    let script: Script =
        serde_json::from_str(&input).context("failed to parse gesture script")?;
    run(script)
}
