//! Headless driver for the replace transition.
//!
//! Plays a scripted sequence of panel swaps against simulated child
//! transitions and a simulated 60 fps frame clock, logging every event the
//! container emits.
//!
//! Run with: `RUST_LOG=debug cargo run` (scenario from `rune.toml` or
//! `DEMO_SCENARIO=tabs|wizard|collapse`).

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Result, bail};
use rune_config::RuneConfig;
use rune_replace::{
    Completion, HookResult, ReplaceEvent, ReplaceTransition, SlotKey, TransitionChild,
};

const FRAME_MS: u64 = 16;
const FALLBACK_TRANSITION_MS: u64 = 250;

#[derive(Debug, Clone)]
struct Panel {
    id: &'static str,
    height: f64,
    width: f64,
}

impl Panel {
    fn new(id: &'static str, height: f64, width: f64) -> Self {
        Self { id, height, width }
    }
}

/// Tokens of running transitions, each with the time it finishes.
#[derive(Default)]
struct Timeline {
    now_ms: u64,
    running: Vec<(u64, Completion)>,
}

impl Timeline {
    fn due(&mut self) -> Vec<Completion> {
        let now = self.now_ms;
        let (due, running): (Vec<_>, Vec<_>) = self
            .running
            .drain(..)
            .partition(|(finish_at, _)| *finish_at <= now);
        self.running = running;
        due.into_iter().map(|(_, done)| done).collect()
    }
}

/// A child whose transitions simply take their timeout to run.
struct SimulatedChild {
    panel: Panel,
    timeline: Rc<RefCell<Timeline>>,
}

impl SimulatedChild {
    fn start(&mut self, done: Completion, timeout: Option<Duration>) -> HookResult {
        let length = timeout
            .map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(FALLBACK_TRANSITION_MS);
        log::debug!(
            "{} starts {} on slot {} ({}ms)",
            self.panel.id,
            done.phase(),
            done.key(),
            length
        );
        let mut timeline = self.timeline.borrow_mut();
        let finish_at = timeline.now_ms.saturating_add(length);
        timeline.running.push((finish_at, done));
        HookResult::Pending
    }
}

impl TransitionChild for SimulatedChild {
    fn on_appear(&mut self, done: Completion, timeout: Option<Duration>) -> HookResult {
        self.start(done, timeout)
    }

    fn on_enter(&mut self, done: Completion, timeout: Option<Duration>) -> HookResult {
        self.start(done, timeout)
    }

    fn on_leave(&mut self, done: Completion, timeout: Option<Duration>) -> HookResult {
        self.start(done, timeout)
    }

    fn measure_height(&self) -> f64 {
        self.panel.height
    }

    fn measure_width(&self) -> f64 {
        self.panel.width
    }
}

struct Host {
    transition: ReplaceTransition<Panel, &'static str>,
    timeline: Rc<RefCell<Timeline>>,
    frame_requested: bool,
    log_events: bool,
}

impl Host {
    fn new(config: &RuneConfig, initial: Option<Panel>) -> Result<Self> {
        let transition = ReplaceTransition::new(
            config.transition.clone(),
            initial.into_iter().collect(),
            |panel: &Panel| panel.id,
        )?;
        let mut host = Self {
            transition,
            timeline: Rc::default(),
            frame_requested: false,
            log_events: config.demo.log_events,
        };
        host.render();
        host.transition.mount()?;
        host.poll_events()?;
        Ok(host)
    }

    fn render(&mut self) {
        let fresh: Vec<(SlotKey, Panel)> = self
            .transition
            .render()
            .slots
            .iter()
            .filter(|slot| !self.transition.has_handle(slot.key))
            .map(|slot| (slot.key, slot.child.clone()))
            .collect();

        for (key, panel) in fresh {
            let child = SimulatedChild {
                panel,
                timeline: Rc::clone(&self.timeline),
            };
            self.transition.register_handle(key, Box::new(child));
        }
    }

    fn show(&mut self, next: Option<Panel>) -> Result<()> {
        log::info!(
            "t={}ms show {}",
            self.timeline.borrow().now_ms,
            next.as_ref().map_or("nothing", |panel| panel.id)
        );
        self.transition.submit(next)?;
        self.render();
        self.transition.settle()?;
        self.poll_events()
    }

    /// Advance one frame: finish due transitions, then run the frame
    /// callback if one was requested before this frame.
    fn tick(&mut self) -> Result<()> {
        self.timeline.borrow_mut().now_ms += FRAME_MS;

        if std::mem::take(&mut self.frame_requested) {
            self.transition.on_frame()?;
        }

        let due = self.timeline.borrow_mut().due();
        for done in due {
            self.transition.complete(done)?;
        }
        self.poll_events()
    }

    fn poll_events(&mut self) -> Result<()> {
        for event in self.transition.drain_events() {
            if event == ReplaceEvent::FrameRequested {
                self.frame_requested = true;
            }
            if self.log_events {
                let slot = event.key().map_or_else(|| "-".to_string(), |key| key.to_string());
                log::info!(
                    "t={}ms slot={} {}",
                    self.timeline.borrow().now_ms,
                    slot,
                    serde_json::to_string(&event)?
                );
            }
        }
        Ok(())
    }

    fn idle(&self) -> bool {
        self.timeline.borrow().running.is_empty() && !self.frame_requested
    }
}

/// Steps of a scenario: (time in ms, panel to show).
type Script = Vec<(u64, Option<Panel>)>;

fn scenario(name: &str) -> Result<(Option<Panel>, Script)> {
    let general = Panel::new("general", 120.0, 480.0);
    let network = Panel::new("network", 260.0, 480.0);
    let about = Panel::new("about", 80.0, 320.0);

    Ok(match name {
        "tabs" => (
            Some(general.clone()),
            vec![(100, Some(network)), (900, Some(about)), (1700, Some(general))],
        ),
        // Steps replaced before their enter finishes.
        "wizard" => (
            Some(general),
            vec![(100, Some(network)), (150, Some(about)), (180, None)],
        ),
        "collapse" => (
            Some(network),
            vec![(100, None), (800, Some(about)), (850, Some(about_again()))],
        ),
        other => bail!("unknown scenario {other:?} (expected tabs, wizard or collapse)"),
    })
}

/// Same identity as `about`, taller content. Does not replace anything.
fn about_again() -> Panel {
    Panel::new("about", 140.0, 320.0)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = RuneConfig::load();
    let name = config.demo.scenario.clone().unwrap_or_else(|| "wizard".to_string());
    let (initial, mut script) = scenario(&name)?;
    log::info!("running scenario {name}");

    let mut host = Host::new(&config, initial)?;
    script.reverse();

    while !script.is_empty() || !host.idle() {
        let now = host.timeline.borrow().now_ms;
        while script.last().is_some_and(|(at, _)| *at <= now) {
            if let Some((_, next)) = script.pop() {
                host.show(next)?;
            }
        }
        host.tick()?;
    }

    host.transition.teardown();
    host.poll_events()?;
    println!("{}", serde_json::to_string_pretty(&host.transition.snapshot())?);
    Ok(())
}
