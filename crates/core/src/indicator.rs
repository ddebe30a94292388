use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::markup::{Element, Node};
use crate::timer::{OneShot, Periodic};

/// Shown verbatim while interrupted.
pub const INTERRUPT_MESSAGE: &str = "ERROR: Ray cant stop thinking, please try again later...";

const TIMER_PERIOD: Duration = Duration::from_millis(1000);
const DOTS_PERIOD: Duration = Duration::from_millis(500);
const TOKENS_PERIOD: Duration = Duration::from_millis(50);
const RESUME_DELAY: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Running,
    Interrupted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnimationState {
    pub elapsed_seconds: u64,
    pub token_count: u64,
    /// Cycles 0..=3; renders as `max(phase, 1)` dots, so phase 0 is
    /// indistinguishable from phase 1. Kept that way on purpose.
    pub dot_phase: u8,
}

/// Display handles supplied by the embedding screen. Any may be absent;
/// writes to an absent target are silently skipped.
#[derive(Clone, Default)]
pub struct DisplayTargets {
    pub dots: Option<Element>,
    pub timer: Option<Element>,
    pub tokens: Option<Element>,
    pub container: Option<Element>,
}

/// The "thinking" indicator: a dot cycle, an elapsed-seconds timer, and a
/// purely cosmetic token counter, with an Escape-triggered interrupt state
/// that auto-resumes after three seconds.
///
/// All timing is poll-driven: the owner calls [`advance`](Self::advance)
/// with the current time and due ticks fire then. `start` and `destroy`
/// cancel every pending deadline before arming anything new, so no stale
/// tick can land across a restart.
pub struct ThinkingIndicator {
    state: AnimationState,
    mode: Mode,
    targets: DisplayTargets,
    // Re-resolved from the container on every start; stale once the
    // container content is replaced.
    dots: Option<Element>,
    timer: Option<Element>,
    tokens: Option<Element>,
    timer_tick: Periodic,
    dots_tick: Periodic,
    tokens_tick: Periodic,
    resume: OneShot,
    rng: StdRng,
    destroyed: bool,
}

impl ThinkingIndicator {
    /// Build the indicator and immediately enter Running mode.
    pub fn new(targets: DisplayTargets) -> Self {
        Self::with_rng(targets, StdRng::from_os_rng())
    }

    /// Like [`new`](Self::new) with a caller-supplied rng, so the token
    /// increments can be seeded.
    pub fn with_rng(targets: DisplayTargets, rng: StdRng) -> Self {
        let mut indicator = Self {
            state: AnimationState::default(),
            mode: Mode::Running,
            targets,
            dots: None,
            timer: None,
            tokens: None,
            timer_tick: Periodic::new(TIMER_PERIOD),
            dots_tick: Periodic::new(DOTS_PERIOD),
            tokens_tick: Periodic::new(TOKENS_PERIOD),
            resume: OneShot::new(),
            rng,
            destroyed: false,
        };
        indicator.start(Instant::now());
        indicator
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Reset to a fresh Running cycle: all counters to zero, the template
    /// written into the container, child spans re-resolved, all three
    /// periodics armed. Without a container the counters still reset but
    /// nothing is armed.
    pub fn start(&mut self, now: Instant) {
        if self.destroyed {
            return;
        }
        self.cancel_all();
        self.state = AnimationState::default();
        self.mode = Mode::Running;
        self.dots = None;
        self.timer = None;
        self.tokens = None;

        let Some(container) = self.targets.container.clone() else {
            return;
        };
        container.set_fragment(running_template());
        self.dots = container.query("dots");
        self.timer = container.query("timer");
        self.tokens = container.query("tokens");

        self.timer_tick.arm(now);
        self.dots_tick.arm(now);
        self.tokens_tick.arm(now);
        debug!("thinking indicator running");
    }

    /// Fire whatever is due at `now`. In Interrupted mode this is only the
    /// pending auto-resume.
    pub fn advance(&mut self, now: Instant) {
        if self.destroyed {
            return;
        }
        match self.mode {
            Mode::Running => {
                for _ in 0..self.timer_tick.poll(now) {
                    self.state.elapsed_seconds += 1;
                    if let Some(el) = &self.timer {
                        el.set_text(self.state.elapsed_seconds.to_string());
                    }
                }
                for _ in 0..self.dots_tick.poll(now) {
                    self.state.dot_phase = (self.state.dot_phase + 1) % 4;
                    if let Some(el) = &self.dots {
                        el.set_text(".".repeat(self.state.dot_phase.max(1) as usize));
                    }
                }
                for _ in 0..self.tokens_tick.poll(now) {
                    let increment: u64 = self.rng.random_range(3..=8);
                    self.state.token_count += increment;
                    if let Some(el) = &self.tokens {
                        el.set_text(group_thousands(self.state.token_count));
                    }
                }
            }
            Mode::Interrupted => {
                if self.resume.poll(now) {
                    self.start(now);
                }
            }
        }
    }

    /// The Escape handler. While Running: freeze everything, show the
    /// interrupt message, and arm a one-shot resume. While Interrupted: drop
    /// the pending resume and restart at once. No-op without a container.
    pub fn interrupt(&mut self, now: Instant) {
        if self.destroyed {
            return;
        }
        let Some(container) = self.targets.container.clone() else {
            return;
        };
        match self.mode {
            Mode::Interrupted => {
                self.resume.cancel();
                self.start(now);
            }
            Mode::Running => {
                self.cancel_all();
                self.mode = Mode::Interrupted;
                container.set_text(INTERRUPT_MESSAGE);
                self.resume.arm(now, RESUME_DELAY);
                debug!("thinking indicator interrupted");
            }
        }
    }

    /// End the lifecycle. Every pending deadline is dropped and every later
    /// call is a no-op; no display target is touched again.
    pub fn destroy(&mut self) {
        self.cancel_all();
        self.destroyed = true;
        debug!("thinking indicator destroyed");
    }

    fn cancel_all(&mut self) {
        self.timer_tick.cancel();
        self.dots_tick.cancel();
        self.tokens_tick.cancel();
        self.resume.cancel();
    }
}

fn running_template() -> Vec<Node> {
    vec![
        Node::Literal("Thinking"),
        Node::span("dots", "..."),
        Node::Literal(" ("),
        Node::span("timer", "0"),
        Node::Literal("s · "),
        Node::span("tokens", "0"),
        Node::Literal(" tokens · esc to interrupt)"),
    ]
}

/// Comma-grouped decimal rendering, `1234567` -> `"1,234,567"`.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEMPLATE: &str = "Thinking<span id=\"dots\">...</span> (<span id=\"timer\">0</span>s · <span id=\"tokens\">0</span> tokens · esc to interrupt)";

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn widget() -> (ThinkingIndicator, Element, Instant) {
        let container = Element::new();
        let targets = DisplayTargets {
            container: Some(container.clone()),
            ..Default::default()
        };
        let t0 = Instant::now();
        let mut indicator = ThinkingIndicator::with_rng(targets, StdRng::seed_from_u64(7));
        indicator.start(t0);
        (indicator, container, t0)
    }

    #[test]
    fn start_writes_template_with_zeroed_counters() {
        let (indicator, container, _) = widget();
        assert_eq!(indicator.mode(), Mode::Running);
        assert_eq!(indicator.state(), AnimationState::default());
        assert_eq!(container.inner_html(), TEMPLATE);
    }

    #[test]
    fn timer_reads_k_after_k_seconds() {
        let (mut indicator, container, t0) = widget();
        indicator.advance(t0 + ms(1000));
        assert_eq!(container.query("timer").unwrap().text_content(), "1");
        indicator.advance(t0 + ms(5000));
        assert_eq!(container.query("timer").unwrap().text_content(), "5");
        assert_eq!(indicator.state().elapsed_seconds, 5);
    }

    #[test]
    fn dot_cycle_never_renders_zero_dots() {
        let (mut indicator, container, t0) = widget();
        let dots = container.query("dots").unwrap();
        indicator.advance(t0 + ms(500));
        assert_eq!(dots.text_content(), ".");
        indicator.advance(t0 + ms(1000));
        assert_eq!(dots.text_content(), "..");
        indicator.advance(t0 + ms(1500));
        assert_eq!(dots.text_content(), "...");
        // phase wraps to 0 but still renders one dot
        indicator.advance(t0 + ms(2000));
        assert_eq!(dots.text_content(), ".");
        assert_eq!(indicator.state().dot_phase, 0);
    }

    #[test]
    fn token_increments_stay_in_range() {
        let (mut indicator, _, t0) = widget();
        let mut previous = 0;
        for step in 1..=40 {
            indicator.advance(t0 + ms(50 * step));
            let count = indicator.state().token_count;
            let delta = count - previous;
            assert!((3..=8).contains(&delta), "delta {delta} out of range");
            previous = count;
        }
    }

    #[test]
    fn token_display_uses_thousands_grouping() {
        let (mut indicator, container, t0) = widget();
        // 400 ticks of at least 3 each puts the count past 1,000
        indicator.advance(t0 + ms(50 * 400));
        let text = container.query("tokens").unwrap().text_content();
        assert!(text.contains(','), "expected grouping in {text}");
        assert_eq!(text, group_thousands(indicator.state().token_count));
    }

    #[test]
    fn interrupt_shows_error_and_freezes_counters() {
        let (mut indicator, container, t0) = widget();
        indicator.advance(t0 + ms(1000));
        let frozen = indicator.state();
        indicator.interrupt(t0 + ms(1200));
        assert_eq!(indicator.mode(), Mode::Interrupted);
        assert_eq!(container.text_content(), INTERRUPT_MESSAGE);
        assert_eq!(container.inner_html(), INTERRUPT_MESSAGE);
        indicator.advance(t0 + ms(3000));
        assert_eq!(indicator.state(), frozen);
        assert_eq!(container.text_content(), INTERRUPT_MESSAGE);
    }

    #[test]
    fn second_escape_restarts_immediately() {
        let (mut indicator, container, t0) = widget();
        indicator.advance(t0 + ms(2000));
        indicator.interrupt(t0 + ms(2100));
        indicator.interrupt(t0 + ms(2600));
        assert_eq!(indicator.mode(), Mode::Running);
        assert_eq!(indicator.state(), AnimationState::default());
        assert_eq!(container.inner_html(), TEMPLATE);
        // fresh cycle counts from the restart, and the old resume is gone
        indicator.advance(t0 + ms(3600));
        assert_eq!(container.query("timer").unwrap().text_content(), "1");
        assert_eq!(indicator.mode(), Mode::Running);
    }

    #[test]
    fn auto_resume_after_three_seconds() {
        let (mut indicator, container, t0) = widget();
        indicator.interrupt(t0 + ms(500));
        indicator.advance(t0 + ms(3499));
        assert_eq!(indicator.mode(), Mode::Interrupted);
        assert_eq!(container.text_content(), INTERRUPT_MESSAGE);
        indicator.advance(t0 + ms(3500));
        assert_eq!(indicator.mode(), Mode::Running);
        assert_eq!(indicator.state(), AnimationState::default());
        assert_eq!(container.inner_html(), TEMPLATE);
    }

    #[test]
    fn destroy_stops_all_mutation() {
        let (mut indicator, container, t0) = widget();
        indicator.destroy();
        indicator.advance(t0 + ms(10_000));
        indicator.interrupt(t0 + ms(10_000));
        assert_eq!(indicator.mode(), Mode::Running);
        assert_eq!(indicator.state(), AnimationState::default());
        assert_eq!(container.inner_html(), TEMPLATE);
    }

    #[test]
    fn missing_container_arms_nothing() {
        let t0 = Instant::now();
        let mut indicator =
            ThinkingIndicator::with_rng(DisplayTargets::default(), StdRng::seed_from_u64(7));
        indicator.start(t0);
        indicator.advance(t0 + ms(10_000));
        assert_eq!(indicator.state(), AnimationState::default());
        // escape with no container is a no-op
        indicator.interrupt(t0 + ms(10_000));
        assert_eq!(indicator.mode(), Mode::Running);
    }

    #[test]
    fn group_thousands_inserts_commas() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1_000), "1,000");
        assert_eq!(group_thousands(1_234_567), "1,234,567");
    }
}
