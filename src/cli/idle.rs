// Idle screen
//
// After a stretch without key activity the output pane is covered by a fake
// system log and a rotating set of profile slides. The overlay owns its
// timers, so dropping it (on the next key press) stops everything.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::time::Instant;

use super::background::BackgroundTask;
use super::layout::noise_line;
use super::renderer::Display;
use crate::services::Profile;

const LOG_PERIOD: Duration = Duration::from_millis(300);
const SLIDE_PERIOD: Duration = Duration::from_secs(3);
/// Lines kept in the fake log
pub const LOG_CAPACITY: usize = 11;
const LOG_MIN_LEN: usize = 20;
const LOG_MAX_LEN: usize = 50;

/// Tracks key activity against the idle timeout
#[derive(Debug)]
pub struct IdleMonitor {
    timeout: Option<Duration>,
    last_activity: Instant,
}

impl IdleMonitor {
    /// `None` disables idling.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            timeout,
            last_activity: Instant::now(),
        }
    }

    pub fn touch(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn is_idle(&self) -> bool {
        self.timeout
            .is_some_and(|timeout| self.last_activity.elapsed() >= timeout)
    }
}

/// One screen of the rotating profile info
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    pub title: String,
    pub lines: Vec<String>,
}

impl Slide {
    fn new(title: &str, lines: Vec<String>) -> Self {
        Self {
            title: title.to_string(),
            lines,
        }
    }
}

pub fn slides_for(profile: &Profile) -> Vec<Slide> {
    let mut slides = vec![
        Slide::new(
            "IDENTITY",
            vec![profile.name.clone(), profile.title.clone(), profile.location.clone()],
        ),
        Slide::new(
            "SKILLS",
            profile
                .skills
                .iter()
                .map(|g| format!("{}: {}", g.category, g.items.join(", ")))
                .collect(),
        ),
        Slide::new(
            "PROJECTS",
            profile
                .projects
                .iter()
                .enumerate()
                .map(|(i, p)| format!("{}. {}", i + 1, p.name))
                .collect(),
        ),
        Slide::new(
            "CONTACT",
            vec![profile.contact.email.clone(), profile.contact.github.clone()],
        ),
    ];
    slides.retain(|s| !s.lines.is_empty());
    slides
}

#[derive(Debug, Default)]
struct OverlayState {
    log: VecDeque<String>,
    slides: Vec<Slide>,
    current: usize,
}

pub struct IdleOverlay {
    state: Arc<RwLock<OverlayState>>,
    _tasks: [BackgroundTask; 2],
}

impl IdleOverlay {
    pub fn start(profile: &Profile, display: Arc<dyn Display>, seed: Option<u64>) -> Self {
        let state = Arc::new(RwLock::new(OverlayState {
            slides: slides_for(profile),
            ..OverlayState::default()
        }));
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let log = {
            let state = state.clone();
            let display = display.clone();
            BackgroundTask::every("idle-log", LOG_PERIOD, move || {
                let line = noise_line(LOG_MIN_LEN, LOG_MAX_LEN, &mut rng);
                let line = format!("[{:04x}] {}", rng.gen::<u16>(), line);
                let mut state = state.write().unwrap();
                state.log.push_back(line);
                while state.log.len() > LOG_CAPACITY {
                    state.log.pop_front();
                }
                drop(state);
                display.refresh();
            })
        };

        let slides = {
            let state = state.clone();
            let mut first = true;
            BackgroundTask::every("idle-slides", SLIDE_PERIOD, move || {
                // interval fires immediately; keep the first slide for a full period
                if std::mem::take(&mut first) {
                    return;
                }
                let mut state = state.write().unwrap();
                if !state.slides.is_empty() {
                    state.current = (state.current + 1) % state.slides.len();
                }
                drop(state);
                display.refresh();
            })
        };

        Self {
            state,
            _tasks: [log, slides],
        }
    }

    /// Fake log, oldest first
    pub fn log_lines(&self) -> Vec<String> {
        self.state.read().unwrap().log.iter().cloned().collect()
    }

    pub fn current_slide(&self) -> Option<Slide> {
        let state = self.state.read().unwrap();
        state.slides.get(state.current).cloned()
    }
}
