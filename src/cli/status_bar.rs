// Status Bar - single line at the bottom of the terminal
//
// Shows a live clock, fake CPU/memory readings and a row of network activity
// dots. Each field is refreshed by its own background task; `stop()` (or
// dropping the bar) ends all of them.

use chrono::Local;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

use super::background::BackgroundTask;
use super::renderer::Display;

const CLOCK_PERIOD: Duration = Duration::from_secs(1);
const METRICS_PERIOD: Duration = Duration::from_secs(2);
const NETWORK_PERIOD: Duration = Duration::from_millis(200);

/// Number of network activity dots
pub const NETWORK_DOTS: usize = 8;
const NETWORK_FLIP_CHANCE: f64 = 0.3;

/// Fields of the status bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusLineType {
    Cpu,
    Memory,
    Network,
    Clock,
}

impl StatusLineType {
    const ORDER: [StatusLineType; 4] = [
        StatusLineType::Cpu,
        StatusLineType::Memory,
        StatusLineType::Network,
        StatusLineType::Clock,
    ];

    fn label(self) -> &'static str {
        match self {
            StatusLineType::Cpu => "CPU",
            StatusLineType::Memory => "MEM",
            StatusLineType::Network => "NET",
            StatusLineType::Clock => "",
        }
    }
}

/// Thread-safe status bar
pub struct StatusBar {
    lines: Arc<RwLock<HashMap<StatusLineType, String>>>,
    tasks: Mutex<Vec<BackgroundTask>>,
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            lines: Arc::new(RwLock::new(HashMap::new())),
            tasks: Mutex::new(Vec::new()),
        }
    }

    pub fn update_line(&self, line_type: StatusLineType, content: impl Into<String>) {
        self.lines.write().unwrap().insert(line_type, content.into());
    }

    /// All fields that have a value, in display order, joined by ` | `.
    pub fn render(&self) -> String {
        let lines = self.lines.read().unwrap();
        StatusLineType::ORDER
            .iter()
            .filter_map(|t| {
                lines.get(t).map(|value| match t.label() {
                    "" => value.clone(),
                    label => format!("{label}: {value}"),
                })
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Start the clock, metrics and network tasks. Calling it again restarts
    /// them.
    pub fn start(&self, display: Arc<dyn Display>, seed: Option<u64>) {
        self.stop();
        let mut rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let clock = {
            let lines = self.lines.clone();
            let display = display.clone();
            BackgroundTask::every("status-clock", CLOCK_PERIOD, move || {
                let now = Local::now().format("%H:%M:%S").to_string();
                lines.write().unwrap().insert(StatusLineType::Clock, now);
                display.refresh();
            })
        };

        let metrics = {
            let lines = self.lines.clone();
            let display = display.clone();
            let mut rng = SmallRng::seed_from_u64(rng.gen());
            BackgroundTask::every("status-metrics", METRICS_PERIOD, move || {
                let (cpu, mem) = fake_metrics(&mut rng);
                let mut lines = lines.write().unwrap();
                lines.insert(StatusLineType::Cpu, format!("{cpu}%"));
                lines.insert(StatusLineType::Memory, format!("{mem}%"));
                drop(lines);
                display.refresh();
            })
        };

        let network = {
            let lines = self.lines.clone();
            let mut dots = [false; NETWORK_DOTS];
            BackgroundTask::every("status-network", NETWORK_PERIOD, move || {
                flip_network(&mut dots, &mut rng);
                lines
                    .write()
                    .unwrap()
                    .insert(StatusLineType::Network, network_dots(&dots));
                display.refresh();
            })
        };

        *self.tasks.lock().unwrap() = vec![clock, metrics, network];
    }

    pub fn stop(&self) {
        for task in self.tasks.lock().unwrap().drain(..) {
            task.stop();
        }
    }

    pub fn is_running(&self) -> bool {
        self.tasks.lock().unwrap().iter().any(BackgroundTask::is_running)
    }
}

/// CPU in 20..60, memory in 30..70
pub fn fake_metrics<R: Rng + ?Sized>(rng: &mut R) -> (u32, u32) {
    (rng.gen_range(20..60), rng.gen_range(30..70))
}

/// Flip each dot with a 30% chance.
pub fn flip_network<R: Rng + ?Sized>(dots: &mut [bool], rng: &mut R) {
    for dot in dots.iter_mut() {
        if rng.gen_bool(NETWORK_FLIP_CHANCE) {
            *dot = !*dot;
        }
    }
}

pub fn network_dots(dots: &[bool]) -> String {
    dots.iter().map(|on| if *on { '●' } else { '○' }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::renderer::NullDisplay;

    #[test]
    fn test_render_orders_fields() {
        let bar = StatusBar::new();
        bar.update_line(StatusLineType::Clock, "12:00:00");
        bar.update_line(StatusLineType::Cpu, "42%");
        assert_eq!(bar.render(), "CPU: 42% | 12:00:00");
    }

    #[test]
    fn test_update_overwrites() {
        let bar = StatusBar::new();
        bar.update_line(StatusLineType::Memory, "30%");
        bar.update_line(StatusLineType::Memory, "31%");
        assert_eq!(bar.render(), "MEM: 31%");
    }

    #[test]
    fn test_fake_metrics_ranges() {
        let mut rng = SmallRng::seed_from_u64(9);
        for _ in 0..200 {
            let (cpu, mem) = fake_metrics(&mut rng);
            assert!((20..60).contains(&cpu));
            assert!((30..70).contains(&mem));
        }
    }

    #[test]
    fn test_network_dots() {
        assert_eq!(network_dots(&[true, false, true]), "●○●");
    }

    #[tokio::test(start_paused = true)]
    async fn test_tasks_fill_fields_and_stop() {
        let bar = StatusBar::new();
        bar.start(Arc::new(NullDisplay), Some(5));

        tokio::time::sleep(Duration::from_millis(50)).await;
        let fields: Vec<String> = bar.render().split(" | ").map(String::from).collect();
        assert_eq!(fields.len(), 4, "{fields:?}");
        assert!(fields[0].starts_with("CPU: "));
        assert!(fields[1].starts_with("MEM: "));
        let net = fields[2].strip_prefix("NET: ").unwrap();
        assert_eq!(net.chars().count(), NETWORK_DOTS);

        bar.stop();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!bar.is_running());
    }
}
