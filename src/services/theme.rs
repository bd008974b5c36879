// Theme registry
//
// The four terminal looks. The command interpreter only reads names and
// descriptions and asks for a switch; the TUI reads the palette every frame.

use std::sync::{Arc, RwLock};
use tracing::{info, warn};

use super::state::StateStore;
use crate::config::Palette;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub palette: Palette,
}

impl Theme {
    fn new(name: &str, display_name: &str, description: &str, palette: Palette) -> Self {
        Self {
            name: name.to_string(),
            display_name: display_name.to_string(),
            description: description.to_string(),
            palette,
        }
    }

    /// Built-in themes, in listing order.
    pub fn builtin() -> Vec<Self> {
        vec![
            Self::new(
                "matrix",
                "Matrix",
                "Classic green on black terminal style",
                Palette::new("#000000", "#00cc00", "#008800", "#002200", "#00aa00"),
            ),
            Self::new(
                "cyberpunk",
                "Cyberpunk",
                "Neon blue and purple futuristic style",
                Palette::new("#0a0a20", "#00cccc", "#cc00cc", "#220033", "#00aaaa"),
            ),
            Self::new(
                "retro",
                "Retro",
                "Vintage amber on black terminal",
                Palette::new("#121212", "#e09000", "#c05000", "#281800", "#a06000"),
            ),
            Self::new(
                "hacker",
                "Hacker",
                "White on black with red accents",
                Palette::new("#0d0d0d", "#cccccc", "#cc0000", "#220000", "#880000"),
            ),
        ]
    }
}

pub struct ThemeRegistry {
    themes: Vec<Theme>,
    current: RwLock<usize>,
    store: Arc<StateStore>,
}

impl ThemeRegistry {
    /// Start from the persisted theme, else `fallback`, else the first theme.
    pub fn new(store: Arc<StateStore>, fallback: &str) -> Self {
        let themes = Theme::builtin();
        let persisted = store.snapshot().theme;
        let current = persisted
            .as_deref()
            .and_then(|name| position(&themes, name))
            .or_else(|| position(&themes, fallback))
            .unwrap_or_else(|| {
                warn!(theme = fallback, "Unknown default theme, using the first one");
                0
            });
        Self {
            themes,
            current: RwLock::new(current),
            store,
        }
    }

    pub fn list_themes(&self) -> &[Theme] {
        &self.themes
    }

    pub fn current_theme(&self) -> &Theme {
        &self.themes[*self.current.read().unwrap()]
    }

    /// Switch to the theme called `name` (case-insensitive). Returns false and
    /// changes nothing when there is no such theme.
    pub fn set_theme(&self, name: &str) -> bool {
        let Some(index) = position(&self.themes, name) else {
            return false;
        };
        *self.current.write().unwrap() = index;
        let name = self.themes[index].name.clone();
        info!(theme = %name, "Theme changed");
        self.store.update(|s| s.theme = Some(name));
        true
    }
}

fn position(themes: &[Theme], name: &str) -> Option<usize> {
    let wanted = name.trim().to_lowercase();
    themes.iter().position(|t| t.name.to_lowercase() == wanted)
}
