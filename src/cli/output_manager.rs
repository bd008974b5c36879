// Output Manager - the append-only output surface
//
// Every row the terminal prints lives here. Rows are only ever appended or
// edited in place while they animate; the one way to remove rows is `clear`,
// which empties the whole surface at once.

use std::sync::{Arc, RwLock};

/// Progress of a row through the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderState {
    Pending,
    Animating,
    Complete,
}

/// How the TUI colours a row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// Regular output
    Normal,
    /// The `> command` echo
    Echo,
    /// Errors and hacker effects
    Glitch,
}

/// Stable identity of a row (survives rows being appended after it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LineId(u64);

/// Momentary glitch glyph drawn over one character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Overlay {
    position: usize,
    symbol: char,
    token: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    id: LineId,
    pub content: String,
    pub render_state: RenderState,
    pub glitch_enabled: bool,
    pub style: LineStyle,
    overlay: Option<Overlay>,
}

impl OutputLine {
    /// Text as it should appear right now, glitch glyph included.
    pub fn display_text(&self) -> String {
        match self.overlay {
            Some(overlay) => self
                .content
                .chars()
                .enumerate()
                .map(|(i, c)| if i == overlay.position { overlay.symbol } else { c })
                .collect(),
            None => self.content.clone(),
        }
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

#[derive(Debug, Default)]
struct Surface {
    lines: Vec<OutputLine>,
    next_id: u64,
    next_token: u64,
}

impl Surface {
    fn find_mut(&mut self, id: LineId) -> Option<&mut OutputLine> {
        // The line being edited is almost always the last one
        self.lines.iter_mut().rev().find(|l| l.id == id)
    }
}

/// Thread-safe handle to the output surface
#[derive(Clone, Default)]
pub struct OutputManager {
    surface: Arc<RwLock<Surface>>,
}

impl OutputManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a row and return its id.
    pub fn push(
        &self,
        content: impl Into<String>,
        style: LineStyle,
        render_state: RenderState,
        glitch_enabled: bool,
    ) -> LineId {
        let mut surface = self.surface.write().unwrap();
        let id = LineId(surface.next_id);
        surface.next_id += 1;
        surface.lines.push(OutputLine {
            id,
            content: content.into(),
            render_state,
            glitch_enabled,
            style,
            overlay: None,
        });
        id
    }

    /// Append one character to a row. No-op if the row was cleared.
    pub fn push_char(&self, id: LineId, c: char) {
        let mut surface = self.surface.write().unwrap();
        if let Some(line) = surface.find_mut(id) {
            line.content.push(c);
        }
    }

    /// Replace the whole content of a row.
    pub fn set_content(&self, id: LineId, content: impl Into<String>) {
        let mut surface = self.surface.write().unwrap();
        if let Some(line) = surface.find_mut(id) {
            line.content = content.into();
        }
    }

    pub fn set_state(&self, id: LineId, state: RenderState) {
        let mut surface = self.surface.write().unwrap();
        if let Some(line) = surface.find_mut(id) {
            line.render_state = state;
        }
    }

    /// Show `symbol` over the character at `position`. Returns a token that
    /// `remove_overlay` needs, so a late restore never wipes a newer glyph.
    pub fn set_overlay(&self, id: LineId, position: usize, symbol: char) -> Option<u64> {
        let mut surface = self.surface.write().unwrap();
        let token = surface.next_token;
        let line = surface.find_mut(id)?;
        line.overlay = Some(Overlay {
            position,
            symbol,
            token,
        });
        surface.next_token += 1;
        Some(token)
    }

    pub fn remove_overlay(&self, id: LineId, token: u64) {
        let mut surface = self.surface.write().unwrap();
        if let Some(line) = surface.find_mut(id) {
            if line.overlay.map(|o| o.token) == Some(token) {
                line.overlay = None;
            }
        }
    }

    /// Snapshot of all rows (for rendering)
    pub fn lines(&self) -> Vec<OutputLine> {
        self.surface.read().unwrap().lines.clone()
    }

    /// Final text of all rows, without glitch glyphs
    pub fn contents(&self) -> Vec<String> {
        self.surface
            .read()
            .unwrap()
            .lines
            .iter()
            .map(|l| l.content.clone())
            .collect()
    }

    pub fn last(&self) -> Option<OutputLine> {
        self.surface.read().unwrap().lines.last().cloned()
    }

    /// Remove every row at once.
    pub fn clear(&self) {
        let mut surface = self.surface.write().unwrap();
        surface.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.surface.read().unwrap().lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surface.read().unwrap().lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(manager: &OutputManager, text: &str) -> LineId {
        manager.push(text, LineStyle::Normal, RenderState::Complete, false)
    }

    #[test]
    fn test_rows_keep_their_order() {
        let manager = OutputManager::new();
        push(&manager, "one");
        push(&manager, "two");
        push(&manager, "");

        assert_eq!(manager.contents(), vec!["one", "two", ""]);
        assert!(manager.lines()[2].is_blank());
    }

    #[test]
    fn test_push_char_targets_the_right_row() {
        let manager = OutputManager::new();
        let first = manager.push("", LineStyle::Normal, RenderState::Animating, false);
        push(&manager, "second");

        manager.push_char(first, 'h');
        manager.push_char(first, 'i');
        assert_eq!(manager.contents(), vec!["hi", "second"]);
    }

    #[test]
    fn test_overlay_does_not_touch_content() {
        let manager = OutputManager::new();
        let id = push(&manager, "abc");

        let token = manager.set_overlay(id, 1, '#').unwrap();
        let line = manager.last().unwrap();
        assert_eq!(line.display_text(), "a#c");
        assert_eq!(line.content, "abc");

        manager.remove_overlay(id, token);
        assert_eq!(manager.last().unwrap().display_text(), "abc");
    }

    #[test]
    fn test_stale_overlay_token_is_ignored() {
        let manager = OutputManager::new();
        let id = push(&manager, "abc");

        let old = manager.set_overlay(id, 0, '#').unwrap();
        manager.set_overlay(id, 2, '%').unwrap();
        manager.remove_overlay(id, old);
        assert_eq!(manager.last().unwrap().display_text(), "ab%");
    }

    #[test]
    fn test_clear_is_total() {
        let manager = OutputManager::new();
        let id = push(&manager, "gone");
        push(&manager, "also gone");

        manager.clear();
        assert!(manager.is_empty());

        // Edits to rows from before the clear are dropped
        manager.push_char(id, 'x');
        assert!(manager.is_empty());
    }
}
