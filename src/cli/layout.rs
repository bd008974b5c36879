// Text layout helpers
//
// Box drawing, word wrapping and the random text used by the effects. All
// widths are counted in chars, not bytes.

use rand::Rng;

/// Greedy word wrap. Words are never split unless a single word is wider
/// than `max_width` on its own, in which case it is cut at the width so no
/// line ever overflows.
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let max_width = max_width.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();

        // Overlong word: flush, then emit full-width slices
        while word.len() > max_width {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(max_width);
            lines.push(word.into_iter().collect());
            word = rest;
        }

        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > max_width && current_len > 0 {
            lines.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if word.is_empty() {
            continue;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.extend(word.iter());
        current_len += word.len();
    }

    if current_len > 0 {
        lines.push(current);
    }
    lines
}

/// Right-pad `text` with spaces to `width` chars.
pub fn pad_right(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

/// Three-row double-line header box with `title` centred inside.
pub fn header_box(title: &str, width: usize) -> [String; 3] {
    let len = title.chars().count();
    let free = width.saturating_sub(len);
    let left = free / 2;
    let right = free - left;
    [
        format!("╔{}╗", "═".repeat(width)),
        format!("║{}{}{}║", " ".repeat(left), title, " ".repeat(right)),
        format!("╚{}╝", "═".repeat(width)),
    ]
}

/// Single-line panel with a fixed interior width.
///
/// Interior rows are `│ text │`: one space of margin on each side, text
/// wrapped and padded to `width - 2`.
#[derive(Debug, Clone, Copy)]
pub struct Panel {
    width: usize,
}

impl Panel {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(3),
        }
    }

    pub fn top(&self) -> String {
        format!("┌{}┐", "─".repeat(self.width))
    }

    pub fn bottom(&self) -> String {
        format!("└{}┘", "─".repeat(self.width))
    }

    pub fn text_width(&self) -> usize {
        self.width - 2
    }

    /// Wrapped, padded interior rows for `text` (one blank row if empty).
    pub fn rows(&self, text: &str) -> Vec<String> {
        let wrapped = wrap_text(text, self.text_width());
        if wrapped.is_empty() {
            return vec![self.blank()];
        }
        wrapped.iter().map(|line| self.row(line)).collect()
    }

    pub fn blank(&self) -> String {
        self.row("")
    }

    fn row(&self, line: &str) -> String {
        format!("│ {} │", pad_right(line, self.text_width()))
    }
}

/// Frames of the matrix cascade reveal for `target`.
///
/// Returns `iterations + 1` frames. Frame 0 is fully randomized, each later
/// frame reveals more positions, the last frame equals `target`. Spaces are
/// never randomized.
pub fn cascade_frames<R: Rng + ?Sized>(
    target: &str,
    iterations: usize,
    alphabet: &str,
    rng: &mut R,
) -> Vec<String> {
    let target: Vec<char> = target.chars().collect();
    let alphabet: Vec<char> = alphabet.chars().collect();
    let iterations = iterations.max(1);

    // Iteration at which each position settles on its real character
    let reveal_at: Vec<usize> = target
        .iter()
        .map(|c| if *c == ' ' { 0 } else { rng.gen_range(1..=iterations) })
        .collect();

    (0..=iterations)
        .map(|step| {
            if step == iterations {
                return target.iter().collect();
            }
            target
                .iter()
                .zip(&reveal_at)
                .map(|(c, reveal)| {
                    if *c == ' ' || step >= *reveal || alphabet.is_empty() {
                        *c
                    } else {
                        alphabet[rng.gen_range(0..alphabet.len())]
                    }
                })
                .collect()
        })
        .collect()
}

/// Random rain line: characters from `alphabet` with roughly one in five
/// positions left as a gap.
pub fn rain_line<R: Rng + ?Sized>(width: usize, alphabet: &str, rng: &mut R) -> String {
    let alphabet: Vec<char> = alphabet.chars().collect();
    (0..width)
        .map(|_| {
            if alphabet.is_empty() || rng.gen_bool(0.2) {
                ' '
            } else {
                alphabet[rng.gen_range(0..alphabet.len())]
            }
        })
        .collect()
}

/// Random lowercase hex string with a length in `min_len..max_len`.
pub fn hex_line<R: Rng + ?Sized>(min_len: usize, max_len: usize, rng: &mut R) -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    let len = if max_len > min_len {
        rng.gen_range(min_len..max_len)
    } else {
        min_len
    };
    (0..len)
        .map(|_| HEX[rng.gen_range(0..HEX.len())] as char)
        .collect()
}

/// Random line of letters and digits, used by the idle overlay log.
pub fn noise_line<R: Rng + ?Sized>(min_len: usize, max_len: usize, rng: &mut R) -> String {
    const CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    let len = if max_len > min_len {
        rng.gen_range(min_len..max_len)
    } else {
        min_len
    };
    (0..len)
        .map(|_| CHARS[rng.gen_range(0..CHARS.len())] as char)
        .collect()
}
