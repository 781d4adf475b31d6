/// Reveals a string one character at a time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Typewriter {
    text: String,
    delay_ms: u64,
    speed_ms: u64,
}

/// What the typewriter shows at some instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypewriterFrame<'a> {
    pub visible: &'a str,
    /// The caret blinks only while characters are still being added.
    pub caret: bool,
}

impl Typewriter {
    pub const DEFAULT_SPEED_MS: u64 = 50;

    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            delay_ms: 0,
            speed_ms: Self::DEFAULT_SPEED_MS,
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Milliseconds per character. Zero reveals everything as soon as typing starts.
    pub fn with_speed(mut self, speed_ms: u64) -> Self {
        self.speed_ms = speed_ms;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Time from mount until the last character appears.
    pub fn duration_ms(&self) -> u64 {
        let chars = self.text.chars().count() as u64;
        self.delay_ms + chars * self.speed_ms
    }

    /// State `elapsed_ms` after mount.
    pub fn frame_at(&self, elapsed_ms: u64) -> TypewriterFrame<'_> {
        let Some(typing_for) = elapsed_ms.checked_sub(self.delay_ms) else {
            return TypewriterFrame {
                visible: "",
                caret: false,
            };
        };

        let total = self.text.chars().count();
        let shown = match typing_for.checked_div(self.speed_ms) {
            Some(n) => usize::try_from(n).unwrap_or(usize::MAX).min(total),
            None => total,
        };
        let end = self
            .text
            .char_indices()
            .nth(shown)
            .map_or(self.text.len(), |(i, _)| i);

        TypewriterFrame {
            visible: &self.text[..end],
            caret: shown < total,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/widgets/typewriter.rs"]
mod tests;
