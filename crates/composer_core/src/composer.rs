//! Message text box state.

pub const MIN_COMPOSER_ROWS: usize = 1;
pub const MAX_COMPOSER_ROWS: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerState {
    pub text: String,
}

impl ComposerState {
    /// Grows with the content up to `max_rows`, then scrolls.
    pub fn desired_rows(&self, min_rows: usize, max_rows: usize) -> usize {
        let lines = self.text.split('\n').count();
        lines.clamp(min_rows, max_rows.max(min_rows))
    }

    /// Enter sends; Shift+Enter inserts a newline.
    pub fn should_submit(enter_pressed: bool, shift_held: bool) -> bool {
        enter_pressed && !shift_held
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    pub fn take_text(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}
