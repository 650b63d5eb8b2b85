//! Input prompt state for treeseek.
//!
//! [ActionContext] tracks whether the app is in normal mode or collecting text
//! for one of the prompts ([InputMode]), and owns the text buffer and cursor of
//! that prompt.

/// Current user interaction mode.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum ActionMode {
    Normal,
    Input { mode: InputMode, prompt: String },
}

/// The prompts that read a line of text.
///
/// * `Find` - search pattern for a new search below the tree root.
/// * `GoToPath` - edits the path field before jumping to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum InputMode {
    Find,
    GoToPath,
}

/// Mode, text buffer and cursor of the input line.
///
/// The cursor is a byte offset that always sits on a char boundary.
pub(crate) struct ActionContext {
    mode: ActionMode,
    input_buffer: String,
    input_cursor_pos: usize,
}

impl ActionContext {
    // Getters / Accessors

    #[inline]
    pub(crate) fn mode(&self) -> &ActionMode {
        &self.mode
    }

    #[inline]
    pub(crate) fn input_buffer(&self) -> &str {
        &self.input_buffer
    }

    #[inline]
    pub(crate) fn input_cursor_pos(&self) -> usize {
        self.input_cursor_pos
    }

    pub(crate) fn input_mode(&self) -> Option<InputMode> {
        match self.mode {
            ActionMode::Input { mode, .. } => Some(mode),
            ActionMode::Normal => None,
        }
    }

    pub(crate) fn is_input(&self) -> bool {
        matches!(self.mode, ActionMode::Input { .. })
    }

    /// Opens a prompt, pre-filled with `initial_value` and the cursor at the end.
    pub(crate) fn enter_mode(&mut self, mode: ActionMode, initial_value: String) {
        self.mode = mode;
        self.input_buffer = initial_value;
        self.input_cursor_pos = self.input_buffer.len();
    }

    pub(crate) fn exit_mode(&mut self) {
        self.mode = ActionMode::Normal;
        self.input_buffer.clear();
        self.input_cursor_pos = 0;
    }

    /// Takes the buffer contents and returns to normal mode.
    pub(crate) fn take_input(&mut self) -> String {
        let text = std::mem::take(&mut self.input_buffer);
        self.exit_mode();
        text
    }

    // Cursor editing

    pub(crate) fn action_move_cursor_left(&mut self) {
        if let Some((previous, _)) = self.input_buffer[..self.input_cursor_pos]
            .char_indices()
            .next_back()
        {
            self.input_cursor_pos = previous;
        }
    }

    pub(crate) fn action_move_cursor_right(&mut self) {
        if let Some(ch) = self.input_buffer[self.input_cursor_pos..].chars().next() {
            self.input_cursor_pos += ch.len_utf8();
        }
    }

    pub(crate) fn action_insert_at_cursor(&mut self, ch: char) {
        self.input_buffer.insert(self.input_cursor_pos, ch);
        self.input_cursor_pos += ch.len_utf8();
    }

    /// Deletes the character before the cursor and moves the cursor back.
    pub(crate) fn action_backspace_at_cursor(&mut self) {
        if let Some((previous, _)) = self.input_buffer[..self.input_cursor_pos]
            .char_indices()
            .next_back()
        {
            self.input_buffer.remove(previous);
            self.input_cursor_pos = previous;
        }
    }

    pub(crate) fn action_delete_at_cursor(&mut self) {
        if self.input_cursor_pos < self.input_buffer.len() {
            self.input_buffer.remove(self.input_cursor_pos);
        }
    }

    pub(crate) fn action_cursor_home(&mut self) {
        self.input_cursor_pos = 0;
    }

    pub(crate) fn action_cursor_end(&mut self) {
        self.input_cursor_pos = self.input_buffer.len();
    }
}

impl Default for ActionContext {
    fn default() -> Self {
        Self {
            mode: ActionMode::Normal,
            input_buffer: String::new(),
            input_cursor_pos: 0,
        }
    }
}
