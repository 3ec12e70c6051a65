/// Debounce state of the search box
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceState {
    Idle,
    /// Local typing is waiting for the quiet period to end at `deadline`
    Pending { value: String, deadline: u64 },
    /// The value was replaced by the caller; the next expiry commits nothing
    Suppressed,
}

/// Debounced search input
///
/// Times are milliseconds on whatever clock the host passes in. Keystrokes
/// (re)start the quiet period; [`SearchDebounce::poll`] commits the typed
/// value once the deadline is reached. An update coming from the caller
/// replaces the local text without ever committing it back.
#[derive(Debug, Clone)]
pub struct SearchDebounce {
    window_ms: u64,
    text: String,
    state: DebounceState,
}

impl SearchDebounce {
    pub fn new(initial: impl Into<String>, window_ms: u64) -> Self {
        Self {
            window_ms,
            text: initial.into(),
            state: DebounceState::Idle,
        }
    }

    /// Text currently shown in the input
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn state(&self) -> &DebounceState {
        &self.state
    }

    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Local keystroke. Returns the new commit deadline.
    pub fn input(&mut self, value: impl Into<String>, now: u64) -> u64 {
        let value = value.into();
        let deadline = now.saturating_add(self.window_ms);
        self.text = value.clone();
        self.state = DebounceState::Pending { value, deadline };
        deadline
    }

    /// Value pushed by the caller (e.g. after navigation).
    pub fn external_update(&mut self, value: impl Into<String>) {
        self.text = value.into();
        self.state = DebounceState::Suppressed;
    }

    /// Advances the timer. Returns the value to commit, if any.
    pub fn poll(&mut self, now: u64) -> Option<String> {
        match self.state {
            DebounceState::Pending { deadline, .. } if now < deadline => None,
            DebounceState::Idle => None,
            _ => match std::mem::replace(&mut self.state, DebounceState::Idle) {
                DebounceState::Pending { value, .. } => Some(value),
                _ => None,
            },
        }
    }
}
