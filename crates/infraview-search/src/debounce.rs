//! Quiescence-window debouncing for the search box.
//!
//! Time is passed in explicitly so the UI loop (and tests) decide what "now" is.

use std::time::{Duration, Instant};

/// Default delay between the last keystroke and applying the filter.
pub const DEFAULT_QUIESCENCE: Duration = Duration::from_millis(300);

struct Pending<T> {
    value: T,
    deadline: Instant,
}

/// A single cancellable deferred value.
///
/// Scheduling replaces whatever was pending, so only the most recent value can
/// ever fire and it fires at most once.
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `value` for `now + window`. Returns the value it superseded.
    pub fn schedule(&mut self, value: T, now: Instant) -> Option<T> {
        let deadline = now + self.window;
        self.pending
            .replace(Pending { value, deadline })
            .map(|p| p.value)
    }

    /// Take the pending value once its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some(p) if now >= p.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Take the pending value immediately, ignoring the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.deadline)
    }
}

/// Raw input text plus the debounced term actually applied to the views.
pub struct DebouncedSearch {
    raw: String,
    applied: String,
    debouncer: Debouncer<String>,
}

impl Default for DebouncedSearch {
    fn default() -> Self {
        Self::new(DEFAULT_QUIESCENCE)
    }
}

impl DebouncedSearch {
    pub fn new(window: Duration) -> Self {
        Self {
            raw: String::new(),
            applied: String::new(),
            debouncer: Debouncer::new(window),
        }
    }

    /// What the input field shows; always the latest keystroke.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The term the derived views are filtered with.
    pub fn applied(&self) -> &str {
        &self.applied
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    pub fn input(&mut self, text: impl Into<String>, now: Instant) {
        self.raw = text.into();
        if let Some(superseded) = self.debouncer.schedule(self.raw.clone(), now) {
            tracing::trace!("search input `{}` superseded", superseded);
        }
    }

    /// Apply the pending term if the quiescence window elapsed. Returns the
    /// newly applied term, or `None` when nothing changed.
    pub fn tick(&mut self, now: Instant) -> Option<&str> {
        let term = self.debouncer.poll(now)?;
        self.apply(term)
    }

    /// Apply whatever is pending right away (e.g. on Enter).
    pub fn commit(&mut self) -> Option<&str> {
        let term = self.debouncer.flush()?;
        self.apply(term)
    }

    fn apply(&mut self, term: String) -> Option<&str> {
        if term == self.applied {
            return None;
        }
        self.applied = term;
        Some(&self.applied)
    }
}
