//! One jump session per document.
//!
//! Owns the search processor, the tagger and the jump mode, and runs tag
//! assignment either right away or, for large documents, after a skim delay
//! driven by the caller's tick loop.

use crate::kernel::error::Result;
use crate::kernel::jump::jumper::{self, JumpMode, JumpModeTracker, Motion};
use crate::kernel::jump::{
    Boundaries, Intersection, Pattern, SearchProcessor, SearchQuery, StandardBoundaries, Tag,
    TagAlphabet, Tagger, TaggingResult,
};
use crate::kernel::services::ports::settings::JumpSettings;
use crate::models::Document;
use std::ops::Range;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Empty,
    Searching,
    Jumped,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// The keystroke did not continue the search; treat it as a normal key.
    Rejected,
    /// Results found, tags not assigned yet.
    Skimmed(Vec<usize>),
    Marked { tags: Vec<(Tag, usize)>, full: bool },
    /// Caret moved to a result; the session goes on.
    Visited(Motion),
    /// Caret moved to a result and the session ended.
    Jumped(Motion),
}

/// Cancellable deadline for the deferred solve. Scheduling again replaces
/// the pending deadline.
#[derive(Debug, Clone, Default)]
pub struct SolveTimer {
    deadline: Option<Instant>,
}

impl SolveTimer {
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True once when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(deadline) = self.deadline else {
            return false;
        };
        if now < deadline {
            return false;
        }

        let overshoot = now.duration_since(deadline);
        if overshoot.as_millis() > 5 {
            tracing::debug!(
                overshoot_ms = overshoot.as_millis() as u64,
                "solve debounce overshoot"
            );
        }
        self.deadline = None;
        true
    }
}

pub struct Session {
    doc: Document,
    settings: JumpSettings,
    alphabet: TagAlphabet,
    processor: Option<SearchProcessor>,
    tagger: Tagger,
    modes: JumpModeTracker,
    timer: SolveTimer,
    selection: Option<Range<usize>>,
    state: SessionState,
}

impl Session {
    pub fn new(doc: Document, settings: JumpSettings) -> Self {
        let alphabet = settings.alphabet();
        let modes = JumpModeTracker::new(&settings.cycle_modes);
        Self {
            doc,
            settings,
            alphabet,
            processor: None,
            tagger: Tagger::new(),
            modes,
            timer: SolveTimer::default(),
            selection: None,
            state: SessionState::Empty,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn jump_mode(&self) -> JumpMode {
        self.modes.current()
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        self.processor.as_ref().map(SearchProcessor::query)
    }

    pub fn results(&self) -> &[usize] {
        match &self.processor {
            Some(processor) => processor.results(),
            None => &[],
        }
    }

    pub fn tags(&self) -> Vec<(Tag, usize)> {
        self.tagger.tags()
    }

    pub fn is_skimming(&self) -> bool {
        self.timer.is_pending()
    }

    /// Result to scroll toward when no tagged result is visible.
    pub fn scroll_target(&self) -> Option<usize> {
        let any_visible = self
            .tagger
            .tags()
            .iter()
            .any(|(_, offset)| self.doc.is_visible(*offset));
        if any_visible {
            return None;
        }
        jumper::closest_result(self.results(), self.doc.caret())
    }

    /// Feeds one typed character. An uppercase character jumps with shift.
    pub fn type_char(&mut self, ch: char, now: Instant) -> SessionEvent {
        if self.is_finished() {
            return SessionEvent::Rejected;
        }

        let Some(processor) = self.processor.as_mut() else {
            return self.start_char_search(ch, now);
        };
        if !processor.type_char(&self.doc, ch, &mut self.tagger) {
            return SessionEvent::Rejected;
        }

        if self.timer.is_pending() {
            self.timer.schedule(now, self.settings.skim_delay());
            return SessionEvent::Skimmed(self.results().to_vec());
        }
        self.update_search(ch.is_uppercase())
    }

    /// Runs the deferred solve once its delay has passed.
    pub fn tick(&mut self, now: Instant) -> Option<SessionEvent> {
        if !self.timer.poll(now) || self.state != SessionState::Searching {
            return None;
        }
        Some(self.update_search(false))
    }

    /// Restarts the session with a regex search limited to `boundaries` and
    /// the default search area.
    pub fn start_regex_search(
        &mut self,
        pattern: &str,
        boundaries: &dyn Boundaries,
    ) -> Result<SessionEvent> {
        let default = self.default_boundaries();
        let processor =
            SearchProcessor::from_regex(&self.doc, pattern, &Intersection::new(boundaries, &default))?;
        self.tagger = Tagger::new();
        self.timer.cancel();
        self.processor = Some(processor);
        self.state = SessionState::Searching;
        Ok(self.update_search(false))
    }

    pub fn start_pattern_search(&mut self, pattern: Pattern) -> Result<SessionEvent> {
        self.start_regex_search(&pattern.regex(), &StandardBoundaries::WholeFile)
    }

    /// Moves the caret to the next result, wrapping. A lone result is jumped to.
    pub fn visit_next(&mut self) -> Option<SessionEvent> {
        let from = self
            .selection
            .as_ref()
            .map_or(self.doc.caret(), |selection| selection.end);
        let target = jumper::next_result(self.results(), from)?;
        Some(self.visit(target))
    }

    /// Moves the caret to the previous result, wrapping. A lone result is jumped to.
    pub fn visit_previous(&mut self) -> Option<SessionEvent> {
        let from = self
            .selection
            .as_ref()
            .map_or(self.doc.caret(), |selection| selection.start);
        let target = jumper::previous_result(self.results(), from)?;
        Some(self.visit(target))
    }

    /// Moves to the next (or previous) configured jump mode. Cycling back to
    /// `Disabled` cancels the session.
    pub fn cycle_jump_mode(&mut self, forward: bool) -> JumpMode {
        let mode = self.modes.cycle(forward);
        self.on_mode_changed(mode);
        mode
    }

    pub fn toggle_jump_mode(&mut self, mode: JumpMode) -> JumpMode {
        let mode = self.modes.toggle(mode);
        self.on_mode_changed(mode);
        mode
    }

    pub fn cancel(&mut self) {
        if self.is_finished() {
            return;
        }
        self.clear();
        self.state = SessionState::Cancelled;
        tracing::info!("jump session cancelled");
    }

    /// Clears the search, tags and pending solve. Keeps the jump mode.
    pub fn reset(&mut self) {
        self.clear();
        self.selection = None;
        self.state = SessionState::Empty;
    }

    fn clear(&mut self) {
        self.processor = None;
        self.tagger.unmark();
        self.timer.cancel();
    }

    fn is_finished(&self) -> bool {
        matches!(self.state, SessionState::Jumped | SessionState::Cancelled)
    }

    fn default_boundaries(&self) -> StandardBoundaries {
        if self.settings.search_whole_file {
            StandardBoundaries::WholeFile
        } else {
            StandardBoundaries::VisibleOnScreen
        }
    }

    fn on_mode_changed(&mut self, mode: JumpMode) {
        tracing::info!(mode = %mode, "jump mode changed");
        if mode == JumpMode::Disabled && self.state == SessionState::Searching {
            self.cancel();
        }
    }

    fn start_char_search(&mut self, ch: char, now: Instant) -> SessionEvent {
        let boundaries = self.default_boundaries();
        let processor = match SearchProcessor::from_char(&self.doc, ch, &boundaries) {
            Ok(processor) => processor,
            Err(err) => {
                tracing::warn!(error = %err, "failed to start search");
                return SessionEvent::Rejected;
            }
        };
        self.processor = Some(processor);
        self.state = SessionState::Searching;

        if self.doc.len_chars() >= self.settings.skim_threshold {
            self.timer.schedule(now, self.settings.skim_delay());
            tracing::debug!(results = self.results().len(), "skimmed results");
            return SessionEvent::Skimmed(self.results().to_vec());
        }
        self.update_search(ch.is_uppercase())
    }

    fn update_search(&mut self, shift: bool) -> SessionEvent {
        let Some(processor) = self.processor.as_ref() else {
            return SessionEvent::Rejected;
        };
        let mut results = processor.results().to_vec();
        let outcome = self
            .tagger
            .mark_or_jump(&self.doc, &self.alphabet, processor.query(), &mut results);

        match outcome {
            TaggingResult::Jump(offset) => {
                let motion = jumper::jump(
                    &self.doc,
                    self.modes.current(),
                    processor.query(),
                    offset,
                    shift,
                );
                self.finish(motion)
            }
            TaggingResult::Mark(tags) => SessionEvent::Marked {
                tags,
                full: self.tagger.is_full(),
            },
        }
    }

    fn visit(&mut self, target: usize) -> SessionEvent {
        let Some(processor) = self.processor.as_ref() else {
            return SessionEvent::Rejected;
        };
        let mode = self.modes.current();
        if processor.results().len() == 1 {
            let motion = jumper::jump(&self.doc, mode, processor.query(), target, false);
            return self.finish(motion);
        }

        let motion = jumper::visit(&self.doc, mode, processor.query(), target);
        self.doc = self.doc.clone().with_caret(motion.caret);
        self.selection = motion.selection.clone();
        SessionEvent::Visited(motion)
    }

    fn finish(&mut self, motion: Motion) -> SessionEvent {
        tracing::info!(caret = motion.caret, mode = %self.modes.current(), "jumped");
        self.clear();
        self.state = SessionState::Jumped;
        SessionEvent::Jumped(motion)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/session.rs"]
mod tests;
