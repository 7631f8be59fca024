//! Cancellable continuations for timer-deferred state changes.
//!
//! Each scheduled continuation is stamped with a generation number. Scheduling
//! again or cancelling bumps the generation, so a timer that fires with an
//! old [`TransitionToken`] finds nothing to run.

#[cfg(test)]
#[path = "transition_test.rs"]
mod transition_test;

/// Handle a timer carries back to [`Transitions::take`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionToken(u64);

/// Work to run once the visual transition has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Reset the offset and move the navigator by this step.
    Navigate(i64),
    /// Clear the transition after a snap-back.
    Settle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Pending {
    token: TransitionToken,
    continuation: Continuation,
}

/// At most one pending continuation plus the generation counter.
#[derive(Debug, Clone, Default)]
pub struct Transitions {
    generation: u64,
    pending: Option<Pending>,
}

impl Transitions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any pending continuation with `continuation`.
    pub fn schedule(&mut self, continuation: Continuation) -> TransitionToken {
        self.generation = self.generation.wrapping_add(1);
        let token = TransitionToken(self.generation);
        self.pending = Some(Pending { token, continuation });
        token
    }

    /// Drop the pending continuation, if any. Returns whether one existed.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.pending.take().is_some()
    }

    /// Claim the continuation for `token`. `None` if it was superseded or
    /// cancelled.
    pub fn take(&mut self, token: TransitionToken) -> Option<Continuation> {
        match self.pending {
            Some(pending) if pending.token == token => {
                self.pending = None;
                Some(pending.continuation)
            }
            _ => None,
        }
    }

    /// The continuation waiting to run, if any.
    #[must_use]
    pub fn pending(&self) -> Option<Continuation> {
        self.pending.map(|p| p.continuation)
    }
}
