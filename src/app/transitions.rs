//! Timed visibility transitions between visible windows.
//!
//! The render reconciler moves sections between pages with a two-phase fade:
//! on every render, all sections are immediately marked fading-out, a step at
//! +200 ms hides everything outside the new window, and each window section is
//! brought back fading-in at +200 ms plus a 100 ms stagger per window index.
//!
//! Time is a logical millisecond clock owned by the engine; the plugin shim
//! maps pending steps onto host timeouts and feeds elapsed time back through
//! timer-tick events, so the whole schedule is deterministic and testable
//! without real timers.
//!
//! Every render call bumps a generation counter and drops the previous
//! render's pending steps, so a delayed continuation from a superseded render
//! can never mutate visibility state. Two renders issued in quick succession
//! therefore always converge to the state implied by the last one.

use super::section::{BrandSection, Visibility};

/// Delay before the exit phase completes and the enter phase begins.
pub const FADE_OUT_MS: u64 = 200;

/// Additional enter delay per index within the visible window.
pub const STAGGER_MS: u64 = 100;

/// What a scheduled step does when its due time arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StepKind {
    /// Ends the exit phase: every section outside the target window becomes
    /// hidden.
    SettleHidden,
    /// Brings one window section in, fading.
    Enter { section: usize },
}

/// One pending visibility mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
    due_ms: u64,
    generation: u64,
    kind: StepKind,
}

/// Scheduler for the two-phase fade cycle.
///
/// Owns the pending step queue and the generation counter. Steps are pushed
/// in due order within a render, and a new render clears the queue before
/// scheduling, so applying due steps front-to-back preserves issue order.
#[derive(Debug, Clone, Default)]
pub struct TransitionScheduler {
    generation: u64,
    window: Vec<usize>,
    steps: Vec<Step>,
}

impl TransitionScheduler {
    /// Schedules the transition for a new render targeting `window` (indices
    /// into the master section list).
    ///
    /// Marks every section fading-out immediately (phase 1 start), supersedes
    /// any pending steps from earlier renders, and queues the delayed hide and
    /// staggered enters. Returns the delay until the first pending step, or
    /// `None` when there is nothing to wait for.
    pub fn schedule(&mut self, sections: &mut [BrandSection], window: &[usize], now_ms: u64) -> Option<u64> {
        self.generation += 1;
        self.steps.clear();
        self.window = window.to_vec();

        let _span = tracing::debug_span!(
            "schedule_transition",
            generation = self.generation,
            window_len = window.len()
        )
        .entered();

        for section in sections.iter_mut() {
            section.visibility = Visibility::FadingOut;
        }

        self.steps.push(Step {
            due_ms: now_ms + FADE_OUT_MS,
            generation: self.generation,
            kind: StepKind::SettleHidden,
        });

        for (offset, &section) in window.iter().enumerate() {
            self.steps.push(Step {
                due_ms: now_ms + FADE_OUT_MS + offset as u64 * STAGGER_MS,
                generation: self.generation,
                kind: StepKind::Enter { section },
            });
        }

        self.next_delay(now_ms)
    }

    /// Applies every step due at `now_ms`, in issue order.
    ///
    /// Steps from superseded generations are discarded without touching any
    /// section, so the last-issued render always wins. Returns `true` when at
    /// least one visibility flag changed (the caller should re-render).
    pub fn advance(&mut self, sections: &mut [BrandSection], now_ms: u64) -> bool {
        let mut changed = false;
        let mut remaining = Vec::with_capacity(self.steps.len());

        for step in self.steps.drain(..) {
            if step.generation != self.generation {
                // Superseded render; its continuation becomes a no-op.
                continue;
            }
            if step.due_ms > now_ms {
                remaining.push(step);
                continue;
            }

            match step.kind {
                StepKind::SettleHidden => {
                    for (index, section) in sections.iter_mut().enumerate() {
                        if !self.window.contains(&index)
                            && section.visibility != Visibility::Hidden
                        {
                            section.visibility = Visibility::Hidden;
                            changed = true;
                        }
                    }
                }
                StepKind::Enter { section } => {
                    if let Some(section) = sections.get_mut(section) {
                        if section.visibility != Visibility::FadingIn {
                            section.visibility = Visibility::FadingIn;
                            changed = true;
                        }
                    }
                }
            }
        }

        self.steps = remaining;
        changed
    }

    /// Delay in milliseconds until the earliest pending step, if any.
    ///
    /// A step already overdue reports a zero delay.
    #[must_use]
    pub fn next_delay(&self, now_ms: u64) -> Option<u64> {
        self.steps
            .iter()
            .filter(|step| step.generation == self.generation)
            .map(|step| step.due_ms.saturating_sub(now_ms))
            .min()
    }

    /// Whether any steps from the current render are still pending.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        !self
            .steps
            .iter()
            .any(|step| step.generation == self.generation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::section::test_support::section;

    fn sections() -> Vec<BrandSection> {
        vec![
            section("Acme", &["Widget"]),
            section("Beta", &["Bolt"]),
            section("Zeta", &["Gadget"]),
        ]
    }

    fn run_to_idle(scheduler: &mut TransitionScheduler, sections: &mut [BrandSection], mut now: u64) -> u64 {
        while let Some(delay) = scheduler.next_delay(now) {
            now += delay;
            scheduler.advance(sections, now);
        }
        now
    }

    #[test]
    fn schedule_marks_everything_fading_out() {
        let mut sections = sections();
        let mut scheduler = TransitionScheduler::default();

        scheduler.schedule(&mut sections, &[0], 0);
        assert!(sections
            .iter()
            .all(|s| s.visibility == Visibility::FadingOut));
    }

    #[test]
    fn settled_state_shows_exactly_the_window() {
        let mut sections = sections();
        let mut scheduler = TransitionScheduler::default();

        scheduler.schedule(&mut sections, &[1], 0);
        run_to_idle(&mut scheduler, &mut sections, 0);

        assert_eq!(sections[0].visibility, Visibility::Hidden);
        assert_eq!(sections[1].visibility, Visibility::FadingIn);
        assert_eq!(sections[2].visibility, Visibility::Hidden);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn first_step_is_due_after_the_fade_out_delay() {
        let mut sections = sections();
        let mut scheduler = TransitionScheduler::default();

        let delay = scheduler.schedule(&mut sections, &[0], 1000);
        assert_eq!(delay, Some(FADE_OUT_MS));
    }

    #[test]
    fn window_entries_are_staggered() {
        let mut sections = sections();
        let mut scheduler = TransitionScheduler::default();

        // Window of two sections (page size kept general here).
        scheduler.schedule(&mut sections, &[0, 2], 0);

        scheduler.advance(&mut sections, FADE_OUT_MS);
        assert_eq!(sections[0].visibility, Visibility::FadingIn);
        // Second entry waits for its stagger offset.
        assert_eq!(sections[2].visibility, Visibility::FadingOut);

        scheduler.advance(&mut sections, FADE_OUT_MS + STAGGER_MS);
        assert_eq!(sections[2].visibility, Visibility::FadingIn);
    }

    #[test]
    fn superseded_render_never_mutates_state() {
        let mut sections = sections();
        let mut scheduler = TransitionScheduler::default();

        // First render targets section 0, second (before any step expires)
        // targets section 2. Both schedules' delays then expire in order.
        scheduler.schedule(&mut sections, &[0], 0);
        scheduler.schedule(&mut sections, &[2], 50);
        run_to_idle(&mut scheduler, &mut sections, 50);

        assert_eq!(sections[0].visibility, Visibility::Hidden);
        assert_eq!(sections[1].visibility, Visibility::Hidden);
        assert_eq!(sections[2].visibility, Visibility::FadingIn);
    }

    #[test]
    fn rapid_page_flips_converge_to_the_last_render() {
        let mut sections = sections();
        let mut scheduler = TransitionScheduler::default();

        scheduler.schedule(&mut sections, &[0], 0);
        // Flip twice within the fade-out window.
        scheduler.schedule(&mut sections, &[1], 80);
        scheduler.schedule(&mut sections, &[2], 160);
        run_to_idle(&mut scheduler, &mut sections, 160);

        let shown: Vec<usize> = sections
            .iter()
            .enumerate()
            .filter(|(_, s)| s.visibility.is_settled_visible())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(shown, vec![2]);
    }

    #[test]
    fn advance_reports_whether_anything_changed() {
        let mut sections = sections();
        let mut scheduler = TransitionScheduler::default();

        scheduler.schedule(&mut sections, &[0], 0);
        // Nothing due yet.
        assert!(!scheduler.advance(&mut sections, FADE_OUT_MS - 1));
        assert!(scheduler.advance(&mut sections, FADE_OUT_MS));
        assert!(!scheduler.advance(&mut sections, FADE_OUT_MS));
    }
}
