//! Desktop/mobile rule sets and the switch between them.

use super::pinned_track::PinnedTrackSpec;
use super::scope::EffectScope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakpointMode {
    Desktop,
    Mobile,
}

impl BreakpointMode {
    pub fn for_width(width: f64, threshold: f64) -> Self {
        if width >= threshold {
            BreakpointMode::Desktop
        } else {
            BreakpointMode::Mobile
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeChange {
    Initial(BreakpointMode),
    Unchanged(BreakpointMode),
    Switched { from: BreakpointMode, to: BreakpointMode },
}

/// Tracks the current mode. Feeding the same side of the threshold any
/// number of times reports `Unchanged`.
#[derive(Debug, Clone)]
pub struct ModeSwitch {
    threshold: f64,
    current: Option<BreakpointMode>,
}

impl ModeSwitch {
    pub fn new(threshold: f64) -> Self {
        Self { threshold, current: None }
    }

    pub fn observe(&mut self, width: f64) -> ModeChange {
        let next = BreakpointMode::for_width(width, self.threshold);
        let change = match self.current {
            None => ModeChange::Initial(next),
            Some(current) if current == next => ModeChange::Unchanged(current),
            Some(current) => ModeChange::Switched { from: current, to: next },
        };
        self.current = Some(next);
        change
    }

    pub fn current(&self) -> Option<BreakpointMode> {
        self.current
    }
}

/// Resources one mode acquired, plus pinned tracks still waiting for layout.
#[derive(Default)]
pub struct RuleSet {
    scope: EffectScope,
    deferred: Vec<PinnedTrackSpec>,
}

impl RuleSet {
    pub fn new(scope: EffectScope, deferred: Vec<PinnedTrackSpec>) -> Self {
        Self { scope, deferred }
    }

    pub fn take_deferred(&mut self) -> Vec<PinnedTrackSpec> {
        std::mem::take(&mut self.deferred)
    }

    pub fn absorb(&mut self, scope: EffectScope, deferred: Vec<PinnedTrackSpec>) {
        self.scope.absorb(scope);
        self.deferred.extend(deferred);
    }

    pub fn deferred(&self) -> &[PinnedTrackSpec] {
        &self.deferred
    }

    pub fn teardown(&mut self) {
        self.scope.dispose();
        self.deferred.clear();
    }
}

pub enum ModeRules {
    Desktop(RuleSet),
    Mobile(RuleSet),
}

impl ModeRules {
    pub fn new(mode: BreakpointMode, rules: RuleSet) -> Self {
        match mode {
            BreakpointMode::Desktop => ModeRules::Desktop(rules),
            BreakpointMode::Mobile => ModeRules::Mobile(rules),
        }
    }

    pub fn mode(&self) -> BreakpointMode {
        match self {
            ModeRules::Desktop(_) => BreakpointMode::Desktop,
            ModeRules::Mobile(_) => BreakpointMode::Mobile,
        }
    }

    pub fn rules(&self) -> &RuleSet {
        match self {
            ModeRules::Desktop(rules) | ModeRules::Mobile(rules) => rules,
        }
    }

    pub fn rules_mut(&mut self) -> &mut RuleSet {
        match self {
            ModeRules::Desktop(rules) | ModeRules::Mobile(rules) => rules,
        }
    }

    pub fn teardown(mut self) {
        self.rules_mut().teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_for_width() {
        assert_eq!(BreakpointMode::for_width(1_440.0, 768.0), BreakpointMode::Desktop);
        assert_eq!(BreakpointMode::for_width(768.0, 768.0), BreakpointMode::Desktop);
        assert_eq!(BreakpointMode::for_width(767.0, 768.0), BreakpointMode::Mobile);
    }

    #[test]
    fn test_rapid_resizes_on_one_side_do_not_switch() {
        let mut switch = ModeSwitch::new(768.0);
        assert_eq!(switch.observe(1_280.0), ModeChange::Initial(BreakpointMode::Desktop));
        for width in (900..1_280).rev().step_by(7) {
            assert_eq!(switch.observe(width as f64), ModeChange::Unchanged(BreakpointMode::Desktop));
        }
        assert_eq!(
            switch.observe(500.0),
            ModeChange::Switched { from: BreakpointMode::Desktop, to: BreakpointMode::Mobile }
        );
        assert_eq!(switch.current(), Some(BreakpointMode::Mobile));
    }

    #[test]
    fn test_teardown_runs_mode_disposers() {
        use std::cell::Cell;
        use std::rc::Rc;

        let released = Rc::new(Cell::new(false));
        let flag = released.clone();
        let mut scope = EffectScope::new();
        scope.defer(move || flag.set(true));

        let rules = ModeRules::new(BreakpointMode::Desktop, RuleSet::new(scope, Vec::new()));
        assert_eq!(rules.mode(), BreakpointMode::Desktop);
        rules.teardown();
        assert!(released.get());
    }
}
