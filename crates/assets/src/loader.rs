/// Handle for one pending load tracked by a [`LoadSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(usize);

/// Counted barrier over a finite set of pending loads.
///
/// Each load call takes a token up front; completion or failure resolves
/// it. The aggregate ready signal fires exactly once, after every token
/// has resolved. Failures resolve the barrier too: a missing model is
/// logged and the scene continues without it.
#[derive(Debug, Default)]
pub struct LoadSet {
    labels: Vec<String>,
    resolved: Vec<bool>,
    failures: usize,
    ready_fired: bool,
}

impl LoadSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pending load and take its token.
    pub fn track(&mut self, label: &str) -> LoadToken {
        self.labels.push(label.to_owned());
        self.resolved.push(false);
        LoadToken(self.labels.len() - 1)
    }

    /// Mark a load as finished.
    pub fn complete(&mut self, token: LoadToken) {
        if !self.resolve(token) {
            return;
        }
        tracing::debug!(label = %self.labels[token.0], "load complete");
    }

    /// Mark a load as failed. Logged, counted, and otherwise ignored.
    pub fn fail(&mut self, token: LoadToken, error: &str) {
        if !self.resolve(token) {
            return;
        }
        self.failures += 1;
        tracing::warn!(label = %self.labels[token.0], error, "load failed; continuing without asset");
    }

    fn resolve(&mut self, token: LoadToken) -> bool {
        match self.resolved.get_mut(token.0) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }

    pub fn total(&self) -> usize {
        self.labels.len()
    }

    pub fn pending(&self) -> usize {
        self.resolved.iter().filter(|r| !**r).count()
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn is_complete(&self) -> bool {
        self.pending() == 0
    }

    /// One-shot ready signal: true the first time the set is observed
    /// complete, false on every later call.
    pub fn take_ready(&mut self) -> bool {
        if self.ready_fired || !self.is_complete() {
            return false;
        }
        self.ready_fired = true;
        tracing::info!(
            total = self.total(),
            failures = self.failures,
            "all tracked loads resolved"
        );
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_immediately_ready() {
        let mut set = LoadSet::new();
        assert!(set.is_complete());
        assert!(set.take_ready());
        assert!(!set.take_ready());
    }

    #[test]
    fn ready_waits_for_every_token() {
        let mut set = LoadSet::new();
        let a = set.track("shelves");
        let b = set.track("registers");
        set.complete(a);
        assert!(!set.is_complete());
        assert!(!set.take_ready());
        set.complete(b);
        assert!(set.take_ready());
    }

    #[test]
    fn ready_fires_exactly_once() {
        let mut set = LoadSet::new();
        let a = set.track("tree");
        set.complete(a);
        assert!(set.take_ready());
        let later = set.track("late_prop");
        set.complete(later);
        // The gate already opened; no second signal.
        assert!(!set.take_ready());
    }

    #[test]
    fn failure_still_resolves_the_barrier() {
        let mut set = LoadSet::new();
        let a = set.track("parking_lot");
        let b = set.track("snowman");
        set.fail(a, "file not found");
        set.complete(b);
        assert!(set.is_complete());
        assert_eq!(set.failures(), 1);
        assert!(set.take_ready());
    }

    #[test]
    fn double_resolution_is_ignored() {
        let mut set = LoadSet::new();
        let a = set.track("cart");
        set.complete(a);
        set.fail(a, "late error");
        assert_eq!(set.failures(), 0);
        assert_eq!(set.pending(), 0);
    }
}
