use std::time::Duration;

use url::Url;

use crate::{Effect, Timer, TimerSlot};

/// Debounced search box. Holds the field value and the generation of the
/// single pending dispatch, if any.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct SearchDebouncer {
    value: String,
    generation: u64,
    pending: Option<u64>,
}

impl SearchDebouncer {
    pub(crate) fn new(initial: impl Into<String>) -> Self {
        Self {
            value: initial.into(),
            ..Self::default()
        }
    }

    pub(crate) fn value(&self) -> &str {
        &self.value
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the query to dispatch right away, if any. Timer effects are
    /// appended to `effects`.
    pub(crate) fn input(
        &mut self,
        value: String,
        delay: Duration,
        effects: &mut Vec<Effect>,
    ) -> Option<String> {
        self.value = value;
        if self.value.is_empty() {
            self.cancel(effects);
            return Some(String::new());
        }
        self.generation += 1;
        self.pending = Some(self.generation);
        effects.push(Effect::ScheduleTimer {
            timer: Timer::SearchDebounce {
                generation: self.generation,
            },
            delay,
        });
        None
    }

    /// Enter key or search button: skip the quiet period.
    pub(crate) fn submit(&mut self, effects: &mut Vec<Effect>) -> String {
        self.cancel(effects);
        self.value.clone()
    }

    /// A debounce timer went off. Only the latest generation dispatches.
    pub(crate) fn elapsed(&mut self, generation: u64) -> Option<String> {
        if self.pending != Some(generation) {
            return None;
        }
        self.pending = None;
        Some(self.value.clone())
    }

    fn cancel(&mut self, effects: &mut Vec<Effect>) {
        if self.pending.take().is_some() {
            effects.push(Effect::CancelTimer {
                slot: TimerSlot::SearchDebounce,
            });
        }
    }
}

/// Rewrites `param` in `current` for `query`: set to the trimmed query, or
/// removed when that is empty. Returns `None` when the URL would not change.
pub fn rewrite_search_url(current: &Url, param: &str, query: &str) -> Option<Url> {
    let original: Vec<(String, String)> = current.query_pairs().into_owned().collect();
    let trimmed = query.trim();

    let mut pairs = Vec::with_capacity(original.len() + 1);
    let mut placed = false;
    for (key, value) in &original {
        if key != param {
            pairs.push((key.clone(), value.clone()));
        } else if !trimmed.is_empty() && !placed {
            pairs.push((key.clone(), trimmed.to_string()));
            placed = true;
        }
    }
    if !trimmed.is_empty() && !placed {
        pairs.push((param.to_string(), trimmed.to_string()));
    }

    if pairs == original {
        return None;
    }

    let mut next = current.clone();
    if pairs.is_empty() {
        next.set_query(None);
    } else {
        next.query_pairs_mut().clear().extend_pairs(&pairs);
    }
    Some(next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(current: &str, query: &str) -> Option<String> {
        let current = Url::parse(current).unwrap();
        rewrite_search_url(&current, "q", query).map(String::from)
    }

    #[test]
    fn sets_trimmed_query_and_keeps_other_params() {
        assert_eq!(
            rewrite("https://admin.test/users?page=2", "  ann ").as_deref(),
            Some("https://admin.test/users?page=2&q=ann")
        );
    }

    #[test]
    fn replaces_existing_query_in_place() {
        assert_eq!(
            rewrite("https://admin.test/users?q=bob&page=2", "ann").as_deref(),
            Some("https://admin.test/users?q=ann&page=2")
        );
    }

    #[test]
    fn blank_query_removes_param_and_question_mark() {
        assert_eq!(
            rewrite("https://admin.test/users?q=bob", "   ").as_deref(),
            Some("https://admin.test/users")
        );
    }

    #[test]
    fn unchanged_url_is_none() {
        assert_eq!(rewrite("https://admin.test/users?q=ann", "ann"), None);
        assert_eq!(rewrite("https://admin.test/users", ""), None);
    }

    #[test]
    fn stale_generation_does_not_dispatch() {
        let mut search = SearchDebouncer::default();
        let mut effects = Vec::new();
        search.input("a".into(), Duration::from_millis(5), &mut effects);
        search.input("ab".into(), Duration::from_millis(5), &mut effects);
        assert_eq!(search.elapsed(1), None);
        assert_eq!(search.elapsed(2).as_deref(), Some("ab"));
        assert!(!search.is_pending());
    }
}
