/// Ordered list of `(delay, action)` pairs driven by the frame clock.
///
/// Replaces chains of nested one-shot timers: actions are scheduled relative
/// to the timeline's current time and released by [`Timeline::advance`] in
/// due order (ties keep scheduling order). Time is kept in `f64` so short
/// delays stay exact however long the page has been open.
#[derive(Debug)]
pub struct Timeline<A> {
    now: f64,
    entries: Vec<(f64, A)>,
}

impl<A> Default for Timeline<A> {
    fn default() -> Self {
        Self {
            now: 0.0,
            entries: Vec::new(),
        }
    }
}

impl<A> Timeline<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `action` to fire `delay` seconds from now.
    pub fn schedule(&mut self, delay: f32, action: A) {
        let due = self.now + f64::from(delay.max(0.0));
        let at = self.entries.partition_point(|(t, _)| *t <= due);
        self.entries.insert(at, (due, action));
    }

    /// Advance time by `dt` and return every action that has come due.
    pub fn advance(&mut self, dt: f32) -> Vec<A> {
        self.now += f64::from(dt.max(0.0));
        let ready = self.entries.partition_point(|(t, _)| *t <= self.now);
        self.entries.drain(..ready).map(|(_, a)| a).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delay_fires_on_next_advance() {
        let mut tl = Timeline::new();
        tl.schedule(0.0, "now");
        assert_eq!(tl.advance(0.0), vec!["now"]);
        assert!(tl.is_empty());
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut tl = Timeline::new();
        tl.schedule(0.5, 'c');
        tl.schedule(0.1, 'a');
        tl.schedule(0.3, 'b');
        assert_eq!(tl.advance(0.2), vec!['a']);
        assert_eq!(tl.advance(0.2), vec!['b']);
        assert_eq!(tl.len(), 1);
        assert_eq!(tl.advance(1.0), vec!['c']);
    }

    #[test]
    fn test_ties_keep_schedule_order() {
        let mut tl = Timeline::new();
        tl.schedule(0.2, 1);
        tl.schedule(0.2, 2);
        tl.schedule(0.2, 3);
        assert_eq!(tl.advance(0.25), vec![1, 2, 3]);
    }

    #[test]
    fn test_short_delay_after_long_run() {
        let mut tl = Timeline::new();
        for _ in 0..3600 {
            tl.advance(10.0);
        }
        tl.schedule(0.01, "soon");
        assert!(tl.advance(0.004).is_empty());
        assert_eq!(tl.advance(0.007), vec!["soon"]);
    }

    #[test]
    fn test_delay_is_relative_to_current_time() {
        let mut tl = Timeline::new();
        tl.advance(10.0);
        tl.schedule(0.3, "later");
        assert!(tl.advance(0.2).is_empty());
        assert_eq!(tl.advance(0.2), vec!["later"]);
    }
}
