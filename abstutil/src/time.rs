use instant::Instant;

use crate::prettyprint_usize;

pub fn elapsed_seconds(since: Instant) -> f64 {
    let dt = since.elapsed();
    (dt.as_secs() as f64) + (f64::from(dt.subsec_nanos()) * 1e-9)
}

pub fn prettyprint_time(seconds: f64) -> String {
    format!("{:.4}s", seconds)
}

struct Progress {
    label: String,
    processed_items: usize,
    total_items: usize,
    started_at: Instant,
}

impl Progress {
    // Returns when done
    fn next(&mut self) -> Option<(f64, String)> {
        self.processed_items += 1;
        if self.processed_items > self.total_items {
            panic!(
                "{} is too few items for {} progress",
                prettyprint_usize(self.total_items),
                self.label
            );
        }
        if self.processed_items < self.total_items {
            return None;
        }
        let elapsed = elapsed_seconds(self.started_at);
        Some((
            elapsed,
            format!(
                "{} ({})... {}",
                self.label,
                prettyprint_usize(self.total_items),
                prettyprint_time(elapsed)
            ),
        ))
    }
}

struct TimerSpan {
    name: String,
    started_at: Instant,
    nested_results: Vec<String>,
}

enum StackEntry {
    TimerSpan(TimerSpan),
    Progress(Progress),
}

/// Hierarchial timing of long phases of work. Each span is logged as it finishes, and a summary
/// of all spans, notes, and warnings is logged when the Timer is dropped.
pub struct Timer {
    results: Vec<String>,
    stack: Vec<StackEntry>,
    outermost_name: String,

    notes: Vec<String>,
    warnings: Vec<String>,
}

impl Timer {
    pub fn new<I: Into<String>>(raw_name: I) -> Timer {
        let name = raw_name.into();
        let mut t = Timer {
            results: Vec::new(),
            stack: Vec::new(),
            outermost_name: name.clone(),
            notes: Vec::new(),
            warnings: Vec::new(),
        };
        t.start(name);
        t
    }

    // TODO Shouldn't use this much.
    pub fn throwaway() -> Timer {
        Timer::new("throwaway")
    }

    /// Log immediately, but also repeat at the end.
    pub fn note<I: Into<String>>(&mut self, raw_line: I) {
        let line = raw_line.into();
        info!("{}", line);
        self.notes.push(line);
    }

    pub fn warn<I: Into<String>>(&mut self, raw_line: I) {
        let line = raw_line.into();
        warn!("{}", line);
        self.warnings.push(line);
    }

    pub fn num_warnings(&self) -> usize {
        self.warnings.len()
    }

    /// Used to end the scope of a timer early.
    pub fn done(self) {}

    pub fn start<I: Into<String>>(&mut self, raw_name: I) {
        let name = raw_name.into();
        debug!("{}...", name);
        self.stack.push(StackEntry::TimerSpan(TimerSpan {
            name,
            started_at: Instant::now(),
            nested_results: Vec::new(),
        }));
    }

    pub fn stop<I: Into<String>>(&mut self, raw_name: I) {
        let name = raw_name.into();
        let span = match self.stack.pop() {
            Some(StackEntry::TimerSpan(s)) => s,
            _ => panic!("stop({}) doesn't match a start()", name),
        };
        assert_eq!(span.name, name);
        let line = format!(
            "{} took {}",
            name,
            prettyprint_time(elapsed_seconds(span.started_at))
        );
        debug!("{}", line);

        let padding = "  ".repeat(self.stack.len());
        let results = match self.stack.last_mut() {
            Some(StackEntry::TimerSpan(ref mut s)) => &mut s.nested_results,
            Some(StackEntry::Progress(_)) => unreachable!(),
            None => &mut self.results,
        };
        results.push(format!("{}- {}", padding, line));
        results.extend(span.nested_results);
    }

    pub fn start_iter<I: Into<String>>(&mut self, raw_name: I, total_items: usize) {
        if total_items == 0 {
            return;
        }
        let label = raw_name.into();
        if let Some(StackEntry::Progress(p)) = self.stack.last() {
            panic!(
                "Can't start_iter({}) while Progress({}) is top of the stack",
                label, p.label
            );
        }
        self.stack.push(StackEntry::Progress(Progress {
            label,
            processed_items: 0,
            total_items,
            started_at: Instant::now(),
        }));
    }

    pub fn next(&mut self) {
        let maybe_result = if let Some(StackEntry::Progress(ref mut progress)) =
            self.stack.last_mut()
        {
            progress.next()
        } else {
            panic!("Can't next() while a TimerSpan is top of the stack");
        };
        if let Some((_, line)) = maybe_result {
            self.stack.pop();
            debug!("{}", line);
            let padding = "  ".repeat(self.stack.len());
            match self.stack.last_mut() {
                Some(StackEntry::TimerSpan(ref mut s)) => {
                    s.nested_results.push(format!("{}- {}", padding, line));
                }
                Some(StackEntry::Progress(_)) => unreachable!(),
                None => {
                    self.results.push(format!("{}- {}", padding, line));
                }
            }
        }
    }
}

impl std::ops::Drop for Timer {
    fn drop(&mut self) {
        let stop_name = self.outermost_name.clone();

        // If we're in the middle of unwinding a panic, don't further blow up.
        match self.stack.last() {
            Some(StackEntry::TimerSpan(ref s)) if s.name == stop_name && self.stack.len() == 1 => {}
            _ => {
                warn!("dropping Timer {} with unfinished spans", stop_name);
                return;
            }
        }

        self.stop(stop_name);
        for line in &self.results {
            info!("{}", line);
        }

        if !self.notes.is_empty() {
            info!("{} notes:", self.notes.len());
            for line in &self.notes {
                info!("  {}", line);
            }
        }
        if !self.warnings.is_empty() {
            warn!("{} warnings:", self.warnings.len());
            for line in &self.warnings {
                warn!("  {}", line);
            }
        }
    }
}
