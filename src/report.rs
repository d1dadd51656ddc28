//! Console rendering of a running search.

use std::io::Write;
use std::time::Instant;

use crate::error::Result;
use crate::selection::{Algorithm, SearchObserver, SearchResult, SearchStep, TraceEntry};

/// Writes the classic step-by-step trace to any writer.
///
/// With `verbose` off only the per-step summaries and the final answer are
/// written, which keeps large runs readable.
pub struct ConsoleReporter<W: Write> {
    out: W,
    verbose: bool,
    started: Option<Instant>,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            verbose: true,
            started: None,
        }
    }

    pub fn with_candidates(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SearchObserver for ConsoleReporter<W> {
    fn on_start(&mut self, algorithm: Algorithm, initial: &TraceEntry) -> Result<()> {
        self.started = Some(Instant::now());
        writeln!(self.out, "Running {algorithm}...")?;
        let description = if initial.subset.is_empty() {
            "no features".to_string()
        } else {
            format!("all features {}", initial.subset)
        };
        writeln!(
            self.out,
            "Using {description} and \"leaving-one-out\" evaluation, I get an accuracy of {:.1}%",
            initial.accuracy
        )?;
        writeln!(self.out)?;
        writeln!(self.out, "Beginning search.")?;
        writeln!(self.out)?;
        Ok(())
    }

    fn on_candidate(&mut self, entry: &TraceEntry) -> Result<()> {
        if self.verbose {
            writeln!(self.out, "\tUsing feature(s) {} accuracy is {:.1}%", entry.subset, entry.accuracy)?;
        }
        Ok(())
    }

    fn on_step(&mut self, step: &SearchStep, best: &TraceEntry) -> Result<()> {
        writeln!(self.out)?;
        if step.accuracy < best.accuracy {
            writeln!(
                self.out,
                "(Warning, Accuracy has decreased! Continuing search in case of local maxima)"
            )?;
        }
        writeln!(
            self.out,
            "Feature set {} was best, accuracy is {:.1}%",
            step.subset, step.accuracy
        )?;
        writeln!(self.out)?;
        Ok(())
    }

    fn on_finish(&mut self, result: &SearchResult) -> Result<()> {
        if result.accuracy_decreased {
            writeln!(self.out, "(Warning, Accuracy has decreased!)")?;
        }
        writeln!(
            self.out,
            "Finished search!! The best feature subset is {}, which has an accuracy of {:.1}%",
            result.best.subset, result.best.accuracy
        )?;
        if let Some(started) = self.started {
            writeln!(self.out, "Search took {:.2?}", started.elapsed())?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Pretty-printed JSON summary of a finished search.
pub fn to_json(result: &SearchResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}
