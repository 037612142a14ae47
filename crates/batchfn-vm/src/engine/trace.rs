//! Tracing infrastructure for debugging function dispatch.
//!
//! `NoopTracer` methods are `#[inline(always)]` and empty, so an untraced call pays
//! nothing beyond a virtual call. `PrintTracer` collects indented lines that nest
//! with the call stack (vectorized sub-calls appear under their adapter).
//!
//! Tracers receive shared references because the context that carries them is
//! shared with every nested call. Tracers are `Sync` so a context can be handed to
//! workers that split a mask; stateful tracers guard their state with a lock.

use std::fmt::Write as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use batchfn_core::{Colors, IndexMask, Signature};

/// Verbosity level for trace output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    /// Default: calls and fallbacks.
    #[default]
    Default,
    /// Verbose (-v): also vectorization sub-calls.
    Verbose,
    /// Very verbose (-vv): also returns and the mask indices of every call.
    VeryVerbose,
}

/// Dispatch instrumentation.
///
/// - `trace_call` - before a function runs, after its binding was verified
/// - `trace_return` - after it returns
/// - `trace_vectorize` - before each per-index sub-call of a vectorized function
/// - `trace_fallback` - when a function substitutes defaults for missing data
pub trait Tracer: Sync {
    fn trace_call(&self, signature: &Signature, mask: &IndexMask<'_>);

    fn trace_return(&self, signature: &Signature);

    fn trace_vectorize(&self, signature: &Signature, index: usize, length: usize);

    fn trace_fallback(&self, signature: &Signature, reason: &str);
}

/// No-op tracer that gets optimized away completely.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopTracer;

impl Tracer for NoopTracer {
    #[inline(always)]
    fn trace_call(&self, _signature: &Signature, _mask: &IndexMask<'_>) {}

    #[inline(always)]
    fn trace_return(&self, _signature: &Signature) {}

    #[inline(always)]
    fn trace_vectorize(&self, _signature: &Signature, _index: usize, _length: usize) {}

    #[inline(always)]
    fn trace_fallback(&self, _signature: &Signature, _reason: &str) {}
}

/// Tracer that collects trace lines for display.
pub struct PrintTracer {
    verbosity: Verbosity,
    colors: Colors,
    lines: Mutex<Vec<String>>,
    /// Current call nesting.
    depth: AtomicUsize,
}

impl PrintTracer {
    pub fn new(verbosity: Verbosity, colors: Colors) -> Self {
        Self {
            verbosity,
            colors,
            lines: Mutex::new(Vec::new()),
            depth: AtomicUsize::new(0),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.locked().clone()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// All lines joined with newlines, with a trailing newline when non-empty.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for line in self.locked().iter() {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    fn locked(&self) -> MutexGuard<'_, Vec<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn push(&self, line: String) {
        let indent = "  ".repeat(self.depth.load(Ordering::Relaxed));
        self.locked().push(format!("{indent}{line}"));
    }
}

impl Tracer for PrintTracer {
    fn trace_call(&self, signature: &Signature, mask: &IndexMask<'_>) {
        let c = &self.colors;
        let mut line = format!(
            "{}{}{} {}mask={}/{}{}",
            c.blue,
            signature.name(),
            c.reset,
            c.dim,
            mask.len(),
            mask.min_array_size(),
            c.reset
        );
        if self.verbosity >= Verbosity::VeryVerbose {
            let indices: Vec<String> = mask.iter().map(|i| i.to_string()).collect();
            write!(line, " {}[{}]{}", c.dim, indices.join(", "), c.reset).unwrap();
        }
        self.push(line);
        self.depth.fetch_add(1, Ordering::Relaxed);
    }

    fn trace_return(&self, signature: &Signature) {
        let _ = self
            .depth
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |depth| {
                Some(depth.saturating_sub(1))
            });
        if self.verbosity >= Verbosity::VeryVerbose {
            let c = &self.colors;
            self.push(format!("{}return {}{}", c.dim, signature.name(), c.reset));
        }
    }

    fn trace_vectorize(&self, _signature: &Signature, index: usize, length: usize) {
        if self.verbosity < Verbosity::Verbose {
            return;
        }
        let c = &self.colors;
        self.push(format!(
            "{}vectorize{} index={index} length={length}",
            c.dim, c.reset
        ));
    }

    fn trace_fallback(&self, _signature: &Signature, reason: &str) {
        let c = &self.colors;
        self.push(format!("{}fallback{} {}{reason}{}", c.dim, c.reset, c.green, c.reset));
    }
}
