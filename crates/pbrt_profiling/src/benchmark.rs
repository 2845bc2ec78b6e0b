//! Running benchmark targets, either repeatedly for a fixed time from a
//! binary (for use with external profilers) or through `criterion`.

#[cfg(feature = "criterion")]
pub mod criterion;

use std::{
    hint::black_box,
    time::{Duration, Instant},
};

/// Something that can run a benchmark closure and measure it.
pub trait Benchmarker {
    fn benchmark<T>(self, f: &mut impl FnMut() -> T);
}

/// Runs the benchmark closure in a loop for a fixed duration (at least
/// once), after an optional delay, and logs the mean iteration time.
#[derive(Clone, Debug)]
pub struct BasicBenchmarker {
    duration: Duration,
    start_at: Instant,
}

/// Outcome of running a benchmark with a [`BasicBenchmarker`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BenchmarkRun {
    pub iterations: u64,
    pub elapsed: Duration,
}

impl BasicBenchmarker {
    /// Creates a benchmarker that starts once `delay` has passed since
    /// `program_start` and keeps iterating for `duration`.
    pub fn new(program_start: Instant, delay: Duration, duration: Duration) -> Self {
        Self {
            duration,
            start_at: program_start + delay,
        }
    }

    /// Runs the closure and returns how many times it ran and for how long.
    pub fn run<T>(self, f: &mut impl FnMut() -> T) -> BenchmarkRun {
        let remaining = self.start_at.saturating_duration_since(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }

        let start = Instant::now();
        let mut iterations = 0;
        loop {
            black_box(f());
            iterations += 1;
            if start.elapsed() > self.duration {
                break;
            }
        }
        BenchmarkRun {
            iterations,
            elapsed: start.elapsed(),
        }
    }
}

impl Benchmarker for BasicBenchmarker {
    fn benchmark<T>(self, f: &mut impl FnMut() -> T) {
        let run = self.run(f);
        log::info!(
            "Ran {} iterations in {:.3} s ({:.1} ns per iteration)",
            run.iterations,
            run.elapsed.as_secs_f64(),
            run.nanos_per_iteration()
        );
    }
}

impl BenchmarkRun {
    pub fn nanos_per_iteration(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1e9 / self.iterations.max(1) as f64
    }
}

/// Defines an enum with one variant per benchmark function, named after the
/// module and the function, and an `execute` method calling the function.
/// With the `cli` feature of the calling crate, the enum can be parsed as a
/// `clap` value.
#[macro_export]
macro_rules! define_target_enum {
(
    $name:ident,
    $benchmarks_mod:path,
    $(
        $module:ident => {
            $($func:ident),* $(,)?
        }
    ),* $(,)?
) => {
    ::pastey::paste! {
        #[allow(clippy::enum_variant_names)]
        #[cfg_attr(feature = "cli", derive(::clap::ValueEnum))]
        #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
        pub enum $name {
            $(
                $( [<$module:camel $func:camel>] ),*
            ),*
        }

        impl $name {
            pub fn execute(&self, benchmarker: impl $crate::benchmark::Benchmarker) {
                match self {
                    $(
                        $( Self::[<$module:camel $func:camel>] => $benchmarks_mod::$module::$func(benchmarker), )*
                    )*
                }
            }
        }
    }};
}

/// Runs a benchmark target for `duration` seconds, starting once `delay`
/// seconds have passed since this call.
pub fn benchmark(execute: impl Fn(BasicBenchmarker), duration: f64, delay: f64) {
    let benchmarker = BasicBenchmarker::new(
        Instant::now(),
        Duration::from_secs_f64(delay),
        Duration::from_secs_f64(duration),
    );
    execute(benchmarker);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_runs_closure_once() {
        let mut calls = 0;
        let run = BasicBenchmarker::new(Instant::now(), Duration::ZERO, Duration::ZERO)
            .run(&mut || calls += 1);
        assert_eq!(run.iterations, 1);
        assert_eq!(calls, 1);
    }

    #[test]
    fn benchmark_waits_for_delay() {
        let start = Instant::now();
        benchmark(
            |benchmarker| benchmarker.benchmark(&mut || 1 + 1),
            0.0,
            0.02,
        );
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn benchmark_keeps_running_for_duration() {
        let run = BasicBenchmarker::new(Instant::now(), Duration::ZERO, Duration::from_millis(5))
            .run(&mut || black_box(3) * 2);
        assert!(run.elapsed >= Duration::from_millis(5));
        assert!(run.iterations > 1);
        assert!(run.nanos_per_iteration() > 0.0);
    }
}
