//! Benchmarking using `criterion`.

pub use criterion::*;

use crate::benchmark::Benchmarker;

/// Defines a `criterion` benchmark function running the benchmark function
/// with the same name in the given module, optionally with a custom sample
/// count.
#[macro_export]
macro_rules! define_criterion_target {
    ($group:ident, $name:ident, @samples $sample_count:expr) => {
        pub fn $name(c: &mut $crate::benchmark::criterion::Criterion) {
            $group::$name($crate::benchmark::criterion::CriterionBenchmarker::new(
                c,
                stringify!($name),
                $sample_count,
            ));
        }
    };
    ($group:ident, $name:ident) => {
        $crate::define_criterion_target!($group, $name, @samples None);
    };
    ($group:ident, $name:ident, $sample_count:expr) => {
        $crate::define_criterion_target!($group, $name, @samples Some($sample_count));
    };
}

/// Runs a benchmark closure as a single-function `criterion` group.
#[allow(missing_debug_implementations)]
pub struct CriterionBenchmarker<'a> {
    c: &'a mut Criterion,
    id: &'static str,
    sample_count: Option<usize>,
}

impl<'a> CriterionBenchmarker<'a> {
    pub fn new(c: &'a mut Criterion, id: &'static str, sample_count: Option<usize>) -> Self {
        Self {
            c,
            id,
            sample_count,
        }
    }
}

impl Benchmarker for CriterionBenchmarker<'_> {
    fn benchmark<T>(self, f: &mut impl FnMut() -> T) {
        let mut group = self.c.benchmark_group(self.id);
        if let Some(sample_count) = self.sample_count {
            group.sample_size(sample_count);
        }
        group.bench_function(self.id, |b| b.iter(&mut *f));
        group.finish();
    }
}

/// The `criterion` configuration shared by all benchmark binaries.
pub fn config() -> Criterion {
    Criterion::default()
        .warm_up_time(std::time::Duration::from_millis(500))
        .noise_threshold(0.03)
}
