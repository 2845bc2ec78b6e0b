//! Aggregated timing of named code regions.

use parking_lot::{Mutex, MutexGuard};
use std::{
    collections::HashMap,
    panic::Location,
    sync::atomic::{AtomicBool, Ordering},
    time::{Duration, Instant},
};

/// Collects timing statistics for named code regions and frames.
///
/// The profiler is passed explicitly to the code being profiled rather than
/// living in a global. It can be shared between threads, but the depth of
/// nested regions is tracked per profiler, so regions on different threads
/// will see each other's nesting.
#[derive(Debug)]
pub struct Profiler {
    enabled: AtomicBool,
    state: Mutex<ProfilerState>,
}

/// Accumulated statistics for one named region.
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileData {
    pub name: String,
    pub total: Duration,
    pub min: Duration,
    pub max: Duration,
    pub call_count: u64,
    /// Number of regions that were open when this region was last begun.
    pub depth: u64,
    /// Where this region was last begun.
    pub location: &'static Location<'static>,
}

/// Guard timing a region from its creation until it is dropped.
#[derive(Debug)]
#[must_use = "the region ends as soon as the timer is dropped"]
pub struct ScopedTimer<'a> {
    profiler: &'a Profiler,
    name: &'a str,
    active: bool,
}

#[derive(Debug, Default)]
pub(super) struct ProfilerState {
    pub(super) profiles: HashMap<String, ProfileData>,
    active_timers: HashMap<String, Instant>,
    current_depth: u64,
    frame_start: Option<Instant>,
    pub(super) frame_count: u64,
    pub(super) last_frame_time: Duration,
}

impl Profiler {
    /// Creates a profiler that is initially enabled or disabled.
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: AtomicBool::new(enabled),
            state: Mutex::new(ProfilerState::default()),
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Enables or disables recording. Regions begun while enabled and ended
    /// while disabled are not recorded.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// Starts timing the region with the given name. Beginning a region that
    /// is already running restarts its timer.
    #[track_caller]
    pub fn begin_profile(&self, name: &str) {
        if !self.enabled() {
            return;
        }
        let location = Location::caller();

        let mut state = self.state.lock();
        let depth = state.current_depth;
        state.current_depth += 1;

        state
            .profiles
            .entry(name.to_owned())
            .and_modify(|profile| {
                profile.depth = depth;
                profile.location = location;
            })
            .or_insert_with(|| ProfileData::new(name.to_owned(), location, depth));

        state.active_timers.insert(name.to_owned(), Instant::now());
    }

    /// Stops timing the region with the given name and records the elapsed
    /// time. Ending a region that was never begun only unwinds the depth. A
    /// region ended while the profiler is disabled is unwound and discarded.
    pub fn end_profile(&self, name: &str) {
        let end = Instant::now();

        let mut state = self.state.lock();
        state.current_depth = state.current_depth.saturating_sub(1);

        let Some(start) = state.active_timers.remove(name) else {
            return;
        };
        if !self.enabled() {
            return;
        }
        if let Some(profile) = state.profiles.get_mut(name) {
            profile.add_sample(end.duration_since(start));
        }
    }

    /// Begins the region with the given name and returns a guard that ends it
    /// when dropped.
    #[track_caller]
    pub fn scoped<'a>(&'a self, name: &'a str) -> ScopedTimer<'a> {
        ScopedTimer::new(self, name)
    }

    /// Times the given closure as a region with the given name and returns
    /// its result.
    #[track_caller]
    pub fn time<R>(&self, name: &str, f: impl FnOnce() -> R) -> R {
        let _timer = self.scoped(name);
        f()
    }

    /// Discards all statistics, running regions and frame information.
    pub fn reset(&self) {
        *self.state.lock() = ProfilerState::default();
    }

    pub fn begin_frame(&self) {
        if !self.enabled() {
            return;
        }
        self.state.lock().frame_start = Some(Instant::now());
    }

    /// Ends the current frame, recording its duration. Does nothing if no
    /// frame was begun.
    pub fn end_frame(&self) {
        if !self.enabled() {
            return;
        }
        let end = Instant::now();
        let mut state = self.state.lock();
        if let Some(start) = state.frame_start.take() {
            state.last_frame_time = end.duration_since(start);
            state.frame_count += 1;
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.state.lock().frame_count
    }

    pub fn last_frame_time(&self) -> Duration {
        self.state.lock().last_frame_time
    }

    /// Statistics for the region with the given name, if it has been begun.
    pub fn profile(&self, name: &str) -> Option<ProfileData> {
        self.state.lock().profiles.get(name).cloned()
    }

    /// Statistics for all regions, in order of decreasing total time.
    pub fn sorted_profiles(&self) -> Vec<ProfileData> {
        self.state.lock().sorted_profiles()
    }

    /// Logs a table of all regions at debug level.
    pub fn log_summary(&self) {
        super::report::log_summary(&self.state());
    }

    /// Logs all statistics for every region at trace level.
    pub fn log_detailed_report(&self) {
        super::report::log_detailed_report(&self.state());
    }

    pub(super) fn state(&self) -> MutexGuard<'_, ProfilerState> {
        self.state.lock()
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ProfilerState {
    pub(super) fn sorted_profiles(&self) -> Vec<ProfileData> {
        let mut profiles: Vec<_> = self.profiles.values().cloned().collect();
        profiles.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
        profiles
    }
}

impl ProfileData {
    pub fn new(name: String, location: &'static Location<'static>, depth: u64) -> Self {
        Self {
            name,
            total: Duration::ZERO,
            min: Duration::MAX,
            max: Duration::ZERO,
            call_count: 0,
            depth,
            location,
        }
    }

    pub fn add_sample(&mut self, sample: Duration) {
        self.total += sample;
        self.min = self.min.min(sample);
        self.max = self.max.max(sample);
        self.call_count += 1;
    }

    pub fn total_time_ms(&self) -> f64 {
        duration_ms(self.total)
    }

    /// Zero if there are no samples.
    pub fn average_time_ms(&self) -> f64 {
        if self.call_count == 0 {
            return 0.0;
        }
        self.total_time_ms() / self.call_count as f64
    }

    /// Zero if there are no samples.
    pub fn min_time_ms(&self) -> f64 {
        if self.call_count == 0 {
            return 0.0;
        }
        duration_ms(self.min)
    }

    pub fn max_time_ms(&self) -> f64 {
        duration_ms(self.max)
    }
}

impl<'a> ScopedTimer<'a> {
    /// Begins the region with the given name. Nothing is recorded if the
    /// profiler is disabled at this point.
    #[track_caller]
    pub fn new(profiler: &'a Profiler, name: &'a str) -> Self {
        let active = profiler.enabled();
        if active {
            profiler.begin_profile(name);
        }
        Self {
            profiler,
            name,
            active,
        }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        if self.active {
            self.profiler.end_profile(self.name);
        }
    }
}

fn duration_ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1e3
}
