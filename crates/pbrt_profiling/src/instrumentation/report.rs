//! Log output of profiling statistics.

use super::profiler::ProfilerState;

const REPORT_WIDTH: usize = 92;

/// Pads the title with `=` on both sides to fill the report width.
fn centered_title(title: &str) -> String {
    let title = format!(" {title} ");
    let padding = REPORT_WIDTH.saturating_sub(title.chars().count());
    let left = padding / 2;
    format!("{}{title}{}", "=".repeat(left), "=".repeat(padding - left))
}

pub(super) fn summary_lines(state: &ProfilerState) -> Vec<String> {
    let profiles = state.sorted_profiles();
    let mut lines = vec![
        centered_title(&format!("PROFILER SUMMARY ({} profiles)", profiles.len())),
        format!(
            "{:<30} | {:>10} {:>14} {:>14} {:>14}",
            "Name", "Calls", "Total (ms)", "Avg (ms)", "Max (ms)"
        ),
        "-".repeat(REPORT_WIDTH),
    ];

    lines.extend(profiles.iter().map(|profile| {
        format!(
            "{:<30} | {:>10} {:>14.3} {:>14.3} {:>14.3}",
            profile.name,
            profile.call_count,
            profile.total_time_ms(),
            profile.average_time_ms(),
            profile.max_time_ms()
        )
    }));

    if state.frame_count > 0 {
        lines.push("-".repeat(REPORT_WIDTH));
        lines.push("Frame Stats:".to_owned());
        lines.push(format!("  Frame Count: {}", state.frame_count));
        lines.push(format!(
            "  Last Frame Time: {:.3}ms",
            state.last_frame_time.as_secs_f64() * 1e3
        ));
        lines.push("=".repeat(REPORT_WIDTH));
    }
    lines
}

pub(super) fn detailed_report_lines(state: &ProfilerState) -> Vec<String> {
    let mut lines = vec![centered_title("Detailed Profiling Report")];
    for profile in state.sorted_profiles() {
        lines.push(format!("Profile: {}", profile.name));
        lines.push(format!(
            "  Location: {}:{}",
            profile.location.file(),
            profile.location.line()
        ));
        lines.push(format!("  Depth: {}", profile.depth));
        lines.push(format!("  Call Count: {}", profile.call_count));
        lines.push(format!("  Total Time: {:.6}ms", profile.total_time_ms()));
        lines.push(format!("  Average Time: {:.6}ms", profile.average_time_ms()));
        lines.push(format!("  Min Time: {:.6}ms", profile.min_time_ms()));
        lines.push(format!("  Max Time: {:.6}ms", profile.max_time_ms()));
        lines.push(String::new());
    }
    lines
}

pub(super) fn log_summary(state: &ProfilerState) {
    if !log::log_enabled!(log::Level::Debug) {
        return;
    }
    for line in summary_lines(state) {
        log::debug!("{line}");
    }
}

pub(super) fn log_detailed_report(state: &ProfilerState) {
    if !log::log_enabled!(log::Level::Trace) {
        return;
    }
    for line in detailed_report_lines(state) {
        log::trace!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Profiler;
    use std::time::Duration;

    #[test]
    fn titles_are_centered_in_report_width() {
        let title = centered_title("PROFILER SUMMARY (3 profiles)");
        assert_eq!(title.len(), REPORT_WIDTH);
        assert_eq!(title.find(" PROFILER"), Some(30));
        assert!(title.ends_with(&format!("profiles) {}", "=".repeat(31))));

        let title = centered_title("Detailed Profiling Report");
        assert_eq!(title.len(), REPORT_WIDTH);
        assert_eq!(title.find(" Detailed"), Some(32));
        assert!(title.ends_with(&format!("Report {}", "=".repeat(33))));
    }

    #[test]
    fn summary_lists_profiles_by_decreasing_total() {
        let profiler = Profiler::default();
        profiler.time("short", || {});
        profiler.time("long", || std::thread::sleep(Duration::from_millis(10)));

        let lines = summary_lines(&profiler.state());
        assert_eq!(lines[0].len(), REPORT_WIDTH);
        assert!(lines[0].contains("PROFILER SUMMARY (2 profiles)"));
        assert!(lines[1].starts_with("Name"));
        assert!(lines[3].starts_with("long "));
        assert!(lines[4].starts_with("short "));
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn summary_includes_frame_stats_when_frames_were_recorded() {
        let profiler = Profiler::default();
        profiler.begin_frame();
        profiler.end_frame();

        let lines = summary_lines(&profiler.state());
        assert!(lines.iter().any(|line| line == "  Frame Count: 1"));
        assert_eq!(lines.last().unwrap(), &"=".repeat(REPORT_WIDTH));
    }

    #[test]
    fn detailed_report_has_block_per_profile() {
        let profiler = Profiler::default();
        profiler.time("a", || {});
        profiler.time("b", || {});
        let lines = detailed_report_lines(&profiler.state());
        assert_eq!(lines.len(), 1 + 2 * 9);
        assert!(lines.iter().any(|line| line == "Profile: a"));
        assert!(lines.iter().any(|line| line == "  Call Count: 1"));

        profiler.log_summary();
        profiler.log_detailed_report();
    }
}
