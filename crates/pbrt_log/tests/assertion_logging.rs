use parking_lot::Mutex;
use pbrt_log::{LogLevel, LogRecord, init_callback_logger, pbrt_assert, pbrt_assert_msg};
use std::sync::Arc;

#[test]
fn failed_assertion_is_logged_as_critical() {
    let records: Arc<Mutex<Vec<LogRecord>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&records);
    init_callback_logger(move |record| sink.lock().push(record.clone()), LogLevel::Info).unwrap();

    let axis = [0.0_f32, 0.0, 1.0];
    pbrt_assert_msg!(axis[2] > 0.5, "axis {:?} is degenerate", axis);
    assert!(records.lock().is_empty());

    let denominator = 0.0_f32;
    let result = std::panic::catch_unwind(|| {
        pbrt_assert!(denominator != 0.0);
    });

    let records = records.lock();
    if cfg!(debug_assertions) {
        assert!(result.is_err());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, LogLevel::Critical);
        let expected_prefix = format!("Assertion failed: denominator != 0.0 ({}:", file!());
        assert!(records[0].message.starts_with(&expected_prefix));
    } else {
        assert!(result.is_ok());
        assert!(records.is_empty());
    }
}
