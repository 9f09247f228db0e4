pub mod mortgage;
pub mod paydown;
pub mod refinance;
pub mod schedule;

use serde_json::Value;

/// Drop the per-period schedule from each summary under `result`, keeping
/// table and CSV output readable unless `--show-schedule` was given.
pub fn strip_schedules(value: &mut Value, summaries: &[&str]) {
    let Some(result) = value.get_mut("result") else {
        return;
    };
    for key in summaries {
        if let Some(Value::Object(summary)) = result.get_mut(*key) {
            summary.remove("schedule");
        }
    }
}
