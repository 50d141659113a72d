//! Desktop notification shim. macOS only; silently a no-op elsewhere.

#[cfg(target_os = "macos")]
fn send(title: &str, body: &str) {
    use std::process::Command;

    let script = format!(
        r#"display notification "{}" with title "{}""#,
        body.replace('"', "\\\""),
        title
    );
    let _ = Command::new("osascript").arg("-e").arg(&script).output();
}

#[cfg(not(target_os = "macos"))]
fn send(_title: &str, _body: &str) {}

/// Fired when the active task is completed
pub fn notify_task_done(task_name: &str) {
    send("Study HQ - Task Completed", task_name);
}

/// Fired once when the session crosses the task's estimate
pub fn notify_estimate_reached(task_name: &str) {
    send("Study HQ - Estimate Reached", &format!("⏰ {}", task_name));
}
