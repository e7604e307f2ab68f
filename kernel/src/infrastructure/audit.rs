use serde::Serialize;
use tracing::{info, info_span};

/// Review decision recorded on the audit channel.
#[derive(Debug, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// A replay script began executing.
    ReplayStarted {
        /// Script path or label.
        source: String,
        /// Number of steps in the script.
        steps: usize,
    },
    /// A single pending change was accepted.
    ChangeAccepted {
        /// Change id.
        id: String,
        /// Author id of the change.
        author: String,
    },
    /// A single pending change was rejected and reverted.
    ChangeRejected {
        /// Change id.
        id: String,
        /// Author id of the change.
        author: String,
    },
    /// Every pending change was accepted at once.
    BulkAccepted {
        /// Number of changes accepted.
        count: usize,
    },
    /// Every pending change was rejected at once.
    BulkRejected {
        /// Number of changes reverted.
        count: usize,
    },
}

/// Logs an audit event to the `audit` target as structured JSON.
pub fn log_audit(event: &AuditEvent) {
    let span = info_span!(target: "audit", "audit_event");
    let _enter = span.enter();

    let json = serde_json::to_string(event).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"));
    info!(target: "audit", audit_json = %json, "Review audit event");
}
