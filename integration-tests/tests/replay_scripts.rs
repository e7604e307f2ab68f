//! Edit scripts replayed through the kernel.

use revise_engine::{ChangeKind, TrackingConfig};
use revise_kernel::script::{Finish, ReplayScript, replay};
use serde_json::json;

fn script(value: serde_json::Value) -> ReplayScript {
    serde_json::from_value(value).unwrap()
}

fn typing(at: usize, text: &str) -> Vec<serde_json::Value> {
    text.chars()
        .enumerate()
        .flat_map(|(i, ch)| {
            [
                json!({ "action": "edit", "from": at + i, "to": at + i, "insert": ch.to_string() }),
                json!({ "action": "wait", "ms": 120 }),
            ]
        })
        .collect()
}

#[test]
fn test_review_session_with_agent_suggestions() {
    let mut steps = typing(0, "Dear team, ");
    steps.push(json!({ "action": "wait", "ms": 10_000 }));
    steps.push(json!({
        "action": "edit", "from": 22, "to": 28, "insert": "Thursday",
        "author": { "id": "assistant", "name": "Assistant", "kind": "Agent" }
    }));
    steps.push(json!({ "action": "accept", "index": 0 }));

    let outcome = replay(
        &script(json!({
            "document": "We meet on Monday.",
            "author": { "id": "ada", "name": "Ada" },
            "steps": steps,
        })),
        &TrackingConfig::default(),
        Finish::None,
    )
    .unwrap();

    assert_eq!(outcome.document, "Dear team, We meet on Thursday.");
    assert_eq!(outcome.pending.len(), 1);
    assert_eq!(outcome.pending[0].kind, ChangeKind::Replacement);
    assert_eq!(outcome.pending[0].deleted(), "Monday");
    assert!(outcome.patches.is_empty());
}

#[test]
fn test_reject_all_after_mixed_edits() {
    let mut steps = typing(5, " there");
    steps.extend([
        json!({ "action": "wait", "ms": 5_000 }),
        json!({ "action": "edit", "from": 0, "to": 1, "insert": "J" }),
        json!({ "action": "wait", "ms": 5_000 }),
        json!({ "action": "edit", "from": 12, "to": 17 }),
        json!({ "action": "set_enabled", "enabled": false }),
        json!({ "action": "edit", "from": 0, "to": 0, "insert": ">> " }),
    ]);
    let outcome = replay(
        &script(json!({
            "document": "Hello world, friend.",
            "author": { "id": "ada", "name": "Ada" },
            "start_ms": 1_700_000_000_000_i64,
            "steps": steps,
        })),
        &TrackingConfig::default(),
        Finish::RejectAll,
    )
    .unwrap();

    assert_eq!(outcome.document, ">> Hello world, friend.");
    assert!(outcome.pending.is_empty());
    assert_eq!(outcome.patches.len(), 1);
}

#[test]
fn test_coalescing_window_follows_config() {
    let steps = typing(0, "abc");
    let doc = json!({
        "document": "",
        "author": { "id": "ada", "name": "Ada" },
        "steps": steps,
    });

    let merged = replay(&script(doc.clone()), &TrackingConfig::default(), Finish::None).unwrap();
    assert_eq!(merged.pending.len(), 1);

    let strict = TrackingConfig {
        coalesce_window_ms: 100,
        ..TrackingConfig::default()
    };
    let separate = replay(&script(doc), &strict, Finish::None).unwrap();
    assert_eq!(separate.pending.len(), 3);
    assert_eq!(separate.document, "abc");
}

#[test]
fn test_review_of_unknown_index_names_the_step() {
    let err = replay(
        &script(json!({
            "document": "text",
            "author": { "id": "ada", "name": "Ada" },
            "steps": [
                { "action": "edit", "from": 0, "to": 0, "insert": "A " },
                { "action": "reject", "index": 3 },
            ],
        })),
        &TrackingConfig::default(),
        Finish::None,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "Step 1 failed");
}

#[test]
fn test_blank_author_is_rejected() {
    let result = replay(
        &script(json!({
            "document": "text",
            "author": { "id": "  ", "name": "Nobody" },
            "steps": [],
        })),
        &TrackingConfig::default(),
        Finish::None,
    );
    assert!(result.is_err());
}
