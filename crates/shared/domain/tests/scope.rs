use appwire_domain::scope::ScopeKind;

#[test]
fn scope_kinds_render_as_snake_case() {
    assert_eq!(ScopeKind::Request.to_string(), "request");
    assert_eq!(ScopeKind::Task.to_string(), "task");
    assert_eq!(ScopeKind::Custom("websocket".into()).to_string(), "websocket");
}

#[test]
fn scope_kind_serde_matches_display() {
    let raw = serde_json::to_string(&ScopeKind::Request).expect("serialize");
    assert_eq!(raw, "\"request\"");

    let kind: ScopeKind = serde_json::from_str("\"task\"").expect("deserialize");
    assert_eq!(kind, ScopeKind::Task);
}
