use gauntlet::server::routes::route_request;

#[test]
fn health_endpoint_returns_ok_json() {
    let response = route_request("GET", "/api/health", "");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "application/json");
    assert!(response.body.contains("\"status\": \"ok\""));
    assert!(response.body.contains("gauntlet-api"));
}

#[test]
fn unknown_route_returns_404() {
    let response = route_request("GET", "/api/nope", "");
    assert_eq!(response.status_code, 404);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("error body should be valid json");
    assert_eq!(payload["status"], "error");
}

#[test]
fn wrong_method_is_not_routed() {
    let response = route_request("POST", "/api/health", "");
    assert_eq!(response.status_code, 404);
}

#[test]
fn turn_endpoint_rejects_malformed_json() {
    let response = route_request("POST", "/api/turn", "this is not json");
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("Invalid request body"));
}

#[test]
fn turn_endpoint_rejects_invalid_actions() {
    let body = r#"{
        "player": {"stats": {"hp": 100, "vitality": 1, "sp": 5, "maxSp": 10}},
        "enemy": {"stats": {"hp": 100, "vitality": 1, "sp": 5, "maxSp": 10}},
        "selectedCards": [0],
        "action": "play",
        "seed": 1
    }"#;
    let response = route_request("POST", "/api/turn", body);
    assert_eq!(response.status_code, 400);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("error body should be valid json");
    assert_eq!(payload["status"], "error");
}

#[test]
fn turn_endpoint_resolves_a_seed_request() {
    let body = r#"{
        "player": {
            "stats": {"hp": 100, "vitality": 1, "sp": 5, "maxSp": 10},
            "deck": [
                {"name": "A"}, {"name": "B"}, {"name": "C"},
                {"name": "D"}, {"name": "E"}, {"name": "F"}
            ]
        },
        "enemy": {"stats": {"hp": 100, "vitality": 1, "sp": 5, "maxSp": 10}},
        "bootstrap": true,
        "seed": 5
    }"#;
    let response = route_request("POST", "/api/turn", body);
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("turn result should be valid json");
    assert_eq!(payload["seed"], 5);
    assert_eq!(
        payload["player"]["hand"].as_array().map(Vec::len),
        Some(5),
        "bootstrap should deal a full hand"
    );
    assert!(payload["message"].as_str().is_some());
    assert!(payload.get("outcome").is_none(), "no outcome on a fresh battle");
}

#[test]
fn turn_endpoint_resolves_a_play_and_reports_events() {
    let body = r#"{
        "player": {
            "stats": {"hp": 500, "vitality": 5, "sp": 5, "maxSp": 10,
                      "attackPower": 10, "physicalPower": 8, "durability": 4, "speed": 50},
            "hand": [{"name": "Strike", "spCost": 3, "potency": 5, "types": ["physical"]}]
        },
        "enemy": {
            "stats": {"hp": 500, "vitality": 5, "sp": 5, "maxSp": 10,
                      "attackPower": 10, "physicalPower": 8, "durability": 4, "speed": 50}
        },
        "selectedCards": [0],
        "action": "play",
        "seed": 3
    }"#;
    let response = route_request("POST", "/api/turn", body);
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("turn result should be valid json");
    assert_eq!(payload["enemy"]["stats"]["hp"], 386.0);
    let events = payload["events"].as_array().expect("events array");
    assert!(events
        .iter()
        .any(|e| e["event"] == "damageDealt" && e["side"] == "player"));
}
