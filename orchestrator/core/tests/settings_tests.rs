// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

use arcswarm_core::{ConfigError, Scorecard, Settings, SwarmConfig};
use serde_json::json;
use std::io::Write;

#[test]
fn test_settings_file_round_trip_through_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "scheme: http\nhost: localhost\nport: 8001\napi_key: secret\nrecordings_dir: /tmp/recs\ndefault_tags: [ci]"
    )
    .unwrap();

    let settings = Settings::load_or_default(Some(file.path().to_path_buf())).unwrap();
    assert_eq!(settings.api_key.is_empty(), std::env::var("ARC_API_KEY").is_ok_and(|k| k.is_empty()));
    assert_eq!(settings.default_tags, vec!["ci"]);

    let mut pinned = Settings::from_yaml_file(file.path()).unwrap();
    pinned.apply_overrides_from(|_| None);
    assert_eq!(pinned.root_url(), "http://localhost:8001");
    assert_eq!(pinned.recordings_dir, std::path::PathBuf::from("/tmp/recs"));
}

#[test]
fn test_malformed_settings_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "port: [not a port").unwrap();

    assert!(matches!(
        Settings::from_yaml_file(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_swarm_config_from_settings() {
    let settings = Settings::from_yaml_str("scheme: http\nhost: localhost\nport: 8001\n").unwrap();
    let config = SwarmConfig::new("random", settings.root_url(), vec!["ls20".into(), "ft09".into()])
        .with_count(5);

    config.validate().unwrap();
    assert_eq!(config.assignments(), vec!["ls20", "ft09", "ls20", "ft09", "ls20"]);
    assert_eq!(
        config.scorecard_url("abc"),
        "http://localhost:8001/scorecards/abc"
    );
}

#[test]
fn test_close_response_parses_into_report() {
    let body = json!({
        "card_id": "8bb3b1b8-4b46-4a29-a13b-ad7850a0f916",
        "source_url": null,
        "tags": ["agent", "random"],
        "won": 1,
        "played": 2,
        "cards": {
            "ls20-016295f7601e": {
                "game_id": "ls20-016295f7601e",
                "total_plays": 1,
                "guids": ["g-1"],
                "scores": [3],
                "states": ["WIN"],
                "actions": [42],
                "resets": [1]
            },
            "ft09-b8377d4b7815": {
                "game_id": "ft09-b8377d4b7815",
                "total_plays": 1,
                "scores": [0],
                "states": ["GAME_OVER"],
                "actions": [80]
            }
        }
    });

    let report: Scorecard = serde_json::from_value(body).unwrap();
    assert_eq!(report.played(), 2);
    assert_eq!(report.won(), 1);
    assert_eq!(report.total_actions(), 122);
    assert_eq!(report.score(), 3);
    assert_eq!(report.extra.get("won"), Some(&json!(1)));

    let rendered = serde_json::to_value(&report).unwrap();
    assert_eq!(rendered["played"], 2);
    assert_eq!(rendered["cards"]["ls20-016295f7601e"]["actions"], json!([42]));
}
