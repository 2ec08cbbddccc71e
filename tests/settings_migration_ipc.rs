
use serde_json::json;
use test_support::{request_ok, spawn_sidecar, temp_dir};

/// Plants a pre-migration store: a settings document still carrying the
/// scalar `maxGrade`, written the way the legacy application left it.
fn seed_legacy_store(workspace: &std::path::Path) {
    let conn = rusqlite::Connection::open(workspace.join("muallim.sqlite3")).expect("open db");
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv_store(key TEXT PRIMARY KEY, value TEXT NOT NULL)",
        [],
    )
    .expect("create table");
    conn.execute(
        "INSERT INTO kv_store(key, value) VALUES(?, ?)",
        (
            "muallim-settings",
            r#"{"teacherName":"أ. محمد","schoolName":"مدرستي","maxGrade":8}"#,
        ),
    )
    .expect("seed settings");
    conn.execute(
        "INSERT INTO kv_store(key, value) VALUES(?, ?)",
        ("muallim-dark-mode", "\"true\""),
    )
    .expect("seed dark mode");
}

#[test]
fn legacy_max_grade_is_migrated_on_load_and_written_back() {
    let workspace = temp_dir("muallim-migration");
    seed_legacy_store(&workspace);

    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let got = request_ok(&mut stdin, &mut reader, "2", "settings.get", json!({}));
    assert_eq!(got.get("darkMode").and_then(|v| v.as_bool()), Some(true));
    let settings = got.get("settings").cloned().expect("settings");
    assert_eq!(
        settings.get("teacherName").and_then(|v| v.as_str()),
        Some("أ. محمد")
    );
    assert!(settings.get("maxGrade").is_none());
    assert_eq!(
        settings.get("maxGrades"),
        Some(&json!({ "participation": 8, "homework": 8, "activity": 8, "quiz": 8 }))
    );

    // The migrated document was persisted, not just loaded.
    let conn = rusqlite::Connection::open(workspace.join("muallim.sqlite3")).expect("open db");
    let stored: String = conn
        .query_row(
            "SELECT value FROM kv_store WHERE key = 'muallim-settings'",
            [],
            |r| r.get(0),
        )
        .expect("stored settings");
    let stored: serde_json::Value = serde_json::from_str(&stored).expect("parse stored");
    assert!(stored.get("maxGrade").is_none());
    assert!(stored.get("maxGrades").is_some());

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn set_max_grade_changes_one_category_only() {
    let workspace = temp_dir("muallim-max-grade");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let set = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "settings.setMaxGrade",
        json!({ "category": "quiz", "value": 4 }),
    );
    assert_eq!(
        set.get("maxGrades"),
        Some(&json!({ "participation": 10, "homework": 10, "activity": 10, "quiz": 4 }))
    );

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn settings_and_dark_mode_survive_a_restart() {
    let workspace = temp_dir("muallim-settings-restart");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "settings.update",
        json!({ "patch": { "teacherName": "أ. سلمى", "themeColor": "rose" } }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "settings.setDarkMode",
        json!({ "enabled": true }),
    );

    drop(stdin);
    let (_child2, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let got = request_ok(&mut stdin, &mut reader, "5", "settings.get", json!({}));
    assert_eq!(got.get("darkMode").and_then(|v| v.as_bool()), Some(true));
    let settings = got.get("settings").cloned().expect("settings");
    assert_eq!(
        settings.get("teacherName").and_then(|v| v.as_str()),
        Some("أ. سلمى")
    );
    assert_eq!(
        settings.get("themeColor").and_then(|v| v.as_str()),
        Some("rose")
    );
    // Untouched fields keep their defaults through the merge.
    assert_eq!(
        settings.get("voiceEnabled").and_then(|v| v.as_bool()),
        Some(true)
    );

    let _ = std::fs::remove_dir_all(workspace);
}
