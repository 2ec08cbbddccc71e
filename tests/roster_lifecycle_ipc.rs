
use serde_json::json;
use test_support::{request_ok, spawn_sidecar, temp_dir};

#[test]
fn fresh_workspace_starts_with_the_seed_roster() {
    let workspace = temp_dir("muallim-seed");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let listed = request_ok(&mut stdin, &mut reader, "2", "classes.list", json!({}));
    let classes = listed.get("classes").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    assert_eq!(classes.len(), 2);
    let counts: Vec<u64> = classes
        .iter()
        .filter_map(|c| c.get("studentCount").and_then(|v| v.as_u64()))
        .collect();
    assert_eq!(counts, vec![3, 2]);

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn create_import_delete_and_survive_a_restart() {
    let workspace = temp_dir("muallim-roster");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    // Whitespace-only names are accepted and ignored.
    let rejected = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "classes.create",
        json!({ "name": "   " }),
    );
    assert_eq!(rejected.get("changed").and_then(|v| v.as_bool()), Some(false));

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "classes.create",
        json!({ "name": "Grade 5" }),
    );
    let class_id = created
        .get("classId")
        .and_then(|v| v.as_str())
        .expect("classId")
        .to_string();

    let imported = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.import",
        json!({ "classId": class_id, "text": "Ali\n\nBasil\r\nCarol\n" }),
    );
    assert_eq!(imported.get("added").and_then(|v| v.as_u64()), Some(3));

    let snapshot = request_ok(&mut stdin, &mut reader, "5", "state.snapshot", json!({}));
    let class = snapshot
        .get("classes")
        .and_then(|v| v.as_array())
        .and_then(|arr| {
            arr.iter()
                .find(|c| c.get("id").and_then(|v| v.as_str()) == Some(class_id.as_str()))
        })
        .cloned()
        .expect("imported class in snapshot");
    let names: Vec<String> = class
        .get("students")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|s| s.get("name").and_then(|v| v.as_str()))
                .map(|s| s.to_string())
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(names, vec!["Ali", "Basil", "Carol"]);

    // A fresh process sees the same roster: every change was persisted.
    drop(stdin);
    let (_child2, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    let listed = request_ok(&mut stdin, &mut reader, "7", "classes.list", json!({}));
    let classes = listed.get("classes").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    assert_eq!(classes.len(), 3);

    // Deleting the class removes its students with it; no orphan remains.
    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "8",
        "classes.delete",
        json!({ "classId": class_id }),
    );
    assert_eq!(deleted.get("changed").and_then(|v| v.as_bool()), Some(true));

    let snapshot = request_ok(&mut stdin, &mut reader, "9", "state.snapshot", json!({}));
    let remaining = snapshot.get("classes").and_then(|v| v.as_array()).cloned().unwrap_or_default();
    assert!(remaining
        .iter()
        .all(|c| c.get("id").and_then(|v| v.as_str()) != Some(class_id.as_str())));

    // Deleting again is a no-op.
    let deleted = request_ok(
        &mut stdin,
        &mut reader,
        "10",
        "classes.delete",
        json!({ "classId": class_id }),
    );
    assert_eq!(deleted.get("changed").and_then(|v| v.as_bool()), Some(false));

    let _ = std::fs::remove_dir_all(workspace);
}

#[test]
fn update_student_replaces_the_whole_record() {
    let workspace = temp_dir("muallim-student-update");
    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );

    let created = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "classes.create",
        json!({ "name": "Grade 6" }),
    );
    let class_id = created.get("classId").and_then(|v| v.as_str()).expect("classId").to_string();
    let added = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "students.add",
        json!({ "classId": class_id, "name": "Omar" }),
    );
    let student_id = added.get("studentId").and_then(|v| v.as_str()).expect("studentId").to_string();

    let updated = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "students.update",
        json!({
            "classId": class_id,
            "student": {
                "id": student_id,
                "name": "Omar K.",
                "notes": "moved to front row",
                "attendance": {},
                "participationScore": 2,
                "homeworkScore": 0,
                "activityScore": 0,
                "quizScore": 0
            }
        }),
    );
    assert_eq!(updated.get("changed").and_then(|v| v.as_bool()), Some(true));

    // Unknown student id is a no-op.
    let missed = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "students.update",
        json!({
            "classId": class_id,
            "student": { "id": "ghost", "name": "Nobody", "priority": null }
        }),
    );
    assert_eq!(missed.get("changed").and_then(|v| v.as_bool()), Some(false));

    let snapshot = request_ok(&mut stdin, &mut reader, "6", "state.snapshot", json!({}));
    let student = snapshot
        .get("classes")
        .and_then(|v| v.as_array())
        .and_then(|arr| {
            arr.iter()
                .find(|c| c.get("id").and_then(|v| v.as_str()) == Some(class_id.as_str()))
        })
        .and_then(|c| c.get("students"))
        .and_then(|v| v.as_array())
        .and_then(|arr| arr.first())
        .cloned()
        .expect("student");
    assert_eq!(student.get("name").and_then(|v| v.as_str()), Some("Omar K."));
    assert_eq!(
        student.get("notes").and_then(|v| v.as_str()),
        Some("moved to front row")
    );
    assert_eq!(
        student.get("participationScore").and_then(|v| v.as_i64()),
        Some(2)
    );

    let _ = std::fs::remove_dir_all(workspace);
}
