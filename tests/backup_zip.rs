
use serde_json::json;
use test_support::{request_err, request_ok, spawn_sidecar, temp_dir};

#[test]
fn a_bundle_carries_the_whole_workspace_between_stores() {
    let source = temp_dir("muallim-export-src");
    let target = temp_dir("muallim-export-dst");
    let bundle = source.join("class-backup.zip");

    let (_child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "1",
        "workspace.select",
        json!({ "path": source.to_string_lossy() }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "2",
        "classes.create",
        json!({ "name": "Grade 5" }),
    );
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "3",
        "settings.setDarkMode",
        json!({ "enabled": true }),
    );

    let exported = request_ok(
        &mut stdin,
        &mut reader,
        "4",
        "backup.export",
        json!({ "outPath": bundle.to_string_lossy() }),
    );
    assert_eq!(
        exported.get("bundleFormat").and_then(|v| v.as_str()),
        Some("muallim-workspace-v1")
    );
    assert_eq!(exported.get("entryCount").and_then(|v| v.as_u64()), Some(3));
    assert_eq!(
        exported
            .get("dbSha256")
            .and_then(|v| v.as_str())
            .map(str::len),
        Some(64)
    );
    assert!(bundle.is_file());

    // Import into a different workspace replaces its store wholesale.
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "5",
        "workspace.select",
        json!({ "path": target.to_string_lossy() }),
    );
    let imported = request_ok(
        &mut stdin,
        &mut reader,
        "6",
        "backup.import",
        json!({ "inPath": bundle.to_string_lossy() }),
    );
    assert_eq!(
        imported.get("bundleFormatDetected").and_then(|v| v.as_str()),
        Some("muallim-workspace-v1")
    );

    let listed = request_ok(&mut stdin, &mut reader, "7", "classes.list", json!({}));
    let names: Vec<&str> = listed
        .get("classes")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|c| c.get("name").and_then(|v| v.as_str()))
                .collect()
        })
        .unwrap_or_default();
    assert_eq!(names.len(), 3);
    assert!(names.contains(&"Grade 5"));

    let got = request_ok(&mut stdin, &mut reader, "8", "settings.get", json!({}));
    assert_eq!(got.get("darkMode").and_then(|v| v.as_bool()), Some(true));

    let _ = std::fs::remove_dir_all(source);
    let _ = std::fs::remove_dir_all(target);
}

#[test]
fn a_corrupt_bundle_is_refused_and_the_session_survives() {
    let workspace = temp_dir("muallim-import-bad");
    let garbage = workspace.join("not-a-bundle.zip");
    std::fs::write(&garbage, b"these are not the bytes you are looking for").expect("write file");

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
        "classes.create",
        json!({ "name": "Grade 7" }),
    );

    let code = request_err(
        &mut stdin,
        &mut reader,
        "3",
        "backup.import",
        json!({ "inPath": garbage.to_string_lossy() }),
    );
    assert_eq!(code, "import_failed");

    // The previous store is untouched and the session keeps working.
    let listed = request_ok(&mut stdin, &mut reader, "4", "classes.list", json!({}));
    let names: Vec<&str> = listed
        .get("classes")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|c| c.get("name").and_then(|v| v.as_str()))
                .collect()
        })
        .unwrap_or_default();
    assert!(names.contains(&"Grade 7"));

    // A zip whose payload digest disagrees with its manifest is refused too.
    let forged = workspace.join("forged.zip");
    {
        use std::io::Write;
        let file = std::fs::File::create(&forged).expect("create forged bundle");
        let mut zip = zip::ZipWriter::new(file);
        let opts = zip::write::FileOptions::default();
        zip.start_file("manifest.json", opts).expect("manifest entry");
        zip.write_all(
            br#"{"format":"muallim-workspace-v1","version":1,"dbSha256":"00"}"#,
        )
        .expect("write manifest");
        zip.start_file("db/muallim.sqlite3", opts).expect("db entry");
        zip.write_all(b"pretend database").expect("write db");
        zip.finish().expect("finish zip");
    }
    let code = request_err(
        &mut stdin,
        &mut reader,
        "5",
        "backup.import",
        json!({ "inPath": forged.to_string_lossy() }),
    );
    assert_eq!(code, "import_failed");

    let _ = std::fs::remove_dir_all(workspace);
}