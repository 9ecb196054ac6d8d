//! Unit tests for the snapshot translation driver.

use std::sync::atomic::{AtomicUsize, Ordering};

use cap_std::{ambient_authority, fs::Dir};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;
use crate::error::{EntityKind, SnapshotError, TranslationError};

struct ScratchDir {
    path: Utf8PathBuf,
}

impl ScratchDir {
    fn file(&self, name: &str) -> Utf8PathBuf {
        self.path.join(name)
    }

    fn write(&self, name: &str, contents: &str) -> Utf8PathBuf {
        let dir = Dir::open_ambient_dir(&self.path, ambient_authority()).expect("open scratch");
        dir.write(name, contents).expect("write scratch file");
        self.file(name)
    }

    fn read(&self, name: &str) -> String {
        let dir = Dir::open_ambient_dir(&self.path, ambient_authority()).expect("open scratch");
        dir.read_to_string(name).expect("read scratch file")
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if let Ok(root) = Dir::open_ambient_dir(".", ambient_authority()) {
            drop(root.remove_dir_all(&self.path));
        }
    }
}

#[fixture]
fn scratch() -> ScratchDir {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let counter = COUNTER.fetch_add(1, Ordering::Relaxed);
    let path = Utf8PathBuf::from("target")
        .join("processflow-tests")
        .join(format!("translate-cli-{}-{counter}", std::process::id()));
    let root = Dir::open_ambient_dir(".", ambient_authority()).expect("open workspace dir");
    root.create_dir_all(&path).expect("create scratch dir");
    ScratchDir { path }
}

fn settings(pretty: bool) -> TranslateSettings {
    TranslateSettings {
        pretty: Some(pretty),
        seed_from_users: None,
        log_format: None,
    }
}

fn snapshot_json() -> String {
    json!({
        "users": [{
            "_id": "650c1f7e9d3b2a1c00f4a1b2",
            "username": "ana",
            "name": "Ana Souza",
            "email": "ana@example.com"
        }],
        "processes": [{
            "_id": "650c1f7e9d3b2a1c00f4a1d4",
            "title": "Onboarding",
            "responsible": "650c1f7e9d3b2a1c00f4a1b2"
        }],
        "tasks": []
    })
    .to_string()
}

#[rstest]
fn run_returns_rendered_snapshot_without_output(scratch: ScratchDir) {
    let input = scratch.write("snapshot.json", &snapshot_json());
    let request = TranslateRequest {
        input,
        output: None,
    };

    let translation = run(&request, &settings(false)).expect("translate");

    assert_eq!(
        translation.summary,
        Summary {
            users: 1,
            processes: 1,
            tasks: 0,
        }
    );
    let rendered: Value = serde_json::from_str(&translation.rendered).expect("valid json");
    assert_eq!(
        rendered.pointer("/processos/0/responsavelId"),
        Some(&json!(32_178))
    );
}

#[rstest]
fn run_writes_output_file(scratch: ScratchDir) {
    let input = scratch.write("snapshot.json", &snapshot_json());
    let output = scratch.file("dashboard.json");
    let request = TranslateRequest {
        input,
        output: Some(output),
    };

    let translation = run(&request, &settings(true)).expect("translate");

    assert_eq!(scratch.read("dashboard.json"), translation.rendered);
    assert!(translation.rendered.contains('\n'));
}

#[rstest]
fn run_reports_missing_input(scratch: ScratchDir) {
    let input = scratch.file("absent.json");
    let request = TranslateRequest {
        input: input.clone(),
        output: None,
    };

    let err = run(&request, &settings(false)).expect_err("missing input");

    assert!(matches!(err, CliError::Read { path, .. } if path == input));
}

#[rstest]
fn run_reports_unparseable_input(scratch: ScratchDir) {
    let input = scratch.write("snapshot.json", "{\"users\": 3}");
    let request = TranslateRequest {
        input,
        output: None,
    };

    let err = run(&request, &settings(false)).expect_err("bad snapshot");

    assert!(matches!(err, CliError::Parse { .. }));
}

#[rstest]
fn run_reports_failing_record(scratch: ScratchDir) {
    let input = scratch.write(
        "snapshot.json",
        &json!({"tasks": [{"_id": "650c1f7e9d3b2a1c00f4a1e5", "status": "ARQUIVADA", "title": "x"}]})
            .to_string(),
    );
    let output = scratch.file("dashboard.json");
    let request = TranslateRequest {
        input,
        output: Some(output.clone()),
    };

    let err = run(&request, &settings(false)).expect_err("unknown status");

    assert_eq!(
        err,
        CliError::Snapshot {
            source: SnapshotError {
                collection: "tasks",
                index: 0,
                source: TranslationError::UnknownStatus {
                    entity: EntityKind::Task,
                    value: "ARQUIVADA".to_owned(),
                },
            },
        }
    );
    assert!(!output.exists());
}

#[test]
fn summary_formats_counts() {
    let summary = Summary {
        users: 2,
        processes: 1,
        tasks: 5,
    };
    assert_eq!(
        summary.to_string(),
        "Translated 2 users, 1 processes, 5 tasks"
    );
}
