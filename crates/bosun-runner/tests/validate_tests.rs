use std::path::Path;

use bosun_core::FailureReason;
use bosun_runner::{read_raw_log, Validator};
use tempfile::tempdir;

fn write_raw(repo: &Path, lines: &[&str]) {
    let v = Validator::open(repo.to_path_buf()).unwrap();
    let path = v.cfg.raw_log_path(repo);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, lines.join("\n") + "\n").unwrap();
}

#[test]
fn full_pass_over_a_mixed_run() {
    let dir = tempdir().unwrap();
    write_raw(dir.path(), &[
        // clean positive READ
        r#"{"case_id":"read_ok","test_type":"POSITIVE","action_category":"READ","expected_action":"get_worklist","status_code":200,"execution_id":"ex-1","response":{"worklist":[{"id":1}]}}"#,
        // positive WRITE whose mutation never landed
        r#"{"case_id":"write_no_mutation","test_type":"POSITIVE","action_category":"WRITE","expected_action":"create_work_order","status_code":201,"execution_id":"ex-2","response":{},"db_proof":{"table":"work_orders","before_count":4,"after_count":4,"mutation_verified":false}}"#,
        // auth failure
        r#"{"case_id":"forbidden","test_type":"POSITIVE","action_category":"READ","expected_action":"get_worklist","status_code":403,"execution_id":"","response":{}}"#,
        // negative control, cleanly rejected, table untouched
        r#"{"case_id":"neg_clean","test_type":"NEGATIVE_CONTROL","action_category":"WRITE","expected_action":"create_work_order","status_code":400,"execution_id":"","response":{},"db_proof":{"table":"work_orders","before_count":5,"after_count":5,"mutation_verified":false}}"#,
    ]);

    let v = Validator::open(dir.path().to_path_buf()).unwrap();
    let run = v.run(None, None).unwrap();
    assert_eq!(run.summary.total, 4);
    assert_eq!(run.summary.passed, 2);
    assert_eq!(run.summary.failed, 2);
    assert_eq!(run.summary.by_reason[&FailureReason::NoDbMutation], 1);
    assert_eq!(run.summary.by_reason[&FailureReason::AuthFailed], 1);

    let validated = read_raw_log(&run.validated_log).unwrap();
    let by_id = |id: &str| validated.iter().find(|r| r.case_id.as_str() == id).unwrap();
    assert!(by_id("read_ok").verdict.passed);
    assert_eq!(by_id("read_ok").verdict.failure_reason, FailureReason::None);
    assert_eq!(by_id("write_no_mutation").verdict.failure_reason, FailureReason::NoDbMutation);
    assert!(by_id("write_no_mutation").verdict.gate_a_transport);
    assert!(by_id("write_no_mutation").verdict.gate_b_semantic);
    assert!(!by_id("forbidden").verdict.gate_a_transport);
    assert!(!by_id("forbidden").verdict.gate_b_semantic);
    assert!(by_id("neg_clean").verdict.passed);
}

#[test]
fn revalidation_is_byte_identical() {
    let dir = tempdir().unwrap();
    write_raw(dir.path(), &[
        r#"{"case_id":"c1","test_type":"POSITIVE","action_category":"READ","expected_action":"get_worklist","status_code":200,"execution_id":"ex-1","response":{"data":[1,2]}}"#,
        r#"{"case_id":"c2","test_type":"POSITIVE","action_category":"WRITE","expected_action":"create_work_order","status_code":500,"execution_id":"","response":{}}"#,
    ]);

    let v = Validator::open(dir.path().to_path_buf()).unwrap();
    let first = v.run(None, None).unwrap();
    let bytes_a = std::fs::read(&first.validated_log).unwrap();
    let second = v.run(None, None).unwrap();
    let bytes_b = std::fs::read(&second.validated_log).unwrap();
    assert_eq!(bytes_a, bytes_b);
}

#[test]
fn missing_raw_log_aborts_without_output() {
    let dir = tempdir().unwrap();
    let v = Validator::open(dir.path().to_path_buf()).unwrap();
    let err = v.run(None, None).unwrap_err();
    assert!(err.to_string().contains("results log not found"));
    assert!(!v.cfg.validated_log_path(dir.path()).exists());
}

#[test]
fn malformed_line_aborts_without_output() {
    let dir = tempdir().unwrap();
    write_raw(dir.path(), &[
        r#"{"case_id":"c1","test_type":"POSITIVE","action_category":"READ","expected_action":"a","status_code":200,"execution_id":"e","response":{"data":[1]}}"#,
        "{broken",
    ]);
    let v = Validator::open(dir.path().to_path_buf()).unwrap();
    let err = v.run(None, None).unwrap_err();
    assert!(err.to_string().contains(":2:"), "got: {}", err);
    assert!(!v.cfg.validated_log_path(dir.path()).exists());
}

#[test]
fn raw_log_is_never_mutated() {
    let dir = tempdir().unwrap();
    write_raw(dir.path(), &[
        r#"{"case_id":"c1","test_type":"POSITIVE","action_category":"READ","expected_action":"get_worklist","status_code":200,"execution_id":"ex-1","response":{"items":[1]}}"#,
    ]);
    let v = Validator::open(dir.path().to_path_buf()).unwrap();
    let raw_path = v.cfg.raw_log_path(dir.path());
    let before = std::fs::read(&raw_path).unwrap();
    v.run(None, None).unwrap();
    assert_eq!(std::fs::read(&raw_path).unwrap(), before);
}

#[test]
fn output_path_may_not_collide_with_input() {
    let dir = tempdir().unwrap();
    write_raw(dir.path(), &[
        r#"{"case_id":"c1","test_type":"POSITIVE","action_category":"READ","expected_action":"a","status_code":200,"execution_id":"e","response":{"data":[1]}}"#,
    ]);
    let v = Validator::open(dir.path().to_path_buf()).unwrap();
    let raw = v.cfg.raw_log_path(dir.path());
    assert!(v.run(Some(&raw), Some(&raw)).is_err());
}

#[test]
fn clean_removes_logs_and_artifacts() {
    let dir = tempdir().unwrap();
    write_raw(dir.path(), &[
        r#"{"case_id":"c1","test_type":"POSITIVE","action_category":"READ","expected_action":"a","status_code":200,"execution_id":"e","response":{"data":[1]}}"#,
    ]);
    let v = Validator::open(dir.path().to_path_buf()).unwrap();
    v.run(None, None).unwrap();

    use bosun_evidence::EvidenceStore;
    let store = v.evidence_store();
    store.save_artifact("c1", "request.json", b"{}").unwrap();

    v.clean().unwrap();
    assert!(!v.cfg.raw_log_path(dir.path()).exists());
    assert!(!v.cfg.validated_log_path(dir.path()).exists());
    assert!(!store.artifacts_root().exists());
}

#[test]
fn validated_verdicts_never_carry_the_unset_sentinel() {
    let dir = tempdir().unwrap();
    write_raw(dir.path(), &[
        r#"{"case_id":"a","test_type":"POSITIVE","action_category":"READ","expected_action":"x","status_code":204,"execution_id":"","response":{}}"#,
        r#"{"case_id":"b","test_type":"NEGATIVE_CONTROL","action_category":"WRITE","expected_action":"create_work_order","status_code":403,"execution_id":"","response":{}}"#,
        r#"{"case_id":"c","test_type":"POSITIVE","action_category":"WRITE","expected_action":"create_work_order","status_code":200,"execution_id":"ex","response":{}}"#,
    ]);
    let v = Validator::open(dir.path().to_path_buf()).unwrap();
    let run = v.run(None, None).unwrap();
    let validated = read_raw_log(&run.validated_log).unwrap();
    assert!(validated
        .iter()
        .all(|r| r.verdict.failure_reason != FailureReason::Unverified));
}
