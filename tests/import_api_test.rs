// ==========================================
// 导入 API 端到端测试
// ==========================================
// 模拟宿主调用: 读文件 → 确认 → 导入 → 进度/结果回调
// ==========================================

use code_importer::api::{AlwaysConfirm, ApiError, IgnoreResult, ImportApi};
use code_importer::domain::{ImportSummary, Partition};
use code_importer::importer::{ImportRunState, TextFileSource};
use code_importer::repository::{CodeRepository, CodeStore};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::tempdir;

use test_helpers::{create_test_repo, sequential_codes, write_fixture, FlakyStore, SlowStore};

fn import_api(repo: Arc<CodeRepository>) -> ImportApi {
    ImportApi::new(repo, Arc::new(TextFileSource))
}

#[tokio::test]
async fn test_import_file_full_flow() {
    code_importer::logging::init_test();
    let (_temp_file, repo) = create_test_repo().unwrap();
    let api = import_api(repo.clone());
    let dir = tempdir().unwrap();
    let path = write_fixture(
        &dir,
        "codes.txt",
        "\u{feff}3480941234567\r\n9990001234567\r\n\r\n12345\n3480941234567",
    );

    let prompts = Mutex::new(Vec::new());
    let confirm = |msg: &str| {
        prompts.lock().unwrap().push(msg.to_string());
        true
    };
    let progress_seen = Mutex::new(Vec::new());
    let progress = |p: u8| progress_seen.lock().unwrap().push(p);
    let completed = Mutex::new(Vec::<ImportSummary>::new());
    let on_complete = |s: &ImportSummary| completed.lock().unwrap().push(s.clone());

    let summary = api
        .import_file(&path, &confirm, &progress, &on_complete)
        .await
        .unwrap()
        .expect("导入应已执行");

    assert_eq!(
        prompts.into_inner().unwrap(),
        vec![format!("Import 5 codes from '{}'?", path.display())]
    );
    assert_eq!(summary.total_lines, 5);
    assert_eq!(summary.inserted, 2);
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.blank_lines, 1);
    assert_eq!(summary.error_messages(), vec!["Line 4: code too short '12345'"]);

    let progress_seen = progress_seen.into_inner().unwrap();
    assert_eq!(progress_seen, vec![20, 40, 60, 80, 100]);

    let completed = completed.into_inner().unwrap();
    assert_eq!(completed.len(), 1);
    assert_eq!(completed[0].run_id, summary.run_id);

    assert_eq!(api.run_state(), ImportRunState::Completed);
    assert_eq!(repo.count(Partition::Primary).unwrap(), 1);
    assert_eq!(repo.count(Partition::Secondary).unwrap(), 1);
}

#[tokio::test]
async fn test_declined_confirmation_writes_nothing() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    let api = import_api(repo.clone());
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "codes.txt", "3480941234567\n");

    let decline = |_: &str| false;
    let outcome = api
        .import_file(&path, &decline, &|_: u8| {}, &IgnoreResult)
        .await
        .unwrap();

    assert!(outcome.is_none());
    assert_eq!(api.run_state(), ImportRunState::Idle);
    assert_eq!(repo.count(Partition::Primary).unwrap(), 0);
}

#[tokio::test]
async fn test_missing_file_is_invalid_input() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    let api = import_api(repo);
    let dir = tempdir().unwrap();

    let err = api
        .import_file(
            &dir.path().join("nope.txt"),
            &AlwaysConfirm,
            &|_: u8| {},
            &IgnoreResult,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[tokio::test]
async fn test_empty_file_completes_with_zero_counts() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    let api = import_api(repo);
    let dir = tempdir().unwrap();
    let path = write_fixture(&dir, "empty.txt", "");

    let progress_seen = Mutex::new(Vec::new());
    let progress = |p: u8| progress_seen.lock().unwrap().push(p);
    let summary = api
        .import_file(&path, &AlwaysConfirm, &progress, &IgnoreResult)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(summary.total_lines, 0);
    assert_eq!(summary.inserted, 0);
    assert!(summary.errors.is_empty());
    assert_eq!(progress_seen.into_inner().unwrap(), vec![100]);
}

#[tokio::test]
async fn test_store_outage_surfaces_single_fault() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    let flaky = Arc::new(FlakyStore::new(repo.clone(), 1));
    let api = ImportApi::new(flaky, Arc::new(TextFileSource));

    let completions = Mutex::new(0usize);
    let on_complete = |_: &ImportSummary| *completions.lock().unwrap() += 1;
    let lines = vec!["3480940000001".to_string(), "3480940000002".to_string()];

    let err = api
        .import_lines(lines, &|_: u8| {}, &on_complete)
        .await
        .unwrap_err();

    assert!(err.is_storage_unavailable());
    assert!(err.to_string().starts_with("cannot reach storage"));
    assert_eq!(*completions.lock().unwrap(), 0);
    assert_eq!(api.run_state(), ImportRunState::Aborted);
    // 故障前已写入的记录保留
    assert_eq!(repo.count(Partition::Primary).unwrap(), 1);

    // 中止后可再次导入
    assert!(!api.is_running());
}

#[tokio::test]
async fn test_abandoned_caller_keeps_run_slot_until_worker_ends() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    let slow = Arc::new(SlowStore::new(repo.clone(), Duration::from_millis(30)));
    let api = ImportApi::new(slow.clone(), Arc::new(TextFileSource));
    let lines = sequential_codes("348094", 12);

    // 调用方在工作线程结束前放弃等待
    let waited = tokio::time::timeout(
        Duration::from_millis(60),
        api.import_lines(lines.clone(), &|_: u8| {}, &IgnoreResult),
    )
    .await;
    assert!(waited.is_err());

    assert!(api.is_running());
    let second = api
        .import_lines(lines.clone(), &|_: u8| {}, &IgnoreResult)
        .await;
    assert!(matches!(second, Err(ApiError::ImportInProgress)));

    let mut polls = 0;
    while api.is_running() {
        assert!(polls < 500, "worker did not finish");
        tokio::time::sleep(Duration::from_millis(10)).await;
        polls += 1;
    }

    assert_eq!(api.run_state(), ImportRunState::Completed);
    assert_eq!(slow.inserts(), 12);
    assert_eq!(repo.count(Partition::Primary).unwrap(), 12);
}
