// ==========================================
// 浏览/修改/删除/导出 集成测试
// ==========================================

use code_importer::api::{AlwaysConfirm, ApiError, CodeApi, IgnoreResult, ImportApi};
use code_importer::domain::{Partition, PAGE_SIZE};
use code_importer::importer::{LineSource, TextFileSource};
use code_importer::read_model::{CodeBrowser, PageError, PartitionView};
use code_importer::repository::CodeStore;
use std::sync::Arc;
use tempfile::tempdir;

use test_helpers::{code, create_test_repo, sequential_codes};

fn code_api<S: CodeStore + 'static>(store: Arc<S>) -> CodeApi {
    CodeApi::new(store, Arc::new(TextFileSource))
}

#[test]
fn test_pages_cover_sorted_partition() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    // 逆序插入，快照须按编码升序
    for raw in sequential_codes("348094", 120).iter().rev() {
        repo.insert(Partition::Primary, &code(raw)).unwrap();
    }
    let api = code_api(repo);

    let mut view = api.snapshot(Partition::Primary).unwrap();
    assert_eq!(view.total_pages(), 3);

    let mut collected = Vec::new();
    loop {
        let page = view.page();
        assert!(page.rows.len() <= PAGE_SIZE);
        collected.extend(page.rows.iter().map(|r| r.code.to_string()));
        if !view.move_by(1) {
            break;
        }
    }
    assert_eq!(collected, sequential_codes("348094", 120));
    assert_eq!(view.page().label(), "Page 3 / 3");
    assert!(!view.page().has_next);
}

#[test]
fn test_goto_rejects_out_of_range_without_moving() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    for raw in sequential_codes("55", 51) {
        repo.insert(Partition::Secondary, &code(&raw)).unwrap();
    }

    let mut view = PartitionView::snapshot(repo.as_ref(), Partition::Secondary).unwrap();
    view.goto(2).unwrap();

    assert_eq!(
        view.goto(0),
        Err(PageError::OutOfRange { requested: 0, total_pages: 2 })
    );
    assert_eq!(
        view.goto(3),
        Err(PageError::OutOfRange { requested: 3, total_pages: 2 })
    );
    assert_eq!(view.current_page(), 1);
    assert_eq!(view.page().rows.len(), 1);
}

#[tokio::test]
async fn test_refresh_after_import_resets_both_partitions() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    let api = code_api(repo.clone());
    let importer = ImportApi::new(repo.clone(), Arc::new(TextFileSource));

    let mut browser = CodeBrowser::new();
    api.refresh(&mut browser).unwrap();
    assert_eq!(browser.page(Partition::Primary).total_rows, 0);
    assert_eq!(browser.page(Partition::Primary).label(), "Page 1 / 1");

    let mut lines = sequential_codes("348094", 60);
    lines.extend(sequential_codes("1", 10));
    importer
        .import_lines(lines, &|_: u8| {}, &IgnoreResult)
        .await
        .unwrap();

    // 刷新前视图仍是旧快照
    assert_eq!(browser.page(Partition::Primary).total_rows, 0);

    api.refresh(&mut browser).unwrap();
    assert!(browser.move_page(Partition::Primary, 1));
    assert_eq!(browser.page(Partition::Primary).rows.len(), 10);
    assert_eq!(browser.page(Partition::Secondary).total_rows, 10);

    api.refresh(&mut browser).unwrap();
    assert_eq!(browser.view(Partition::Primary).current_page(), 0);
}

#[test]
fn test_edit_to_existing_code_is_rejected() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    let a = repo.insert(Partition::Primary, &code("3480940000001")).unwrap();
    repo.insert(Partition::Primary, &code("3480940000002")).unwrap();
    let api = code_api(repo.clone());

    let err = api
        .update_code(Partition::Primary, a, "3480940000002")
        .unwrap_err();
    assert!(matches!(err, ApiError::DuplicateCode { partition: Partition::Primary, .. }));

    let unchanged = repo.find_by_id(Partition::Primary, a).unwrap().unwrap();
    assert_eq!(unchanged.code.as_str(), "3480940000001");
}

#[test]
fn test_edit_rejects_malformed_input() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    let id = repo.insert(Partition::Secondary, &code("1234567890123")).unwrap();
    let api = code_api(repo.clone());

    for bad in ["123", "12345678901234", "12345678901a3", ""] {
        let err = api.update_code(Partition::Secondary, id, bad).unwrap_err();
        assert!(matches!(err, ApiError::ValidationError(_)), "input {:?}", bad);
    }
    let record = repo.find_by_id(Partition::Secondary, id).unwrap().unwrap();
    assert_eq!(record.code.as_str(), "1234567890123");
}

#[test]
fn test_edit_keeps_record_in_its_partition() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    let id = repo.insert(Partition::Secondary, &code("1234567890123")).unwrap();
    let api = code_api(repo.clone());

    let edit = api
        .update_code(Partition::Secondary, id, "3480949999999")
        .unwrap();
    assert_eq!(edit.previous.as_str(), "1234567890123");
    assert_eq!(edit.current.as_str(), "3480949999999");
    assert_eq!(repo.count(Partition::Secondary).unwrap(), 1);
    assert_eq!(repo.count(Partition::Primary).unwrap(), 0);
}

#[test]
fn test_delete_asks_with_code_and_removes_record() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    let id = repo.insert(Partition::Primary, &code("3480941111111")).unwrap();
    let api = code_api(repo.clone());

    let asked = std::cell::RefCell::new(None);
    let confirm = |msg: &str| {
        *asked.borrow_mut() = Some(msg.to_string());
        true
    };
    let deleted = api.delete_code(Partition::Primary, id, &confirm).unwrap();

    assert_eq!(asked.into_inner().as_deref(), Some("Delete code 3480941111111?"));
    assert_eq!(deleted.map(|r| r.id), Some(id));
    assert_eq!(repo.count(Partition::Primary).unwrap(), 0);

    let err = api
        .delete_code(Partition::Primary, id, &AlwaysConfirm)
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
}

#[tokio::test]
async fn test_export_writes_primary_then_secondary() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    for raw in ["9990000000002", "3480940000009", "1110000000001", "3480940000001"] {
        let c = code(raw);
        let partition = code_importer::importer::classify(&c);
        repo.insert(partition, &c).unwrap();
    }
    let api = code_api(repo);
    let dir = tempdir().unwrap();
    let out = dir.path().join("export.txt");
    std::fs::write(&out, "stale content\n").unwrap();

    let count = api.export_codes(&out).await.unwrap();
    assert_eq!(count, 4);

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(
        written,
        "3480940000001\n3480940000009\n1110000000001\n9990000000002\n"
    );

    let round_trip = TextFileSource.read_lines(&out).await.unwrap();
    assert_eq!(round_trip.len(), 4);
}

#[tokio::test]
async fn test_export_empty_store_truncates_file() {
    let (_temp_file, repo) = create_test_repo().unwrap();
    let api = code_api(repo);
    let dir = tempdir().unwrap();
    let out = dir.path().join("export.txt");
    std::fs::write(&out, "old\n").unwrap();

    assert_eq!(api.export_codes(&out).await.unwrap(), 0);
    assert_eq!(std::fs::read_to_string(&out).unwrap(), "");
}
