use std::io::Cursor;
use std::time::Duration;

use atlas::service::concrete_solution::ConcreteSolutionService;
use atlas::service::file::FileService;
use sea_orm::{TransactionSession, TransactionTrait};
use serde_json::json;
use uuid::Uuid;

use crate::common::{MAX_BLOB_SIZE, TestApp, routes};

mod concrete_solution_crud {
    use super::*;

    #[tokio::test]
    async fn create_sets_pattern_from_path() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();

        let res = app
            .post(
                &routes::concrete_solutions(pattern),
                &json!({
                    "name": "  Grover Oracle  ",
                    "description": "Marks the searched element",
                    "concrete_solution_type": "code",
                    "file_id": Uuid::new_v4(),
                    "file": { "id": Uuid::new_v4(), "name": "smuggled.qasm" },
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text());
        assert_eq!(res.body["name"], "Grover Oracle");
        assert_eq!(res.body["pattern"], pattern.to_string());
        assert_eq!(res.body["concrete_solution_type"], "code");
        assert!(res.body["file_id"].is_null());
        assert!(res.href("file").is_none());
        assert_eq!(
            res.href("self").unwrap(),
            app.url(&routes::concrete_solution(pattern, res.id()))
        );

        let fetched = app.get(&routes::concrete_solution(pattern, res.id())).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body["name"], res.body["name"]);
        assert_eq!(fetched.body["description"], "Marks the searched element");
        assert!(fetched.body["file_id"].is_null());
        assert_eq!(
            app.get(&routes::concrete_solution_file(pattern, res.id()))
                .await
                .status,
            404
        );
    }

    #[tokio::test]
    async fn create_with_blank_name_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                &routes::concrete_solutions(Uuid::new_v4()),
                &json!({ "name": "   " }),
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn create_with_unknown_type_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                &routes::concrete_solutions(Uuid::new_v4()),
                &json!({ "name": "Oracle", "concrete_solution_type": "hologram" }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn get_under_other_pattern_is_not_found() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let id = app.create_concrete_solution(pattern, "Oracle").await;

        let ok = app.get(&routes::concrete_solution(pattern, id)).await;
        assert_eq!(ok.status, 200);
        assert_eq!(ok.id(), id);

        let res = app
            .get(&routes::concrete_solution(Uuid::new_v4(), id))
            .await;
        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn malformed_id_is_a_validation_error() {
        let app = TestApp::spawn().await;

        let res = app
            .get(&format!(
                "{}/not-a-uuid",
                routes::concrete_solutions(Uuid::new_v4())
            ))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_keeps_type_and_file() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let id = app.create_concrete_solution(pattern, "Oracle").await;
        let upload = app
            .upload(
                &routes::concrete_solution_file(pattern, id),
                "oracle.qasm",
                b"OPENQASM 2.0;".to_vec(),
                "text/plain",
            )
            .await;
        assert_eq!(upload.status, 201, "{}", upload.text());

        let res = app
            .put(
                &routes::concrete_solution(pattern, id),
                &json!({
                    "name": "Phase Oracle",
                    "description": "Marks with a phase",
                    "concrete_solution_type": "other",
                    "file_id": Uuid::new_v4(),
                    "file": null,
                }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text());
        assert_eq!(res.body["name"], "Phase Oracle");
        assert_eq!(res.body["description"], "Marks with a phase");
        assert_eq!(res.body["concrete_solution_type"], "circuit");
        assert_eq!(res.body["file_id"], upload.body["id"]);

        let fetched = app.get(&routes::concrete_solution(pattern, id)).await;
        assert_eq!(fetched.body["concrete_solution_type"], "circuit");
        assert_eq!(fetched.body["file_id"], upload.body["id"]);
        let content = app
            .get(&routes::concrete_solution_content(pattern, id))
            .await;
        assert_eq!(content.status, 200);
        assert_eq!(content.bytes, b"OPENQASM 2.0;");
    }

    #[tokio::test]
    async fn update_can_move_to_other_pattern() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let target = Uuid::new_v4();
        let id = app.create_concrete_solution(pattern, "Oracle").await;

        let res = app
            .put(
                &routes::concrete_solution(pattern, id),
                &json!({ "name": "Oracle", "pattern": target }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text());
        assert_eq!(res.body["pattern"], target.to_string());

        assert_eq!(app.get(&routes::concrete_solution(pattern, id)).await.status, 404);
        assert_eq!(app.get(&routes::concrete_solution(target, id)).await.status, 200);
    }

    #[tokio::test]
    async fn update_missing_solution_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .put(
                &routes::concrete_solution(Uuid::new_v4(), Uuid::new_v4()),
                &json!({ "name": "Oracle" }),
            )
            .await;

        assert_eq!(res.status, 404);
    }
}

mod concrete_solution_listing {
    use super::*;

    #[tokio::test]
    async fn pattern_listing_is_paged() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        for i in 0..12 {
            app.create_concrete_solution(pattern, &format!("Solution {i:02}"))
                .await;
        }
        app.create_concrete_solution(Uuid::new_v4(), "Elsewhere")
            .await;

        let res = app
            .get(&format!(
                "{}?page=0&size=5",
                routes::concrete_solutions(pattern)
            ))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"].as_array().unwrap().len(), 5);
        assert_eq!(res.body["pagination"]["total_elements"], 12);
        assert_eq!(res.body["pagination"]["total_pages"], 3);
        assert!(res.href("next").is_some());
        assert!(res.href("prev").is_none());

        let last = app
            .get(&format!(
                "{}?page=2&size=5",
                routes::concrete_solutions(pattern)
            ))
            .await;
        assert_eq!(last.body["data"].as_array().unwrap().len(), 2);
        assert!(last.href("next").is_none());
    }

    #[tokio::test]
    async fn out_of_range_page_is_rejected() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        app.create_concrete_solution(pattern, "Oracle").await;

        let huge = u64::MAX / 10;
        for path in [
            routes::concrete_solutions(pattern),
            routes::CONCRETE_SOLUTIONS.to_string(),
        ] {
            let res = app.get(&format!("{path}?page={huge}&size=20")).await;
            assert_eq!(res.status, 400, "{}", res.text());
            assert_eq!(res.body["code"], "VALIDATION_ERROR");
        }

        let past_end = app
            .get(&format!(
                "{}?page=50&size=20",
                routes::concrete_solutions(pattern)
            ))
            .await;
        assert_eq!(past_end.status, 200);
        assert!(past_end.body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn global_listing_spans_patterns() {
        let app = TestApp::spawn().await;
        app.create_concrete_solution(Uuid::new_v4(), "A").await;
        app.create_concrete_solution(Uuid::new_v4(), "B").await;

        let res = app.get(routes::CONCRETE_SOLUTIONS).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["pagination"]["total_elements"], 2);
    }
}

mod concrete_solution_file {
    use super::*;

    #[tokio::test]
    async fn upload_then_download_with_etag() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let id = app.create_concrete_solution(pattern, "Oracle").await;

        let upload = app
            .upload(
                &routes::concrete_solution_file(pattern, id),
                "oracle.qasm",
                b"OPENQASM 2.0;".to_vec(),
                "text/plain",
            )
            .await;
        assert_eq!(upload.status, 201, "{}", upload.text());
        assert_eq!(upload.body["name"], "oracle.qasm");
        assert_eq!(upload.body["mime_type"], "text/plain");
        assert_eq!(upload.body["size"], 13);
        assert!(upload.body["file_url"].as_str().unwrap().starts_with("blob:"));

        let meta = app.get(&routes::concrete_solution_file(pattern, id)).await;
        assert_eq!(meta.status, 200);
        assert_eq!(meta.body["id"], upload.body["id"]);

        let solution = app.get(&routes::concrete_solution(pattern, id)).await;
        assert_eq!(solution.body["file_id"], upload.body["id"]);
        assert!(solution.href("file").is_some());

        let content = app
            .get(&routes::concrete_solution_content(pattern, id))
            .await;
        assert_eq!(content.status, 200);
        assert_eq!(content.bytes, b"OPENQASM 2.0;");
        assert_eq!(content.header("content-type"), Some("text/plain"));
        assert!(
            content
                .header("content-disposition")
                .unwrap()
                .contains("oracle.qasm")
        );

        let etag = content.header("etag").unwrap().to_string();
        let cached = app
            .get_with_header(
                &routes::concrete_solution_content(pattern, id),
                "If-None-Match",
                &etag,
            )
            .await;
        assert_eq!(cached.status, 304);
    }

    #[tokio::test]
    async fn mime_type_is_guessed_for_generic_uploads() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let id = app.create_concrete_solution(pattern, "Oracle").await;

        let res = app
            .upload(
                &routes::concrete_solution_file(pattern, id),
                "circuit.json",
                b"{}".to_vec(),
                "application/octet-stream",
            )
            .await;

        assert_eq!(res.status, 201);
        assert_eq!(res.body["mime_type"], "application/json");
    }

    #[tokio::test]
    async fn reupload_replaces_previous_file() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let id = app.create_concrete_solution(pattern, "Oracle").await;
        let path = routes::concrete_solution_file(pattern, id);

        let first = app
            .upload(&path, "v1.qasm", b"version one".to_vec(), "text/plain")
            .await;
        let second = app
            .upload(&path, "v2.qasm", b"version two".to_vec(), "text/plain")
            .await;
        assert_eq!(first.status, 201);
        assert_eq!(second.status, 201);
        assert_ne!(first.body["id"], second.body["id"]);

        let meta = app.get(&path).await;
        assert_eq!(meta.body["name"], "v2.qasm");
        assert_eq!(app.blob_count(), 1);
    }

    #[tokio::test]
    async fn upload_without_file_field_is_rejected() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let id = app.create_concrete_solution(pattern, "Oracle").await;

        let form = reqwest::multipart::Form::new().text("note", "no file here");
        let res = app
            .client
            .post(app.url(&routes::concrete_solution_file(pattern, id)))
            .multipart(form)
            .send()
            .await
            .unwrap();

        assert_eq!(res.status().as_u16(), 400);
        assert_eq!(app.blob_count(), 0);
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let id = app.create_concrete_solution(pattern, "Oracle").await;

        let res = app
            .upload(
                &routes::concrete_solution_file(pattern, id),
                "big.bin",
                vec![0u8; MAX_BLOB_SIZE as usize + 1],
                "application/octet-stream",
            )
            .await;

        assert_eq!(res.status, 400);
        let solution = app.get(&routes::concrete_solution(pattern, id)).await;
        assert!(solution.body["file_id"].is_null());
    }

    #[tokio::test]
    async fn upload_to_missing_solution_leaves_no_blob() {
        let app = TestApp::spawn().await;

        let res = app
            .upload(
                &routes::concrete_solution_file(Uuid::new_v4(), Uuid::new_v4()),
                "oracle.qasm",
                b"OPENQASM 2.0;".to_vec(),
                "text/plain",
            )
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(app.blob_count(), 0);
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let id = app.create_concrete_solution(pattern, "Oracle").await;

        let meta = app.get(&routes::concrete_solution_file(pattern, id)).await;
        assert_eq!(meta.status, 404);
        let content = app
            .get(&routes::concrete_solution_content(pattern, id))
            .await;
        assert_eq!(content.status, 404);
        let delete = app
            .delete(&routes::concrete_solution_file(pattern, id))
            .await;
        assert_eq!(delete.status, 404);
    }

    #[tokio::test]
    async fn delete_file_detaches_and_removes_blob() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let id = app.create_concrete_solution(pattern, "Oracle").await;
        let path = routes::concrete_solution_file(pattern, id);
        app.upload(&path, "oracle.qasm", b"OPENQASM 2.0;".to_vec(), "text/plain")
            .await;

        let res = app.delete(&path).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&path).await.status, 404);
        let solution = app.get(&routes::concrete_solution(pattern, id)).await;
        assert!(solution.body["file_id"].is_null());
        assert_eq!(app.blob_count(), 0);
    }

    #[tokio::test]
    async fn shared_blob_survives_until_last_file_is_gone() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let a = app.create_concrete_solution(pattern, "A").await;
        let b = app.create_concrete_solution(pattern, "B").await;
        for id in [a, b] {
            let res = app
                .upload(
                    &routes::concrete_solution_file(pattern, id),
                    "same.qasm",
                    b"identical".to_vec(),
                    "text/plain",
                )
                .await;
            assert_eq!(res.status, 201);
        }
        assert_eq!(app.blob_count(), 1);

        app.delete(&routes::concrete_solution_file(pattern, a)).await;
        assert_eq!(app.blob_count(), 1);
        let content = app
            .get(&routes::concrete_solution_content(pattern, b))
            .await;
        assert_eq!(content.bytes, b"identical");

        app.delete(&routes::concrete_solution_file(pattern, b)).await;
        assert_eq!(app.blob_count(), 0);
    }

    #[tokio::test]
    async fn delete_solution_removes_its_file() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let id = app.create_concrete_solution(pattern, "Oracle").await;
        app.upload(
            &routes::concrete_solution_file(pattern, id),
            "oracle.qasm",
            b"OPENQASM 2.0;".to_vec(),
            "text/plain",
        )
        .await;

        let res = app.delete(&routes::concrete_solution(pattern, id)).await;
        assert_eq!(res.status, 204);

        assert_eq!(app.get(&routes::concrete_solution(pattern, id)).await.status, 404);
        assert_eq!(app.blob_count(), 0);
    }

    #[tokio::test]
    async fn upload_staged_during_blob_collection_keeps_content() {
        let app = TestApp::spawn().await;
        let pattern = Uuid::new_v4();
        let a = app.create_concrete_solution(pattern, "A").await;
        let b = app.create_concrete_solution(pattern, "B").await;
        app.upload(
            &routes::concrete_solution_file(pattern, a),
            "same.qasm",
            b"identical".to_vec(),
            "text/plain",
        )
        .await;

        // B's copy is staged, then A's file goes away and its blob is collected.
        let files = FileService::new(&*app.blob_store);
        let upload = files
            .store(
                "same.qasm".into(),
                Some("text/plain"),
                &mut Cursor::new(b"identical".to_vec()),
            )
            .await
            .unwrap();
        let res = app
            .delete(&routes::concrete_solution_file(pattern, a))
            .await;
        assert_eq!(res.status, 204);
        assert_eq!(app.blob_count(), 0);

        ConcreteSolutionService::new(&app.db)
            .add_file(&files, pattern, b, upload)
            .await
            .unwrap();

        let content = app
            .get(&routes::concrete_solution_content(pattern, b))
            .await;
        assert_eq!(content.status, 200);
        assert_eq!(content.bytes, b"identical");
        assert_eq!(app.blob_count(), 1);
    }

    #[tokio::test]
    async fn blob_collection_waits_for_pending_attach() {
        let app = TestApp::spawn().await;
        let files = FileService::new(&*app.blob_store);
        let upload = files
            .store(
                "oracle.qasm".into(),
                None,
                &mut Cursor::new(b"OPENQASM 2.0;".to_vec()),
            )
            .await
            .unwrap();
        let hash = upload.blob.hash().to_hex();

        let txn = app.db.begin().await.unwrap();
        files.create(&txn, &upload).await.unwrap();

        let db = app.db.clone();
        let store = app.blob_store.clone();
        let collector = tokio::spawn(async move {
            FileService::new(&*store).collect_blob(&db, &hash).await
        });
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!collector.is_finished());

        txn.commit().await.unwrap();
        let collected = collector.await.unwrap().unwrap();
        assert!(!collected);
        assert_eq!(app.blob_count(), 1);
    }
}
