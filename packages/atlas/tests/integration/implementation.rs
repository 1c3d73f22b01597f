use serde_json::json;
use uuid::Uuid;

use crate::common::{TestApp, routes};

mod implementation_crud {
    use super::*;

    #[tokio::test]
    async fn create_under_algorithm() {
        let app = TestApp::spawn().await;
        let algorithm = app.create_algorithm("Grover").await;

        let res = app
            .post(
                &routes::implementations(algorithm),
                &json!({
                    "name": "Qiskit Grover",
                    "link": "https://github.com/example/grover",
                    "input_format": "OpenQASM",
                    "dependencies": "qiskit>=0.45",
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text());
        assert_eq!(res.body["algorithm_id"], algorithm.to_string());
        assert_eq!(res.body["input_format"], "OpenQASM");
        assert_eq!(
            res.href("algorithm").unwrap(),
            app.url(&routes::algorithm(algorithm))
        );
    }

    #[tokio::test]
    async fn create_under_missing_algorithm_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                &routes::implementations(Uuid::new_v4()),
                &json!({ "name": "Orphan" }),
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn invalid_link_is_rejected() {
        let app = TestApp::spawn().await;
        let algorithm = app.create_algorithm("Grover").await;

        let res = app
            .post(
                &routes::implementations(algorithm),
                &json!({ "name": "Qiskit Grover", "link": "not a url" }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn implementation_is_scoped_to_its_algorithm() {
        let app = TestApp::spawn().await;
        let grover = app.create_algorithm("Grover").await;
        let shor = app.create_algorithm("Shor").await;
        let id = app.create_implementation(grover, "Qiskit Grover").await;

        assert_eq!(app.get(&routes::implementation(grover, id)).await.status, 200);
        assert_eq!(app.get(&routes::implementation(shor, id)).await.status, 404);
        assert_eq!(app.delete(&routes::implementation(shor, id)).await.status, 404);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let app = TestApp::spawn().await;
        let algorithm = app.create_algorithm("Grover").await;
        let id = app.create_implementation(algorithm, "Qiskit Grover").await;

        let res = app
            .put(
                &routes::implementation(algorithm, id),
                &json!({ "name": "Cirq Grover", "contributors": "Alice, Bob" }),
            )
            .await;
        assert_eq!(res.status, 200, "{}", res.text());
        assert_eq!(res.body["name"], "Cirq Grover");
        assert_eq!(res.body["contributors"], "Alice, Bob");
        assert!(res.body["link"].is_null());

        assert_eq!(
            app.delete(&routes::implementation(algorithm, id)).await.status,
            204
        );
        assert_eq!(
            app.get(&routes::implementation(algorithm, id)).await.status,
            404
        );
    }

    #[tokio::test]
    async fn listings_by_algorithm_and_global() {
        let app = TestApp::spawn().await;
        let grover = app.create_algorithm("Grover").await;
        let shor = app.create_algorithm("Shor").await;
        app.create_implementation(grover, "Qiskit Grover").await;
        app.create_implementation(grover, "Cirq Grover").await;
        app.create_implementation(shor, "Qiskit Shor").await;

        let scoped = app.get(&routes::implementations(grover)).await;
        assert_eq!(scoped.status, 200);
        assert_eq!(scoped.body["pagination"]["total_elements"], 2);

        let all = app.get(routes::IMPLEMENTATIONS).await;
        assert_eq!(all.body["pagination"]["total_elements"], 3);
    }

    #[tokio::test]
    async fn delete_with_packages_is_a_conflict() {
        let app = TestApp::spawn().await;
        let algorithm = app.create_algorithm("Grover").await;
        let id = app.create_implementation(algorithm, "Qiskit Grover").await;
        let package = app
            .post(&routes::packages(id), &json!({ "name": "grover.zip" }))
            .await;
        assert_eq!(package.status, 201);

        let res = app.delete(&routes::implementation(algorithm, id)).await;

        assert_eq!(res.status, 409);
    }
}

mod implementation_publications {
    use super::*;

    #[tokio::test]
    async fn link_list_unlink() {
        let app = TestApp::spawn().await;
        let algorithm = app.create_algorithm("Grover").await;
        let id = app.create_implementation(algorithm, "Qiskit Grover").await;
        let publication = app.create_publication("A fast quantum search").await;

        let res = app
            .post(
                &routes::implementation_publications(id),
                &json!({ "id": publication }),
            )
            .await;
        assert_eq!(res.status, 204, "{}", res.text());

        let listed = app.get(&routes::implementation_publications(id)).await;
        assert_eq!(listed.body["pagination"]["total_elements"], 1);

        let citing = app
            .get(&format!("{}/implementations", routes::publication(publication)))
            .await;
        assert_eq!(citing.body["data"][0]["id"], id.to_string());

        let unlink = app
            .delete(&routes::implementation_publication(id, publication))
            .await;
        assert_eq!(unlink.status, 204);
        let listed = app.get(&routes::implementation_publications(id)).await;
        assert_eq!(listed.body["pagination"]["total_elements"], 0);
    }
}
