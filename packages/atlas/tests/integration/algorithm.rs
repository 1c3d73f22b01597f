use serde_json::json;
use uuid::Uuid;

use crate::common::{TestApp, routes};

mod algorithm_crud {
    use super::*;

    #[tokio::test]
    async fn create_and_get_algorithm() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::ALGORITHMS,
                &json!({
                    "name": "Grover",
                    "acronym": "GSA",
                    "problem": "Unstructured search",
                }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text());
        let id = res.id();

        let fetched = app.get(&routes::algorithm(id)).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body["name"], "Grover");
        assert_eq!(fetched.body["acronym"], "GSA");
        assert_eq!(fetched.href("self").unwrap(), app.url(&routes::algorithm(id)));
        assert!(fetched.href("implementations").is_some());
    }

    #[tokio::test]
    async fn missing_name_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(routes::ALGORITHMS, &json!({ "acronym": "X" }))
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn update_replaces_fields() {
        let app = TestApp::spawn().await;
        let id = app.create_algorithm("Shor").await;

        let res = app
            .put(&routes::algorithm(id), &json!({ "name": "Shor's algorithm" }))
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["name"], "Shor's algorithm");
        assert!(res.body["acronym"].is_null());
    }

    #[tokio::test]
    async fn list_is_paged() {
        let app = TestApp::spawn().await;
        for name in ["Grover", "Shor", "QAOA"] {
            app.create_algorithm(name).await;
        }

        let res = app.get(&format!("{}?size=2", routes::ALGORITHMS)).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["data"].as_array().unwrap().len(), 2);
        assert_eq!(res.body["pagination"]["total_elements"], 3);
        assert_eq!(res.body["pagination"]["size"], 2);
    }

    #[tokio::test]
    async fn delete_algorithm() {
        let app = TestApp::spawn().await;
        let id = app.create_algorithm("Grover").await;

        assert_eq!(app.delete(&routes::algorithm(id)).await.status, 204);
        assert_eq!(app.get(&routes::algorithm(id)).await.status, 404);
        assert_eq!(app.delete(&routes::algorithm(id)).await.status, 404);
    }

    #[tokio::test]
    async fn delete_with_implementations_is_a_conflict() {
        let app = TestApp::spawn().await;
        let id = app.create_algorithm("Grover").await;
        app.create_implementation(id, "Qiskit Grover").await;

        let res = app.delete(&routes::algorithm(id)).await;

        assert_eq!(res.status, 409);
        assert_eq!(res.body["code"], "CONFLICT");
        assert_eq!(app.get(&routes::algorithm(id)).await.status, 200);
    }
}

mod algorithm_links {
    use super::*;

    #[tokio::test]
    async fn link_and_unlink_publication() {
        let app = TestApp::spawn().await;
        let id = app.create_algorithm("Grover").await;
        let publication = app.create_publication("A fast quantum search").await;

        let res = app
            .post(&routes::algorithm_publications(id), &json!({ "id": publication }))
            .await;
        assert_eq!(res.status, 204, "{}", res.text());

        // Linking twice is a no-op.
        let again = app
            .post(&routes::algorithm_publications(id), &json!({ "id": publication }))
            .await;
        assert_eq!(again.status, 204);

        let listed = app.get(&routes::algorithm_publications(id)).await;
        assert_eq!(listed.status, 200);
        assert_eq!(listed.body["pagination"]["total_elements"], 1);
        assert_eq!(listed.body["data"][0]["id"], publication.to_string());

        let unlink = app
            .delete(&routes::algorithm_publication(id, publication))
            .await;
        assert_eq!(unlink.status, 204);
        let unlink_again = app
            .delete(&routes::algorithm_publication(id, publication))
            .await;
        assert_eq!(unlink_again.status, 404);

        let listed = app.get(&routes::algorithm_publications(id)).await;
        assert_eq!(listed.body["pagination"]["total_elements"], 0);
        // The publication itself survives.
        assert_eq!(app.get(&routes::publication(publication)).await.status, 200);
    }

    #[tokio::test]
    async fn link_unknown_publication_is_not_found() {
        let app = TestApp::spawn().await;
        let id = app.create_algorithm("Grover").await;

        let res = app
            .post(
                &routes::algorithm_publications(id),
                &json!({ "id": Uuid::new_v4() }),
            )
            .await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn link_and_unlink_application_area() {
        let app = TestApp::spawn().await;
        let id = app.create_algorithm("QAOA").await;
        let area = app.create_application_area("Optimization").await;

        let res = app
            .post(&routes::algorithm_application_areas(id), &json!({ "id": area }))
            .await;
        assert_eq!(res.status, 204, "{}", res.text());

        let listed = app.get(&routes::algorithm_application_areas(id)).await;
        assert_eq!(listed.body["data"][0]["name"], "Optimization");

        let unlink = app
            .delete(&routes::algorithm_application_area(id, area))
            .await;
        assert_eq!(unlink.status, 204);
    }

    #[tokio::test]
    async fn deleting_algorithm_drops_its_links() {
        let app = TestApp::spawn().await;
        let id = app.create_algorithm("Grover").await;
        let publication = app.create_publication("A fast quantum search").await;
        app.post(&routes::algorithm_publications(id), &json!({ "id": publication }))
            .await;

        assert_eq!(app.delete(&routes::algorithm(id)).await.status, 204);

        let citing = app
            .get(&format!("{}/algorithms", routes::publication(publication)))
            .await;
        assert_eq!(citing.status, 200);
        assert_eq!(citing.body["pagination"]["total_elements"], 0);
    }
}
