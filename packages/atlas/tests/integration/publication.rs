use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn create_and_update_publication() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::PUBLICATIONS,
            &json!({
                "title": "Quantum Approximate Optimization",
                "url": "https://arxiv.org/abs/1411.4028",
                "authors": ["Edward Farhi", "Jeffrey Goldstone", "Sam Gutmann"],
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text());
    assert_eq!(res.body["authors"].as_array().unwrap().len(), 3);
    assert_eq!(res.body["authors"][0], "Edward Farhi");
    let id = res.id();

    let updated = app
        .put(
            &routes::publication(id),
            &json!({
                "title": "A Quantum Approximate Optimization Algorithm",
                "doi": "10.48550/arXiv.1411.4028",
                "authors": ["Edward Farhi"],
            }),
        )
        .await;
    assert_eq!(updated.status, 200, "{}", updated.text());
    assert_eq!(updated.body["doi"], "10.48550/arXiv.1411.4028");
    assert!(updated.body["url"].is_null());
    assert_eq!(updated.body["authors"], json!(["Edward Farhi"]));
}

#[tokio::test]
async fn publication_requires_authors() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::PUBLICATIONS,
            &json!({ "title": "Anonymous", "authors": [] }),
        )
        .await;

    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn publication_url_must_be_http() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::PUBLICATIONS,
            &json!({
                "title": "Paper",
                "url": "ftp://example.org/paper.pdf",
                "authors": ["A. Author"],
            }),
        )
        .await;

    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn deleting_publication_unlinks_it_everywhere() {
    let app = TestApp::spawn().await;
    let publication = app.create_publication("A fast quantum search").await;
    let algorithm = app.create_algorithm("Grover").await;
    let implementation = app.create_implementation(algorithm, "Qiskit Grover").await;
    app.post(
        &routes::algorithm_publications(algorithm),
        &json!({ "id": publication }),
    )
    .await;
    app.post(
        &routes::implementation_publications(implementation),
        &json!({ "id": publication }),
    )
    .await;

    assert_eq!(app.delete(&routes::publication(publication)).await.status, 204);
    assert_eq!(app.get(&routes::publication(publication)).await.status, 404);

    let algorithm_publications = app.get(&routes::algorithm_publications(algorithm)).await;
    assert_eq!(algorithm_publications.body["pagination"]["total_elements"], 0);
    let implementation_publications = app
        .get(&routes::implementation_publications(implementation))
        .await;
    assert_eq!(
        implementation_publications.body["pagination"]["total_elements"],
        0
    );
}

#[tokio::test]
async fn list_publications() {
    let app = TestApp::spawn().await;
    app.create_publication("One").await;
    app.create_publication("Two").await;

    let res = app.get(routes::PUBLICATIONS).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["pagination"]["total_elements"], 2);
    assert_eq!(res.body["pagination"]["page"], 0);
}
