use serde_json::json;
use uuid::Uuid;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn computing_resource_type_crud() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::COMPUTING_RESOURCE_TYPES,
            &json!({
                "name": "Qubit count",
                "datatype": "INTEGER",
                "description": "Number of physical qubits",
            }),
        )
        .await;
    assert_eq!(res.status, 201, "{}", res.text());
    assert_eq!(res.body["datatype"], "INTEGER");
    let id = res.id();

    let updated = app
        .put(
            &routes::computing_resource_type(id),
            &json!({ "name": "T1 time", "datatype": "FLOAT" }),
        )
        .await;
    assert_eq!(updated.status, 200);
    assert_eq!(updated.body["datatype"], "FLOAT");
    assert!(updated.body["description"].is_null());

    let listed = app.get(routes::COMPUTING_RESOURCE_TYPES).await;
    assert_eq!(listed.body["pagination"]["total_elements"], 1);

    assert_eq!(
        app.delete(&routes::computing_resource_type(id)).await.status,
        204
    );
    assert_eq!(
        app.get(&routes::computing_resource_type(id)).await.status,
        404
    );
}

#[tokio::test]
async fn unknown_datatype_is_rejected() {
    let app = TestApp::spawn().await;

    let res = app
        .post(
            routes::COMPUTING_RESOURCE_TYPES,
            &json!({ "name": "Colour", "datatype": "COLOUR" }),
        )
        .await;

    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn missing_type_is_not_found() {
    let app = TestApp::spawn().await;

    let res = app
        .get(&routes::computing_resource_type(Uuid::new_v4()))
        .await;

    assert_eq!(res.status, 404);
}
