use serde_json::json;
use uuid::Uuid;

use crate::common::{TestApp, routes};

mod provider_crud {
    use super::*;

    #[tokio::test]
    async fn secret_key_is_never_returned() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::PROVIDERS,
                &json!({
                    "name": "IBMQ",
                    "access_key": "ibm-access",
                    "secret_key": "ibm-secret",
                }),
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text());
        assert_eq!(res.body["access_key"], "ibm-access");
        assert!(res.body.get("secret_key").is_none());
        assert!(!res.text().contains("ibm-secret"));
    }

    #[tokio::test]
    async fn missing_secret_on_create_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                routes::PROVIDERS,
                &json!({ "name": "IBMQ", "access_key": "ibm-access" }),
            )
            .await;

        assert_eq!(res.status, 400);
    }

    #[tokio::test]
    async fn update_without_secret_keeps_it() {
        let app = TestApp::spawn().await;
        let id = app.create_provider("IBMQ").await;

        let res = app
            .put(
                &routes::provider(id),
                &json!({ "name": "IBM Quantum", "access_key": "rotated" }),
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text());
        assert_eq!(res.body["name"], "IBM Quantum");
        assert_eq!(res.body["access_key"], "rotated");
    }

    #[tokio::test]
    async fn deleting_provider_removes_qpus() {
        let app = TestApp::spawn().await;
        let id = app.create_provider("Rigetti").await;
        let qpu = app
            .post(
                &routes::qpus(id),
                &json!({ "name": "Aspen-9", "qubit_count": 32 }),
            )
            .await;
        assert_eq!(qpu.status, 201, "{}", qpu.text());

        assert_eq!(app.delete(&routes::provider(id)).await.status, 204);
        assert_eq!(app.get(&routes::provider(id)).await.status, 404);
        assert_eq!(app.get(&routes::qpu(id, qpu.id())).await.status, 404);
    }
}

mod provider_qpus {
    use super::*;

    #[tokio::test]
    async fn create_list_get_delete_qpu() {
        let app = TestApp::spawn().await;
        let provider = app.create_provider("IBMQ").await;

        let res = app
            .post(
                &routes::qpus(provider),
                &json!({
                    "name": "ibmq_16_melbourne",
                    "qubit_count": 15,
                    "t1": 65.0,
                    "max_gate_time": 0.3,
                }),
            )
            .await;
        assert_eq!(res.status, 201, "{}", res.text());
        assert_eq!(res.body["provider_id"], provider.to_string());
        assert_eq!(res.body["qubit_count"], 15);
        assert_eq!(res.href("provider").unwrap(), app.url(&routes::provider(provider)));
        let id = res.id();

        let listed = app.get(&routes::qpus(provider)).await;
        assert_eq!(listed.body["pagination"]["total_elements"], 1);

        let fetched = app.get(&routes::qpu(provider, id)).await;
        assert_eq!(fetched.status, 200);
        assert_eq!(fetched.body["t1"], 65.0);

        assert_eq!(app.delete(&routes::qpu(provider, id)).await.status, 204);
        assert_eq!(app.get(&routes::qpu(provider, id)).await.status, 404);
    }

    #[tokio::test]
    async fn qpu_is_scoped_to_its_provider() {
        let app = TestApp::spawn().await;
        let ibm = app.create_provider("IBMQ").await;
        let rigetti = app.create_provider("Rigetti").await;
        let qpu = app
            .post(&routes::qpus(ibm), &json!({ "name": "ibmq_lima", "qubit_count": 5 }))
            .await;

        let res = app.get(&routes::qpu(rigetti, qpu.id())).await;

        assert_eq!(res.status, 404);
    }

    #[tokio::test]
    async fn invalid_qpus_are_rejected() {
        let app = TestApp::spawn().await;
        let provider = app.create_provider("IBMQ").await;

        let no_qubits = app
            .post(&routes::qpus(provider), &json!({ "name": "empty", "qubit_count": 0 }))
            .await;
        assert_eq!(no_qubits.status, 400);

        let negative_t1 = app
            .post(
                &routes::qpus(provider),
                &json!({ "name": "odd", "qubit_count": 5, "t1": -1.0 }),
            )
            .await;
        assert_eq!(negative_t1.status, 400);
    }

    #[tokio::test]
    async fn qpu_of_missing_provider_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app
            .post(
                &routes::qpus(Uuid::new_v4()),
                &json!({ "name": "ghost", "qubit_count": 5 }),
            )
            .await;

        assert_eq!(res.status, 404);
    }
}
