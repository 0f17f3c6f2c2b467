use serde_json::{json, Value};

use crate::common::run_app_test;

#[tokio::test]
async fn smoke_test() {
    run_app_test(|app| async move {
        let response = app.root_client.get("health").send().await?;

        assert_eq!(
            response.status().as_u16(),
            200,
            "response status code should be 200"
        );
        let body: Value = response.json().await?;
        assert_eq!(body, json!({ "database": true, "healthy": true }));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn health_reports_store_failure() {
    run_app_test(|app| async move {
        app.teams.set_failing(true);
        let response = app.root_client.get("health").send().await?;
        assert_eq!(response.status().as_u16(), 200);

        let body: Value = response.json().await?;
        assert_eq!(body, json!({ "database": false, "healthy": false }));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn responses_carry_request_id() {
    run_app_test(|app| async move {
        let response = app.root_client.get("health").send().await?;
        assert!(response.headers().contains_key("x-request-id"));
        Ok(())
    })
    .await
}
