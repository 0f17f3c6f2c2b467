use pokedex_test::MemoryTeamStore;
use serde_json::{json, Value};

use crate::common::{run_app_test, run_app_test_with_store};

#[tokio::test]
async fn empty_list_has_message() {
    run_app_test(|app| async move {
        let response = app.client.get("pokemon_team/v1/all").send().await?;
        assert_eq!(response.status().as_u16(), 200);
        let result: Value = response.json().await?;
        assert_eq!(result, json!({ "message": "no teams found" }));
        Ok(())
    })
    .await
}

#[tokio::test]
async fn add_team_from_form() {
    run_app_test(|app| async move {
        let response = app
            .client
            .post("pokemon/v1/add-team")
            .form(&[
                ("name", "Pikachu"),
                ("nickname", "  <b>Sparky</b>  "),
                ("stats", r##"{"hp":35}"##),
                ("ability", "Static"),
                ("held_item", "Light Ball"),
            ])
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 200);
        let result: Value = response.json().await?;
        assert_eq!(
            result,
            json!({ "message": "Pokémon team added successfully", "data": 1 })
        );

        let teams: Value = app.client.get("pokemon_team/v1/all").send().await?.json().await?;
        let teams = teams.as_array().expect("team list");
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0]["id"], 1);
        assert_eq!(teams[0]["name"], "Pikachu");
        assert_eq!(teams[0]["nickname"], "Sparky");
        assert_eq!(teams[0]["stats"], r##"{"hp":35}"##);
        assert_eq!(teams[0]["held_item"], "Light Ball");
        assert_eq!(teams[0]["updated_at"], Value::Null);
        assert!(teams[0]["created_at"].is_string());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn add_team_from_json() {
    run_app_test(|app| async move {
        let response = app
            .client
            .post("pokemon/v1/add-team")
            .json(&json!({
                "name": "Snorlax",
                "nickname": "Lump",
                "stats": { "hp": 160 },
                "ability": "Thick Fat"
            }))
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 200);

        let rows = app.teams.rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].stats, r##"{"hp":160}"##);
        assert_eq!(rows[0].held_item, None);
        Ok(())
    })
    .await
}

#[tokio::test]
async fn missing_field_is_rejected() {
    run_app_test(|app| async move {
        let response = app
            .client
            .post("pokemon/v1/add-team")
            .form(&[("name", "Pikachu"), ("stats", "{}"), ("ability", "Static")])
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 400);
        let result: Value = response.json().await?;
        assert_eq!(result["error"]["kind"], "bad_request");
        assert!(app.teams.rows().is_empty());
        Ok(())
    })
    .await
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    run_app_test(|app| async move {
        let response = app
            .client
            .post("pokemon/v1/add-team")
            .header("content-type", "application/json")
            .body("{ not json")
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 400);
        let result: Value = response.json().await?;
        assert_eq!(result["error"]["kind"], "bad_request");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn store_failure_reports_insert_error() {
    run_app_test_with_store(MemoryTeamStore::with_schema(), |app| async move {
        app.teams.set_failing(true);
        let response = app
            .client
            .post("pokemon/v1/add-team")
            .form(&[
                ("name", "Pikachu"),
                ("nickname", "Sparky"),
                ("stats", "{}"),
                ("ability", "Static"),
            ])
            .send()
            .await?;
        assert_eq!(response.status().as_u16(), 500);
        let result: Value = response.json().await?;
        assert_eq!(result["error"]["kind"], "db_insert_error");
        Ok(())
    })
    .await
}

#[tokio::test]
async fn table_is_created_once() {
    run_app_test(|app| async move {
        for _ in 0..3 {
            let response = app
                .client
                .post("pokemon/v1/add-team")
                .form(&[
                    ("name", "Eevee"),
                    ("nickname", "Fluff"),
                    ("stats", "{}"),
                    ("ability", "Adaptability"),
                ])
                .send()
                .await?;
            assert_eq!(response.status().as_u16(), 200);
        }

        assert_eq!(app.teams.ddl_count(), 1);
        assert_eq!(app.teams.rows().len(), 3);
        Ok(())
    })
    .await
}
