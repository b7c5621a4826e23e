// tests/api_tests.rs

mod common;

use common::{bearer_with_role, enrolled_learner, seed_single_question_tryout, spawn_app, spawn_app_with_base_path};
use serde_json::{Value, json};

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/api/health"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn unknown_path_is_404() {
    let app = spawn_app().await;

    let response = app
        .client
        .get(app.url("/random_path_that_does_not_exist"))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn tryout_routes_require_token() {
    let app = spawn_app().await;
    let tryout = seed_single_question_tryout(&app.store, 10).await;

    let response = app
        .client
        .get(app.url(&format!("/api/user/tryout/{}", tryout.exam_id)))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let response = app
        .client
        .get(app.url(&format!("/api/user/tryout/{}", tryout.exam_id)))
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);
}

#[tokio::test]
async fn unknown_role_is_forbidden() {
    let app = spawn_app().await;
    let tryout = seed_single_question_tryout(&app.store, 10).await;
    let learner = enrolled_learner(&app.store, "Guest", tryout.exam_id).await;

    let response = app
        .client
        .get(app.url(&format!("/api/user/tryout/{}", tryout.exam_id)))
        .header("Authorization", bearer_with_role(learner, "guest"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 403);
}

#[tokio::test]
async fn get_tryout_hides_answer_key() {
    let app = spawn_app().await;
    let tryout = seed_single_question_tryout(&app.store, 10).await;
    let learner = enrolled_learner(&app.store, "Dewi", tryout.exam_id).await;

    let response = app
        .client
        .get(app.url(&format!("/api/user/tryout/{}", tryout.exam_id)))
        .header("Authorization", app.bearer(learner))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["id"], tryout.exam_id);
    assert_eq!(body["judul_tryout"], "Tryout Matematika");
    assert_eq!(body["durasi"], 60);
    assert_eq!(body["passingGrade"], 10);

    let soal = body["soal"].as_array().unwrap();
    assert_eq!(soal.len(), 1);
    assert_eq!(soal[0]["bank_soal_id"], tryout.question_id);
    for opsi in soal[0]["opsi"].as_array().unwrap() {
        let keys: Vec<&String> = opsi.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2, "unexpected option fields: {:?}", keys);
        assert!(opsi.get("label").is_some());
        assert!(opsi.get("konten").is_some());
    }
}

#[tokio::test]
async fn unpurchased_tryout_looks_missing() {
    let app = spawn_app().await;
    let tryout = seed_single_question_tryout(&app.store, 10).await;
    let outsider = app.store.add_learner("Outsider").await;

    let present = app
        .client
        .get(app.url(&format!("/api/user/tryout/{}", tryout.exam_id)))
        .header("Authorization", app.bearer(outsider))
        .send()
        .await
        .unwrap();
    assert_eq!(present.status().as_u16(), 404);

    let submit = app
        .client
        .post(app.url(&format!("/api/user/tryout/{}/submit", tryout.exam_id)))
        .header("Authorization", app.bearer(outsider))
        .json(&json!({ "answers": { tryout.question_id.to_string(): "A" } }))
        .send()
        .await
        .unwrap();
    assert_eq!(submit.status().as_u16(), 404);

    let missing = app
        .client
        .get(app.url("/api/user/tryout/987654"))
        .header("Authorization", app.bearer(outsider))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status().as_u16(), 404);
}

#[tokio::test]
async fn submit_correct_answer() {
    let app = spawn_app().await;
    let tryout = seed_single_question_tryout(&app.store, 10).await;
    let learner = enrolled_learner(&app.store, "Eka", tryout.exam_id).await;

    let response = app
        .client
        .post(app.url(&format!("/api/user/tryout/{}/submit", tryout.exam_id)))
        .header("Authorization", app.bearer(learner))
        .json(&json!({ "answers": { tryout.question_id.to_string(): "A" } }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let result: Value = response.json().await.unwrap();
    assert_eq!(result["totalScore"], 10);
    assert_eq!(result["maxScore"], 15);
    let percentage = result["percentage"].as_f64().unwrap();
    assert!((percentage - 200.0 / 3.0).abs() < 1e-9);
    assert_eq!(result["passingGrade"], 10);
    assert_eq!(result["lulus"], true);

    let detail = &result["details"][0];
    assert_eq!(detail["bank_soal_id"], tryout.question_id);
    assert_eq!(detail["soal"], "Hasil dari 7 x 8 adalah?");
    assert_eq!(detail["pembahasan"], "7 x 8 = 56");
    assert_eq!(detail["jawaban_user"], "A");
    assert_eq!(detail["jawaban_benar"], "A");
    assert_eq!(detail["opsi"].as_array().unwrap().len(), 2);
    assert!(detail["opsi"][0].get("skor").is_none());
}

#[tokio::test]
async fn submit_wrong_answer() {
    let app = spawn_app().await;
    let tryout = seed_single_question_tryout(&app.store, 10).await;
    let learner = enrolled_learner(&app.store, "Fajar", tryout.exam_id).await;

    let result: Value = app
        .client
        .post(app.url(&format!("/api/user/tryout/{}/submit", tryout.exam_id)))
        .header("Authorization", app.bearer(learner))
        .json(&json!({ "answers": { tryout.question_id.to_string(): "B" } }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(result["totalScore"], 0);
    assert_eq!(result["maxScore"], 15);
    assert_eq!(result["percentage"].as_f64(), Some(0.0));
    assert_eq!(result["lulus"], false);
}

#[tokio::test]
async fn submit_empty_answers_counts_as_unanswered() {
    let app = spawn_app().await;
    let tryout = seed_single_question_tryout(&app.store, 10).await;
    let learner = enrolled_learner(&app.store, "Gita", tryout.exam_id).await;

    let result: Value = app
        .client
        .post(app.url(&format!("/api/user/tryout/{}/submit", tryout.exam_id)))
        .header("Authorization", app.bearer(learner))
        .json(&json!({ "answers": { "not-a-number": "A", "123456": "A" } }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(result["totalScore"], 0);
    assert_eq!(result["details"][0]["jawaban_user"], Value::Null);
    assert_eq!(result["details"][0]["jawaban_benar"], "A");
}

#[tokio::test]
async fn submit_without_answers_is_bad_request() {
    let app = spawn_app().await;
    let tryout = seed_single_question_tryout(&app.store, 10).await;
    let learner = enrolled_learner(&app.store, "Hadi", tryout.exam_id).await;

    let response = app
        .client
        .post(app.url(&format!("/api/user/tryout/{}/submit", tryout.exam_id)))
        .header("Authorization", app.bearer(learner))
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing answers");

    // Nothing was recorded.
    let dashboard: Value = app
        .client
        .get(app.url(&format!("/api/user/tryout/{}/dashboard", tryout.exam_id)))
        .header("Authorization", app.bearer(learner))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(dashboard["total_peserta"], 0);
}

#[tokio::test]
async fn attempt_review_is_owner_only() {
    let app = spawn_app().await;
    let tryout = seed_single_question_tryout(&app.store, 10).await;
    let owner = enrolled_learner(&app.store, "Indah", tryout.exam_id).await;
    let other = enrolled_learner(&app.store, "Joko", tryout.exam_id).await;

    app.client
        .post(app.url(&format!("/api/user/tryout/{}/submit", tryout.exam_id)))
        .header("Authorization", app.bearer(owner))
        .json(&json!({ "answers": { tryout.question_id.to_string(): "B" } }))
        .send()
        .await
        .unwrap();

    let dashboard: Value = app
        .client
        .get(app.url(&format!("/api/user/tryout/{}/dashboard", tryout.exam_id)))
        .header("Authorization", app.bearer(owner))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let attempt_id = dashboard["attempts"][0]["id"].as_i64().unwrap();
    let path = format!("/api/user/tryout/{}/hasil/{}", tryout.exam_id, attempt_id);

    let own = app
        .client
        .get(app.url(&path))
        .header("Authorization", app.bearer(owner))
        .send()
        .await
        .unwrap();
    assert_eq!(own.status().as_u16(), 200);
    let attempt: Value = own.json().await.unwrap();
    assert_eq!(attempt["id"], attempt_id);
    assert_eq!(attempt["total_score"], 0);
    assert_eq!(attempt["max_score"], 15);
    assert_eq!(attempt["lulus"], false);
    assert_eq!(attempt["details"][0]["jawaban_user"], "B");
    assert_eq!(attempt["details"][0]["jawaban_benar"], "A");
    assert!(attempt.get("created_at").is_some());
    assert!(attempt.get("user_id").is_none());

    let foreign = app
        .client
        .get(app.url(&path))
        .header("Authorization", app.bearer(other))
        .send()
        .await
        .unwrap();
    assert_eq!(foreign.status().as_u16(), 404);
}

#[tokio::test]
async fn list_tryouts_shows_purchased_only() {
    let app = spawn_app().await;
    let bought = seed_single_question_tryout(&app.store, 10).await;
    let _not_bought = seed_single_question_tryout(&app.store, 10).await;
    let learner = enrolled_learner(&app.store, "Kiki", bought.exam_id).await;

    let exams: Vec<Value> = app
        .client
        .get(app.url("/api/user/tryout"))
        .header("Authorization", app.bearer(learner))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(exams.len(), 1);
    assert_eq!(exams[0]["id"], bought.exam_id);
}

#[tokio::test]
async fn api_is_mounted_under_base_path() {
    let app = spawn_app_with_base_path("/tyasacademy").await;

    for path in ["/tyasacademy/api/health", "/api/health"] {
        let response = app.client.get(app.url(path)).send().await.unwrap();
        assert_eq!(response.status().as_u16(), 200, "path {}", path);
    }
}

#[tokio::test]
async fn openapi_document_is_served() {
    let app = spawn_app().await;

    let doc: Value = app
        .client
        .get(app.url("/api-docs/openapi.json"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(doc["paths"]["/api/user/tryout/{id}/submit"].is_object());
}
