// tests/common/mod.rs

#![allow(dead_code)]

use std::sync::Arc;

use tryout_service::{
    config::Config,
    models::exam::AnswerOption,
    repository::{Store, memory::MemoryStore},
    routes,
    state::AppState,
    utils::jwt::sign_jwt,
};

pub const JWT_SECRET: &str = "test_secret_for_integration_tests";

pub struct TestApp {
    pub address: String,
    pub store: Arc<MemoryStore>,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Bearer header value for a learner.
    pub fn bearer(&self, learner_id: i64) -> String {
        bearer_with_role(learner_id, "user")
    }
}

pub fn bearer_with_role(learner_id: i64, role: &str) -> String {
    let token = sign_jwt(learner_id, role, JWT_SECRET, 600).expect("Failed to sign token");
    format!("Bearer {}", token)
}

pub fn test_config(api_base_path: &str) -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        rust_log: "error".to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        cors_origin: "http://localhost:5173".to_string(),
        api_base_path: api_base_path.to_string(),
        log_dir: "logs".to_string(),
        db_max_connections: 1,
    }
}

/// Spawns the app on a random port, backed by a fresh in-memory store.
pub async fn spawn_app() -> TestApp {
    spawn_app_with_base_path("").await
}

pub async fn spawn_app_with_base_path(api_base_path: &str) -> TestApp {
    let store = Arc::new(MemoryStore::new());
    let shared: Arc<dyn Store> = store.clone();

    let state = AppState {
        store: shared,
        config: test_config(api_base_path),
    };
    let app = routes::create_router(state);

    // Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        store,
        client: reqwest::Client::new(),
    }
}

pub fn option(label: &str, content: &str, score: i64, is_correct: bool) -> AnswerOption {
    AnswerOption {
        label: label.to_string(),
        content: content.to_string(),
        score,
        is_correct,
    }
}

/// A tryout with one question: A (10 points, correct) and B (5 points).
pub struct SingleQuestionTryout {
    pub exam_id: i64,
    pub question_id: i64,
}

pub async fn seed_single_question_tryout(store: &MemoryStore, passing_grade: i64) -> SingleQuestionTryout {
    let question_type = store.add_question_type(passing_grade).await;
    let question_id = store
        .add_question(
            question_type,
            "Hasil dari 7 x 8 adalah?",
            Some("7 x 8 = 56"),
            vec![option("A", "56", 10, true), option("B", "54", 5, false)],
        )
        .await;
    let exam_id = store.add_exam("Tryout Matematika", 60).await;
    store.bind_question(exam_id, question_id).await;

    SingleQuestionTryout { exam_id, question_id }
}

/// Adds a learner who has bought the tryout.
pub async fn enrolled_learner(store: &MemoryStore, name: &str, exam_id: i64) -> i64 {
    let learner = store.add_learner(name).await;
    store.grant_access(learner, exam_id).await;
    learner
}
