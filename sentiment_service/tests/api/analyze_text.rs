use std::sync::Arc;

use serde_json::json;
use tokio::task::JoinSet;
use uuid::Uuid;

use crate::helpers::{spawn_app, spawn_app_with, FailingScorer, UnavailableRepository};

#[tokio::test]
async fn analyze_returns_a_200_with_scores_and_id_for_valid_text() {
    // Arrange
    let app = spawn_app().await;

    // Act
    let response = app.post_analyze(&json!({ "text": "I love this!" })).await;

    // Assert
    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["text"], "I love this!");

    let polarity = body["sentiment"]["polarity"].as_f64().unwrap();
    let subjectivity = body["sentiment"]["subjectivity"].as_f64().unwrap();
    assert!(polarity > 0.0 && polarity <= 1.0);
    assert!((0.0..=1.0).contains(&subjectivity));

    let id = body["id"].as_str().unwrap();
    assert!(!id.is_empty());
    assert!(Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn analyze_persists_the_text_with_its_sentiment() {
    let app = spawn_app().await;

    let response = app
        .post_analyze(&json!({ "text": "The service was terrible" }))
        .await;
    let body: serde_json::Value = response.json().await.unwrap();

    // Only 1 record should exist
    let records = app.repository.text_records().await;
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record.id.to_string(), body["id"].as_str().unwrap());
    assert_eq!(record.text, "The service was terrible");
    assert_eq!(
        record.sentiment.polarity(),
        body["sentiment"]["polarity"].as_f64().unwrap()
    );
    assert!(record.sentiment.polarity() < 0.0);
}

#[tokio::test]
async fn analyze_returns_a_400_when_text_is_missing_or_empty() {
    let app = spawn_app().await;
    let test_cases = vec![
        (json!({ "text": "" }), "empty text"),
        (json!({ "text": "   " }), "whitespace only text"),
        (json!({ "text": null }), "null text"),
        (json!({}), "missing text"),
    ];

    for (body, description) in test_cases {
        let response = app.post_analyze(&body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 Bad Request when the payload was {}.",
            description
        );

        let body: serde_json::Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Text input is required.");
    }

    assert!(app.repository.text_records().await.is_empty());
}

#[tokio::test]
async fn analyze_returns_a_400_for_a_malformed_body() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(&format!("{}/analyze/", &app.address))
        .header("Content-Type", "application/json")
        .body(r#"{"text": "#)
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(400, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
    assert!(app.repository.text_records().await.is_empty());
}

#[tokio::test]
async fn analyze_is_served_without_trailing_slash() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .post(&format!("{}/analyze", &app.address))
        .json(&json!({ "text": "Nice work" }))
        .send()
        .await
        .expect("Failed to execute request.");

    assert_eq!(200, response.status().as_u16());
}

#[tokio::test]
async fn analyze_returns_an_opaque_500_when_scoring_fails() {
    let app = spawn_app_with(|mut context| {
        context.scorer = Arc::new(FailingScorer);
        context
    })
    .await;

    let response = app.post_analyze(&json!({ "text": "I love this!" })).await;

    assert_eq!(500, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "An error occurred while analyzing the text.");

    // Nothing is stored when scoring fails
    assert!(app.repository.text_records().await.is_empty());
}

#[tokio::test]
async fn analyze_returns_an_opaque_500_when_the_store_is_unavailable() {
    let app = spawn_app_with(|mut context| {
        context.repository = Arc::new(UnavailableRepository);
        context
    })
    .await;

    let response = app.post_analyze(&json!({ "text": "I love this!" })).await;

    assert_eq!(500, response.status().as_u16());

    let body = response.text().await.unwrap();
    assert!(!body.contains("connection refused"));
}

#[tokio::test]
async fn submitting_the_same_text_twice_creates_two_records() {
    let app = spawn_app().await;

    let first_id = app.submit_text("Same old story").await;
    let second_id = app.submit_text("Same old story").await;

    assert_ne!(first_id, second_id);
    assert_eq!(app.repository.text_records().await.len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_submissions_are_all_stored() {
    let app = spawn_app().await;
    let nb_submissions = 10;

    let mut submissions = JoinSet::new();
    for index in 0..nb_submissions {
        let client = app.api_client.clone();
        let url = format!("{}/analyze/", &app.address);

        submissions.spawn(async move {
            client
                .post(&url)
                .json(&json!({ "text": format!("Good review number {}", index) }))
                .send()
                .await
                .expect("Failed to execute request.")
                .status()
                .as_u16()
        });
    }

    while let Some(status) = submissions.join_next().await {
        assert_eq!(200, status.unwrap());
    }

    let records = app.repository.text_records().await;
    assert_eq!(records.len(), nb_submissions);

    let mut ids: Vec<Uuid> = records.iter().map(|record| record.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), nb_submissions);
}

#[tokio::test]
async fn analyze_returns_a_200_for_a_long_run_of_intensifiers() {
    let app = spawn_app().await;
    let test_cases = vec![
        (format!("{}useful", "so ".repeat(4000)), "intensified neutral word"),
        (
            format!("{0}good {0}bad", "so ".repeat(4000)),
            "intensified opposite words",
        ),
    ];

    for (text, description) in test_cases {
        let response = app.post_analyze(&json!({ "text": text })).await;

        assert_eq!(
            200,
            response.status().as_u16(),
            "The API did not succeed with an {}.",
            description
        );

        let body: serde_json::Value = response.json().await.unwrap();
        let polarity = body["sentiment"]["polarity"].as_f64().unwrap();
        let subjectivity = body["sentiment"]["subjectivity"].as_f64().unwrap();
        assert!((-1.0..=1.0).contains(&polarity));
        assert!((0.0..=1.0).contains(&subjectivity));
    }
}
