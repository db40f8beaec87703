use sentiment_service::routes::WELCOME_MESSAGE;

use crate::helpers::spawn_app;

#[tokio::test]
async fn root_lists_the_available_endpoints() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(&app.address)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(200, response.status().as_u16());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["message"], WELCOME_MESSAGE);
    for endpoint in ["/analyze/", "/graph/?text_id=ID", "/dashboard/"] {
        assert!(body["message"].as_str().unwrap().contains(endpoint));
    }
}
