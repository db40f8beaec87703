use once_cell::sync::Lazy;
use sentiment_service::{
    configuration::{get_configuration, Settings, StorageBackend},
    ports::ChartRendererError,
    startup::{Application, ApplicationBuildError},
};

use crate::helpers::TRACING;

fn memory_configuration() -> Settings {
    let mut configuration = get_configuration().expect("Failed to read configuration.");
    configuration.application.port = 0;
    configuration.storage.backend = StorageBackend::Memory;
    configuration
}

#[tokio::test]
async fn application_built_from_settings_serves_requests_with_the_memory_backend() {
    // Arrange
    Lazy::force(&TRACING);
    let application = Application::build(memory_configuration(), Some(1))
        .await
        .expect("Failed to build application.");
    let address = format!("http://127.0.0.1:{}", application.port());
    let _ = tokio::spawn(application.run_until_stopped());
    let client = reqwest::Client::new();

    // Act
    let analyze_response = client
        .post(&format!("{}/analyze/", &address))
        .json(&serde_json::json!({ "text": "What a great day" }))
        .send()
        .await
        .expect("Failed to execute request.");
    let dashboard_response = client
        .get(&format!("{}/dashboard/", &address))
        .send()
        .await
        .expect("Failed to execute request.");

    // Assert
    assert_eq!(200, analyze_response.status().as_u16());
    assert_eq!(200, dashboard_response.status().as_u16());
}

#[tokio::test]
async fn application_is_not_built_with_a_too_small_chart() {
    Lazy::force(&TRACING);
    let mut configuration = memory_configuration();
    configuration.chart.width = 10;

    match Application::build(configuration, Some(1)).await {
        Err(ApplicationBuildError::ChartSettingsError(ChartRendererError::InvalidDimensions {
            width: 10,
            ..
        })) => {}
        Err(error) => panic!("Unexpected build error: {:?}", error),
        Ok(_) => panic!("The application was built with a 10 pixels wide chart"),
    }
}
