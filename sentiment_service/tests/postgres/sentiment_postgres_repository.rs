use claims::{assert_matches, assert_ok};
use sentiment_service::{
    domain::entities::{sentiment::Sentiment, submitted_text::SubmittedText},
    ports::{SentimentRepository, SentimentRepositoryError},
};
use uuid::Uuid;

use crate::helpers::spawn_database;

fn text(s: &str) -> SubmittedText {
    SubmittedText::parse(s).unwrap()
}

#[tokio::test]
#[ignore = "needs a running Postgres server"]
async fn inserted_text_is_persisted_and_fetched_by_id() {
    // Arrange
    let database = spawn_database().await;
    let sentiment = Sentiment::new(0.5, 0.6).unwrap();

    // Act
    let inserted = assert_ok!(
        database
            .repository
            .insert_text(&text("I love this!"), sentiment)
            .await
    );

    // Asserts with a raw query that only 1 text exists
    let (stored_text,): (String,) = sqlx::query_as("SELECT text FROM texts")
        .fetch_one(&database.db_pool)
        .await
        .expect("Failed to fetch the stored text");
    assert_eq!(stored_text, "I love this!");

    let fetched = assert_ok!(database.repository.get_text_record(inserted.id).await);
    assert_eq!(fetched.id, inserted.id);
    assert_eq!(fetched.text, "I love this!");
    assert_eq!(fetched.sentiment, sentiment);
}

#[tokio::test]
#[ignore = "needs a running Postgres server"]
async fn unknown_text_id_is_not_found() {
    let database = spawn_database().await;

    assert_matches!(
        database.repository.get_text_record(Uuid::new_v4()).await,
        Err(SentimentRepositoryError::TextNotFound(_))
    );
}

#[tokio::test]
#[ignore = "needs a running Postgres server"]
async fn sentiments_are_listed_oldest_first() {
    let database = spawn_database().await;
    let first = Sentiment::new(0.1, 0.2).unwrap();
    let second = Sentiment::new(-0.4, 0.9).unwrap();

    database
        .repository
        .insert_text(&text("first"), first)
        .await
        .unwrap();
    database
        .repository
        .insert_text(&text("second"), second)
        .await
        .unwrap();

    assert_eq!(
        database.repository.list_sentiments().await.unwrap(),
        vec![first, second]
    );
}

#[tokio::test]
#[ignore = "needs a running Postgres server"]
async fn images_are_stored_without_referential_integrity() {
    let database = spawn_database().await;
    let text_id = Uuid::new_v4();

    database
        .repository
        .insert_image(text_id, vec![137, 80, 78, 71])
        .await
        .unwrap();
    database
        .repository
        .insert_image(text_id, vec![137, 80, 78, 71])
        .await
        .unwrap();

    let images: Vec<(Uuid, Vec<u8>)> =
        sqlx::query_as("SELECT text_id, image_bytes FROM images WHERE text_id = $1")
            .bind(text_id)
            .fetch_all(&database.db_pool)
            .await
            .unwrap();

    assert_eq!(images.len(), 2);
    assert!(images
        .iter()
        .all(|(_, bytes)| bytes.as_slice() == [137, 80, 78, 71]));
}
