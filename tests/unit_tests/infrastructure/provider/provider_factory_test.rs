use std::time::Duration;

use transcribe_gateway::application::ports::{InitializationError, ProviderFactory};
use transcribe_gateway::infrastructure::provider::{ProviderKind, TranscriptionProviderFactory};

#[tokio::test]
async fn given_gemini_without_api_key_when_creating_then_returns_missing_key_error() {
    let factory = TranscriptionProviderFactory::new(ProviderKind::Gemini, None, None, None);

    let result = factory.create().await;

    assert!(matches!(
        result,
        Err(InitializationError::MissingApiKey("Gemini"))
    ));
}

#[tokio::test]
async fn given_blank_api_key_when_creating_openai_then_returns_missing_key_error() {
    let factory = TranscriptionProviderFactory::new(
        ProviderKind::OpenAi,
        Some("   ".to_string()),
        None,
        None,
    );

    let result = factory.create().await;

    assert!(matches!(result, Err(InitializationError::MissingApiKey(_))));
}

#[tokio::test]
async fn given_gemini_with_api_key_when_creating_then_returns_gemini_provider() {
    let factory = TranscriptionProviderFactory::new(
        ProviderKind::Gemini,
        Some("key".to_string()),
        Some("gemini-2.5-flash".to_string()),
        None,
    )
    .with_request_timeout(Duration::from_secs(120));

    let provider = factory.create().await.unwrap();

    assert_eq!(provider.name(), "gemini");
}

#[tokio::test]
async fn given_mock_kind_when_creating_then_no_api_key_is_needed() {
    let factory = TranscriptionProviderFactory::new(ProviderKind::Mock, None, None, None);

    let provider = factory.create().await.unwrap();

    assert_eq!(provider.name(), "mock");
    assert_eq!(factory.kind(), ProviderKind::Mock);
}
