#[cfg(test)]
mod tests {
    use crate::config::LLMConfig;
    use crate::llm::client::{LLMClient, LlmError, chat_model_ids};
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer, api_key: &str) -> LLMClient {
        let config = LLMConfig {
            api_base_url: server.uri(),
            ..Default::default()
        };
        LLMClient::new(&config, api_key).unwrap()
    }

    #[tokio::test]
    async fn test_chat_sends_two_messages_and_reads_usage() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({
                "model": "gpt-4",
                "temperature": 0.5,
                "messages": [
                    {"role": "system", "content": "sys"},
                    {"role": "user", "content": "hello"}
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"subtopics\": []}"}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 5, "total_tokens": 17}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let reply = client_for(&server, "sk-test")
            .chat("gpt-4", 0.5, "sys", "hello")
            .await
            .unwrap();

        assert_eq!(reply.content, "{\"subtopics\": []}");
        let usage = reply.usage.unwrap();
        assert_eq!(usage.total_tokens, Some(17));
        assert_eq!(usage.prompt_tokens, Some(12));
        assert_eq!(usage.completion_tokens, Some(5));
    }

    #[tokio::test]
    async fn test_chat_reports_http_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
            .mount(&server)
            .await;

        let err = client_for(&server, "sk-revoked")
            .chat("gpt-4", 0.2, "sys", "hello")
            .await
            .unwrap_err();

        assert!(matches!(err, LlmError::Status { .. }));
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[tokio::test]
    async fn test_chat_without_choices_fails() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let err = client_for(&server, "sk-test")
            .chat("gpt-4", 0.2, "sys", "hello")
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::NoChoices));
    }

    #[tokio::test]
    async fn test_list_models_filters_and_sorts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [
                    {"id": "gpt-4"},
                    {"id": "whisper-1"},
                    {"id": "gpt-3.5-turbo"},
                    {"id": "gpt-4"},
                    {"id": 42}
                ]
            })))
            .mount(&server)
            .await;

        let models = client_for(&server, "sk-test").list_models().await;
        assert_eq!(models, vec!["gpt-3.5-turbo", "gpt-4"]);
    }

    #[tokio::test]
    async fn test_list_models_falls_back_to_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        assert!(client_for(&server, "sk-test").list_models().await.is_empty());
        assert!(client_for(&server, "").list_models().await.is_empty());
    }

    #[test]
    fn test_chat_model_ids() {
        let ids = vec![
            "gpt-4o".to_string(),
            "dall-e-3".to_string(),
            "gpt-3.5-turbo".to_string(),
        ];
        assert_eq!(chat_model_ids(ids), vec!["gpt-3.5-turbo", "gpt-4o"]);
    }
}
