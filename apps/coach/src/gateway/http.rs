use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info};

use super::{
    AnalyzeRequest, ErrorBody, FeedbackRequest, Gateway, GatewayError, GenerateRequest,
    QuestionsRequest, ResultBody, StructuredBody, ANALYZE_PATH, FEEDBACK_PATH, GENERATE_PATH,
    QUESTIONS_PATH,
};
use crate::config::{CoachConfig, FeedbackFormat};
use crate::interview::Feedback;

/// reqwest-backed gateway client. The timeout from [`CoachConfig`] bounds every call.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    feedback_format: FeedbackFormat,
}

impl HttpGateway {
    pub fn new(config: &CoachConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GatewayError::Transport {
                path: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.gateway_url.trim_end_matches('/').to_string(),
            feedback_format: config.feedback_format,
        })
    }

    pub fn feedback_format(&self) -> FeedbackFormat {
        self.feedback_format
    }

    /// POSTs `body` as JSON and returns the raw response text of a 2xx reply.
    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<String, GatewayError> {
        let transport = |e: reqwest::Error| GatewayError::Transport {
            path: path.to_string(),
            message: e.to_string(),
        };

        info!(path, "Calling gateway");

        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        let text = response.text().await.map_err(transport)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(GatewayError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        debug!(path, bytes = text.len(), "Gateway responded");
        Ok(text)
    }

    async fn post_for_result<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<String, GatewayError> {
        let text = self.post(path, body).await?;
        decode::<ResultBody>(path, &text).map(|b| b.result)
    }
}

fn decode<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, GatewayError> {
    serde_json::from_str(text).map_err(|e| GatewayError::Malformed {
        path: path.to_string(),
        reason: e.to_string(),
    })
}

/// Normalizes a feedback body according to the configured format.
pub(crate) fn decode_feedback(format: FeedbackFormat, text: &str) -> Result<Feedback, GatewayError> {
    match format {
        FeedbackFormat::Text => decode::<ResultBody>(FEEDBACK_PATH, text).map(|b| Feedback::Text(b.result)),
        FeedbackFormat::Structured => {
            decode::<StructuredBody>(FEEDBACK_PATH, text).map(|b| Feedback::Structured(b.feedback))
        }
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn generate_interview_questions(
        &self,
        request: &QuestionsRequest,
    ) -> Result<String, GatewayError> {
        self.post_for_result(QUESTIONS_PATH, request).await
    }

    async fn get_interview_feedback(
        &self,
        question: &str,
        answer: &str,
    ) -> Result<Feedback, GatewayError> {
        let text = self
            .post(FEEDBACK_PATH, &FeedbackRequest { question, answer })
            .await?;
        decode_feedback(self.feedback_format, &text)
    }

    async fn analyze_resume(&self, request: &AnalyzeRequest) -> Result<String, GatewayError> {
        self.post_for_result(ANALYZE_PATH, request).await
    }

    async fn generate_resume(&self, request: &GenerateRequest) -> Result<String, GatewayError> {
        self.post_for_result(GENERATE_PATH, request).await
    }
}
