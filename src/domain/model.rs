use crate::domain::error::SignAidError;
use serde::{Deserialize, Serialize};

// 请求类型：整句翻译 / 单词词典查询
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Sentence,
    Word,
}

impl RequestKind {
    /// Backend path for this kind of request
    pub fn endpoint(&self) -> &'static str {
        match self {
            RequestKind::Sentence => "/translate",
            RequestKind::Word => "/hamnosys",
        }
    }

    /// JSON field the input text travels in
    pub fn body_field(&self) -> &'static str {
        match self {
            RequestKind::Sentence => "sentence",
            RequestKind::Word => "word",
        }
    }

    /// Prefix written in front of a successful payload
    pub fn result_label(&self) -> &'static str {
        match self {
            RequestKind::Sentence => "PSL Translation",
            RequestKind::Word => "Hamnosys Representation",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationRequest {
    pub kind: RequestKind,
    pub text: String,
}

impl TranslationRequest {
    pub fn new(kind: RequestKind, text: &str) -> Result<Self, SignAidError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SignAidError::Validation(format!(
                "No {} provided",
                kind.body_field()
            )));
        }

        Ok(Self {
            kind,
            text: text.to_string(),
        })
    }

    pub fn body(&self) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert(
            self.kind.body_field().to_string(),
            serde_json::Value::String(self.text.clone()),
        );
        serde_json::Value::Object(body)
    }
}

// 单次请求的结果，下一次请求会覆盖
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslationResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TranslationResult {
    pub fn success(payload: String) -> Self {
        Self {
            success: true,
            payload: Some(payload),
            error: None,
        }
    }

    pub fn failure(err: &SignAidError) -> Self {
        Self {
            success: false,
            payload: None,
            error: Some(err.to_string()),
        }
    }
}

impl From<&Result<String, SignAidError>> for TranslationResult {
    fn from(outcome: &Result<String, SignAidError>) -> Self {
        match outcome {
            Ok(payload) => Self::success(payload.clone()),
            Err(e) => Self::failure(e),
        }
    }
}

/// Envelope returned by every clinic records operation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    pub fn into_result(self) -> Result<T, String> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            _ => Err(self.error.unwrap_or_else(|| "Unknown error".to_string())),
        }
    }
}
