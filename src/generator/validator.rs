use crate::generator::error::SubtopicGenerationError;
use crate::generator::types::GenerationRequest;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 6;

/// 在发起任何外部调用之前校验请求
pub fn validate(request: &GenerationRequest) -> Result<(), SubtopicGenerationError> {
    if request.topics.is_empty() {
        return Err(SubtopicGenerationError::invalid_request(
            "At least one topic is required.",
        ));
    }

    if !(MIN_LEVEL..=MAX_LEVEL).contains(&request.max_level) {
        return Err(SubtopicGenerationError::invalid_request(
            "Depth must be between 1 and 6 levels.",
        ));
    }

    if request.topics.iter().any(|topic| topic.trim().is_empty()) {
        return Err(SubtopicGenerationError::invalid_request(
            "Topics must not be blank.",
        ));
    }

    if !request.temperature.is_finite() || !(0.0..=1.0).contains(&request.temperature) {
        return Err(SubtopicGenerationError::invalid_request(
            "Temperature must be between 0.0 and 1.0.",
        ));
    }

    Ok(())
}
