//! Conversion logic between DTOs and domain entities.

use crate::domain::entity;
use crate::infrastructure::dto::websocket as dto;

// ========================================
// DTO → Domain Entity
// ========================================

impl From<dto::ChatMessage> for entity::ChatMessage {
    fn from(dto: dto::ChatMessage) -> Self {
        Self {
            username: dto.username,
            content: dto.content,
            timestamp: dto.timestamp,
        }
    }
}

// ========================================
// Domain Entity → DTO
// ========================================

impl From<entity::ChatMessage> for dto::ChatMessage {
    fn from(model: entity::ChatMessage) -> Self {
        Self {
            username: model.username,
            content: model.content,
            timestamp: model.timestamp,
        }
    }
}

impl From<&entity::ChatMessage> for dto::ChatMessage {
    fn from(model: &entity::ChatMessage) -> Self {
        model.clone().into()
    }
}
