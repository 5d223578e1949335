/// Merge of challenge input with static metadata.
pub mod augmentation;
/// OpenAPI documentation generation.
pub mod documentation;
/// Health check service.
pub mod health_service;
/// Overlay page rendering.
pub mod page_service;
/// Server-Sent Events streaming service.
pub mod sse_service;
/// Validation and application of state updates.
pub mod update_service;
