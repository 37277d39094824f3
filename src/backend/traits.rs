use crate::{
    error::Result,
    models::{GenerateRequest, GenerateResponse},
};
use async_trait::async_trait;

/// Anything that can turn a generate request into a decoded reply.
///
/// Implementations report transport and HTTP status failures as errors and
/// return every 2xx body untouched; interpreting an `error` field inside the
/// body is left to [`crate::AdClient`].
#[async_trait]
pub trait AdBackend: Send + Sync {
    async fn generate(&self, request: &GenerateRequest) -> Result<GenerateResponse>;

    async fn health_check(&self) -> Result<bool>;

    fn name(&self) -> &str;
}
