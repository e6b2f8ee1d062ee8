use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// External group-naming service. One batched request per partition:
/// every group's member names go in, one display name per group comes
/// back in the same order. Callers treat any failure as non-fatal.
#[async_trait]
pub trait GroupNamer: Send + Sync {
    async fn suggest_names(&self, groups: &[Vec<String>]) -> Result<Vec<String>>;
}
