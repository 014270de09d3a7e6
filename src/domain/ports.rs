use crate::domain::model::{AnalysisOutput, JobPosting};
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

pub trait ConfigProvider: Send + Sync {
    fn keywords(&self) -> &[String];
    fn locations(&self) -> &[String];
    fn limit_per_site(&self) -> usize;
    fn concurrent_requests(&self) -> usize;
    fn top_n(&self) -> usize;
    fn output_path(&self) -> &str;
}

/// One job board. Implementations carry their keyword list and fetch
/// postings for a single location per call.
#[async_trait]
pub trait JobSource: Send + Sync {
    fn name(&self) -> &str;
    async fn fetch_jobs(&self, location: &str, limit_per_site: usize) -> Result<Vec<JobPosting>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<JobPosting>>;
    async fn transform(&self, jobs: Vec<JobPosting>) -> Result<AnalysisOutput>;
    async fn load(&self, output: AnalysisOutput) -> Result<String>;
}
