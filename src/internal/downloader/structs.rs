pub mod download_config;
pub mod download_error;
pub mod download_event;
pub mod download_hooks_container;
pub mod download_outcome;
pub mod download_phase;
pub mod download_progress;
pub mod hook_adapters;
pub mod range_planner;
pub mod resumable_download;

// 重导出公共类型
pub use download_config::DownloadConfig;
pub use download_error::{DownloadError, RangeFetchError};
pub use download_event::{ProgressEvent, StartEvent};
pub use download_hooks_container::DownloadHooksContainer;
pub use download_outcome::DownloadOutcome;
pub use download_phase::DownloadPhase;
pub use download_progress::DownloadProgress;
pub use range_planner::{generate_ranges, plan_batches, ByteRange};
pub use resumable_download::ResumableDownload;
