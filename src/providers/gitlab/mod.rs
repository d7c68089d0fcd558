mod client;
mod types;


pub use client::GitLabClient;
pub use types::{PipelineId, PipelineSnapshot, PipelineStatus, TriggerRequest};
