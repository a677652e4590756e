pub mod metrics;
pub mod providers;
pub mod relay;

pub use metrics::{get_metrics, init_metrics};
pub use relay::{PromptRelay, RelayReply, ResponseSource};
