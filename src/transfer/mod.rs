pub mod orchestrator;
pub mod report;

pub use orchestrator::{TransferOrchestrator, search_query};
pub use report::{TransferOutcome, TransferReport};
