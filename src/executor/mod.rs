mod models;
mod printer;
mod runner;

pub use models::{ExecutionResult, RequestSummary, ResponseSummary};
pub use printer::print_execution_summary;
pub use runner::execute_request;
