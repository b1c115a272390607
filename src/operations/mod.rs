pub mod aggregate;
pub mod export;
pub mod import;
pub mod period;
pub mod report;
pub mod search;
