pub mod aggregate;
pub mod directory;
pub mod ledger;
pub mod report;
pub mod runner;
