pub mod asset;
pub mod dividend;
pub mod hypothesis;
pub mod ledger;
pub mod performance;
pub mod projection;
pub mod settings;
pub mod snapshot;
