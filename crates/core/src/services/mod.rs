pub mod history_service;
pub mod ledger_service;
pub mod projection_service;
pub mod refresh_service;
pub mod snapshot_service;
