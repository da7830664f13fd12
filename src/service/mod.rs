pub mod cache;
pub mod data_manager;
pub mod gameapi;
pub mod orchestrator;
pub mod pipeline;
pub mod ranking;
pub mod snapshot;
