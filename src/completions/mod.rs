//! The completion gateway: request validation, one provider call, and
//! validation of what comes back.

pub mod gateway;

pub use gateway::Gateway;
