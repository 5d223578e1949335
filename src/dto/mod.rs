pub mod health;
pub mod sse;
pub mod update;
