//! ECS telemetry node library.
//!
//! A single-threaded, cooperative telemetry node: it discovers its gateway
//! by broadcast probing, then samples one temperature probe on a fixed
//! interval and unicasts each reading to the gateway. Every component is a
//! non-blocking step function driven by [`scheduler::Scheduler::poll`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod drivers;
pub mod error;
pub mod link;
pub mod scheduler;
pub mod sensors;
