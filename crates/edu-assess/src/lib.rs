//! Skills-assessment domain library.
//!
//! The pipeline runs answers through scoring, level classification, and
//! course recommendation, persists the resulting record through injected
//! repository handles, and renders reports from stored results. HTTP
//! routers for the student and assessment surfaces live next to the
//! services they expose; the `services/api` binary wires everything up.

pub mod assessment;
pub mod catalog;
pub mod config;
pub mod error;
pub mod students;
pub mod telemetry;
