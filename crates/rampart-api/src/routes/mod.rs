//! # API Route Modules
//!
//! One module per resource. Each module defines its request/response DTOs,
//! a `router()` builder, and utoipa-annotated handlers.

pub mod assessments;
pub mod clients;
pub mod exports;
pub mod policies;
pub mod stats;
