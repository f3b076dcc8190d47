//! HTTP REST API interfaces
//!
//! - `middleware`: JWT authentication middleware
//! - `common`: response envelope, pagination, validated JSON extractor
//! - `modules`: request handlers per resource
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
