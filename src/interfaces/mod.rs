//! Interface layer — HTTP REST API

pub mod http;
