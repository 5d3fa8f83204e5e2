//! Request extractors whose rejections render as the failure envelope.

pub mod json_body;

pub use json_body::JsonBody;
