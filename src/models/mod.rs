//! Data models for HTTP requests and responses.
//!
//! This module contains the structures passed between the parser, the
//! executor and the formatter.

pub mod request;
pub mod response;

pub use request::{Attachment, FormData, HttpMethod, HttpRequest, Payload};
pub use response::{HttpResponse, RequestTiming};
