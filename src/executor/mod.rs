//! HTTP request executor.
//!
//! Issues exactly one blocking call with `reqwest::blocking` per request and
//! captures status, headers, body text and wall-clock timing. Every failure
//! comes back as a classified [`RequestError`].

pub mod config;
pub mod error;

pub use config::ExecutionConfig;
pub use error::{RequestError, RequestErrorKind};

use crate::models::{
    Attachment, FormData, HttpMethod, HttpRequest, HttpResponse, Payload, RequestTiming,
};
use chrono::Local;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::{Client, RequestBuilder};
use std::time::Instant;

/// Executes an HTTP request and returns the response.
///
/// The URL is validated before anything is sent. Attachment files are opened
/// while the request is built and owned by it, so they are closed when the
/// call returns, whether it succeeded or not.
///
/// # Examples
///
/// ```no_run
/// use http_block::executor::{execute_request, ExecutionConfig};
/// use http_block::models::{HttpMethod, HttpRequest};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let request = HttpRequest::new(HttpMethod::GET, "https://httpbin.org/get".to_string());
/// let response = execute_request(&request, &ExecutionConfig::new(30_000, true))?;
///
/// println!("Status: {}", response.status_code);
/// # Ok(())
/// # }
/// ```
pub fn execute_request(
    request: &HttpRequest,
    config: &ExecutionConfig,
) -> Result<HttpResponse, RequestError> {
    validate_url(&request.url)?;

    let client = build_client(config)?;
    let mut builder = client.request(to_reqwest_method(request.method), &request.url);

    for (name, value) in &request.headers {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder = attach_payload(builder, &request.payload)?;

    log::info!("Sending {} {}", request.method, request.url);
    let start = Local::now();
    let started = Instant::now();

    let response = builder.send()?;

    let status_code = response.status().as_u16();
    let headers: Vec<(String, String)> = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    let body = response.text()?;

    let duration = started.elapsed();
    let end = Local::now();

    log::info!(
        "{} {} -> {} in {:.3}s",
        request.method,
        request.url,
        status_code,
        duration.as_secs_f64()
    );

    Ok(HttpResponse {
        status_code,
        headers,
        body,
        timing: RequestTiming {
            start,
            end,
            duration,
        },
    })
}

/// Builds the blocking client for one request.
fn build_client(config: &ExecutionConfig) -> Result<Client, RequestError> {
    let mut builder = Client::builder().timeout(config.timeout_duration());

    if !config.verify_ssl {
        // Accepting invalid certificates is the requested behavior, not a
        // warning condition.
        log::debug!("TLS certificate verification disabled");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| RequestError::Other(format!("Failed to create HTTP client: {}", e)))
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::GET => reqwest::Method::GET,
        HttpMethod::POST => reqwest::Method::POST,
        HttpMethod::DELETE => reqwest::Method::DELETE,
        HttpMethod::PUT => reqwest::Method::PUT,
        HttpMethod::HEAD => reqwest::Method::HEAD,
        HttpMethod::OPTIONS => reqwest::Method::OPTIONS,
        HttpMethod::PATCH => reqwest::Method::PATCH,
    }
}

/// Adds the payload to the request.
///
/// - raw: sent verbatim, nothing for an empty body;
/// - JSON: serialized by reqwest;
/// - form without attachments: `application/x-www-form-urlencoded`;
/// - form with attachments: `multipart/form-data`.
fn attach_payload(builder: RequestBuilder, payload: &Payload) -> Result<RequestBuilder, RequestError> {
    if payload.is_empty() {
        return Ok(builder);
    }

    match payload {
        Payload::Raw(body) => Ok(builder.body(body.clone())),
        Payload::Json(value) => Ok(builder.json(value)),
        Payload::Form(form) if form.is_multipart() => Ok(builder.multipart(build_multipart(form)?)),
        Payload::Form(form) => Ok(builder.form(&form.fields)),
    }
}

/// Builds a multipart form.
///
/// Fields become text parts. File attachments are streamed from the opened
/// file and named after it; inline attachments are named after their field.
fn build_multipart(form: &FormData) -> Result<Form, RequestError> {
    let mut multipart = Form::new();

    for (name, value) in &form.fields {
        multipart = multipart.text(name.clone(), value.clone());
    }

    for (name, attachment) in &form.attachments {
        multipart = match attachment {
            Attachment::File(path) => multipart.file(name.clone(), path).map_err(|e| {
                RequestError::Other(format!(
                    "Cannot open attachment '{}': {}",
                    path.display(),
                    e
                ))
            })?,
            Attachment::Inline(bytes) => {
                multipart.part(name.clone(), Part::bytes(bytes.clone()).file_name(name.clone()))
            }
        };
    }

    Ok(multipart)
}

/// Validates that the URL is well-formed and uses a supported protocol.
///
/// # Errors
///
/// - [`RequestError::MissingSchema`] for a URL without a scheme;
/// - [`RequestError::InvalidSchema`] for a scheme other than `http`/`https`;
/// - [`RequestError::InvalidUrl`] for anything else that does not parse or has no host.
pub fn validate_url(url: &str) -> Result<(), RequestError> {
    let parsed = url::Url::parse(url).map_err(|e| match e {
        url::ParseError::RelativeUrlWithoutBase => RequestError::MissingSchema(url.to_string()),
        other => RequestError::InvalidUrl(format!("{} ({})", url, other)),
    })?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(RequestError::InvalidSchema(scheme.to_string()));
    }

    if parsed.host().is_none() {
        return Err(RequestError::InvalidUrl(format!("{} (missing host)", url)));
    }

    Ok(())
}
