//! Function-host adapter
//!
//! Translates invocation events into ordinary HTTP requests, dispatches them through
//! the same [`Router`] the standalone server uses and turns the response back into
//! the reply shape the host expects. Nothing is kept between invocations.

use axum::{body::Body, http::Request, Router};
use lambda_http::{service_fn, Body as LambdaBody, Error, RequestExt};
use tower::ServiceExt;

/// Request as delivered by the host; the invocation context rides in its extensions.
pub type LambdaRequest = lambda_http::Request;

/// Reply handed back to the host.
pub type LambdaResponse = lambda_http::http::Response<LambdaBody>;

/// Handle one invocation.
///
/// Status, headers and body bytes of the application's response are passed through
/// untouched.
pub async fn handle(app: Router, event: LambdaRequest) -> Result<LambdaResponse, Error> {
    if let Some(context) = event.lambda_context_ref() {
        tracing::debug!(
            request_id = %context.request_id,
            method = %event.method(),
            path = event.uri().path(),
            "Dispatching invocation",
        );
    }

    let (parts, body) = event.into_parts();
    let request = Request::from_parts(parts, Body::from(body_bytes(&body)));

    let response = app.oneshot(request).await?;

    let (parts, body) = response.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX).await?;

    Ok(lambda_http::http::Response::from_parts(
        parts,
        into_lambda_body(bytes.to_vec()),
    ))
}

/// Serve `app` to the function host until the runtime shuts the process down.
pub async fn run(app: Router) -> Result<(), Error> {
    tracing::info!("Starting function runtime loop");
    lambda_http::run(service_fn(move |event: LambdaRequest| {
        handle(app.clone(), event)
    }))
    .await
}

fn body_bytes(body: &LambdaBody) -> Vec<u8> {
    let bytes: &[u8] = body.as_ref();
    bytes.to_vec()
}

/// Text when the bytes are UTF-8, binary otherwise; the host base64-encodes the latter.
fn into_lambda_body(bytes: Vec<u8>) -> LambdaBody {
    if bytes.is_empty() {
        return LambdaBody::Empty;
    }
    match String::from_utf8(bytes) {
        Ok(text) => LambdaBody::Text(text),
        Err(err) => LambdaBody::Binary(err.into_bytes()),
    }
}
