//! Request context middleware.
//!
//! Every API request gets a correlation id. A valid UUID sent by the client in
//! `X-Correlation-ID` is reused; anything else is replaced by a fresh v4 id.
//! The id is stored in the request extensions (read back by
//! [`CorrelationId`](crate::extractors::CorrelationId)), attached to the
//! `http_request` span and echoed in the response header. The request also
//! bumps `http_requests_total{method}`.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    response::Response,
};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

/// Header carrying the correlation id in both directions.
pub const CORRELATION_ID_HEADER: &str = "X-Correlation-ID";

/// The client-supplied correlation id, if the header holds a UUID.
pub(crate) fn correlation_id_from_headers(headers: &HeaderMap) -> Option<Uuid> {
    headers
        .get(CORRELATION_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| Uuid::parse_str(s.trim()).ok())
}

/// Layer installing [`CorrelationIdMiddleware`]; see `router::api_router`.
#[must_use]
pub const fn correlation_id_layer() -> CorrelationIdLayer {
    CorrelationIdLayer
}

/// Tower layer for [`CorrelationIdMiddleware`].
#[derive(Clone, Copy, Debug, Default)]
pub struct CorrelationIdLayer;

impl<S> Layer<S> for CorrelationIdLayer {
    type Service = CorrelationIdMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CorrelationIdMiddleware { inner }
    }
}

/// Service wrapper that assigns and echoes the correlation id.
#[derive(Clone, Debug)]
pub struct CorrelationIdMiddleware<S> {
    inner: S,
}

impl<S> Service<Request> for CorrelationIdMiddleware<S>
where
    S: Service<Request, Response = Response> + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request) -> Self::Future {
        let correlation_id =
            correlation_id_from_headers(req.headers()).unwrap_or_else(Uuid::new_v4);
        req.extensions_mut().insert(correlation_id);

        let method = req.method().clone();
        metrics::counter!("http_requests_total", "method" => method.to_string()).increment(1);

        let span = tracing::info_span!(
            "http_request",
            %correlation_id,
            %method,
            path = %req.uri().path(),
            status = tracing::field::Empty,
        );
        let response = self.inner.call(req);

        Box::pin(
            async move {
                let mut response = response.await?;
                tracing::Span::current().record("status", response.status().as_u16());
                if let Ok(value) = HeaderValue::try_from(correlation_id.to_string()) {
                    response.headers_mut().insert(CORRELATION_ID_HEADER, value);
                }
                Ok(response)
            }
            .instrument(span),
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::extractors::CorrelationId;
    use axum::{body::Body, http::StatusCode, routing::get, Router};
    use tower::ServiceExt;

    async fn echo(CorrelationId(id): CorrelationId) -> String {
        id.to_string()
    }

    async fn send(header: Option<&str>) -> (StatusCode, String, String) {
        let app = Router::new()
            .route("/echo", get(echo))
            .layer(correlation_id_layer());
        let mut request = Request::builder().uri("/echo");
        if let Some(value) = header {
            request = request.header(CORRELATION_ID_HEADER, value);
        }

        let response = app
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let header = response.headers()[CORRELATION_ID_HEADER]
            .to_str()
            .unwrap()
            .to_string();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, header, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_client_id_is_reused() {
        let sent = Uuid::new_v4();
        let (status, header, seen_by_handler) = send(Some(&sent.to_string())).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(header, sent.to_string());
        assert_eq!(seen_by_handler, sent.to_string());
    }

    #[tokio::test]
    async fn test_missing_or_malformed_id_is_replaced() {
        for header in [None, Some("order-42"), Some("")] {
            let (_, returned, seen_by_handler) = send(header).await;
            assert!(Uuid::parse_str(&returned).is_ok());
            assert_eq!(returned, seen_by_handler);
        }
    }

    #[test]
    fn test_header_parsing_trims_whitespace() {
        let id = Uuid::new_v4();
        let mut headers = HeaderMap::new();
        headers.insert(
            CORRELATION_ID_HEADER,
            HeaderValue::try_from(format!(" {id} ")).unwrap(),
        );
        assert_eq!(correlation_id_from_headers(&headers), Some(id));
        assert_eq!(correlation_id_from_headers(&HeaderMap::new()), None);
    }
}
