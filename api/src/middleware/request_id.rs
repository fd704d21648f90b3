//! Request id propagation.
//!
//! A well-formed `X-Request-ID` sent by the client is reused and recorded on
//! the request's root span as `client_request_id`. Without one, the id that
//! [`TracingLogger`](tracing_actix_web::TracingLogger) generated for the span
//! is used. Either way the id is echoed on the response.

use actix_web::{
    body::MessageBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderMap, HeaderName, HeaderValue},
    Error, HttpMessage,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use tracing::Span;
use tracing_actix_web::{DefaultRootSpanBuilder, RequestId, RootSpanBuilder};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

const MAX_REQUEST_ID_LEN: usize = 128;

/// Root span builder that also captures the client's request id
pub struct RequestIdRootSpan;

impl RootSpanBuilder for RequestIdRootSpan {
    fn on_request_start(request: &ServiceRequest) -> Span {
        let span = tracing_actix_web::root_span!(request, client_request_id = tracing::field::Empty);
        if let Some(id) = client_request_id(request.headers()) {
            span.record("client_request_id", id);
        }
        span
    }

    fn on_request_end<B: MessageBody>(span: Span, outcome: &Result<ServiceResponse<B>, Error>) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

/// Middleware factory setting `X-Request-ID` on every response
#[derive(Clone, Copy, Default)]
pub struct RequestIdHeader;

impl<S, B> Transform<S, ServiceRequest> for RequestIdHeader
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestIdHeaderMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestIdHeaderMiddleware { service }))
    }
}

pub struct RequestIdHeaderMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestIdHeaderMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let request_id = client_request_id(req.headers())
            .map(str::to_owned)
            .or_else(|| req.extensions().get::<RequestId>().map(|id| id.to_string()));

        let fut = self.service.call(req);

        Box::pin(async move {
            let mut res = fut.await?;
            if let Some(value) = request_id.and_then(|id| HeaderValue::from_str(&id).ok()) {
                res.headers_mut()
                    .insert(HeaderName::from_static(REQUEST_ID_HEADER), value);
            }
            Ok(res)
        })
    }
}

/// The client's request id, if present and well-formed
fn client_request_id(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(REQUEST_ID_HEADER)?
        .to_str()
        .ok()
        .map(str::trim)
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_REQUEST_ID_LEN
                && id.chars().all(|c| c.is_ascii_graphic())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};
    use tracing_actix_web::TracingLogger;

    macro_rules! init_app {
        () => {
            test::init_service(
                App::new()
                    .wrap(RequestIdHeader)
                    .wrap(TracingLogger::<RequestIdRootSpan>::new())
                    .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_client_request_id_is_echoed() {
        let app = init_app!();

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((REQUEST_ID_HEADER, "req-7f3a"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.headers().get(REQUEST_ID_HEADER).unwrap(), "req-7f3a");
    }

    #[actix_web::test]
    async fn test_missing_request_id_is_generated() {
        let app = init_app!();

        let first = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        let second = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;

        let first = first.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap().to_string();
        let second = second.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap().to_string();
        assert!(!first.is_empty());
        assert_ne!(first, second);
    }

    #[actix_web::test]
    async fn test_malformed_request_id_is_replaced() {
        let app = init_app!();
        let oversized = "x".repeat(MAX_REQUEST_ID_LEN + 1);

        let req = test::TestRequest::get()
            .uri("/")
            .insert_header((REQUEST_ID_HEADER, oversized.as_str()))
            .to_request();
        let resp = test::call_service(&app, req).await;

        let echoed = resp.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
        assert!(!echoed.is_empty());
        assert_ne!(echoed, oversized);
    }

    #[std::prelude::v1::test]
    fn test_client_request_id_validation() {
        let mut headers = HeaderMap::new();
        assert_eq!(client_request_id(&headers), None);

        headers.insert(
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderValue::from_static("  abc-123  "),
        );
        assert_eq!(client_request_id(&headers), Some("abc-123"));

        headers.insert(
            HeaderName::from_static(REQUEST_ID_HEADER),
            HeaderValue::from_static("has space"),
        );
        assert_eq!(client_request_id(&headers), None);
    }
}
