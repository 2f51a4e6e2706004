//! NetAngels HTTP 请求方法

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Operation, Result};
use crate::session::Session;
use crate::transport::{ApiRequest, ApiResponse, RequestBody, Transport};
use crate::utils::log_sanitizer::truncate_for_log;

use super::NetangelsClient;

impl<T: Transport> NetangelsClient<T> {
    /// Request against the DNS API with the session's bearer token.
    pub(crate) fn api_request(
        &self,
        session: &Session,
        operation: Operation,
        method: Method,
        path: &str,
    ) -> ApiRequest {
        ApiRequest::new(operation, method, self.config.api_url(path)).bearer(session.bearer())
    }

    /// Send a request, logging transport failures at the level their kind warrants.
    pub(crate) async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.transport.execute(request).await.map_err(|e| {
            log_failure(&e);
            e
        })
    }
}

/// Serialize a JSON request body.
pub(crate) fn json_body<B: Serialize>(operation: Operation, body: &B) -> Result<RequestBody> {
    serde_json::to_string(body)
        .map(RequestBody::Json)
        .map_err(|e| ClientError::SerializationError {
            operation,
            detail: e.to_string(),
        })
}

/// Parse JSON response
pub(crate) fn parse_json<R: DeserializeOwned>(operation: Operation, response_text: &str) -> Result<R> {
    serde_json::from_str(response_text).map_err(|e| {
        log::error!("[{operation}] JSON parse failed: {e}");
        log::error!("[{operation}] Raw response: {}", truncate_for_log(response_text));
        ClientError::ParseError {
            operation,
            detail: e.to_string(),
        }
    })
}

/// Error for a status code the operation does not handle.
pub(crate) fn unexpected_status(operation: Operation, response: ApiResponse) -> ClientError {
    let err = ClientError::UnexpectedStatus {
        operation,
        status: response.status,
        raw_message: response.body,
    };
    log_failure(&err);
    err
}

/// `warn` for expected failures (bad input, missing resources), `error` otherwise.
pub(crate) fn log_failure(err: &ClientError) {
    if err.is_expected() {
        log::warn!("{}", truncate_for_log(&err.to_string()));
    } else {
        log::error!("{}", truncate_for_log(&err.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo> = parse_json(Operation::ListZones, r#"{"x":42}"#);
        assert!(
            matches!(&result, Ok(Foo { x: 42 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid_keeps_operation() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo> = parse_json(Operation::ListRecords, "<html>502</html>");
        assert!(
            matches!(
                &result,
                Err(ClientError::ParseError {
                    operation: Operation::ListRecords,
                    ..
                })
            ),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn unexpected_status_carries_body() {
        let err = unexpected_status(
            Operation::CreateRecord,
            ApiResponse::new(409, r#"{"detail":"conflict"}"#),
        );
        assert!(matches!(
            err,
            ClientError::UnexpectedStatus { status: 409, ref raw_message, .. }
                if raw_message.contains("conflict")
        ));
    }
}
