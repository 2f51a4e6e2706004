//! API key → bearer token exchange

use reqwest::Method;

use crate::error::{ClientError, Operation, Result};
use crate::session::{Session, Token};
use crate::transport::{ApiRequest, RequestBody, Transport};

use super::NetangelsClient;
use super::http::{log_failure, parse_json};
use super::wire::TokenResponse;

impl<T: Transport> NetangelsClient<T> {
    /// Exchange the session's API key for a bearer token and store it on the session.
    ///
    /// Any status other than 200 fails with [`ClientError::AuthFailed`]. The
    /// returned token is also kept in `session` for every later call; there is
    /// no expiry tracking, so call this again once the API starts rejecting it.
    pub async fn authenticate(&self, session: &mut Session) -> Result<Token> {
        let form = format!(
            "api_key={}",
            urlencoding::encode(session.credentials().api_key())
        );
        let request = ApiRequest::new(
            Operation::Authenticate,
            Method::POST,
            self.config.token_url.clone(),
        )
        .body(RequestBody::Form(form));

        let response = self.send(request).await?;
        if response.status != 200 {
            let err = ClientError::AuthFailed {
                status: response.status,
                raw_message: response.body,
            };
            log_failure(&err);
            return Err(err);
        }

        let TokenResponse { token } = parse_json(Operation::Authenticate, &response.body)?;
        let token = Token::new(token);
        session.set_token(token.clone());
        log::info!(
            "Authenticated NetAngels account '{}'",
            session.credentials().account_name()
        );
        Ok(token)
    }
}
