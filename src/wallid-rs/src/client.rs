use crate::{ClientError, Result, FALLBACK_ERROR_MESSAGE};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use wallid_core::config::ClientConfig;
use wallid_core::models::{
    CreateCaRequest, CreateTemplateRequest, CreateVerifyUrlRequest, IssueCredentialRequest,
};

/// WalliD REST API Client
///
/// Every operation returns the decoded JSON body of a 200 response as-is.
/// Any other status becomes [`ClientError::Api`].
#[derive(Clone)]
pub struct Client {
    config: Arc<ClientConfig>,
    client: HttpClient,
}

impl Client {
    /// Create a new client from the given configuration. No request is made.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = if config.insecure_skip_verify {
            HttpClient::builder()
                .danger_accept_invalid_certs(true)
                .build()?
        } else {
            HttpClient::new()
        };

        Ok(Self::with_http_client(config, client))
    }

    /// Create a client on top of a caller-configured HTTP client
    /// (timeouts, proxies, custom roots).
    pub fn with_http_client(config: ClientConfig, client: HttpClient) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    /// Connection parameters this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Create a certificate authority administered by `admin_email`
    /// POST /ca
    #[tracing::instrument(skip(self, admin_email))]
    pub async fn create_ca(&self, wallet_address: &str, admin_email: &str) -> Result<Value> {
        let req = CreateCaRequest {
            wa: wallet_address.to_string(),
            admin_email: admin_email.to_string(),
        };

        self.post("/ca", &req).await
    }

    /// Create a credential template under authority `cid`
    /// POST /template/
    #[tracing::instrument(skip(self, frontend_props))]
    pub async fn create_template(
        &self,
        cid: &str,
        name: &str,
        wa: &str,
        frontend_props: Value,
    ) -> Result<Value> {
        let req = CreateTemplateRequest {
            cid: cid.to_string(),
            name: name.to_string(),
            wa: wa.to_string(),
            frontend_props,
        };

        // The remote router only matches with the trailing slash
        self.post("/template/", &req).await
    }

    /// Get a template by ID
    /// GET /template/{tid}
    #[tracing::instrument(skip(self, tid), fields(tid = %tid.as_ref()))]
    pub async fn fetch_template(&self, tid: impl AsRef<str>) -> Result<Value> {
        let path = format!("/template/{}", tid.as_ref());
        tracing::debug!("Fetching template");

        self.send(self.request(Method::GET, &path)).await
    }

    /// Delete a template by ID
    /// DELETE /template/{tid}
    #[tracing::instrument(skip(self, tid), fields(tid = %tid.as_ref()))]
    pub async fn delete_template(&self, tid: impl AsRef<str>) -> Result<Value> {
        let path = format!("/template/{}", tid.as_ref());
        tracing::debug!("Deleting template");

        self.send(self.request(Method::DELETE, &path)).await
    }

    /// Issue a credential from template `tid` and invite `email` to claim it.
    /// `data` is sent as given; [`CredentialData`](wallid_core::models::CredentialData) builds the usual claim list.
    /// POST /credential/create
    #[tracing::instrument(skip(self, data, email))]
    pub async fn issue_credential(
        &self,
        cid: &str,
        tid: &str,
        wa_admin: &str,
        data: impl Into<Value>,
        email: &str,
    ) -> Result<Value> {
        let req = IssueCredentialRequest {
            cid: cid.to_string(),
            tid: tid.to_string(),
            wa_admin: wa_admin.to_string(),
            data: data.into(),
            email: email.to_string(),
        };

        self.post("/credential/create", &req).await
    }

    /// Create an `openid4vp://` verification URL for an issued credential.
    /// `guid` is an opaque correlation id chosen by the caller.
    /// POST /credential/create-verify-url
    #[tracing::instrument(skip(self))]
    pub async fn create_verification_url(
        &self,
        credential_id: &str,
        tid: &str,
        guid: &str,
    ) -> Result<Value> {
        let req = CreateVerifyUrlRequest {
            id: credential_id.to_string(),
            tid: tid.to_string(),
            guid: guid.to_string(),
        };

        self.post("/credential/create-verify-url", &req).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.base_url, path);

        self.client
            .request(method, url)
            .header(AUTHORIZATION, self.config.bearer())
            .header(CONTENT_TYPE, "application/json")
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        handle_response(response).await
    }
}

/// Turn a response into the decoded body (200 only) or an API error
async fn handle_response(response: Response) -> Result<Value> {
    let status = response.status();
    let body = response.text().await?;

    if status != StatusCode::OK {
        let message = error_message(&body);
        tracing::warn!(status = status.as_u16(), message = %message, "API request failed");
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
        });
    }

    tracing::debug!(status = status.as_u16(), bytes = body.len(), "API request succeeded");
    Ok(serde_json::from_str(&body)?)
}

/// Best available message for a failed response: the JSON `message` field,
/// then the fixed fallback, then the raw body when it is not JSON at all.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(json) => match json.get("message") {
            Some(Value::String(message)) => message.clone(),
            Some(Value::Null) | None => FALLBACK_ERROR_MESSAGE.to_string(),
            Some(other) => other.to_string(),
        },
        Err(_) => body.to_string(),
    }
}
