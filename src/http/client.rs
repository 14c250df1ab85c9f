use crate::trace::SessionTrace;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use std::fmt;

#[derive(Clone)]
pub struct HttpClient {
    inner: Client,
    trace: Option<SessionTrace>,
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("trace", &self.trace.as_ref().map(SessionTrace::file_path))
            .finish()
    }
}

impl HttpClient {
    pub fn new(inner: Client) -> Self {
        Self { inner, trace: None }
    }

    pub fn with_trace(mut self, trace: SessionTrace) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Issues a GET and returns the raw body whatever the status code.
    pub async fn get_bytes(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<HttpResponseData, reqwest::Error> {
        let request = self.inner.get(url).query(query).build()?;
        if let Some(trace) = &self.trace {
            trace.log_http_request(request.method().as_str(), request.url().as_str());
        }

        let response = match self.inner.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                if let Some(trace) = &self.trace {
                    trace.log_http_error(&err.to_string());
                }
                return Err(err);
            }
        };
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let content_type = headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(ToOwned::to_owned);
        let body = response.bytes().await?.to_vec();

        if let Some(trace) = &self.trace {
            trace.log_http_response(status, &headers, body.len());
        }

        Ok(HttpResponseData {
            status,
            content_type,
            body,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponseData {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl HttpResponseData {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
