use serde::de::DeserializeOwned;

use super::error::extract_message;
use super::*;

impl ApiClient {
    pub(super) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `{base}/opportunities/{id}` with `id` percent-encoded as one path segment.
    pub(super) fn record_url(&self, id: &str) -> ApiResult<reqwest::Url> {
        let invalid = |reason: &str| {
            ApiError::Transport(format!("invalid API URL {}: {}", self.base_url, reason))
        };
        let mut url = reqwest::Url::parse(&self.url("/opportunities"))
            .map_err(|err| invalid(&err.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| invalid("cannot be a base"))?
            .push(id);
        Ok(url)
    }

    pub(super) fn send(
        &self,
        req: reqwest::blocking::RequestBuilder,
        label: &str,
    ) -> ApiResult<reqwest::blocking::Response> {
        let resp = req.send().map_err(|err| {
            tracing::warn!(request = label, error = %err, "request failed to reach server");
            ApiError::from_reqwest(err)
        })?;
        self.ensure_ok(resp, label)
    }

    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> ApiResult<reqwest::blocking::Response> {
        let status = resp.status();
        if status.is_success() {
            tracing::debug!(request = label, status = status.as_u16(), "ok");
            return Ok(resp);
        }

        let body = resp.text().unwrap_or_default();
        let message = extract_message(&body);
        tracing::warn!(
            request = label,
            status = status.as_u16(),
            message = message.as_deref().unwrap_or(""),
            "request rejected"
        );

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound { message });
        }
        Err(ApiError::Application {
            status: status.as_u16(),
            message,
        })
    }

    pub(super) fn send_json<T: DeserializeOwned>(
        &self,
        req: reqwest::blocking::RequestBuilder,
        label: &str,
    ) -> ApiResult<T> {
        self.send(req, label)?
            .json::<T>()
            .map_err(|err| ApiError::Decode(format!("{}: {}", label, err)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ClientConfig {
            base_url: base_url.to_string(),
            ..ClientConfig::default()
        })
        .expect("client")
    }

    #[test]
    fn record_ids_stay_inside_one_path_segment() {
        let api = client("http://127.0.0.1:8000/api");
        let url = api.record_url("a/b?c#d").expect("url");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/api/opportunities/a%2Fb%3Fc%23d"
        );
        assert_eq!(url.query(), None);
        assert_eq!(url.fragment(), None);

        let plain = api.record_url("3f2a").expect("url");
        assert_eq!(plain.as_str(), "http://127.0.0.1:8000/api/opportunities/3f2a");
    }

    #[test]
    fn unparseable_base_url_is_a_transport_error() {
        let api = client("not a url");
        assert!(api.record_url("x").expect_err("bad base").is_transport());
    }
}
