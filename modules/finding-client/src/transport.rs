//! The remote call seam. `HttpTransport` speaks the Finding service's
//! name-value GET protocol; tests substitute their own implementation.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::FindingConfig;
use crate::error::TransportError;
use crate::types::Params;

#[async_trait]
pub trait FindingTransport: Send + Sync {
    /// Issue one call with the given flat parameters and return the decoded body.
    async fn call(&self, params: &Params) -> Result<Value, TransportError>;
}

pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    service_params: Vec<(String, String)>,
}

impl HttpTransport {
    pub fn new(config: &FindingConfig) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        let service_params = vec![
            ("SECURITY-APPNAME".to_string(), config.app_id.clone()),
            ("SERVICE-VERSION".to_string(), config.service_version.clone()),
            ("GLOBAL-ID".to_string(), config.global_id.clone()),
            ("RESPONSE-DATA-FORMAT".to_string(), "JSON".to_string()),
            ("REST-PAYLOAD".to_string(), String::new()),
        ];

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            service_params,
        })
    }
}

#[async_trait]
impl FindingTransport for HttpTransport {
    async fn call(&self, params: &Params) -> Result<Value, TransportError> {
        let mut query = self.service_params.clone();
        query.extend(flatten_params(params));

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&query)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Flatten parameters into the service's name-value syntax.
///
/// Sequences become indexed keys (`itemFilter(0)`), mappings become dotted
/// keys (`itemFilter(0).name`). Nulls are dropped.
pub fn flatten_params(params: &Params) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for (key, value) in params {
        flatten_into(key.clone(), value, &mut out);
    }
    out
}

fn flatten_into(key: String, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Null => {}
        Value::String(s) => out.push((key, s.clone())),
        Value::Bool(_) | Value::Number(_) => out.push((key, value.to_string())),
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                flatten_into(format!("{key}({i})"), item, out);
            }
        }
        Value::Object(map) => {
            for (name, field) in map {
                flatten_into(format!("{key}.{name}"), field, out);
            }
        }
    }
}
