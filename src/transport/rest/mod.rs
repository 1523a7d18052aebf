//! Cosmos DB Data-Plane REST Transport
//!
//! Production [`DocumentStore`] implementation over the Cosmos DB REST API.
//!
//! # Implementation Notes
//! - Blocking `reqwest` client: one synchronous remote call per operation
//! - Master-key authorization: HMAC-SHA256 over
//!   `"{verb}\n{resource_type}\n{resource_link}\n{date}\n\n"` with the
//!   base64-decoded account key, URL-encoded into the `authorization` header
//! - Item operations carry the partition key as a JSON array header
//! - Emulator endpoints (localhost) accept self-signed certificates
//! - Non-success statuses surface as [`TransportError::Status`] carrying the
//!   numeric status and the service error code only

use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use hmac::{Hmac, Mac};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use sha2::Sha256;
use url::Url;

use crate::transport::{
    is_emulator, ConnectionString, ContainerProperties, ContainerSpec, DocumentStore,
    PartitionKeyDefinition, TransportError, TransportResult,
};

/// REST API version sent with every request
const API_VERSION: &str = "2018-12-31";

/// Per-request timeout inherited by every operation
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type HmacSha256 = Hmac<Sha256>;

/// Authenticated REST client for one Cosmos DB account
#[derive(Debug)]
pub struct RestStore {
    http: Client,
    endpoint: Url,
    key: Vec<u8>,
}

impl RestStore {
    /// Build a store from an account connection string
    ///
    /// Parses the string and prepares the HTTP client; no network call is
    /// made here. Use [`RestStore::read_account`] to probe connectivity.
    pub fn from_connection_string(raw: &str) -> TransportResult<Self> {
        let parsed = ConnectionString::parse(raw)?;
        Self::with_key(&parsed.endpoint, &parsed.key)
    }

    /// Build a store from an endpoint URL and base64 account key
    pub fn with_key(endpoint: &str, key: &str) -> TransportResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|err| TransportError::Malformed(format!("invalid endpoint URL: {err}")))?;
        let key = BASE64
            .decode(key.trim())
            .map_err(|_| TransportError::Malformed("account key is not valid base64".to_string()))?;

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(is_emulator(endpoint.as_str()))
            .build()
            .map_err(|err| TransportError::Other(format!("could not build HTTP client: {err}")))?;

        Ok(Self { http, endpoint, key })
    }

    /// Read the account document to surface auth and connectivity failures
    ///
    /// Used by client providers at creation time; the response body is
    /// discarded.
    pub fn read_account(&self) -> TransportResult<()> {
        let response = self.request(Method::GET, "", "", "")?.send().map_err(network)?;
        check(response).map(|_| ())
    }

    /// Build the URL-encoded master-key authorization token
    fn auth_token(
        &self,
        verb: &str,
        resource_type: &str,
        resource_link: &str,
        date: &str,
    ) -> TransportResult<String> {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            verb.to_lowercase(),
            resource_type,
            resource_link,
            date.to_lowercase()
        );

        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|_| TransportError::Other("account key rejected by signer".to_string()))?;
        mac.update(payload.as_bytes());
        let signature = BASE64.encode(mac.finalize().into_bytes());

        Ok(urlencoding::encode(&format!("type=master&ver=1.0&sig={signature}")).into_owned())
    }

    /// Prepare a signed request for one resource
    fn request(
        &self,
        method: Method,
        resource_type: &str,
        resource_link: &str,
        path: &str,
    ) -> TransportResult<RequestBuilder> {
        let date = Utc::now().format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        let token = self.auth_token(method.as_str(), resource_type, resource_link, &date)?;
        let url = self
            .endpoint
            .join(path)
            .map_err(|err| TransportError::Other(format!("could not build request URL: {err}")))?;

        Ok(self
            .http
            .request(method, url)
            .header("authorization", token)
            .header("x-ms-date", date)
            .header("x-ms-version", API_VERSION))
    }

    fn decode<T: serde::de::DeserializeOwned>(response: Response) -> TransportResult<T> {
        response
            .json::<T>()
            .map_err(|err| TransportError::Other(format!("could not decode response: {err}")))
    }
}

/// Resource link for a database
fn db_link(database: &str) -> String {
    format!("dbs/{database}")
}

/// Resource link for a container
fn coll_link(database: &str, container: &str) -> String {
    format!("dbs/{database}/colls/{container}")
}

/// Resource link for an item
fn doc_link(database: &str, container: &str, item_id: &str) -> String {
    format!("dbs/{database}/colls/{container}/docs/{item_id}")
}

/// Partition-key header value: a JSON array with the single key value
fn partition_key_header(value: &str) -> String {
    serde_json::to_string(&[value]).unwrap_or_else(|_| format!("[\"{value}\"]"))
}

/// Map a reqwest failure to the transport's network class
///
/// The URL is stripped before formatting; credentials never reach the URL,
/// but keeping the message to the failure cause alone keeps logs compact.
fn network(err: reqwest::Error) -> TransportError {
    TransportError::Network(err.without_url().to_string())
}

/// Reject non-success responses, keeping only the service error code
fn check(response: Response) -> TransportResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    #[derive(Deserialize)]
    struct ServiceError {
        code: Option<String>,
    }

    let fallback = status.canonical_reason().unwrap_or("unknown").to_string();
    let message = response
        .json::<ServiceError>()
        .ok()
        .and_then(|body| body.code)
        .unwrap_or(fallback);

    Err(TransportError::Status { status: status.as_u16(), message })
}

/// Feed envelope for container enumeration
#[derive(Deserialize)]
struct CollectionFeed {
    #[serde(rename = "DocumentCollections", default)]
    collections: Vec<ContainerProperties>,
}

/// Feed envelope for item enumeration
#[derive(Deserialize)]
struct DocumentFeed {
    #[serde(rename = "Documents", default)]
    documents: Vec<Value>,
}

impl DocumentStore for RestStore {
    fn list_containers(&self, database: &str) -> TransportResult<Vec<ContainerProperties>> {
        let link = db_link(database);
        let path = format!("{link}/colls");
        let response = self.request(Method::GET, "colls", &link, &path)?.send().map_err(network)?;
        let feed: CollectionFeed = RestStore::decode(check(response)?)?;
        Ok(feed.collections)
    }

    fn create_container(
        &self,
        database: &str,
        spec: &ContainerSpec,
    ) -> TransportResult<ContainerProperties> {
        let link = db_link(database);
        let path = format!("{link}/colls");
        let body = serde_json::json!({
            "id": spec.id,
            "partitionKey": PartitionKeyDefinition::hash(spec.partition_key_path.as_str()),
        });

        let response = self
            .request(Method::POST, "colls", &link, &path)?
            .header("x-ms-offer-throughput", spec.throughput)
            .json(&body)
            .send()
            .map_err(network)?;

        let mut created: ContainerProperties = RestStore::decode(check(response)?)?;
        // The read payload has no offer throughput; echo the requested value
        created.throughput = Some(spec.throughput);
        Ok(created)
    }

    fn delete_container(&self, database: &str, name: &str) -> TransportResult<()> {
        let link = coll_link(database, name);
        let response =
            self.request(Method::DELETE, "colls", &link, &link)?.send().map_err(network)?;
        check(response).map(|_| ())
    }

    fn read_container(&self, database: &str, name: &str) -> TransportResult<ContainerProperties> {
        let link = coll_link(database, name);
        let response = self.request(Method::GET, "colls", &link, &link)?.send().map_err(network)?;
        RestStore::decode(check(response)?)
    }

    fn create_item(
        &self,
        database: &str,
        container: &str,
        partition_key: &str,
        item: &Value,
    ) -> TransportResult<Value> {
        let link = coll_link(database, container);
        let path = format!("{link}/docs");
        let response = self
            .request(Method::POST, "docs", &link, &path)?
            .header("x-ms-documentdb-partitionkey", partition_key_header(partition_key))
            .json(item)
            .send()
            .map_err(network)?;
        RestStore::decode(check(response)?)
    }

    fn read_item(
        &self,
        database: &str,
        container: &str,
        partition_key: &str,
        item_id: &str,
    ) -> TransportResult<Value> {
        let link = doc_link(database, container, item_id);
        let response = self
            .request(Method::GET, "docs", &link, &link)?
            .header("x-ms-documentdb-partitionkey", partition_key_header(partition_key))
            .send()
            .map_err(network)?;
        RestStore::decode(check(response)?)
    }

    fn upsert_item(
        &self,
        database: &str,
        container: &str,
        partition_key: &str,
        item: &Value,
    ) -> TransportResult<Value> {
        let link = coll_link(database, container);
        let path = format!("{link}/docs");
        let response = self
            .request(Method::POST, "docs", &link, &path)?
            .header("x-ms-documentdb-partitionkey", partition_key_header(partition_key))
            .header("x-ms-documentdb-is-upsert", "true")
            .json(item)
            .send()
            .map_err(network)?;
        RestStore::decode(check(response)?)
    }

    fn delete_item(
        &self,
        database: &str,
        container: &str,
        partition_key: &str,
        item_id: &str,
    ) -> TransportResult<()> {
        let link = doc_link(database, container, item_id);
        let response = self
            .request(Method::DELETE, "docs", &link, &link)?
            .header("x-ms-documentdb-partitionkey", partition_key_header(partition_key))
            .send()
            .map_err(network)?;
        check(response).map(|_| ())
    }

    fn read_items(
        &self,
        database: &str,
        container: &str,
        max_count: usize,
    ) -> TransportResult<Vec<Value>> {
        let link = coll_link(database, container);
        let path = format!("{link}/docs");
        let response = self
            .request(Method::GET, "docs", &link, &path)?
            .header("x-ms-max-item-count", max_count)
            .send()
            .map_err(network)?;
        let mut feed: DocumentFeed = RestStore::decode(check(response)?)?;
        feed.documents.truncate(max_count);
        Ok(feed.documents)
    }
}
