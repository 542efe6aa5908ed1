//! Registry lookups over RDAP, with WHOIS as a fallback

use crate::domain::{ExpirationField, RegistryLookup, RegistryRecord};
use crate::error::{DomainScoutError, Result};
use crate::types::{CheckConfig, LookupMethod};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::{Duration, Instant};

/// RDAP base URL for a TLD (lowercase, no leading dot). Always ends with `/`.
pub fn rdap_base_url(tld: &str) -> Option<&'static str> {
    match tld {
        "com" => Some("https://rdap.verisign.com/com/v1/"),
        "net" => Some("https://rdap.verisign.com/net/v1/"),
        "org" => Some("https://rdap.publicinterestregistry.org/rdap/"),
        "io" => Some("https://rdap.identitydigital.services/rdap/"),
        "ai" => Some("https://rdap.identitydigital.services/rdap/"),
        "app" | "dev" => Some("https://pubapi.registry.google/rdap/"),
        "xyz" => Some("https://rdap.centralnic.com/xyz/"),
        "co" => Some("https://rdap.nic.co/"),
        "me" => Some("https://rdap.identitydigital.services/rdap/"),
        _ => None,
    }
}

/// Registry client: RDAP first, WHOIS when RDAP cannot answer
pub struct RegistryClient {
    rdap: Option<RdapClient>,
    #[cfg(feature = "whois")]
    whois: Option<WhoisClient>,
}

impl RegistryClient {
    /// Create a registry client with default configuration
    pub fn new() -> Self {
        Self::with_config(CheckConfig::default())
    }

    /// Create a registry client with custom configuration
    pub fn with_config(config: CheckConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("domain-scout/", env!("CARGO_PKG_VERSION")))
            .pool_idle_timeout(Duration::from_secs(90))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to create HTTP client: {}. Using default.", e);
                Client::new()
            });

        let rdap = config
            .enable_rdap
            .then(|| RdapClient::new(client, config.timeout, config.rdap_base_override.clone()));

        #[cfg(feature = "whois")]
        let whois = config.enable_whois.then(|| WhoisClient::new(config.timeout));

        Self {
            rdap,
            #[cfg(feature = "whois")]
            whois,
        }
    }

    /// Check if at least one lookup method is enabled
    pub fn is_configured(&self) -> bool {
        #[cfg(feature = "whois")]
        let has_whois = self.whois.is_some();
        #[cfg(not(feature = "whois"))]
        let has_whois = false;

        self.rdap.is_some() || has_whois
    }
}

impl Default for RegistryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RegistryLookup for RegistryClient {
    async fn lookup(&self, domain: &str) -> Result<RegistryRecord> {
        let start_time = Instant::now();
        let mut last_error = None;

        if let Some(rdap) = &self.rdap {
            match rdap.lookup(domain).await {
                Ok(record) => {
                    tracing::debug!(
                        domain = %domain,
                        method = "rdap",
                        registered = record.is_registered(),
                        duration_ms = %start_time.elapsed().as_millis(),
                        "Registry lookup completed"
                    );
                    return Ok(record);
                }
                Err(e) => {
                    tracing::debug!(domain = %domain, method = "rdap", error = %e, "RDAP lookup failed");
                    last_error = Some(e);
                }
            }
        }

        #[cfg(feature = "whois")]
        if let Some(whois) = &self.whois {
            match whois.lookup(domain).await {
                Ok(record) => {
                    tracing::debug!(
                        domain = %domain,
                        method = "whois",
                        registered = record.is_registered(),
                        duration_ms = %start_time.elapsed().as_millis(),
                        "Registry lookup completed"
                    );
                    return Ok(record);
                }
                Err(e) => {
                    tracing::debug!(domain = %domain, method = "whois", error = %e, "WHOIS lookup failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DomainScoutError::domain_check(domain, "No lookup method enabled", None)
        }))
    }

    fn name(&self) -> &'static str {
        "registry"
    }
}

/// RDAP client
struct RdapClient {
    client: Client,
    timeout: Duration,
    base_override: Option<String>,
}

impl RdapClient {
    fn new(client: Client, timeout: Duration, base_override: Option<String>) -> Self {
        Self {
            client,
            timeout,
            base_override,
        }
    }

    fn domain_url(&self, domain: &str) -> Result<String> {
        if let Some(base) = &self.base_override {
            return Ok(format!("{}/domain/{}", base.trim_end_matches('/'), domain));
        }

        let tld = domain.rsplit('.').next().unwrap_or(domain);
        let base = rdap_base_url(tld).ok_or_else(|| {
            DomainScoutError::domain_check(
                domain,
                format!("No RDAP server known for TLD: {}", tld),
                Some("rdap".to_string()),
            )
        })?;

        Ok(format!("{}domain/{}", base, domain))
    }

    async fn lookup(&self, domain: &str) -> Result<RegistryRecord> {
        let url = self.domain_url(domain)?;

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/rdap+json")
            .send()
            .await
            .map_err(|e| DomainScoutError::http(e, "RDAP request", self.timeout))?;

        let status = response.status();
        if status.as_u16() == 404 {
            return Ok(RegistryRecord::unregistered(LookupMethod::Rdap));
        }

        if !status.is_success() {
            return Err(DomainScoutError::network(
                format!("RDAP request failed with status {}", status),
                Some(status.as_u16()),
                Some(url),
            ));
        }

        let text = response
            .text()
            .await
            .map_err(|e| DomainScoutError::http(e, "RDAP body read", self.timeout))?;

        let rdap_response: RdapResponse = serde_json::from_str(&text)
            .map_err(|e| DomainScoutError::parse(e.to_string(), Some(text)))?;

        Ok(parse_rdap_response(domain, rdap_response))
    }
}

fn parse_rdap_response(domain: &str, response: RdapResponse) -> RegistryRecord {
    // A 200 answer is a registration even when the server omits ldhName
    let domain_name = response
        .ldh_name
        .map(|name| name.to_lowercase())
        .or_else(|| Some(domain.to_string()));

    let registrar = response
        .entities
        .iter()
        .find(|e| e.roles.iter().any(|r| r == "registrar"))
        .and_then(|e| e.vcard_array.as_ref())
        .and_then(vcard_full_name);

    let expirations = response
        .events
        .into_iter()
        .filter(|e| e.event_action == "expiration")
        .map(|e| e.event_date)
        .collect();

    RegistryRecord {
        domain_name,
        expiration_date: ExpirationField::from_values(expirations),
        registrar,
        method: LookupMethod::Rdap,
    }
}

/// `["vcard", [["version", {}, "text", "4.0"], ["fn", {}, "text", "Name"]]]`
fn vcard_full_name(vcard: &serde_json::Value) -> Option<String> {
    vcard
        .get(1)?
        .as_array()?
        .iter()
        .filter_map(|prop| prop.as_array())
        .find(|prop| prop.first().and_then(|k| k.as_str()) == Some("fn"))
        .and_then(|prop| prop.get(3))
        .and_then(|name| name.as_str())
        .map(|s| s.to_string())
}

/// WHOIS client over TCP/43
#[cfg(feature = "whois")]
struct WhoisClient {
    timeout: Duration,
}

#[cfg(feature = "whois")]
impl WhoisClient {
    fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    async fn lookup(&self, domain: &str) -> Result<RegistryRecord> {
        let tld = domain.rsplit('.').next().unwrap_or(domain).to_lowercase();

        let raw = match whois_server_for_tld(&tld) {
            Some(server) => self.query(server, domain).await?,
            None => {
                // Ask IANA for the authoritative server
                let iana = self.query("whois.iana.org", &tld).await?;
                let server = parse_iana_field(&iana, "whois:")
                    .or_else(|| parse_iana_field(&iana, "refer:"))
                    .ok_or_else(|| {
                        DomainScoutError::domain_check(
                            domain,
                            format!("No WHOIS server found for TLD: {}", tld),
                            Some("whois".to_string()),
                        )
                    })?;
                self.query(&server, domain).await?
            }
        };

        parse_whois_response(domain, &raw)
    }

    async fn query(&self, server: &str, query: &str) -> Result<String> {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};
        use tokio::net::TcpStream;
        use tokio::time::timeout;

        let secs = self.timeout.as_secs();
        let addr = format!("{}:43", server);

        let mut stream = timeout(self.timeout, TcpStream::connect(&addr))
            .await
            .map_err(|_| DomainScoutError::timeout("WHOIS connect", secs))?
            .map_err(|e| {
                DomainScoutError::network(format!("WHOIS connect failed: {}", e), None, Some(addr.clone()))
            })?;

        timeout(self.timeout, stream.write_all(format!("{}\r\n", query).as_bytes()))
            .await
            .map_err(|_| DomainScoutError::timeout("WHOIS write", secs))?
            .map_err(|e| {
                DomainScoutError::network(format!("WHOIS write failed: {}", e), None, Some(addr.clone()))
            })?;

        let mut buf = Vec::new();
        timeout(self.timeout, stream.read_to_end(&mut buf))
            .await
            .map_err(|_| DomainScoutError::timeout("WHOIS read", secs))?
            .map_err(|e| {
                DomainScoutError::network(format!("WHOIS read failed: {}", e), None, Some(addr))
            })?;

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(feature = "whois")]
fn whois_server_for_tld(tld: &str) -> Option<&'static str> {
    match tld {
        "com" | "net" => Some("whois.verisign-grs.com"),
        "org" => Some("whois.pir.org"),
        "io" => Some("whois.nic.io"),
        "ai" => Some("whois.nic.ai"),
        "co" => Some("whois.nic.co"),
        "me" => Some("whois.nic.me"),
        "xyz" => Some("whois.nic.xyz"),
        _ => None,
    }
}

#[cfg(feature = "whois")]
const AVAILABLE_PATTERNS: &[&str] = &[
    "no match",
    "not found",
    "no entries found",
    "no data found",
    "domain not found",
    "not registered",
    "available for registration",
];

#[cfg(feature = "whois")]
const EXPIRATION_KEYS: &[&str] = &[
    "registry expiry date",
    "registrar registration expiration date",
    "expiration date",
    "expiry date",
    "expires on",
    "expires",
    "paid-till",
];

#[cfg(feature = "whois")]
/// Interpret a raw WHOIS answer.
///
/// Expiration lines are collected in answer order, so the registry's own
/// expiry (listed first by thin registries) stays authoritative.
fn parse_whois_response(domain: &str, raw: &str) -> Result<RegistryRecord> {
    let fields: Vec<(String, String)> = raw
        .lines()
        .filter_map(|line| {
            let (key, value) = line.trim().split_once(':')?;
            let value = value.trim();
            (!value.is_empty()).then(|| (key.trim().to_lowercase(), value.to_string()))
        })
        .collect();

    let field = |key: &str| fields.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone());

    let domain_name = field("domain name").or_else(|| field("domain"));
    if domain_name.is_none() {
        let lower = raw.to_lowercase();
        if AVAILABLE_PATTERNS.iter().any(|p| lower.contains(p)) {
            return Ok(RegistryRecord::unregistered(LookupMethod::Whois));
        }
        return Err(DomainScoutError::parse(
            format!("Unrecognized WHOIS answer for {}", domain),
            Some(raw.chars().take(512).collect()),
        ));
    }

    let expirations = fields
        .iter()
        .filter(|(k, _)| EXPIRATION_KEYS.contains(&k.as_str()))
        .map(|(_, v)| v.clone())
        .collect();

    Ok(RegistryRecord {
        domain_name: domain_name.map(|d| d.to_lowercase()),
        expiration_date: ExpirationField::from_values(expirations),
        registrar: field("registrar"),
        method: LookupMethod::Whois,
    })
}

#[cfg(feature = "whois")]
fn parse_iana_field(iana: &str, key: &str) -> Option<String> {
    iana.lines()
        .map(str::trim)
        .find(|line| line.to_lowercase().starts_with(key))
        .and_then(|line| line.split_once(':'))
        .map(|(_, value)| value.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[derive(Debug, Deserialize)]
struct RdapResponse {
    #[serde(rename = "ldhName")]
    ldh_name: Option<String>,
    #[serde(default)]
    entities: Vec<RdapEntity>,
    #[serde(default)]
    events: Vec<RdapEvent>,
}

#[derive(Debug, Deserialize)]
struct RdapEntity {
    #[serde(default)]
    roles: Vec<String>,
    #[serde(rename = "vcardArray")]
    vcard_array: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct RdapEvent {
    #[serde(rename = "eventAction")]
    event_action: String,
    #[serde(rename = "eventDate")]
    event_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn rdap_only(server: &MockServer) -> RegistryClient {
        RegistryClient::with_config(CheckConfig {
            timeout: Duration::from_secs(5),
            enable_rdap: true,
            enable_whois: false,
            rdap_base_override: Some(server.base_url()),
        })
    }

    #[test]
    fn test_base_url_known() {
        assert!(rdap_base_url("com").is_some());
        assert!(rdap_base_url("io").unwrap().ends_with('/'));
        assert!(rdap_base_url("unknown").is_none());
    }

    #[tokio::test]
    async fn test_rdap_not_found_is_unregistered() {
        let server = MockServer::start_async().await;
        let mock = server.mock_async(|when, then| {
            when.method(GET).path("/domain/freshname.com");
            then.status(404);
        }).await;

        let record = rdap_only(&server).lookup("freshname.com").await.unwrap();

        mock.assert_async().await;
        assert!(!record.is_registered());
        assert_eq!(record.expiration_date, ExpirationField::Absent);
        assert_eq!(record.method, LookupMethod::Rdap);
    }

    #[tokio::test]
    async fn test_rdap_registered_with_expiration() {
        let server = MockServer::start_async().await;
        let body = serde_json::json!({
            "objectClassName": "domain",
            "ldhName": "EXAMPLE.COM",
            "events": [
                { "eventAction": "registration", "eventDate": "1995-08-14T04:00:00Z" },
                { "eventAction": "expiration", "eventDate": "2030-08-13T04:00:00Z" }
            ],
            "entities": [{
                "roles": ["registrar"],
                "vcardArray": ["vcard", [["version", {}, "text", "4.0"], ["fn", {}, "text", "RESERVED-Internet Assigned Numbers Authority"]]]
            }]
        });
        let mock = server.mock_async(|when, then| {
            when.method(GET).path("/domain/example.com");
            then.status(200)
                .header("Content-Type", "application/rdap+json")
                .json_body(body);
        }).await;

        let record = rdap_only(&server).lookup("example.com").await.unwrap();

        mock.assert_async().await;
        assert_eq!(record.domain_name.as_deref(), Some("example.com"));
        assert_eq!(
            record.expiration_date,
            ExpirationField::Single("2030-08-13T04:00:00Z".to_string())
        );
        assert_eq!(
            record.registrar.as_deref(),
            Some("RESERVED-Internet Assigned Numbers Authority")
        );
    }

    #[tokio::test]
    async fn test_rdap_server_error_is_not_available() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/domain/example.com");
            then.status(503);
        }).await;

        let err = rdap_only(&server).lookup("example.com").await.unwrap_err();
        assert!(matches!(err, DomainScoutError::Network { status_code: Some(503), .. }));
    }

    #[tokio::test]
    async fn test_rdap_malformed_body_is_parse_error() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/domain/example.com");
            then.status(200).body("<html>maintenance</html>");
        }).await;

        let err = rdap_only(&server).lookup("example.com").await.unwrap_err();
        assert!(matches!(err, DomainScoutError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_rdap_timeout_reports_configured_limit() {
        let server = MockServer::start_async().await;
        server.mock_async(|when, then| {
            when.method(GET).path("/domain/slow.com");
            then.status(200).delay(Duration::from_secs(3)).body("{}");
        }).await;

        let client = RegistryClient::with_config(CheckConfig {
            timeout: Duration::from_secs(1),
            enable_rdap: true,
            enable_whois: false,
            rdap_base_override: Some(server.base_url()),
        });

        let err = client.lookup("slow.com").await.unwrap_err();
        assert!(
            matches!(err, DomainScoutError::Timeout { timeout_secs: 1, .. }),
            "unexpected error: {:?}",
            err
        );
    }

    #[tokio::test]
    async fn test_no_methods_enabled() {
        let client = RegistryClient::with_config(CheckConfig {
            enable_rdap: false,
            enable_whois: false,
            ..Default::default()
        });

        assert!(!client.is_configured());
        assert!(client.lookup("example.com").await.is_err());
    }

    #[cfg(feature = "whois")]
    #[test]
    fn test_whois_registered() {
        let raw = "   Domain Name: EXAMPLE.COM\r\n   Registrar: RESERVED-Internet Assigned Numbers Authority\r\n   Registry Expiry Date: 2030-08-13T04:00:00Z\r\n   Registrar Registration Expiration Date: 2030-08-14T04:00:00Z\r\n";
        let record = parse_whois_response("example.com", raw).unwrap();

        assert_eq!(record.domain_name.as_deref(), Some("example.com"));
        assert_eq!(
            record.expiration_date,
            ExpirationField::Multiple(vec![
                "2030-08-13T04:00:00Z".to_string(),
                "2030-08-14T04:00:00Z".to_string(),
            ])
        );
        assert_eq!(record.method, LookupMethod::Whois);
    }

    #[cfg(feature = "whois")]
    #[test]
    fn test_whois_no_match() {
        let raw = "No match for \"FRESHNAME.COM\".\r\n>>> Last update of whois database: 2026-10-19T00:00:00Z <<<\r\n";
        let record = parse_whois_response("freshname.com", raw).unwrap();
        assert!(!record.is_registered());
    }

    #[cfg(feature = "whois")]
    #[test]
    fn test_whois_unrecognized_answer() {
        let err = parse_whois_response("example.com", "quota exceeded, try later").unwrap_err();
        assert!(matches!(err, DomainScoutError::Parse { .. }));
    }

    #[cfg(feature = "whois")]
    #[test]
    fn test_iana_parsing() {
        let sample = "domain:       COM\norganisation: Verisign Global Registry Services\nwhois:        whois.verisign-grs.com\n";
        assert_eq!(
            parse_iana_field(sample, "whois:").as_deref(),
            Some("whois.verisign-grs.com")
        );
        assert_eq!(
            parse_iana_field("refer: whois.nic.io\n", "refer:").as_deref(),
            Some("whois.nic.io")
        );
    }
}
