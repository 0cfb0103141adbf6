//! Hostname-based backend selection.
//!
//! The admin frontend is served from several hostnames. Each hostname maps to a
//! pair of backend bases (auth API, data API) and, for hosts under the production
//! root, to a leading-dot cookie domain so the session cookie is shared across
//! subdomains.
//!
//! Resolution walks an ordered list of [`DomainRule`]s, first match wins, and
//! falls back to the local-development configuration. It never fails.

use serde::{Deserialize, Serialize};

/// Backend bases for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainConfig {
    /// Base URL of the auth API (e.g., `https://auth.novostroy.org`).
    pub auth_api: String,
    /// Base URL of the data (GraphQL/REST) API (e.g., `https://crud.novostroy.org`).
    pub api: String,
}

impl DomainConfig {
    /// Create a configuration from the two bases.
    #[must_use]
    pub fn new(auth_api: impl Into<String>, api: impl Into<String>) -> Self {
        Self {
            auth_api: auth_api.into(),
            api: api.into(),
        }
    }

    fn production() -> Self {
        Self::new("https://auth.novostroy.org", "https://crud.novostroy.org")
    }

    fn local() -> Self {
        Self::new("http://localhost:8001", "http://localhost:8000")
    }
}

/// The answer for a single hostname.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedDomain {
    /// Normalized hostname the answer was computed for.
    pub hostname: String,
    /// Auth API base URL.
    pub auth_api_base: String,
    /// Data API base URL.
    pub data_api_base: String,
    /// Cookie domain for cross-subdomain sharing; `None` means host-only cookies.
    pub cookie_domain: Option<String>,
}

/// How a rule decides whether it applies to a hostname.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMatcher {
    /// The hostname equals the value.
    Exact(String),
    /// The hostname equals the value or is a subdomain of it (label boundary).
    Domain(String),
    /// The hostname does not look like a local development host.
    NotLocal,
}

impl HostMatcher {
    /// Returns `true` if this matcher accepts the (normalized) hostname.
    #[must_use]
    pub fn matches(&self, hostname: &str) -> bool {
        match self {
            Self::Exact(value) => hostname == value,
            Self::Domain(domain) => is_within(hostname, domain),
            Self::NotLocal => !is_local_host(hostname),
        }
    }
}

/// A `(matcher, config)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainRule {
    /// When the rule applies.
    pub matcher: HostMatcher,
    /// What it resolves to.
    pub config: DomainConfig,
}

/// One row of the static host table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HostEntry {
    /// Hostname of the frontend.
    pub host: String,
    /// Backend bases for it.
    #[serde(flatten)]
    pub config: DomainConfig,
}

/// Deserializable description of the host table.
#[derive(Debug, Clone, Deserialize)]
pub struct DomainSettings {
    /// Static host table, in priority order.
    #[serde(default = "DomainSettings::default_hosts")]
    pub hosts: Vec<HostEntry>,

    /// Entry of `hosts` used for any non-local hostname nothing else matched.
    #[serde(default = "DomainSettings::default_production_host")]
    pub production_host: String,

    /// Configuration used for local development hosts.
    #[serde(default = "DomainConfig::local")]
    pub local: DomainConfig,

    /// Root domain whose subdomains share cookies.
    #[serde(default = "DomainSettings::default_cookie_root")]
    pub cookie_root: Option<String>,
}

impl DomainSettings {
    fn default_hosts() -> Vec<HostEntry> {
        vec![
            HostEntry {
                host: "admin.novostroy.org".to_string(),
                config: DomainConfig::production(),
            },
            HostEntry {
                host: "novostroy.org".to_string(),
                config: DomainConfig::production(),
            },
            HostEntry {
                host: "localhost".to_string(),
                config: DomainConfig::local(),
            },
        ]
    }

    fn default_production_host() -> String {
        "admin.novostroy.org".to_string()
    }

    #[allow(clippy::unnecessary_wraps)]
    fn default_cookie_root() -> Option<String> {
        Some("novostroy.org".to_string())
    }
}

impl Default for DomainSettings {
    fn default() -> Self {
        Self {
            hosts: Self::default_hosts(),
            production_host: Self::default_production_host(),
            local: DomainConfig::local(),
            cookie_root: Self::default_cookie_root(),
        }
    }
}

/// Maps hostnames to backend configuration.
#[derive(Debug, Clone)]
pub struct DomainResolver {
    rules: Vec<DomainRule>,
    fallback: DomainConfig,
    cookie_root: Option<String>,
}

impl DomainResolver {
    /// Build a resolver from explicit rules.
    ///
    /// `fallback` is returned when no rule matches; `cookie_root` is the domain
    /// (without leading dot) whose subdomains share cookies.
    #[must_use]
    pub fn new(
        rules: Vec<DomainRule>,
        fallback: DomainConfig,
        cookie_root: Option<String>,
    ) -> Self {
        let cookie_root = cookie_root
            .map(|root| normalize_hostname(root.trim_start_matches('.')))
            .filter(|root| !root.is_empty());

        Self {
            rules,
            fallback,
            cookie_root,
        }
    }

    /// The rules in evaluation order.
    #[must_use]
    pub fn rules(&self) -> &[DomainRule] {
        &self.rules
    }

    /// Resolve a hostname (port and case are ignored).
    #[must_use]
    pub fn resolve(&self, hostname: &str) -> ResolvedDomain {
        let hostname = normalize_hostname(hostname);
        let config = self
            .rules
            .iter()
            .find(|rule| rule.matcher.matches(&hostname))
            .map_or(&self.fallback, |rule| &rule.config);

        ResolvedDomain {
            cookie_domain: self.cookie_domain_for(&hostname),
            auth_api_base: config.auth_api.clone(),
            data_api_base: config.api.clone(),
            hostname,
        }
    }

    /// Auth API base for a hostname.
    #[must_use]
    pub fn auth_api_url(&self, hostname: &str) -> String {
        self.resolve(hostname).auth_api_base
    }

    /// Data API base for a hostname.
    #[must_use]
    pub fn data_api_url(&self, hostname: &str) -> String {
        self.resolve(hostname).data_api_base
    }

    /// Cookie domain for a hostname.
    #[must_use]
    pub fn cookie_domain(&self, hostname: &str) -> Option<String> {
        self.cookie_domain_for(&normalize_hostname(hostname))
    }

    fn cookie_domain_for(&self, hostname: &str) -> Option<String> {
        if is_local_host(hostname) {
            return None;
        }

        self.cookie_root
            .as_deref()
            .filter(|root| is_within(hostname, root))
            .map(|root| format!(".{root}"))
    }
}

impl From<DomainSettings> for DomainResolver {
    fn from(settings: DomainSettings) -> Self {
        let entries: Vec<(String, DomainConfig)> = settings
            .hosts
            .into_iter()
            .map(|entry| (normalize_hostname(&entry.host), entry.config))
            .collect();

        let mut rules = Vec::with_capacity(entries.len() * 2 + 1);
        rules.extend(entries.iter().map(|(host, config)| DomainRule {
            matcher: HostMatcher::Exact(host.clone()),
            config: config.clone(),
        }));
        rules.extend(entries.iter().map(|(host, config)| DomainRule {
            matcher: HostMatcher::Domain(host.clone()),
            config: config.clone(),
        }));

        let production_host = normalize_hostname(&settings.production_host);
        match entries.iter().find(|(host, _)| *host == production_host) {
            Some((_, config)) => rules.push(DomainRule {
                matcher: HostMatcher::NotLocal,
                config: config.clone(),
            }),
            None => tracing::warn!(
                production_host = %production_host,
                "Production host is not in the host table; non-local hosts fall back to local config"
            ),
        }

        Self::new(rules, settings.local, settings.cookie_root)
    }
}

impl Default for DomainResolver {
    fn default() -> Self {
        DomainSettings::default().into()
    }
}

/// Normalize a hostname: trim, drop the port, drop a trailing dot, lowercase.
///
/// Bracketed IPv6 literals (`[::1]:8080`) lose their brackets.
#[must_use]
pub fn normalize_hostname(raw: &str) -> String {
    let raw = raw.trim();

    let host = if let Some(rest) = raw.strip_prefix('[') {
        rest.split(']').next().unwrap_or_default()
    } else if raw.matches(':').count() == 1 {
        raw.split(':').next().unwrap_or_default()
    } else {
        raw
    };

    host.trim_end_matches('.').to_ascii_lowercase()
}

/// Pick the hostname of an inbound request.
///
/// `Host` wins over `X-Forwarded-Host`; only the first entry of a forwarded
/// list is used. Falls back to `localhost` when neither header is usable.
#[must_use]
pub fn hostname_from_headers(host: Option<&str>, forwarded_host: Option<&str>) -> String {
    host.into_iter()
        .chain(forwarded_host.and_then(|value| value.split(',').next()))
        .map(normalize_hostname)
        .find(|hostname| !hostname.is_empty())
        .unwrap_or_else(|| "localhost".to_string())
}

fn is_local_host(hostname: &str) -> bool {
    hostname.is_empty()
        || hostname.contains("localhost")
        || hostname.contains("127.0.0.1")
        || hostname == "::1"
}

fn is_within(hostname: &str, domain: &str) -> bool {
    hostname == domain
        || hostname
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}
