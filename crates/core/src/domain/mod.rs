//! Host name resolution for the `solvy.chain` domain family.
//!
//! Each request's `Host` is mapped to the domain it is served under. Outside
//! production every host maps to the root so local development works on any
//! address.

use solvy_shared::{DnsConfig, DomainConfig};

/// Resolves request hosts against the configured root domain and subdomains.
#[derive(Debug, Clone)]
pub struct DomainRegistry {
    root: String,
    subdomains: Vec<String>,
    enforce: bool,
    dns: DnsConfig,
}

impl DomainRegistry {
    /// Creates a registry from configuration.
    ///
    /// Subdomains may be given as bare labels (`education`) or fully qualified
    /// (`education.solvy.chain`).
    #[must_use]
    pub fn new(config: &DomainConfig) -> Self {
        let root = config.root.trim_end_matches('.').to_ascii_lowercase();
        let suffix = format!(".{root}");
        let subdomains = config
            .subdomains
            .iter()
            .map(|label| {
                let label = label.to_ascii_lowercase();
                if label.ends_with(&suffix) {
                    label
                } else {
                    format!("{label}{suffix}")
                }
            })
            .collect();

        Self {
            root,
            subdomains,
            enforce: config.enforce,
            dns: config.dns.clone(),
        }
    }

    /// The root domain.
    #[must_use]
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Fully qualified subdomains.
    #[must_use]
    pub fn subdomains(&self) -> &[String] {
        &self.subdomains
    }

    /// Name servers published for the root domain.
    #[must_use]
    pub fn dns(&self) -> &DnsConfig {
        &self.dns
    }

    /// Resolves a `Host` header value to the domain that serves it.
    ///
    /// Returns `None` when enforcement is on and the host is outside the root
    /// domain. Unknown subdomains of the root resolve to the root.
    #[must_use]
    pub fn resolve(&self, host: &str) -> Option<&str> {
        if !self.enforce {
            return Some(&self.root);
        }

        let hostname = strip_port(host).trim_end_matches('.').to_ascii_lowercase();
        if hostname.is_empty() || hostname == self.root {
            return Some(&self.root);
        }

        let in_root = hostname
            .strip_suffix(self.root.as_str())
            .is_some_and(|prefix| prefix.ends_with('.'));
        if !in_root {
            return None;
        }

        let resolved = self
            .subdomains
            .iter()
            .find(|subdomain| **subdomain == hostname)
            .map_or(self.root.as_str(), String::as_str);
        Some(resolved)
    }
}

/// Drops a trailing `:port`, leaving bracketed IPv6 literals intact.
fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return host.find(']').map_or(host, |end| &host[..=end]);
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}
