//! Client configuration and per-call overrides.

use std::time::Duration;

/// Settings applied to outgoing requests.
///
/// A client holds a base configuration; each call may pass an override.
/// [`ClientConfig::merged`] combines the two field by field, the override
/// winning only where it sets something.
///
/// ## Examples
///
/// ```
/// use std::time::Duration;
/// use conduit::ClientConfig;
///
/// let base = ClientConfig::new()
///     .timeout(Duration::from_secs(30))
///     .header("X-Team", "core");
/// let call = ClientConfig::new().header("x-team", "search");
///
/// let effective = base.merged(&call);
/// assert_eq!(effective.timeout, Some(Duration::from_secs(30)));
/// assert_eq!(effective.headers, vec![("x-team".to_string(), "search".to_string())]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientConfig {
    /// Whole-request timeout.
    pub timeout: Option<Duration>,
    /// Extra request headers. Keys compare case-insensitively.
    pub headers: Vec<(String, String)>,
    /// `User-Agent` header value.
    pub user_agent: Option<String>,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Adds a header, replacing any earlier value for the same key.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Returns the effective configuration for one call.
    pub fn merged(&self, overrides: &ClientConfig) -> ClientConfig {
        ClientConfig {
            timeout: overrides.timeout.or(self.timeout),
            headers: merge_headers(&self.headers, &overrides.headers),
            user_agent: overrides
                .user_agent
                .clone()
                .or_else(|| self.user_agent.clone()),
        }
    }
}

/// Merges base and override headers.
///
/// Override headers replace base headers with the same key (case-insensitive).
fn merge_headers(
    base: &[(String, String)],
    overrides: &[(String, String)],
) -> Vec<(String, String)> {
    let mut result: Vec<(String, String)> = base
        .iter()
        .filter(|(key, _)| !overrides.iter().any(|(k, _)| k.eq_ignore_ascii_case(key)))
        .cloned()
        .collect();
    result.extend(overrides.iter().cloned());
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_override_keeps_base() {
        let base = ClientConfig::new()
            .timeout(Duration::from_secs(5))
            .header("Accept-Language", "en")
            .user_agent("todo-cli/1.0");

        assert_eq!(base.merged(&ClientConfig::default()), base);
    }

    #[test]
    fn override_wins_only_where_set() {
        let base = ClientConfig::new()
            .timeout(Duration::from_secs(5))
            .user_agent("todo-cli/1.0");
        let call = ClientConfig::new().timeout(Duration::from_millis(250));

        let effective = base.merged(&call);
        assert_eq!(effective.timeout, Some(Duration::from_millis(250)));
        assert_eq!(effective.user_agent.as_deref(), Some("todo-cli/1.0"));
    }

    #[test]
    fn headers_merge_case_insensitively() {
        let base = ClientConfig::new()
            .header("Authorization", "Bearer base")
            .header("X-Trace", "1");
        let call = ClientConfig::new()
            .header("authorization", "Bearer call")
            .header("X-Extra", "yes");

        let effective = base.merged(&call);
        assert_eq!(
            effective.headers,
            vec![
                ("X-Trace".to_string(), "1".to_string()),
                ("authorization".to_string(), "Bearer call".to_string()),
                ("X-Extra".to_string(), "yes".to_string()),
            ]
        );
    }

    #[test]
    fn header_builder_replaces_same_key() {
        let config = ClientConfig::new().header("X-Mode", "a").header("x-mode", "b");
        assert_eq!(config.headers, vec![("x-mode".to_string(), "b".to_string())]);
    }
}
