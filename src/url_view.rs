use std::fmt;

use url::{Position, Url};

use crate::error::{PagingError, Result};

/// A parsed absolute URL exposing the pieces pagination patterns are built from.
///
/// Accessors return borrowed slices of the serialized URL, so every offset
/// handed out by [`UrlView::path_start`] and friends indexes into
/// [`UrlView::as_str`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlView {
    url: Url,
}

impl UrlView {
    /// Parse an absolute URL. Strings without a scheme or host are rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let url = Url::parse(input).map_err(|e| PagingError::InvalidUrl(format!("{input}: {e}")))?;
        if !url.has_host() {
            return Err(PagingError::InvalidUrl(format!("{input}: missing host")));
        }
        Ok(Self { url })
    }

    /// The serialized URL
    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Host name, with the port when it is not the scheme default
    pub fn host(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    /// Scheme, host and port, e.g. `http://www.foo.com`
    pub fn origin(&self) -> String {
        self.url.origin().ascii_serialization()
    }

    pub fn username(&self) -> &str {
        self.url.username()
    }

    pub fn password(&self) -> &str {
        self.url.password().unwrap_or_default()
    }

    /// The raw path, including any `;parameters`
    pub fn path(&self) -> &str {
        self.url.path()
    }

    /// Byte offset of the path within the serialized URL
    pub fn path_start(&self) -> usize {
        self.url[..Position::BeforePath].len()
    }

    /// The path without `;parameters` and without its leading and trailing `/`.
    pub fn trimmed_path(&self) -> &str {
        let path = self.url.path();
        let path = path.find(';').map_or(path, |i| &path[..i]);
        let path = path.strip_prefix('/').unwrap_or(path);
        path.strip_suffix('/').unwrap_or(path)
    }

    /// Components of [`UrlView::trimmed_path`]; empty for a bare host.
    pub fn path_components(&self) -> Vec<&str> {
        let trimmed = self.trimmed_path();
        if trimmed.is_empty() {
            Vec::new()
        } else {
            trimmed.split('/').collect()
        }
    }

    /// The query including its leading `?`, or an empty string when there is none.
    pub fn query(&self) -> &str {
        let query = &self.url[Position::AfterPath..Position::AfterQuery];
        if query == "?" { "" } else { query }
    }

    /// Query parameters in declaration order. Duplicate names are kept and a
    /// parameter without `=` has an empty value.
    pub fn query_params(&self) -> Vec<(&str, &str)> {
        match self.url.query() {
            None | Some("") => Vec::new(),
            Some(query) => query
                .split('&')
                .map(|pair| {
                    let mut parts = pair.split('=');
                    let name = parts.next().unwrap_or_default();
                    let value = parts.next().unwrap_or_default();
                    (name, value)
                })
                .collect(),
        }
    }

    /// Set the username; an empty name removes it.
    pub fn set_username(&mut self, username: &str) -> Result<()> {
        self.url
            .set_username(username)
            .map_err(|_| PagingError::Credentials(self.url.to_string()))
    }

    /// Set the password; an empty password removes it.
    pub fn set_password(&mut self, password: &str) -> Result<()> {
        let password = if password.is_empty() { None } else { Some(password) };
        self.url
            .set_password(password)
            .map_err(|_| PagingError::Credentials(self.url.to_string()))
    }

    /// Drop credentials and fragment, leaving only what page patterns compare.
    pub fn strip_for_matching(&mut self) -> Result<()> {
        self.set_username("")?;
        self.set_password("")?;
        self.url.set_fragment(None);
        Ok(())
    }

    /// Return the URL with the first `name=old_value` query pair rewritten to
    /// `name=new_value`. Everything else, including the order of parameters,
    /// is kept byte for byte.
    pub fn replace_query_value(&self, name: &str, old_value: &str, new_value: &str) -> String {
        let Some(query) = self.url.query() else {
            return self.url.to_string();
        };

        let target = format!("{name}={old_value}");
        let mut replaced = false;
        let pairs: Vec<String> = query
            .split('&')
            .map(|pair| {
                if !replaced && pair == target {
                    replaced = true;
                    format!("{name}={new_value}")
                } else {
                    pair.to_string()
                }
            })
            .collect();

        format!(
            "{}{}{}",
            &self.url[..Position::BeforeQuery],
            pairs.join("&"),
            &self.url[Position::AfterQuery..]
        )
    }
}

impl fmt::Display for UrlView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
