//! Site configuration baked in at build time.

use url::Url;

use crate::error::SubmitError;

pub const DEFAULT_FORM_ENDPOINT: &str = "https://formspree.io/f/";
pub const DEFAULT_RESUME_PATH: &str = "/data/SabirResume-06-24.pdf";
pub const DEFAULT_RESUME_FILENAME: &str = "Sabir_Resume.pdf";
pub const DEFAULT_OWNER_NAME: &str = "Sabir";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    pub form_id: Option<String>,
    pub form_endpoint: String,
    pub resume_path: String,
    pub resume_filename: String,
    pub owner_name: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            form_id: None,
            form_endpoint: DEFAULT_FORM_ENDPOINT.to_string(),
            resume_path: DEFAULT_RESUME_PATH.to_string(),
            resume_filename: DEFAULT_RESUME_FILENAME.to_string(),
            owner_name: DEFAULT_OWNER_NAME.to_string(),
        }
    }
}

impl SiteConfig {
    /// Reads `PORTFOLIO_FORM_ID` and `PORTFOLIO_FORM_ENDPOINT` from the
    /// compile-time environment.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("PORTFOLIO_FORM_ID"),
            option_env!("PORTFOLIO_FORM_ENDPOINT"),
        )
    }

    pub fn from_values(form_id: Option<&str>, form_endpoint: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            form_id: non_empty(form_id),
            form_endpoint: non_empty(form_endpoint).unwrap_or(defaults.form_endpoint),
            ..defaults
        }
    }

    /// The form service URL for the configured identifier.
    pub fn form_url(&self) -> Result<Url, SubmitError> {
        let form_id = self.form_id.as_deref().ok_or(SubmitError::Unconfigured)?;

        let mut base = self.form_endpoint.clone();
        if !base.ends_with('/') {
            base.push('/');
        }
        let base = Url::parse(&base).map_err(|error| SubmitError::InvalidEndpoint(error.to_string()))?;
        if base.scheme() != "https" && base.scheme() != "http" {
            return Err(SubmitError::InvalidEndpoint(format!(
                "unsupported scheme {}",
                base.scheme()
            )));
        }

        let mut url = base;
        url.path_segments_mut()
            .map_err(|_| SubmitError::InvalidEndpoint("endpoint cannot carry a path".to_string()))?
            .pop_if_empty()
            .push(form_id);
        Ok(url)
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_url_appends_identifier() {
        let config = SiteConfig::from_values(Some(" xyzabc "), None);

        let url = config.form_url().expect("configured form");
        assert_eq!(url.as_str(), "https://formspree.io/f/xyzabc");
    }

    #[test]
    fn custom_endpoint_without_trailing_slash() {
        let config = SiteConfig::from_values(Some("abc"), Some("http://localhost:9000/forms"));

        let url = config.form_url().expect("configured form");
        assert_eq!(url.as_str(), "http://localhost:9000/forms/abc");
    }

    #[test]
    fn identifier_is_escaped_as_one_segment() {
        let config = SiteConfig::from_values(Some("a/b"), None);

        let url = config.form_url().expect("configured form");
        assert_eq!(url.as_str(), "https://formspree.io/f/a%2Fb");
    }

    #[test]
    fn missing_identifier_is_unconfigured() {
        let config = SiteConfig::from_values(Some("   "), None);
        assert_eq!(config.form_url(), Err(SubmitError::Unconfigured));
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let config = SiteConfig::from_values(Some("abc"), Some("ftp://files.example.com/"));
        assert!(matches!(config.form_url(), Err(SubmitError::InvalidEndpoint(_))));
    }
}
