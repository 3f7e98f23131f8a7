use std::time::Duration;

use super::error::RetrievalError;
use super::ElementSource;

pub const DEFAULT_CELESTRAK_URL: &str = "https://celestrak.org/NORAD/elements/gp.php";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Fetches current element sets by catalog number over HTTP.
pub struct CelestrakSource {
    client: reqwest::Client,
    base_url: String,
}

impl CelestrakSource {
    pub fn new(base_url: impl Into<String>) -> Result<Self, RetrievalError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn url_for(&self, catalog_id: u32) -> String {
        format!("{}?CATNR={}&FORMAT=TLE", self.base_url, catalog_id)
    }
}

impl ElementSource for CelestrakSource {
    async fn fetch(&self, catalog_id: u32) -> Result<String, RetrievalError> {
        let url = self.url_for(catalog_id);
        log::debug!("fetching {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Status {
                catalog_id,
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_by_catalog_number() {
        let source = CelestrakSource::new(DEFAULT_CELESTRAK_URL).unwrap();
        assert_eq!(
            source.url_for(25544),
            "https://celestrak.org/NORAD/elements/gp.php?CATNR=25544&FORMAT=TLE"
        );
    }
}
