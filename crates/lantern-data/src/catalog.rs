//! Catalog loading from a static JSON document.

use crate::client::is_absolute;
use crate::{FetchClient, FetchError};
use lantern_commerce::catalog::{Catalog, ProductRecord};
use std::fmt;
use std::path::PathBuf;

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched over HTTP.
    Url(String),
    /// Read from disk.
    Path(PathBuf),
}

impl CatalogSource {
    /// Interpret a configured source string. http(s) URLs are fetched;
    /// anything else is a file path.
    pub fn parse(source: &str) -> Self {
        if is_absolute(source) {
            CatalogSource::Url(source.to_string())
        } else {
            CatalogSource::Path(PathBuf::from(source))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogSource::Url(url) => write!(f, "{url}"),
            CatalogSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load the product list, propagating failures.
pub async fn try_load_catalog(client: &FetchClient, source: &CatalogSource) -> Result<Catalog, FetchError> {
    let products: Vec<ProductRecord> = match source {
        CatalogSource::Url(url) => client.get_json(url).await?,
        CatalogSource::Path(path) => {
            let bytes = tokio::fs::read(path).await?;
            serde_json::from_slice(&bytes)?
        }
    };
    Ok(Catalog::new(products))
}

/// Load the product list. Any failure is logged and yields an empty catalog.
pub async fn load_catalog(client: &FetchClient, source: &CatalogSource) -> Catalog {
    match try_load_catalog(client, source).await {
        Ok(catalog) => {
            tracing::debug!(%source, products = catalog.len(), "catalog loaded");
            catalog
        }
        Err(e) => {
            tracing::error!(%source, error = %e, "failed to load catalog");
            Catalog::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_url, serve_once, test_client};
    use std::io::Write;

    const DOCUMENT: &str = r#"[
        {"MÃ SP": "TS01", "TÊN SẢN PHẨM": "Trà sen", "GIÁ NIÊM YẾT": 120000, "Giá sau chiết khấu": 100000, "ảnh": "/img/ts01.jpg"},
        {"MÃ SP": 42, "TÊN SẢN PHẨM": "Mứt gừng", "Giá sau chiết khấu": "Liên hệ", "NHÓM": "Tết"}
    ]"#;

    #[test]
    fn test_parse_source() {
        assert_eq!(
            CatalogSource::parse("https://shop.example/data.json"),
            CatalogSource::Url("https://shop.example/data.json".into())
        );
        assert_eq!(
            CatalogSource::parse("public/data.json"),
            CatalogSource::Path(PathBuf::from("public/data.json"))
        );
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DOCUMENT.as_bytes()).unwrap();

        let source = CatalogSource::Path(file.path().to_path_buf());
        let catalog = load_catalog(&FetchClient::new(), &source).await;

        assert_eq!(catalog.len(), 2);
        let tea = catalog.find("TS01").unwrap();
        assert_eq!(tea.name, "Trà sen");
        assert_eq!(tea.image_src(), "/img/ts01.jpg");
        let jam = catalog.find("42").unwrap();
        assert!(jam.price().is_none());
        assert_eq!(jam.extra["NHÓM"], "Tết");
    }

    #[tokio::test]
    async fn test_load_from_url() {
        let (url, _server) = serve_once("200 OK", DOCUMENT).await;
        let catalog = load_catalog(&test_client(), &CatalogSource::Url(url)).await;
        assert_eq!(catalog.len(), 2);
    }

    #[tokio::test]
    async fn test_failures_yield_empty_catalog() {
        let client = test_client();

        let missing = CatalogSource::Path(PathBuf::from("/definitely/not/here/data.json"));
        assert!(load_catalog(&client, &missing).await.is_empty());
        assert!(matches!(
            try_load_catalog(&client, &missing).await,
            Err(FetchError::Io(_))
        ));

        let mut garbage = tempfile::NamedTempFile::new().unwrap();
        garbage.write_all(b"<html>not json</html>").unwrap();
        let garbage = CatalogSource::Path(garbage.path().to_path_buf());
        assert!(load_catalog(&client, &garbage).await.is_empty());

        let unreachable = CatalogSource::Url(closed_url().await);
        assert!(load_catalog(&client, &unreachable).await.is_empty());

        let (url, _server) = serve_once("503 Service Unavailable", "[]").await;
        assert!(load_catalog(&client, &CatalogSource::Url(url)).await.is_empty());
    }
}
