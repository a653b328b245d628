//! Administrative region directory and the province/ward cascade.

use crate::{FetchClient, FetchError};
use lantern_commerce::checkout::Region;
use serde::Deserialize;

/// Public directory of Vietnamese provinces and wards.
pub const DEFAULT_REGIONS_URL: &str = "https://provinces.open-api.vn/api/v2";

#[derive(Debug, Deserialize)]
struct ProvinceDetail {
    #[serde(default)]
    wards: Vec<Region>,
}

/// Client for the region directory.
#[derive(Debug, Clone)]
pub struct RegionDirectory {
    client: FetchClient,
}

impl RegionDirectory {
    /// Directory at `base_url`, sharing `client`'s connection pool.
    pub fn new(client: &FetchClient, base_url: impl Into<String>) -> Self {
        Self {
            client: client.clone().with_base_url(base_url),
        }
    }

    /// Fetch the province list.
    pub async fn try_provinces(&self) -> Result<Vec<Region>, FetchError> {
        self.client.get_json("/p/").await
    }

    /// Fetch the wards of one province.
    pub async fn try_wards(&self, province_code: u32) -> Result<Vec<Region>, FetchError> {
        let detail: ProvinceDetail = self
            .client
            .get_json(&format!("/p/{province_code}?depth=2"))
            .await?;
        Ok(detail.wards)
    }

    /// Province list; empty on failure.
    pub async fn provinces(&self) -> Vec<Region> {
        self.try_provinces().await.unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to load provinces");
            Vec::new()
        })
    }

    /// Wards of one province; empty on failure.
    pub async fn wards(&self, province_code: u32) -> Vec<Region> {
        self.try_wards(province_code).await.unwrap_or_else(|e| {
            tracing::error!(province = province_code, error = %e, "failed to load wards");
            Vec::new()
        })
    }
}

/// Proof that a ward lookup was requested for a particular province
/// selection. Only the newest ticket is honoured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WardTicket {
    seq: u64,
    province_code: u32,
}

impl WardTicket {
    /// Province whose wards should be fetched.
    pub fn province_code(&self) -> u32 {
        self.province_code
    }
}

/// The province and ward pickers on the checkout form.
///
/// Choosing a province clears the ward and starts a new lookup. Responses
/// for earlier selections are dropped, so a slow reply can never overwrite
/// the wards of the province currently shown.
#[derive(Debug, Clone, Default)]
pub struct RegionSelector {
    provinces: Vec<Region>,
    wards: Vec<Region>,
    province: Option<Region>,
    ward: Option<Region>,
    seq: u64,
}

impl RegionSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the province list.
    pub fn set_provinces(&mut self, provinces: Vec<Region>) {
        self.provinces = provinces;
    }

    pub fn provinces(&self) -> &[Region] {
        &self.provinces
    }

    pub fn wards(&self) -> &[Region] {
        &self.wards
    }

    pub fn province(&self) -> Option<&Region> {
        self.province.as_ref()
    }

    pub fn ward(&self) -> Option<&Region> {
        self.ward.as_ref()
    }

    /// Select a province by code, or clear it with `None`.
    ///
    /// Returns the ticket for the ward lookup when a known province was
    /// chosen.
    pub fn select_province(&mut self, code: Option<u32>) -> Option<WardTicket> {
        self.seq += 1;
        self.ward = None;
        self.wards.clear();
        self.province = code.and_then(|c| self.provinces.iter().find(|p| p.code == c).cloned());

        self.province.as_ref().map(|p| WardTicket {
            seq: self.seq,
            province_code: p.code,
        })
    }

    /// Apply a ward list. Returns false if the ticket is stale.
    pub fn apply_wards(&mut self, ticket: WardTicket, wards: Vec<Region>) -> bool {
        if ticket.seq != self.seq {
            tracing::debug!(
                province = ticket.province_code,
                "discarding stale ward list"
            );
            return false;
        }
        self.wards = wards;
        true
    }

    /// Select a ward of the current province by code.
    pub fn select_ward(&mut self, code: Option<u32>) -> bool {
        self.ward = code.and_then(|c| self.wards.iter().find(|w| w.code == c).cloned());
        self.ward.is_some()
    }

    /// Select a province and load its wards.
    pub async fn choose_province(&mut self, directory: &RegionDirectory, code: Option<u32>) {
        if let Some(ticket) = self.select_province(code) {
            let wards = directory.wards(ticket.province_code()).await;
            self.apply_wards(ticket, wards);
        }
    }

    /// Both selections, once made.
    pub fn selection(&self) -> Option<(Region, Region)> {
        Some((self.province.clone()?, self.ward.clone()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_url, serve_once, test_client};

    fn selector() -> RegionSelector {
        let mut selector = RegionSelector::new();
        selector.set_provinces(vec![Region::new(1, "Hà Nội"), Region::new(79, "Hồ Chí Minh")]);
        selector
    }

    #[test]
    fn test_select_province_clears_ward() {
        let mut selector = selector();
        let ticket = selector.select_province(Some(1)).unwrap();
        assert!(selector.apply_wards(ticket, vec![Region::new(4, "Phường Ba Đình")]));
        assert!(selector.select_ward(Some(4)));

        let ticket = selector.select_province(Some(79)).unwrap();
        assert_eq!(ticket.province_code(), 79);
        assert!(selector.ward().is_none());
        assert!(selector.wards().is_empty());
        assert!(selector.selection().is_none());
    }

    #[test]
    fn test_stale_ward_list_discarded() {
        let mut selector = selector();
        let first = selector.select_province(Some(1)).unwrap();
        let second = selector.select_province(Some(79)).unwrap();

        assert!(selector.apply_wards(second, vec![Region::new(26734, "Phường Sài Gòn")]));
        assert!(!selector.apply_wards(first, vec![Region::new(4, "Phường Ba Đình")]));
        assert_eq!(selector.wards()[0].name, "Phường Sài Gòn");
    }

    #[test]
    fn test_clearing_province_clears_wards() {
        let mut selector = selector();
        let ticket = selector.select_province(Some(1)).unwrap();
        selector.apply_wards(ticket, vec![Region::new(4, "Phường Ba Đình")]);

        assert!(selector.select_province(None).is_none());
        assert!(selector.province().is_none());
        assert!(selector.wards().is_empty());
        assert!(!selector.apply_wards(ticket, vec![Region::new(4, "Phường Ba Đình")]));
    }

    #[test]
    fn test_unknown_codes_select_nothing() {
        let mut selector = selector();
        assert!(selector.select_province(Some(999)).is_none());
        assert!(!selector.select_ward(Some(4)));
    }

    #[tokio::test]
    async fn test_wards_read_from_depth_two() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"code":1,"name":"Hà Nội","wards":[{"code":4,"name":"Phường Ba Đình","province_code":1}]}"#,
        )
        .await;
        let directory = RegionDirectory::new(&test_client(), url);

        let wards = directory.wards(1).await;
        assert_eq!(wards, vec![Region::new(4, "Phường Ba Đình")]);
        let request = server.await.unwrap();
        assert!(request.starts_with("GET /p/1?depth=2 HTTP/1.1"));
    }

    #[tokio::test]
    async fn test_missing_wards_field_is_empty() {
        let (url, _server) = serve_once("200 OK", r#"{"code":1,"name":"Hà Nội"}"#).await;
        let directory = RegionDirectory::new(&test_client(), url);
        assert!(directory.try_wards(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_lookup_failure_is_empty() {
        let directory = RegionDirectory::new(&test_client(), closed_url().await);
        assert!(directory.provinces().await.is_empty());
        assert!(directory.wards(1).await.is_empty());
    }

    #[tokio::test]
    async fn test_choose_province_loads_wards() {
        let (url, _server) = serve_once(
            "200 OK",
            r#"{"code":79,"wards":[{"code":26734,"name":"Phường Sài Gòn"}]}"#,
        )
        .await;
        let directory = RegionDirectory::new(&test_client(), url);
        let mut selector = selector();

        selector.choose_province(&directory, Some(79)).await;
        assert!(selector.select_ward(Some(26734)));
        let (province, ward) = selector.selection().unwrap();
        assert_eq!(province.name, "Hồ Chí Minh");
        assert_eq!(ward.name, "Phường Sài Gòn");
    }
}
