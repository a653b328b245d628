//! Order intake through a hosted form endpoint.

use crate::FetchClient;
use async_trait::async_trait;
use lantern_commerce::checkout::{IntakeError, IntakeField, OrderForm, OrderIntake};
use serde::{Deserialize, Serialize};

/// Default form response endpoint.
pub const DEFAULT_INTAKE_URL: &str =
    "https://docs.google.com/forms/u/0/d/e/1FAIpQLSeBXL6GhIY6X4wNr3O16FL0qz8ZMWiaRmhcobjxRsNgM8ow4g/formResponse";

/// Entry ids of the form's questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeFields {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub payment: String,
    pub products: String,
    pub total: String,
    pub note: String,
}

impl Default for IntakeFields {
    fn default() -> Self {
        Self {
            name: "entry.214513490".to_string(),
            phone: "entry.634596298".to_string(),
            address: "entry.1032170464".to_string(),
            payment: "entry.494103685".to_string(),
            products: "entry.578693070".to_string(),
            total: "entry.1124475657".to_string(),
            note: "entry.1637574912".to_string(),
        }
    }
}

impl IntakeFields {
    /// Entry id for one field.
    pub fn entry(&self, field: IntakeField) -> &str {
        match field {
            IntakeField::ReceiverName => &self.name,
            IntakeField::ReceiverPhone => &self.phone,
            IntakeField::Address => &self.address,
            IntakeField::PaymentMethod => &self.payment,
            IntakeField::Products => &self.products,
            IntakeField::Total => &self.total,
            IntakeField::Note => &self.note,
        }
    }

    /// Entry ids that are blank.
    pub fn blank(&self) -> Vec<IntakeField> {
        IntakeField::ALL
            .into_iter()
            .filter(|f| self.entry(*f).trim().is_empty())
            .collect()
    }
}

/// Where and how orders are posted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    pub url: String,
    pub fields: IntakeFields,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_INTAKE_URL.to_string(),
            fields: IntakeFields::default(),
        }
    }
}

/// Posts order forms as url-encoded form responses.
///
/// The endpoint's reply carries no usable acknowledgement. Any HTTP
/// response, whatever its status, counts as delivered; only transport
/// failures are errors.
#[derive(Debug, Clone)]
pub struct FormIntake {
    client: FetchClient,
    config: IntakeConfig,
}

impl FormIntake {
    pub fn new(client: FetchClient, config: IntakeConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// `(entry id, value)` pairs for a form, in form order.
    pub fn pairs<'a>(&'a self, form: &'a OrderForm) -> Vec<(&'a str, &'a str)> {
        form.fields()
            .map(|(field, value)| (self.config.fields.entry(field), value))
            .collect()
    }
}

#[async_trait]
impl OrderIntake for FormIntake {
    async fn submit(&self, form: &OrderForm) -> Result<(), IntakeError> {
        let pairs = self.pairs(form);
        match self.client.post_form(&self.config.url, &pairs).await {
            Ok(status) => {
                tracing::debug!(status, "intake responded");
                Ok(())
            }
            Err(e) => Err(IntakeError(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{closed_url, serve_once, test_client};

    fn form() -> OrderForm {
        OrderForm {
            receiver_name: "Nguyễn Lan".into(),
            receiver_phone: "0901234567".into(),
            address: "12 Hàng Bài, Phường Cửa Nam, Hà Nội".into(),
            payment_method: "Thanh toán khi nhận hàng (COD)".into(),
            products: "Trà sen x2".into(),
            total: "200.000\u{a0}\u{20ab}".into(),
            note: String::new(),
        }
    }

    #[test]
    fn test_pairs_use_entry_ids() {
        let intake = FormIntake::new(FetchClient::new(), IntakeConfig::default());
        let form = form();
        let pairs = intake.pairs(&form);
        assert_eq!(pairs.len(), 7);
        assert_eq!(pairs[0], ("entry.214513490", "Nguyễn Lan"));
        assert_eq!(pairs[4], ("entry.578693070", "Trà sen x2"));
        assert_eq!(pairs[6], ("entry.1637574912", ""));
    }

    #[test]
    fn test_config_partial_override() {
        let config: IntakeConfig =
            serde_json::from_str(r#"{"fields":{"note":"entry.9"}}"#).unwrap();
        assert_eq!(config.url, DEFAULT_INTAKE_URL);
        assert_eq!(config.fields.note, "entry.9");
        assert_eq!(config.fields.name, "entry.214513490");
        assert!(config.fields.blank().is_empty());
    }

    #[tokio::test]
    async fn test_any_response_counts_as_delivered() {
        let (url, server) = serve_once("400 Bad Request", "").await;
        let intake = FormIntake::new(
            test_client(),
            IntakeConfig {
                url,
                ..IntakeConfig::default()
            },
        );

        intake.submit(&form()).await.unwrap();
        let request = server.await.unwrap();
        assert!(request.starts_with("POST / HTTP/1.1"));
        assert!(request.contains("entry.578693070=Tr%C3%A0+sen+x2"));
        assert!(request.contains("entry.634596298=0901234567"));
    }

    #[tokio::test]
    async fn test_transport_failure_is_error() {
        let intake = FormIntake::new(
            test_client(),
            IntakeConfig {
                url: closed_url().await,
                ..IntakeConfig::default()
            },
        );
        assert!(intake.submit(&form()).await.is_err());
    }
}
