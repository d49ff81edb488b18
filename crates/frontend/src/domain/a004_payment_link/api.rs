//! Payment backend: link generation, checkout folio, link transactions

use contracts::domain::a003_folio::aggregate::CheckoutFolioResponse;
use contracts::domain::a004_payment_link::aggregate::{
    AdhocPaymentRequest, DepositPaymentRequest, FolioPaymentRequest, PaymentLink,
    PaymentLinkTransaction,
};
use contracts::shared::envelope::ApiEnvelope;
use serde::Serialize;

use crate::shared::api_utils::segment;
use crate::shared::config::QrConfig;
use crate::shared::http::{ApiError, ApiRequest};
use crate::shared::qr::GeneratedLink;
use crate::system::auth::interceptor::ApiClient;

pub type PaymentLinkResponse = ApiEnvelope<PaymentLink>;

pub const GENERATE_FAILED: &str = "Failed to generate payment link";

/// Shareable link from a generation response, or the message to show
pub fn generated_link(
    result: Result<PaymentLinkResponse, ApiError>,
    qr: &QrConfig,
) -> Result<GeneratedLink, String> {
    match result {
        Ok(response) => {
            let message = response.message.clone();
            match response.into_data().filter(|link| !link.short_url.is_empty()) {
                Some(link) => Ok(GeneratedLink::new(link.short_url, qr)),
                None => Err(message.unwrap_or_else(|| GENERATE_FAILED.to_string())),
            }
        }
        Err(e) => {
            log::error!("Payment link generation failed: {}", e);
            Err(e.user_message(GENERATE_FAILED))
        }
    }
}

#[derive(Clone)]
pub struct PaymentService {
    client: ApiClient,
}

impl PaymentService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn generate<B: Serialize>(
        &self,
        kind: &str,
        body: &B,
    ) -> Result<PaymentLinkResponse, ApiError> {
        let url = self
            .client
            .config()
            .url(&format!("/payment/{}/generate", kind));
        log::debug!("Generating {} payment link", kind);
        self.client.post_json(ApiRequest::post(url), body).await
    }

    pub async fn generate_deposit_payment_link(
        &self,
        request: &DepositPaymentRequest,
    ) -> Result<PaymentLinkResponse, ApiError> {
        self.generate("deposit", request).await
    }

    pub async fn generate_adhoc_payment_link(
        &self,
        request: &AdhocPaymentRequest,
    ) -> Result<PaymentLinkResponse, ApiError> {
        self.generate("adhoc", request).await
    }

    pub async fn generate_folio_payment_link(
        &self,
        request: &FolioPaymentRequest,
    ) -> Result<PaymentLinkResponse, ApiError> {
        self.generate("folio", request).await
    }

    pub async fn get_checkout_folio(
        &self,
        hotel_id: &str,
        reservation_id: &str,
    ) -> Result<CheckoutFolioResponse, ApiError> {
        let path = format!(
            "/reservation/{}/{}/checkout-folio",
            segment(hotel_id),
            segment(reservation_id)
        );
        self.client
            .get_json(ApiRequest::get(self.client.config().url(&path)))
            .await
    }

    pub async fn get_transaction_by_payment_link(
        &self,
        payment_link_id: &str,
    ) -> Result<ApiEnvelope<PaymentLinkTransaction>, ApiError> {
        let path = format!("/payment/links/{}/transactions", segment(payment_link_id));
        self.client
            .get_json(ApiRequest::get(self.client.config().url(&path)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::{client_with, run_local, FakeBackend};
    use crate::system::auth::storage::MemoryTokenStore;
    use contracts::domain::a004_payment_link::aggregate::DEPOSIT_PAYMENT_TYPE;
    use std::rc::Rc;

    const LINK: &str = r#"{
        "success": true,
        "message": "Payment link created",
        "data": {
            "payment_link_id": "plink_1",
            "short_url": "https://rzp.io/i/abc",
            "amount": 350,
            "currency": "INR",
            "customer_name": "Asha Rao",
            "createdAt": "2024-03-01T10:00:00Z"
        }
    }"#;

    fn service(backend: &Rc<FakeBackend>) -> PaymentService {
        PaymentService::new(client_with(backend, Rc::new(MemoryTokenStore::default())))
    }

    #[test]
    fn test_deposit_link_posts_camel_case_body() {
        let backend = FakeBackend::new();
        backend.route("/payment/deposit/generate", 200, LINK);
        let service = service(&backend);
        let request = DepositPaymentRequest {
            hotel_id: "EVOLVE".into(),
            reservation_id: "771203".into(),
            amount: 350.0,
            policy_ids: "P1,P2".into(),
            payment_type: DEPOSIT_PAYMENT_TYPE.into(),
        };

        let response = run_local(service.generate_deposit_payment_link(&request)).unwrap();

        assert_eq!(response.into_data().unwrap().short_url, "https://rzp.io/i/abc");
        let sent = &backend.sent_data_requests()[0];
        assert_eq!(sent.url, "https://api.test/payment/deposit/generate");
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["hotelId"], "EVOLVE");
        assert_eq!(body["policyIds"], "P1,P2");
        assert_eq!(body["type"], "deposit");
    }

    #[test]
    fn test_adhoc_and_folio_endpoints() {
        let backend = FakeBackend::new();
        backend.route("/payment/adhoc/generate", 200, LINK);
        backend.route("/payment/folio/generate", 200, LINK);
        let service = service(&backend);

        run_local(service.generate_adhoc_payment_link(&AdhocPaymentRequest {
            hotel_id: "EVOLVE".into(),
            reservation_id: "771203".into(),
            amount: 1200.0,
            description: None,
        }))
        .unwrap();
        run_local(service.generate_folio_payment_link(&FolioPaymentRequest {
            hotel_id: "EVOLVE".into(),
            reservation_id: "771203".into(),
            amount: 80.0,
            folio_ids: "1,3".into(),
        }))
        .unwrap();

        let urls: Vec<String> = backend
            .sent_data_requests()
            .into_iter()
            .map(|r| r.url)
            .collect();
        assert_eq!(
            urls,
            vec![
                "https://api.test/payment/adhoc/generate",
                "https://api.test/payment/folio/generate"
            ]
        );
    }

    #[test]
    fn test_generation_error_keeps_backend_message() {
        let backend = FakeBackend::new();
        backend.route(
            "/payment/adhoc/generate",
            400,
            r#"{"success": false, "message": "Amount exceeds balance"}"#,
        );
        let service = service(&backend);

        let error = run_local(service.generate_adhoc_payment_link(&AdhocPaymentRequest {
            hotel_id: "EVOLVE".into(),
            reservation_id: "771203".into(),
            amount: 1.0,
            description: None,
        }))
        .unwrap_err();

        assert_eq!(
            error.user_message("Failed to generate payment link"),
            "Amount exceeds balance"
        );
    }

    #[test]
    fn test_generated_link_outcomes() {
        let qr = QrConfig::default();
        let ok: PaymentLinkResponse = serde_json::from_str(LINK).unwrap();
        let link = generated_link(Ok(ok), &qr).unwrap();
        assert_eq!(link.url, "https://rzp.io/i/abc");
        assert!(link.qr_code.ends_with("data=https%3A%2F%2Frzp.io%2Fi%2Fabc"));

        let refused: PaymentLinkResponse =
            serde_json::from_str(r#"{"success": false, "message": "Link limit reached"}"#).unwrap();
        assert_eq!(generated_link(Ok(refused), &qr), Err("Link limit reached".into()));

        let empty: PaymentLinkResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
        assert_eq!(generated_link(Ok(empty), &qr), Err(GENERATE_FAILED.into()));

        let network = Err(ApiError::Network("offline".into()));
        assert_eq!(generated_link(network, &qr), Err(GENERATE_FAILED.into()));
    }

    #[test]
    fn test_checkout_folio_windows() {
        let backend = FakeBackend::new();
        backend.route(
            "/reservation/EVOLVE/771203/checkout-folio",
            200,
            r#"{"data": {"reservationFolioInformation": {"folioWindows": [
                {"folioWindowNo": 1, "balance": {"amount": 80}},
                {"folioWindowNo": 2, "balance": {"amount": 0}}
            ]}}}"#,
        );
        let service = service(&backend);

        let response = run_local(service.get_checkout_folio("EVOLVE", "771203")).unwrap();

        assert_eq!(response.folio_windows().len(), 2);
    }

    #[test]
    fn test_transaction_by_payment_link() {
        let backend = FakeBackend::new();
        backend.route(
            "/payment/links/plink_1/transactions",
            200,
            r#"{"success": true, "data": {
                "id": 7,
                "payment_link_id": "plink_1",
                "customer_name": "Asha Rao",
                "amount": "1500.00",
                "currency": "INR",
                "short_url": "https://rzp.io/i/abc",
                "status": "created",
                "hotelId": "EVOLVE",
                "reservationId": "771203"
            }}"#,
        );
        let service = service(&backend);

        let envelope = run_local(service.get_transaction_by_payment_link("plink_1")).unwrap();

        let transaction = envelope.into_data().unwrap();
        assert_eq!(transaction.amount, 1500.0);
        assert_eq!(
            transaction.reservation_ref().map(|r| r.reservation_id),
            Some("771203".to_string())
        );
    }
}
