//! Add payment recipient tool.
//!
//! The flat tool input is folded into Mercury's nested recipient payload.
//! Only the routing block matching `default_payment_method` is sent, and
//! only when its identifying fields are present:
//!
//! | Method              | Block                          | Needs                          |
//! |---------------------|--------------------------------|--------------------------------|
//! | `ACH`               | `electronicRoutingInfo`        | account and routing number     |
//! | `DomesticWire`      | `domesticWireRoutingInfo`      | account and routing number     |
//! | `InternationalWire` | `internationalWireRoutingInfo` | IBAN and SWIFT code            |
//! | `Check`             | `checkInfo`                    | any address field              |

use std::sync::Arc;

use futures::FutureExt;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::api::IdempotencyKey;
use crate::domains::tools::definition::{HandlerFuture, ToolSpec};
use crate::domains::tools::definitions::common::Operation;
use crate::domains::tools::definitions::context::MercuryContext;

// ============================================================================
// Input
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PaymentMethod {
    #[serde(rename = "ACH")]
    Ach,
    Check,
    DomesticWire,
    InternationalWire,
}

/// ACH account type. Mercury requires one, so `businessChecking` is sent
/// when the caller gives none.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum AccountType {
    #[default]
    BusinessChecking,
    BusinessSavings,
    PersonalChecking,
    PersonalSavings,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct AddPaymentRecipientParams {
    /// The name of the recipient.
    pub name: String,
    /// An array of email addresses for the recipient.
    #[schemars(extend("items" = {"type": "string", "format": "email"}))]
    pub emails: Vec<String>,
    /// The default payment method to use for this recipient.
    pub default_payment_method: PaymentMethod,
    /// An optional nickname for the recipient.
    pub nickname: Option<String>,

    /// The recipient's account number for ACH transfers.
    pub ach_account_number: Option<String>,
    /// The recipient's routing number for ACH transfers.
    pub ach_routing_number: Option<String>,
    /// The recipient's bank name for ACH transfers.
    pub ach_bank_name: Option<String>,
    /// The type of account for ACH transfers.
    pub ach_account_type: Option<AccountType>,

    /// The recipient's account number for domestic wire transfers.
    pub domestic_wire_account_number: Option<String>,
    /// The recipient's routing number for domestic wire transfers.
    pub domestic_wire_routing_number: Option<String>,
    /// The recipient's bank name for domestic wire transfers.
    pub domestic_wire_bank_name: Option<String>,

    /// The recipient's IBAN for international wire transfers.
    pub international_wire_iban: Option<String>,
    /// The recipient's SWIFT code for international wire transfers.
    pub international_wire_swift_code: Option<String>,
    /// The recipient's bank name for international wire transfers.
    pub international_wire_bank_name: Option<String>,
    /// The city and state of the recipient's bank for international wire transfers.
    pub international_wire_bank_city_state: Option<String>,
    /// The country of the recipient's bank for international wire transfers (ISO 3166-1 alpha-2 code).
    pub international_wire_bank_country: Option<String>,

    /// The first line of the recipient's address.
    pub address_line1: Option<String>,
    /// The second line of the recipient's address.
    pub address_line2: Option<String>,
    /// The city of the recipient's address.
    pub city: Option<String>,
    /// The state/region of the recipient's address.
    pub region: Option<String>,
    /// The postal code of the recipient's address.
    pub postal_code: Option<String>,
    /// The country of the recipient's address (ISO 3166-1 alpha-2 code).
    pub country: Option<String>,

    /// A unique identifier for this request to prevent duplicates. If not provided, a UUID will be generated.
    pub idempotency_key: Option<String>,
}

// ============================================================================
// Upstream payload
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddRecipientBody {
    name: String,
    emails: Vec<String>,
    default_payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    electronic_routing_info: Option<ElectronicRoutingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    domestic_wire_routing_info: Option<DomesticWireRoutingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    international_wire_routing_info: Option<InternationalWireRoutingInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    check_info: Option<CheckInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct ElectronicRoutingInfo {
    account_number: String,
    routing_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bank_name: Option<String>,
    electronic_account_type: AccountType,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct DomesticWireRoutingInfo {
    account_number: String,
    routing_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct InternationalWireRoutingInfo {
    iban: String,
    swift_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    bank_details: Option<BankDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<Address>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct BankDetails {
    bank_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    city_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct CheckInfo {
    address: Address,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
struct Address {
    #[serde(skip_serializing_if = "Option::is_none")]
    address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    country: Option<String>,
}

/// Optional text input; `""` counts as not given.
fn given(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

impl Address {
    /// `None` unless at least one address field was given.
    fn from_params(params: &AddPaymentRecipientParams) -> Option<Self> {
        let address = Self {
            address1: given(&params.address_line1),
            address2: given(&params.address_line2),
            city: given(&params.city),
            region: given(&params.region),
            postal_code: given(&params.postal_code),
            country: given(&params.country),
        };
        let empty = address.address1.is_none()
            && address.address2.is_none()
            && address.city.is_none()
            && address.region.is_none()
            && address.postal_code.is_none()
            && address.country.is_none();
        (!empty).then_some(address)
    }
}

impl AddRecipientBody {
    fn from_params(params: &AddPaymentRecipientParams) -> Self {
        let address = Address::from_params(params);
        let mut body = Self {
            name: params.name.clone(),
            emails: params.emails.clone(),
            default_payment_method: params.default_payment_method,
            nickname: given(&params.nickname),
            electronic_routing_info: None,
            domestic_wire_routing_info: None,
            international_wire_routing_info: None,
            check_info: None,
        };

        match params.default_payment_method {
            PaymentMethod::Ach => {
                if let (Some(account_number), Some(routing_number)) = (
                    given(&params.ach_account_number),
                    given(&params.ach_routing_number),
                ) {
                    body.electronic_routing_info = Some(ElectronicRoutingInfo {
                        account_number,
                        routing_number,
                        bank_name: given(&params.ach_bank_name),
                        electronic_account_type: params.ach_account_type.unwrap_or_default(),
                        address,
                    });
                }
            }
            PaymentMethod::DomesticWire => {
                if let (Some(account_number), Some(routing_number)) = (
                    given(&params.domestic_wire_account_number),
                    given(&params.domestic_wire_routing_number),
                ) {
                    body.domestic_wire_routing_info = Some(DomesticWireRoutingInfo {
                        account_number,
                        routing_number,
                        bank_name: given(&params.domestic_wire_bank_name),
                        address,
                    });
                }
            }
            PaymentMethod::InternationalWire => {
                if let (Some(iban), Some(swift_code)) = (
                    given(&params.international_wire_iban),
                    given(&params.international_wire_swift_code),
                ) {
                    let bank_details =
                        given(&params.international_wire_bank_name).map(|bank_name| BankDetails {
                            bank_name,
                            city_state: given(&params.international_wire_bank_city_state),
                            country: given(&params.international_wire_bank_country),
                        });
                    body.international_wire_routing_info = Some(InternationalWireRoutingInfo {
                        iban,
                        swift_code,
                        bank_details,
                        address,
                    });
                }
            }
            PaymentMethod::Check => {
                body.check_info = address.map(|address| CheckInfo { address });
            }
        }

        body
    }
}

// ============================================================================
// Tool
// ============================================================================

const OPERATION: Operation = Operation::new("adding payment recipient").forbidden_message(
    "Permission error: Your API token doesn't have permission to add recipients.",
);

#[derive(Debug, Clone)]
pub struct AddPaymentRecipientTool;

impl ToolSpec for AddPaymentRecipientTool {
    type Context = MercuryContext;
    type Params = AddPaymentRecipientParams;

    const NAME: &'static str = "add_payment_recipient";

    const DESCRIPTION: &'static str = "Add a new payment recipient to Mercury. You must provide the recipient's name, email(s), and default payment method, along with the appropriate routing information for the chosen payment method.";

    fn handle(params: AddPaymentRecipientParams, context: Arc<MercuryContext>) -> HandlerFuture {
        async move {
            let body = AddRecipientBody::from_params(&params);
            let key = IdempotencyKey::provide(params.idempotency_key);
            let request = context.post(&["recipients"], key).json(&body).build();
            OPERATION.run(&context, request).await
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::api::IDEMPOTENCY_KEY;
    use crate::domains::tools::definitions::testing::{RecordingClient, TEST_BASE_URL, args, context};
    use serde_json::{Value, json};

    /// Invoke the tool and return the JSON body that was sent.
    async fn sent_body(input: Value) -> Value {
        let client = RecordingClient::ok(r#"{"id":"rec-1"}"#);
        let tool = AddPaymentRecipientTool::definition().unwrap().bind(context(client.clone()));
        let result = tool.invoke(args(input)).await.unwrap();
        assert!(!result.is_error(), "{:?}", result);
        client.last_body()
    }

    /// Recursively check that no JSON value in the body is null or an empty object.
    fn assert_pruned(value: &Value) {
        match value {
            Value::Null => panic!("null in request body"),
            Value::Object(map) => {
                assert!(!map.is_empty(), "empty object in request body");
                map.values().for_each(assert_pruned);
            }
            Value::Array(items) => items.iter().for_each(assert_pruned),
            _ => {}
        }
    }

    #[tokio::test]
    async fn test_minimal_recipient() {
        let body = sent_body(json!({
            "name": "Acme Corp",
            "emails": ["ap@acme.com"],
            "default_payment_method": "ACH"
        }))
        .await;

        assert_eq!(
            body,
            json!({
                "name": "Acme Corp",
                "emails": ["ap@acme.com"],
                "defaultPaymentMethod": "ACH"
            })
        );
    }

    #[tokio::test]
    async fn test_empty_strings_build_no_routing_or_address() {
        let body = sent_body(json!({
            "name": "Acme Corp",
            "emails": ["ap@acme.com"],
            "default_payment_method": "ACH",
            "ach_account_number": "",
            "ach_routing_number": "",
            "city": ""
        }))
        .await;

        assert!(body.get("electronicRoutingInfo").is_none());
        assert!(body.get("address").is_none());
        assert_eq!(
            body,
            json!({
                "name": "Acme Corp",
                "emails": ["ap@acme.com"],
                "defaultPaymentMethod": "ACH"
            })
        );

        let body = sent_body(json!({
            "name": "Acme Corp",
            "emails": ["ap@acme.com"],
            "default_payment_method": "Check",
            "address_line1": "",
            "postal_code": ""
        }))
        .await;
        assert!(body.get("checkInfo").is_none());

        let body = sent_body(json!({
            "name": "Acme Corp",
            "emails": ["ap@acme.com"],
            "default_payment_method": "InternationalWire",
            "international_wire_iban": "DE89370400440532013000",
            "international_wire_swift_code": "COBADEFFXXX",
            "international_wire_bank_name": "",
            "international_wire_bank_country": "DE"
        }))
        .await;
        let routing = &body["internationalWireRoutingInfo"];
        assert_eq!(routing["iban"], "DE89370400440532013000");
        assert!(routing.get("bankDetails").is_none());
        assert_pruned(&body);
    }

    #[tokio::test]
    async fn test_ach_routing_info_with_default_account_type() {
        let body = sent_body(json!({
            "name": "Acme Corp",
            "emails": ["ap@acme.com"],
            "default_payment_method": "ACH",
            "nickname": "acme",
            "ach_account_number": "000123",
            "ach_routing_number": "021000021",
            "address_line1": "1 Main St",
            "city": "Springfield"
        }))
        .await;

        assert_eq!(
            body,
            json!({
                "name": "Acme Corp",
                "emails": ["ap@acme.com"],
                "defaultPaymentMethod": "ACH",
                "nickname": "acme",
                "electronicRoutingInfo": {
                    "accountNumber": "000123",
                    "routingNumber": "021000021",
                    "electronicAccountType": "businessChecking",
                    "address": {"address1": "1 Main St", "city": "Springfield"}
                }
            })
        );
    }

    #[tokio::test]
    async fn test_ach_needs_both_numbers() {
        let body = sent_body(json!({
            "name": "Acme",
            "emails": [],
            "default_payment_method": "ACH",
            "ach_account_number": "000123",
            "ach_account_type": "personalSavings"
        }))
        .await;

        assert!(body.get("electronicRoutingInfo").is_none());
    }

    #[tokio::test]
    async fn test_only_matching_method_block_is_sent() {
        let body = sent_body(json!({
            "name": "Acme",
            "emails": ["a@acme.com"],
            "default_payment_method": "DomesticWire",
            "ach_account_number": "1",
            "ach_routing_number": "2",
            "domestic_wire_account_number": "3",
            "domestic_wire_routing_number": "4",
            "domestic_wire_bank_name": "First Bank"
        }))
        .await;

        assert!(body.get("electronicRoutingInfo").is_none());
        assert_eq!(
            body["domesticWireRoutingInfo"],
            json!({"accountNumber": "3", "routingNumber": "4", "bankName": "First Bank"})
        );
    }

    #[tokio::test]
    async fn test_international_wire_bank_details_need_bank_name() {
        let without_name = sent_body(json!({
            "name": "GmbH",
            "emails": ["x@gmbh.de"],
            "default_payment_method": "InternationalWire",
            "international_wire_iban": "DE89370400440532013000",
            "international_wire_swift_code": "COBADEFFXXX",
            "international_wire_bank_country": "DE"
        }))
        .await;
        assert_eq!(
            without_name["internationalWireRoutingInfo"],
            json!({"iban": "DE89370400440532013000", "swiftCode": "COBADEFFXXX"})
        );

        let with_name = sent_body(json!({
            "name": "GmbH",
            "emails": ["x@gmbh.de"],
            "default_payment_method": "InternationalWire",
            "international_wire_iban": "DE89370400440532013000",
            "international_wire_swift_code": "COBADEFFXXX",
            "international_wire_bank_name": "Commerzbank",
            "international_wire_bank_country": "DE",
            "country": "DE"
        }))
        .await;
        assert_eq!(
            with_name["internationalWireRoutingInfo"],
            json!({
                "iban": "DE89370400440532013000",
                "swiftCode": "COBADEFFXXX",
                "bankDetails": {"bankName": "Commerzbank", "country": "DE"},
                "address": {"country": "DE"}
            })
        );
    }

    #[tokio::test]
    async fn test_check_info_needs_an_address() {
        let without_address = sent_body(json!({
            "name": "Landlord",
            "emails": ["l@rent.com"],
            "default_payment_method": "Check"
        }))
        .await;
        assert!(without_address.get("checkInfo").is_none());

        let with_address = sent_body(json!({
            "name": "Landlord",
            "emails": ["l@rent.com"],
            "default_payment_method": "Check",
            "postal_code": "94105",
            "region": "CA"
        }))
        .await;
        assert_eq!(
            with_address["checkInfo"],
            json!({"address": {"region": "CA", "postalCode": "94105"}})
        );
    }

    #[tokio::test]
    async fn test_body_never_contains_absent_fields() {
        let inputs = [
            json!({"name": "A", "emails": ["a@b.co"], "default_payment_method": "ACH",
                   "ach_account_number": "1", "ach_routing_number": "2"}),
            json!({"name": "A", "emails": ["a@b.co"], "default_payment_method": "InternationalWire",
                   "international_wire_iban": "X", "international_wire_swift_code": "Y",
                   "international_wire_bank_name": "Z"}),
            json!({"name": "A", "emails": ["a@b.co"], "default_payment_method": "Check",
                   "address_line2": "Suite 5"}),
        ];
        for input in inputs {
            assert_pruned(&sent_body(input).await);
        }
    }

    #[tokio::test]
    async fn test_key_is_sent_and_echoed() {
        let client = RecordingClient::ok(r#"{"id":"rec-1"}"#);
        let tool = AddPaymentRecipientTool::definition().unwrap().bind(context(client.clone()));

        let result = tool
            .invoke(args(json!({
                "name": "Acme",
                "emails": ["a@acme.com"],
                "default_payment_method": "Check",
                "idempotency_key": "add-1"
            })))
            .await
            .unwrap();

        let request = client.last_request();
        assert_eq!(request.url(), format!("{}/recipients", TEST_BASE_URL));
        assert_eq!(request.headers()[IDEMPOTENCY_KEY], "add-1");
        assert_eq!(result.content().unwrap(), &json!({"id": "rec-1", "idempotency_key": "add-1"}));
    }

    #[tokio::test]
    async fn test_invalid_email_and_method_are_rejected() {
        let client = RecordingClient::ok("{}");
        let tool = AddPaymentRecipientTool::definition().unwrap().bind(context(client.clone()));

        let err = tool
            .invoke(args(json!({
                "name": "Acme",
                "emails": ["nope"],
                "default_payment_method": "Wire"
            })))
            .await
            .unwrap_err();

        assert_eq!(err.fields(), vec!["default_payment_method", "emails"]);
        assert!(client.requests().is_empty());
    }

    #[tokio::test]
    async fn test_forbidden_message() {
        let tool =
            AddPaymentRecipientTool::definition().unwrap().bind(context(RecordingClient::reply(403, "")));

        let result = tool
            .invoke(args(json!({"name": "A", "emails": [], "default_payment_method": "ACH"})))
            .await
            .unwrap();

        assert_eq!(
            result.message(),
            Some("Error adding payment recipient: Permission error: Your API token doesn't have permission to add recipients.")
        );
    }
}
