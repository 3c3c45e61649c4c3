//! UPI-Zahlungs-Widget.
//!
//! Der abgeschickte Wert ist JSON `{amount, provider, paid, upiString}`.
//! Nur der in `authorisedUser` hinterlegte Benutzer darf eine Zahlung als
//! bezahlt markieren.

use super::properties::{PropertyKind, PropertySpec, ALIGNMENTS, SIZES};
use super::{attrs, FieldType, InputKind, PaletteEntry, RuntimeInput, ValueShape};
use crate::core::{Attributes, ElementInstance};
use crate::ports::User;
use serde::{Deserialize, Serialize};
use serde_json::json;

/// Muster einer UPI-Zahlungsadresse (`name@bank`).
pub const VPA_PATTERN: &str = r"^[\w.\-]{2,256}@[a-zA-Z]{2,64}$";

/// Verbundwert eines Zahlungsfeldes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentState {
    /// Betrag als Dezimalstring
    pub amount: String,
    /// Zahlungsanbieter (`gpay`/`phonepe`)
    pub provider: String,
    /// Ob die Zahlung bestätigt wurde
    pub paid: bool,
    /// Generierter `upi://pay`-Link
    pub upi_string: String,
}

impl PaymentState {
    /// Startzustand aus den Instanz-Attributen.
    pub fn initial(element: &ElementInstance) -> Self {
        let amount = element
            .attributes
            .get("amount")
            .map(|v| match v {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_default();
        Self::with_amount(element, &amount, element.attr_bool("paid"))
    }

    /// Zustand mit neuem Betrag; der UPI-Link wird neu gebaut.
    pub fn with_amount(element: &ElementInstance, amount: &str, paid: bool) -> Self {
        Self {
            amount: amount.to_string(),
            provider: element.attr_str("provider").to_string(),
            paid,
            upi_string: build_upi_link(element.attr_str("vpa"), amount),
        }
    }

    /// Liest einen gespeicherten Wert; `None` bei ungültigem JSON.
    pub fn parse(value: &str) -> Option<Self> {
        serde_json::from_str(value).ok()
    }

    /// JSON-Kodierung für die Submission.
    pub fn encode(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }
}

/// Baut einen `upi://pay`-Link. Ein leerer oder nicht numerischer Betrag
/// wird weggelassen; sonst wird er auf zwei Nachkommastellen formatiert.
pub fn build_upi_link(vpa: &str, amount: &str) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("pa", vpa)
        .append_pair("pn", "Payee")
        .append_pair("cu", "INR");
    if let Ok(amount) = amount.trim().parse::<f64>() {
        if amount.is_finite() {
            query.append_pair("am", &format!("{amount:.2}"));
        }
    }
    format!("upi://pay?{}", query.finish())
}

/// Zahlungsfeld.
pub struct UpiPayment;

impl UpiPayment {
    /// Ob `user` die Zahlung als bezahlt markieren darf.
    pub fn may_mark_paid(element: &ElementInstance, user: Option<&User>) -> bool {
        let authorised = element.attr_str("authorisedUser");
        match user {
            Some(user) => !authorised.is_empty() && user.email == authorised,
            None => false,
        }
    }
}

impl FieldType for UpiPayment {
    fn type_name(&self) -> &'static str {
        "UPIPayment"
    }

    fn palette_entry(&self) -> PaletteEntry {
        PaletteEntry {
            label: "UPI Payment",
            icon: "indian-rupee",
        }
    }

    fn default_attributes(&self) -> Attributes {
        attrs([
            ("label", json!("Pay via UPI")),
            ("required", json!(true)),
            ("provider", json!("gpay")),
            ("vpa", json!("")),
            ("amount", json!("1")),
            ("customId", json!("")),
            ("size", json!("medium")),
            ("align", json!("left")),
            ("authorisedUser", json!("")),
            ("paid", json!(false)),
            ("color", json!("#000000")),
            ("background", json!("#ffffff")),
            ("borderRadius", json!("5px")),
            ("borderColor", json!("#d1d5db")),
            ("borderWidth", json!("1px")),
        ])
    }

    /// Pflicht-Zahlungen sind nur gültig, wenn der Wert dekodiert und `paid` gesetzt ist.
    fn validate(&self, element: &ElementInstance, value: &str) -> bool {
        if !element.is_required() {
            return true;
        }
        PaymentState::parse(value).is_some_and(|state| state.paid)
    }

    fn runtime_input(&self, element: &ElementInstance) -> RuntimeInput {
        let mut input = RuntimeInput::new(InputKind::Payment, element);
        input.default_value = PaymentState::initial(element).encode();
        input
    }

    fn property_schema(&self) -> Vec<PropertySpec> {
        vec![
            PropertySpec::text("label", "Beschriftung", Some(100)),
            PropertySpec::boolean("required", "Pflichtfeld"),
            PropertySpec::choice("provider", "Anbieter", &["gpay", "phonepe"]),
            PropertySpec {
                key: "vpa",
                label: "UPI-Adresse",
                kind: PropertyKind::Pattern {
                    pattern: VPA_PATTERN,
                    hint: "name@bank",
                },
                required: false,
            },
            PropertySpec::text("amount", "Betrag", None),
            PropertySpec::text("customId", "Eigene ID", None),
            PropertySpec::choice("size", "Größe", SIZES),
            PropertySpec::choice("align", "Ausrichtung", ALIGNMENTS),
            PropertySpec::text("authorisedUser", "Darf als bezahlt markieren", None),
            PropertySpec::boolean("paid", "Bezahlt"),
        ]
    }

    fn value_shape(&self) -> ValueShape {
        ValueShape::Json
    }
}
