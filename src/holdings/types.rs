use serde::{Deserialize, Serialize};

/// One position as served by the holdings endpoint.
///
/// Field names follow the wire format (`avgPrice` is camelCase on the wire).
/// Unknown fields are ignored; every listed field is required.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRecord {
    pub symbol: String,
    pub quantity: i64,
    pub ltp: f64,
    pub avg_price: f64,
    pub close: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_record_and_ignores_unknown_fields() {
        let raw = r#"[
            {"symbol":"TCS","quantity":10,"ltp":3250.5,"avgPrice":2480.3,"close":3312.0,
             "exchange":"NSE"},
            {"symbol":"INFY","quantity":4,"ltp":1500,"avgPrice":1400.25,"close":1490.5}
        ]"#;
        let holdings: Vec<HoldingRecord> = serde_json::from_str(raw).unwrap();

        assert_eq!(holdings.len(), 2);
        assert_eq!(
            holdings[0],
            HoldingRecord {
                symbol: "TCS".into(),
                quantity: 10,
                ltp: 3250.5,
                avg_price: 2480.3,
                close: 3312.0,
            }
        );
        assert_eq!(holdings[1].symbol, "INFY");
        assert_eq!(holdings[1].ltp, 1500.0);
    }

    #[test]
    fn missing_field_is_an_error() {
        let raw = r#"{"symbol":"TCS","quantity":10,"ltp":3250.5,"close":3312.0}"#;
        assert!(serde_json::from_str::<HoldingRecord>(raw).is_err());
    }

    #[test]
    fn fractional_quantity_is_an_error() {
        let raw = r#"{"symbol":"TCS","quantity":1.5,"ltp":1.0,"avgPrice":1.0,"close":1.0}"#;
        assert!(serde_json::from_str::<HoldingRecord>(raw).is_err());
    }

    #[test]
    fn serializes_with_wire_names() {
        let h = HoldingRecord {
            symbol: "TCS".into(),
            quantity: 1,
            ltp: 2.0,
            avg_price: 1.5,
            close: 2.5,
        };
        let v = serde_json::to_value(&h).unwrap();
        assert_eq!(v["avgPrice"], 1.5);
        assert!(v.get("avg_price").is_none());
    }
}
