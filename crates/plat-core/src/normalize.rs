//! Payload normalization: one dispatch over the endpoint tag.
//!
//! Every raw provider payload enters here as `serde_json::Value` plus the
//! [`PayloadSource`] that produced it, and leaves as a [`PropertyFragment`]
//! carrying only the fields the payload actually contained. Shape variants
//! are handled by the ordered extractor chains in [`crate::extract`]; no
//! call site outside this module touches raw payload paths.

use chrono::NaiveDate;
use serde_json::Value;

use crate::enums::PayloadSource;
use crate::errors::NormalizeError;
use crate::extract::{MARKET_VALUE_CHAIN, f64_at, first_f64, first_str, first_u32, str_at, u32_at};
use crate::fragment::PropertyFragment;
use crate::property::{Location, Owner};

/// Top-level keys a property payload may carry. A payload with none of them
/// matches no recognizable shape.
const KNOWN_GROUPS: [&str; 9] = [
    "identifier",
    "address",
    "location",
    "summary",
    "building",
    "lot",
    "assessment",
    "sale",
    "owner",
];

const PROVIDER_ID_CHAIN: [&str; 3] = ["identifier.attomId", "identifier.Id", "identifier.obPropId"];
const PROPERTY_TYPE_CHAIN: [&str; 3] = ["summary.proptype", "summary.propclass", "summary.propertyType"];
const BUILDING_SIZE_CHAIN: [&str; 3] = [
    "building.size.universalsize",
    "building.size.livingsize",
    "building.size.bldgsize",
];
const YEAR_BUILT_CHAIN: [&str; 2] = ["summary.yearbuilt", "building.summary.yearbuilteffective"];
const BATHROOMS_CHAIN: [&str; 2] = ["building.rooms.bathstotal", "building.rooms.bathsfull"];
const LAND_VALUE_CHAIN: [&str; 2] = [
    "assessment.assessed.assdlandvalue",
    "assessment.market.mktlandvalue",
];
const SALE_DATE_CHAIN: [&str; 3] = ["sale.salesearchdate", "sale.saleTransDate", "sale.amount.salerecdate"];

/// Normalize one raw payload into a fragment.
///
/// # Errors
///
/// Returns [`NormalizeError::UnrecognizedShape`] when the payload matches no
/// known provider shape. Callers log the failure and merge nothing from the
/// payload; a malformed fragment never aborts a multi-fragment merge.
pub fn normalize(source: PayloadSource, payload: &Value) -> Result<PropertyFragment, NormalizeError> {
    let recognizable = payload
        .as_object()
        .is_some_and(|obj| KNOWN_GROUPS.iter().any(|g| obj.contains_key(*g)));
    if !recognizable {
        return Err(NormalizeError::UnrecognizedShape { source });
    }

    match source {
        PayloadSource::Owner => Ok(normalize_owner(source, payload)),
        PayloadSource::Events => Ok(normalize_events(source, payload)),
        PayloadSource::Search | PayloadSource::Detail | PayloadSource::Click => {
            Ok(normalize_property(source, payload))
        }
    }
}

/// Full property shape: search and detail payloads, plus click placeholders
/// that arrive in the same shape.
fn normalize_property(source: PayloadSource, v: &Value) -> PropertyFragment {
    let mut frag = PropertyFragment::empty(source);
    frag.provider_id = first_str(v, &PROVIDER_ID_CHAIN);

    frag.address.line1 = str_at(v, "address.line1");
    frag.address.city = str_at(v, "address.locality");
    frag.address.state = str_at(v, "address.countrySubd");
    frag.address.postal = str_at(v, "address.postal1");
    frag.address.one_line = str_at(v, "address.oneLine");

    frag.location = match (f64_at(v, "location.latitude"), f64_at(v, "location.longitude")) {
        (Some(latitude), Some(longitude)) => Some(Location { latitude, longitude }),
        _ => None,
    };

    frag.classification.property_type = first_str(v, &PROPERTY_TYPE_CHAIN);

    frag.building.size_sq_ft = first_f64(v, &BUILDING_SIZE_CHAIN);
    frag.building.year_built = first_u32(v, &YEAR_BUILT_CHAIN);
    frag.building.bedrooms = u32_at(v, "building.rooms.beds");
    frag.building.bathrooms = first_f64(v, &BATHROOMS_CHAIN);
    frag.building.stories = u32_at(v, "building.summary.levels");

    frag.lot.size_sq_ft = f64_at(v, "lot.lotsize2");
    frag.lot.size_acres = f64_at(v, "lot.lotsize1");

    frag.valuation.market_value = first_f64(v, &MARKET_VALUE_CHAIN);
    frag.valuation.assessed_value = f64_at(v, "assessment.assessed.assdttlvalue");
    frag.valuation.land_value = first_f64(v, &LAND_VALUE_CHAIN);
    frag.valuation.tax_amount = f64_at(v, "assessment.tax.taxamt");
    frag.valuation.tax_year = u32_at(v, "assessment.tax.taxyear");

    fill_sale(&mut frag, v);

    // Detail-with-owner payloads carry the owner block inline.
    if v.get("owner").is_some() {
        frag.owner = extract_owner(v);
    }
    frag
}

/// Owner payloads contribute the owner group only (plus the id anchor).
fn normalize_owner(source: PayloadSource, v: &Value) -> PropertyFragment {
    let mut frag = PropertyFragment::empty(source);
    frag.provider_id = first_str(v, &PROVIDER_ID_CHAIN);
    frag.owner = extract_owner(v);
    frag
}

/// Events payloads contribute the sale group only (plus the id anchor).
fn normalize_events(source: PayloadSource, v: &Value) -> PropertyFragment {
    let mut frag = PropertyFragment::empty(source);
    frag.provider_id = first_str(v, &PROVIDER_ID_CHAIN);
    fill_sale(&mut frag, v);
    frag
}

fn fill_sale(frag: &mut PropertyFragment, v: &Value) {
    frag.sale.amount = f64_at(v, "sale.amount.saleamt");
    frag.sale.date = first_str(v, &SALE_DATE_CHAIN)
        .and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok());
    frag.sale.document_type = str_at(v, "sale.amount.saledoctype");
}

fn extract_owner(v: &Value) -> Option<Owner> {
    let primary_name = str_at(v, "owner.owner1.fullname").or_else(|| {
        let first = str_at(v, "owner.owner1.firstnameandmi");
        let last = str_at(v, "owner.owner1.lastname");
        match (first, last) {
            (Some(f), Some(l)) => Some(format!("{f} {l}")),
            (None, Some(l)) => Some(l),
            _ => None,
        }
    });
    let secondary_name = str_at(v, "owner.owner2.fullname");
    let is_corporate = str_at(v, "owner.corporateindicator").map(|c| c.eq_ignore_ascii_case("y"));
    let mailing_address = str_at(v, "owner.mailingaddressoneline");

    if primary_name.is_none()
        && secondary_name.is_none()
        && is_corporate.is_none()
        && mailing_address.is_none()
    {
        return None;
    }
    Some(Owner {
        primary_name,
        secondary_name,
        is_corporate,
        mailing_address,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const SEARCH_FIXTURE: &str = r#"{
        "identifier": {"attomId": 184713191},
        "address": {
            "line1": "157 W 57TH ST",
            "locality": "NEW YORK",
            "countrySubd": "NY",
            "postal1": "10019",
            "oneLine": "157 W 57TH ST, NEW YORK, NY 10019"
        },
        "location": {"latitude": "40.765321", "longitude": "-73.979237"},
        "summary": {"proptype": "CONDOMINIUM", "yearbuilt": 2014},
        "assessment": {
            "market": {"mktttlvalue": 2500000},
            "assessed": {"assdttlvalue": 1100000},
            "tax": {"taxamt": 28000.5, "taxyear": 2023}
        },
        "sale": {"amount": {"saleamt": 1900000, "saledoctype": "DEED"}, "salesearchdate": "2021-06-14"}
    }"#;

    const OWNER_FIXTURE: &str = r#"{
        "identifier": {"attomId": 184713191},
        "owner": {
            "owner1": {"lastname": "CARNEGIE HALL TOWER LLC"},
            "corporateindicator": "Y",
            "mailingaddressoneline": "152 W 57TH ST FL 12, NEW YORK, NY 10019"
        }
    }"#;

    #[test]
    fn search_payload_normalizes() {
        let v: serde_json::Value = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let frag = normalize(PayloadSource::Search, &v).unwrap();

        assert_eq!(frag.provider_id.as_deref(), Some("184713191"));
        assert_eq!(frag.address.postal.as_deref(), Some("10019"));
        assert_eq!(
            frag.classification.property_type.as_deref(),
            Some("CONDOMINIUM")
        );
        assert_eq!(frag.building.year_built, Some(2014));
        assert_eq!(frag.location.unwrap().latitude, 40.765_321);
        assert_eq!(frag.valuation.tax_amount, Some(28_000.5));
        assert_eq!(frag.sale.date, NaiveDate::from_ymd_opt(2021, 6, 14));
    }

    #[test]
    fn normalizing_twice_yields_same_identity() {
        let v: serde_json::Value = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let a = normalize(PayloadSource::Search, &v).unwrap();
        let b = normalize(PayloadSource::Search, &v).unwrap();
        assert_eq!(a.identity(), b.identity());
        assert_eq!(a, b);
    }

    #[test]
    fn market_value_prefers_live_market_over_assessed() {
        let v: serde_json::Value = serde_json::from_str(SEARCH_FIXTURE).unwrap();
        let frag = normalize(PayloadSource::Search, &v).unwrap();
        // Both mktttlvalue and assdttlvalue populated: the higher-priority
        // source must win, never the assessed figure.
        assert_eq!(frag.valuation.market_value, Some(2_500_000.0));
        assert_eq!(frag.valuation.assessed_value, Some(1_100_000.0));
    }

    #[test]
    fn market_value_falls_back_to_sale_amount() {
        let v = json!({
            "identifier": {"attomId": 5},
            "sale": {"amount": {"saleamt": 875000}}
        });
        let frag = normalize(PayloadSource::Search, &v).unwrap();
        assert_eq!(frag.valuation.market_value, Some(875_000.0));
    }

    #[test]
    fn owner_payload_contributes_owner_group_only() {
        let v: serde_json::Value = serde_json::from_str(OWNER_FIXTURE).unwrap();
        let frag = normalize(PayloadSource::Owner, &v).unwrap();

        let owner = frag.owner.unwrap();
        assert_eq!(owner.primary_name.as_deref(), Some("CARNEGIE HALL TOWER LLC"));
        assert_eq!(owner.is_corporate, Some(true));
        assert!(frag.address.line1.is_none());
        assert!(frag.valuation.market_value.is_none());
    }

    #[test]
    fn events_payload_contributes_sale_group_only() {
        let v = json!({
            "identifier": {"attomId": 5},
            "sale": {
                "amount": {"saleamt": 1250000, "saledoctype": "GRANT DEED"},
                "salesearchdate": "2019-03-02"
            }
        });
        let frag = normalize(PayloadSource::Events, &v).unwrap();
        assert_eq!(frag.sale.amount, Some(1_250_000.0));
        assert_eq!(frag.sale.document_type.as_deref(), Some("GRANT DEED"));
        assert!(frag.owner.is_none());
        assert!(frag.building.size_sq_ft.is_none());
    }

    #[test]
    fn unrecognized_shape_is_an_error() {
        for v in [json!("not an object"), json!({"unexpected": {"keys": 1}}), json!(null)] {
            let err = normalize(PayloadSource::Detail, &v).unwrap_err();
            assert!(matches!(err, NormalizeError::UnrecognizedShape { .. }));
        }
    }

    #[test]
    fn detail_payload_with_inline_owner_block() {
        let v = json!({
            "identifier": {"attomId": 7},
            "building": {"size": {"universalsize": 1840}},
            "lot": {"lotsize1": 0.12, "lotsize2": 5227},
            "owner": {"owner1": {"firstnameandmi": "JANE", "lastname": "DOE"}}
        });
        let frag = normalize(PayloadSource::Detail, &v).unwrap();
        assert_eq!(frag.building.size_sq_ft, Some(1840.0));
        assert_eq!(frag.lot.size_acres, Some(0.12));
        assert_eq!(frag.owner.unwrap().primary_name.as_deref(), Some("JANE DOE"));
    }
}
