//! The append-only merge engine.
//!
//! Fragments from different endpoints fold into one record per identity.
//! A leaf is written only when the incoming fragment carries it AND the
//! existing value is either absent or came from a strictly lower-trust
//! source (detail > search > click; owner and events fragments are
//! union-only). A populated leaf is therefore never nulled by a later,
//! less-complete fragment, and merging the same fragment twice is a no-op
//! the second time.

use plat_core::property::Provenance;
use plat_core::{CanonicalProperty, PayloadSource, PropertyFragment, PropertyIdentity};

/// Write `incoming` into `slot` if the trust rules allow it.
///
/// A populated leaf whose origin is unknown (pre-seeded records) is kept;
/// only a strictly higher-trust source may replace a tracked value.
fn assign<T: Clone + PartialEq>(
    provenance: &mut Provenance,
    leaf: &'static str,
    slot: &mut Option<T>,
    incoming: Option<&T>,
    source: PayloadSource,
) {
    let Some(value) = incoming else { return };
    let write = match (slot.is_some(), provenance.rank_of(leaf)) {
        (false, _) => true,
        (true, Some(existing_rank)) => source.trust_rank() > existing_rank,
        (true, None) => false,
    };
    if write {
        *slot = Some(value.clone());
        provenance.note(leaf, source);
    }
}

/// Fold one fragment into an existing record, append-only.
///
/// Identity is never touched; `completeness` is recomputed before returning
/// so it is never stored stale.
pub fn merge_fragment(record: &mut CanonicalProperty, frag: &PropertyFragment) {
    let src = frag.source;
    let CanonicalProperty {
        provenance: prov,
        provider_id,
        address,
        location,
        classification,
        building,
        lot,
        valuation,
        sale,
        owner,
        ..
    } = record;

    assign(prov, "provider_id", provider_id, frag.provider_id.as_ref(), src);

    assign(prov, "address.line1", &mut address.line1, frag.address.line1.as_ref(), src);
    assign(prov, "address.city", &mut address.city, frag.address.city.as_ref(), src);
    assign(prov, "address.state", &mut address.state, frag.address.state.as_ref(), src);
    assign(prov, "address.postal", &mut address.postal, frag.address.postal.as_ref(), src);
    assign(prov, "address.one_line", &mut address.one_line, frag.address.one_line.as_ref(), src);

    assign(prov, "location", location, frag.location.as_ref(), src);

    assign(
        prov,
        "classification.property_type",
        &mut classification.property_type,
        frag.classification.property_type.as_ref(),
        src,
    );

    assign(prov, "building.size_sq_ft", &mut building.size_sq_ft, frag.building.size_sq_ft.as_ref(), src);
    assign(prov, "building.year_built", &mut building.year_built, frag.building.year_built.as_ref(), src);
    assign(prov, "building.bedrooms", &mut building.bedrooms, frag.building.bedrooms.as_ref(), src);
    assign(prov, "building.bathrooms", &mut building.bathrooms, frag.building.bathrooms.as_ref(), src);
    assign(prov, "building.stories", &mut building.stories, frag.building.stories.as_ref(), src);

    assign(prov, "lot.size_sq_ft", &mut lot.size_sq_ft, frag.lot.size_sq_ft.as_ref(), src);
    assign(prov, "lot.size_acres", &mut lot.size_acres, frag.lot.size_acres.as_ref(), src);

    assign(prov, "valuation.market_value", &mut valuation.market_value, frag.valuation.market_value.as_ref(), src);
    assign(prov, "valuation.assessed_value", &mut valuation.assessed_value, frag.valuation.assessed_value.as_ref(), src);
    assign(prov, "valuation.land_value", &mut valuation.land_value, frag.valuation.land_value.as_ref(), src);
    assign(prov, "valuation.tax_amount", &mut valuation.tax_amount, frag.valuation.tax_amount.as_ref(), src);
    assign(prov, "valuation.tax_year", &mut valuation.tax_year, frag.valuation.tax_year.as_ref(), src);

    assign(prov, "sale.amount", &mut sale.amount, frag.sale.amount.as_ref(), src);
    assign(prov, "sale.date", &mut sale.date, frag.sale.date.as_ref(), src);
    assign(prov, "sale.document_type", &mut sale.document_type, frag.sale.document_type.as_ref(), src);

    // Owner facts come only from owner-carrying payloads; union the leaves
    // into whatever owner group already exists.
    if let Some(frag_owner) = &frag.owner {
        let slot = owner.get_or_insert_with(Default::default);
        assign(prov, "owner.primary_name", &mut slot.primary_name, frag_owner.primary_name.as_ref(), src);
        assign(prov, "owner.secondary_name", &mut slot.secondary_name, frag_owner.secondary_name.as_ref(), src);
        assign(prov, "owner.is_corporate", &mut slot.is_corporate, frag_owner.is_corporate.as_ref(), src);
        assign(prov, "owner.mailing_address", &mut slot.mailing_address, frag_owner.mailing_address.as_ref(), src);
    }

    record.recompute_completeness();
}

/// Fold a fragment into an identity-keyed list: merge into the existing
/// record when the identity is already present, append a fresh record
/// otherwise. Fragments that carry neither a provider id nor an address
/// cannot anchor a record and are skipped.
///
/// Returns the identity the fragment landed on.
pub fn fold_fragment(
    list: &mut Vec<CanonicalProperty>,
    frag: &PropertyFragment,
) -> Option<PropertyIdentity> {
    let identity = frag.identity()?;
    if let Some(existing) = list.iter_mut().find(|r| r.identity == identity) {
        merge_fragment(existing, frag);
    } else {
        let mut record = CanonicalProperty::new(identity.clone());
        merge_fragment(&mut record, frag);
        list.push(record);
    }
    Some(identity)
}
