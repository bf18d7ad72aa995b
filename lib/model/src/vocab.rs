//! Names and heuristics for the schema.org-flavoured data found in web crawls.

/// The `type` value every extracted record carries.
pub const RECORD_TYPE: &str = "Restaurant";

/// Type names (matched as suffixes of the local name) that mark an entity as restaurant-like.
pub const RESTAURANT_TYPE_SUFFIXES: [&str; 2] = ["Restaurant", "FoodEstablishment"];

/// The local name of the `rdf:type`-equivalent predicates (`rdf:type`, `schema:type`, ...).
pub const TYPE_PROPERTY: &str = "type";

/// The property whose nested bag is inspected by the item strategy.
pub const ITEM_PROPERTY: &str = "item";

/// Returns the last path segment or fragment of a URI.
///
/// Trailing `/` and `#` are ignored. If no separator is present, the input is returned as is.
pub fn local_name(iri: &str) -> &str {
    let trimmed = iri.trim_end_matches(['/', '#']);
    match trimmed.rsplit(['/', '#']).next() {
        Some(name) if !name.is_empty() => name,
        _ => iri,
    }
}

/// Whether a predicate local name denotes the type of its subject.
pub fn is_type_property(local_name: &str) -> bool {
    local_name == TYPE_PROPERTY
}

/// Whether an object of a predicate with this local name should be shortened to its local name.
///
/// Type-ish predicates (`type`, `itemtype`, ...) point to vocabulary terms where only the term name
/// is of interest.
pub fn shortens_uri_values(predicate_local_name: &str) -> bool {
    predicate_local_name.contains(TYPE_PROPERTY)
}

/// Whether a type value (a URI or an already shortened name) is restaurant-like.
///
/// The match is a case-sensitive suffix match on the local name, so `FastFoodRestaurant` matches
/// while `restaurant` does not.
pub fn is_restaurant_type(value: &str) -> bool {
    let name = local_name(value);
    RESTAURANT_TYPE_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}
