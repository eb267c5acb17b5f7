use crate::ids::ItemId;

/// Shown for items the catalogue does not know.
pub const UNKNOWN_ITEM: &str = "Unknown item";

const ITEMS: &[(&str, &str)] = &[
    ("Bolo", "Large knife - effective against aswangs"),
    ("Asin", "Blessed salt - harms evil spirits"),
    ("Bawang", "Sacred garlic - repels creatures"),
    ("Agimat", "Protective amulet - shields from harm"),
];

/// Description of a known item, matched ignoring case.
pub fn describe(item: &ItemId) -> Option<&'static str> {
    ITEMS
        .iter()
        .find(|(name, _)| item.matches(&ItemId::new(*name)))
        .map(|(_, description)| *description)
}

/// Description of `item`, or [`UNKNOWN_ITEM`].
pub fn describe_or_unknown(item: &ItemId) -> &'static str {
    describe(item).unwrap_or(UNKNOWN_ITEM)
}
