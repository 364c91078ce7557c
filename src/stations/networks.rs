//! The selectable networks: one per US state or territory, suffixed with a
//! network type token (`CO` + `ASOS` -> `CO_ASOS`).

/// Two-letter region codes used by IEM network identifiers.
pub const REGION_CODES: [&str; 53] = [
    "AK", "AL", "AR", "AZ", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "IA", "ID", "IL",
    "IN", "KS", "KY", "LA", "MA", "MD", "ME", "MI", "MN", "MO", "MS", "MT", "NC", "ND", "NE",
    "NH", "NJ", "NM", "NV", "NY", "OH", "OK", "OR", "PA", "PR", "RI", "SC", "SD", "TN", "TX",
    "UT", "VA", "VI", "VT", "WA", "WI", "WV", "WY",
];

pub fn network_name(region: &str, token: &str) -> String {
    format!("{}_{}", region.to_ascii_uppercase(), token.to_ascii_uppercase())
}

/// Every selectable network for `token`, alphabetical by region.
pub fn default_networks(token: &str) -> Vec<String> {
    REGION_CODES
        .iter()
        .map(|region| network_name(region, token))
        .collect()
}
