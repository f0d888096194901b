//! Application services - REST use cases over `ApiPort`.

mod character_service;
mod dice_service;

pub use character_service::CharacterService;
pub use dice_service::DiceService;

/// `?k=v&...` for the given pairs, or an empty string when there are none.
pub(crate) fn query_string(pairs: Vec<(&'static str, String)>) -> String {
    if pairs.is_empty() {
        return String::new();
    }
    let encoded = url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("?{}", encoded)
}

/// Percent-encodes a single path segment.
pub(crate) fn path_segment(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Link to the read-only page of a public character.
pub fn share_url(origin: &str, token: &str) -> String {
    format!("{}/share/{}", origin.trim_end_matches('/'), path_segment(token))
}
