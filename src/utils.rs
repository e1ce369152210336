use rand::{Rng, distr::Alphanumeric};
use url::Url;

use crate::types::{CatalogRecord, CatalogTableRow, ItemType};

/// Returns the value of `key` among the `&`-delimited parameters of a URI fragment.
///
/// A leading `#` is ignored, keys must match exactly and the first occurrence
/// wins. Segments without `=` are skipped, so malformed fragments simply
/// yield `None`.
pub fn fragment_param<'a>(fragment: &'a str, key: &str) -> Option<&'a str> {
    fragment
        .strip_prefix('#')
        .unwrap_or(fragment)
        .split('&')
        .filter_map(|segment| segment.split_once('='))
        .find(|(k, _)| *k == key)
        .map(|(_, value)| value)
}

/// Extracts the access token from an implicit-grant redirect fragment.
///
/// An empty `access_token=` value counts as no token.
pub fn parse_access_token(fragment: &str) -> Option<String> {
    fragment_param(fragment, "access_token")
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Random nonce sent as `state` and checked again on the redirect.
pub fn generate_state() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Builds the implicit-grant (`response_type=token`) authorization URL.
pub fn build_authorize_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    scope: &str,
    state: &str,
) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(auth_url)?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("client_id", client_id)
            .append_pair("response_type", "token")
            .append_pair("redirect_uri", redirect_uri)
            .append_pair("state", state);
        if !scope.trim().is_empty() {
            query.append_pair("scope", scope);
        }
    }
    Ok(url)
}

/// Shortens a token for display, keeping only its first and last characters.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }

    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}…{}", head, tail)
}

pub fn to_table_rows<'a, F>(
    records: impl IntoIterator<Item = &'a CatalogRecord>,
    item_type: ItemType,
    is_liked: F,
) -> Vec<CatalogTableRow>
where
    F: Fn(&str, ItemType) -> bool,
{
    records
        .into_iter()
        .map(|r| CatalogTableRow {
            liked: if is_liked(&r.id, item_type) {
                "♥".to_string()
            } else {
                String::new()
            },
            kind: item_type.to_string(),
            name: r.name.clone(),
            id: r.id.clone(),
            url: r.external_url.clone(),
        })
        .collect()
}
