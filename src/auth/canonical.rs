//! Canonical request data.
//!
//! The string that is signed must be byte-identical to the query string or
//! body that is transmitted. Build it once here and use the same value for
//! both.

use serde::Serialize;

use crate::error::KrakenError;

/// Render `params` as `application/x-www-form-urlencoded`.
///
/// Fields appear in declaration order, `None` options are skipped by serde,
/// and there is no leading `?`. A struct whose fields are all skipped yields `""`.
///
/// ```rust
/// use kraken_vault::auth::canonical;
///
/// #[derive(serde::Serialize)]
/// #[serde(rename_all = "camelCase")]
/// struct SendOrder<'a> {
///     order_type: &'a str,
///     symbol: &'a str,
///     side: &'a str,
///     size: &'a str,
///     limit_price: &'a str,
/// }
///
/// let data = canonical::encode(&SendOrder {
///     order_type: "post",
///     symbol: "PF_BCHUSD",
///     side: "buy",
///     size: "0.1",
///     limit_price: "550",
/// })
/// .unwrap();
/// assert_eq!(data, "orderType=post&symbol=PF_BCHUSD&side=buy&size=0.1&limitPrice=550");
/// ```
pub fn encode<T: Serialize + ?Sized>(params: &T) -> Result<String, KrakenError> {
    serde_urlencoded::to_string(params).map_err(|e| KrakenError::Encoding(e.to_string()))
}

/// Append canonical data to a URL path as a query string.
///
/// Returns `path` unchanged when `data` is empty.
pub fn with_query(path: &str, data: &str) -> String {
    if data.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{data}")
    }
}
