use serde_json::Value;

use crate::error::Error;
use super::tramite::Tramite;

// One decoded page of the paginated tramites listing
#[derive(Debug)]
pub struct TramitePage {
    pub items: Vec<Tramite>,
    pub next_page_token: Option<String>,
}

// Extracts `tramites.items` and `tramites.nextPageToken` from a response
// body. An item list that is missing, not an array, empty, or not made of
// objects is the malformed-page condition: the caller stops paginating and
// keeps whatever it accumulated from earlier pages
pub fn parse_page(body: &Value) -> Result<TramitePage, Error> {
    let tramites_data = body.get("tramites");
    let items = tramites_data.and_then(|data| data.get("items"));

    match items {
        Some(Value::Array(list)) if !list.is_empty() => {
            let items: Vec<Tramite> = serde_json::from_value(Value::Array(list.clone()))?;
            let next_page_token = tramites_data
                .and_then(|data| data.get("nextPageToken"))
                .and_then(Value::as_str)
                .filter(|token| !token.is_empty())
                .map(String::from);

            Ok(TramitePage {
                items,
                next_page_token,
            })
        }
        _ => Err(Error::Processing(
            "unexpected response structure or no tramites in page".to_string(),
        )),
    }
}
