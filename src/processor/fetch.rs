use reqwest::blocking::Client;
use serde_json::Value;

use crate::config::ApiConfig;
use crate::error::Error;
use super::page::parse_page;
use super::tramite::Tramite;

// Fixed page size requested from the API
const MAX_RESULTS: u32 = 20;

pub struct TramiteFetcher {
    base_url: String,
    token: String,
    client: Client,
}

impl TramiteFetcher {
    pub fn new(config: &ApiConfig) -> Result<Self, Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            token: config.token.clone(),
            client,
        })
    }

    // Fetches every page of tramites, following the continuation token.
    // Never fails: transport and HTTP errors discard everything and yield
    // an empty list, while a malformed page keeps the pages fetched before
    // it
    pub fn fetch_all(&self) -> Vec<Tramite> {
        let mut tramites: Vec<Tramite> = Vec::new();
        let mut next_page_token: Option<String> = None;

        println!("Starting tramite fetch...");

        loop {
            let mut request = self.client.get(&self.base_url).query(&[
                ("maxResults", MAX_RESULTS.to_string()),
                ("token", self.token.clone()),
            ]);

            if let Some(token) = &next_page_token {
                request = request.query(&[("pageToken", token.as_str())]);
                println!(
                    "  -> Requesting page with token: {}...",
                    token_preview(token)
                );
            } else {
                println!("  -> Requesting the first page...");
            }

            let response = match request
                .send()
                .and_then(|response| response.error_for_status())
            {
                Ok(response) => response,
                Err(err) => {
                    eprintln!("Error fetching tramites (request error): {}", err);
                    return Vec::new();
                }
            };

            let body: Value = match response.json() {
                Ok(body) => body,
                Err(err) => {
                    eprintln!("Unexpected error while fetching tramites: {}", err);
                    return Vec::new();
                }
            };

            match parse_page(&body) {
                Ok(page) => {
                    tramites.extend(page.items);
                    match page.next_page_token {
                        Some(token) => next_page_token = Some(token),
                        None => break,
                    }
                }
                Err(err) => {
                    eprintln!("Error: {}. Stopping pagination.", err);
                    break;
                }
            }
        }

        println!(
            "Fetch complete. Total tramites retrieved: {}",
            tramites.len()
        );
        tramites
    }
}

// First few characters of the continuation token, for progress output
fn token_preview(token: &str) -> String {
    token.chars().take(10).collect()
}
