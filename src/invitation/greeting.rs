use reqwest::Url;

/// Name of the invited guest carried by the page URL (`?to=`), trimmed.
/// Absent, blank, or unparseable URLs yield `None`.
pub fn recipient_from_url(url: &str) -> Option<String> {
    let url = match Url::parse(url) {
        Ok(url) => url,
        Err(err) => {
            log::debug!("Ignoring invitation url `{url}`: {err}");
            return None;
        }
    };

    url.query_pairs()
        .find(|(key, _)| key == "to")
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
