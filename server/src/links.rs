use crate::{
    codegen::CodeGenerator,
    error::ApiError,
    store::{LinkStore, StoreError},
};
use std::future::Future;

/// Check that `url` is non-empty and uses http or https. The URL is stored
/// exactly as given.
pub fn validate_url(url: &str) -> Result<&str, ApiError> {
    if url.is_empty() {
        return Err(ApiError::EmptyUrl);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ApiError::UnsupportedScheme);
    }
    Ok(url)
}

/// Store `url` under a fresh short code and return the code.
///
/// `generate_unique` only promises the code was free when it looked. If a
/// concurrent request claims the same code before our insert, the store
/// rejects the insert and a new code is drawn, so an existing mapping is
/// never replaced.
pub async fn shorten(store: &LinkStore, codes: &CodeGenerator, url: &str) -> String {
    claim_code(store, url, || codes.generate_unique(store)).await
}

/// Insert loop behind [`shorten`]; `next_code` proposes each candidate.
async fn claim_code<F, Fut>(store: &LinkStore, url: &str, mut next_code: F) -> String
where
    F: FnMut() -> Fut,
    Fut: Future<Output = String>,
{
    loop {
        let code = next_code().await;
        match store.insert(code.clone(), url).await {
            Ok(()) => {
                tracing::info!(
                    "Created link {} -> {} ({} stored)",
                    code,
                    url,
                    store.len().await
                );
                return code;
            }
            Err(StoreError::CodeTaken(code)) => {
                tracing::warn!("Short code '{}' claimed concurrently, regenerating", code);
            }
        }
    }
}

/// Look up the long URL for `code`.
pub async fn resolve(store: &LinkStore, code: &str) -> Option<String> {
    store.get(code).await
}
