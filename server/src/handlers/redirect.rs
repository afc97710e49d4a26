use crate::{error::ApiError, links, AppState};
use axum::{
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// GET /:code
///
/// Look the code up in the store and answer `302 Found` with the long URL in
/// `Location`, or 404 if the code was never issued.
pub async fn redirect(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Response, ApiError> {
    let original_url = links::resolve(&state.store, &code)
        .await
        .ok_or(ApiError::UnknownCode)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]).into_response())
}

/// GET /
pub async fn missing_code() -> ApiError {
    ApiError::MissingCode
}

/// Any method other than GET on `/` or `/:code`.
pub async fn method_not_allowed() -> ApiError {
    ApiError::RedirectMethod
}

/// Paths no route matches, e.g. `/a/b`. No code contains a slash, so a GET
/// here can only be a miss.
pub async fn unmatched(method: Method) -> ApiError {
    if method == Method::GET {
        ApiError::UnknownCode
    } else {
        ApiError::RedirectMethod
    }
}

#[cfg(test)]
mod tests {
    use crate::handlers::testing::{send, state};
    use axum::http::{header, Method, StatusCode};

    async fn shorten(state: &std::sync::Arc<crate::AppState>, url: &str) -> String {
        let (status, _, body) = send(
            state,
            Method::POST,
            "/shorten",
            serde_json::json!({ "url": url }).to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let response: serde_json::Value = serde_json::from_str(&body).unwrap();
        response["short_url"]
            .as_str()
            .unwrap()
            .rsplit('/')
            .next()
            .unwrap()
            .to_owned()
    }

    #[tokio::test]
    async fn issued_code_redirects_to_original() {
        let state = state();
        let code = shorten(&state, "https://example.com/page").await;

        let (status, headers, _) = send(&state, Method::GET, &format!("/{code}"), "").await;

        assert_eq!(status, StatusCode::FOUND);
        assert_eq!(headers[header::LOCATION], "https://example.com/page");
    }

    #[tokio::test]
    async fn query_strings_survive_the_round_trip() {
        let state = state();
        let url = "https://example.com/search?q=rust&page=2#top";
        let code = shorten(&state, url).await;

        let (status, headers, _) = send(&state, Method::GET, &format!("/{code}"), "").await;

        assert_eq!(status, StatusCode::FOUND);
        assert_eq!(headers[header::LOCATION], url);
    }

    #[tokio::test]
    async fn repeated_resolution_is_stable() {
        let state = state();
        let code = shorten(&state, "http://example.org").await;
        shorten(&state, "http://example.net").await;

        for _ in 0..5 {
            let (status, headers, _) =
                send(&state, Method::GET, &format!("/{code}"), "").await;
            assert_eq!(status, StatusCode::FOUND);
            assert_eq!(headers[header::LOCATION], "http://example.org");
        }
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let state = state();
        let (status, headers, body) = send(&state, Method::GET, "/doesnotexist", "").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(headers.get(header::LOCATION).is_none());
        assert_eq!(body, "Short URL not found in our records.");
    }

    #[tokio::test]
    async fn nested_path_is_not_found() {
        let state = state();
        let (status, _, _) = send(&state, Method::GET, "/abc/def", "").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn root_has_no_code() {
        let state = state();
        let (status, _, body) = send(&state, Method::GET, "/", "").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, "Short code not found in URL.");
    }

    #[tokio::test]
    async fn non_get_on_code_paths_is_not_allowed() {
        let state = state();
        let code = shorten(&state, "https://example.com").await;

        for uri in [format!("/{code}"), "/".to_owned(), "/abc/def".to_owned()] {
            let (status, _, body) = send(&state, Method::POST, &uri, "").await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{uri}");
            assert_eq!(body, "Please use GET method to access short URLs.");
        }

        let (status, _, _) = send(&state, Method::DELETE, &format!("/{code}"), "").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        for uri in [format!("/{code}"), "/".to_owned(), "/abc/def".to_owned()] {
            let (status, headers, _) = send(&state, Method::HEAD, &uri, "").await;
            assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "HEAD {uri}");
            assert!(headers.get(header::LOCATION).is_none());
        }

        // The mapping is untouched.
        let (status, _, _) = send(&state, Method::GET, &format!("/{code}"), "").await;
        assert_eq!(status, StatusCode::FOUND);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_shorten_and_redirect() {
        let state = state();

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let state = state.clone();
                tokio::spawn(async move {
                    let url = format!("https://example.com/{i}");
                    let code = shorten(&state, &url).await;
                    let (status, headers, _) =
                        send(&state, Method::GET, &format!("/{code}"), "").await;
                    assert_eq!(status, StatusCode::FOUND);
                    assert_eq!(headers[header::LOCATION], url.as_str());
                    code
                })
            })
            .collect();

        let mut codes = std::collections::HashSet::new();
        for task in tasks {
            assert!(codes.insert(task.await.unwrap()));
        }
        assert_eq!(state.store.len().await, 32);
    }
}
