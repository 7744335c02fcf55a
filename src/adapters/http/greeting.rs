//! Greeting page served at `/`.

use axum::extract::State;
use axum::response::Html;

use super::AppState;

/// Render the greeting HTML for a version string.
pub fn render_greeting(version: &str) -> String {
    format!(
        "\n    <h1>Hello from OpenShift Pipeline! 🚀</h1>\n    \
         <p>This app was deployed automatically via Tekton!</p>\n    \
         <p>Version: {version}</p>\n  "
    )
}

/// `GET /`: static greeting, always 200.
pub async fn greeting(State(state): State<AppState>) -> Html<String> {
    Html(render_greeting(&state.version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_embeds_version() {
        let html = render_greeting("9.9.9");
        assert!(html.contains("<h1>Hello from OpenShift Pipeline! 🚀</h1>"));
        assert!(html.contains("<p>Version: 9.9.9</p>"));
    }
}
