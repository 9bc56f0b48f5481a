//! HTML produced by the web handlers: the input form and result fragments.

use axum::http::StatusCode;
use compute::Prediction;
use model::CategorySummary;

const INPUT_TEMPLATE: &str = include_str!("../../templates/input.html");
const CATEGORY_OPTIONS_PLACEHOLDER: &str = "{{category_options}}";

/// Escapes text for use in HTML element content and quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// The input form page with one `<option>` per dataset category.
pub fn input_form(categories: &[CategorySummary]) -> String {
    let options = categories
        .iter()
        .map(|category| {
            let name = escape_html(&category.name);
            format!("            <option value=\"{name}\">{name}</option>")
        })
        .collect::<Vec<_>>()
        .join("\n");
    INPUT_TEMPLATE.replace(CATEGORY_OPTIONS_PLACEHOLDER, &options)
}

/// The fragment returned by `POST /predict`.
///
/// A category without historical records still gets its (all-zero) chart,
/// preceded by a notice.
pub fn prediction_fragment(prediction: &Prediction, image_src: &str) -> String {
    let notice = if prediction.has_data() {
        String::new()
    } else {
        format!(
            "\n    <p class=\"notice\">Insufficient data: no historical records for category '{}'.</p>",
            escape_html(&prediction.category)
        )
    };

    format!(
        r#"
<div>
    <h1>Prediction Result</h1>{notice}
    <img src="{image_src}" alt="Crime Distribution">
</div>
"#
    )
}

/// The fragment returned when a prediction request fails.
pub fn error_fragment(status: StatusCode, message: &str) -> String {
    format!(
        r#"
<div>
    <h1>Prediction Failed</h1>
    <p class="error">{} {}</p>
</div>
"#,
        status.as_u16(),
        escape_html(message)
    )
}
