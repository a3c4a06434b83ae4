use ssg_kit_core::{Error, Props, Result};

/// HTML-escape a string to prevent XSS attacks
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#x27;".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Serialize props for embedding inside a `<script>` element.
///
/// `<` is written as `\u003c` so a title containing `</script>` cannot close the
/// element early; the JSON still decodes to the same value.
pub fn props_script_json(props: &Props) -> Result<String> {
    let json = serde_json::to_string(props)?;
    Ok(json.replace('<', "\\u003c"))
}

/// Render the post page for the given props.
///
/// The timestamp is written verbatim, so the page shows when the props were
/// resolved rather than when it is viewed.
pub fn render(props: &Props) -> Result<String> {
    let data = props.data.as_ref().ok_or(Error::MissingField("data"))?;
    let title = html_escape(&data.title);
    let props_json = props_script_json(props)?;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
</head>
<body>
    <article>
        <h1>Static Site Generation with dynamic routes</h1>
        <h2>Test 1:</h2>
        <p>This timestamp 👉 <b>{time}</b> should be when the build was run, not when the page is refreshed. Hence, this time should not change on refresh.</p>
        <h2>Test 2:</h2>
        <p>This string 👉 &quot;{title}&quot; should be &quot;First post&quot;.</p>
        <h2>Test 3:</h2>
        <p>Check your browser&apos;s developer console. First request might show cache MISS on first load. Subsequent refreshes should show cache HIT.</p>
    </article>
    <script id="__PROPS__" type="application/json">{props_json}</script>
</body>
</html>
"#,
        title = title,
        time = props.time,
        props_json = props_json,
    ))
}
