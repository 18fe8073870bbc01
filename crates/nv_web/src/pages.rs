const TITLE: &str = "News Summarization and Sentiment Analysis";

fn escape(text: &str) -> String {
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

fn layout(company_name: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ font-family: sans-serif; max-width: 60rem; margin: 2rem auto; }}
pre {{ background: #f4f4f4; padding: 1rem; overflow-x: auto; }}
.error {{ color: #b00020; }}
</style>
</head>
<body>
<h1>{title}</h1>
<form method="post" action="/">
<input type="text" name="company_name" placeholder="Company name" value="{company}" required>
<button type="submit">Analyze</button>
</form>
{body}
</body>
</html>
"#,
        title = TITLE,
        company = escape(company_name),
        body = body
    )
}

pub fn form_page(company_name: &str) -> String {
    layout(company_name, "")
}

pub fn report_page(company_name: &str, report: &str, audio_url: Option<&str>) -> String {
    let audio = audio_url
        .map(|url| format!(r#"<audio controls src="{}"></audio>"#, escape(url)))
        .unwrap_or_default();
    layout(company_name, &format!("{}\n<pre>{}</pre>", audio, escape(report)))
}

pub fn error_page(company_name: &str, message: &str) -> String {
    layout(company_name, &format!(r#"<p class="error">{}</p>"#, escape(message)))
}
