//! HTML building blocks for Word-compatible `.doc` output.
//!
//! Word opens an HTML document carrying the Office namespaces and a
//! `w:WordDocument` block natively, in print layout.

/// Wrap body markup in a Word-flavoured HTML document with A4 print styling.
pub fn generate_word_html(title: &str, body_html: &str) -> String {
    format!(
        r#"<html xmlns:o="urn:schemas-microsoft-com:office:office" xmlns:w="urn:schemas-microsoft-com:office:word" xmlns="http://www.w3.org/TR/REC-html40">
<head>
    <meta charset="utf-8">
    <title>{title}</title>
    <!--[if gte mso 9]>
    <xml>
        <w:WordDocument>
            <w:View>Print</w:View>
            <w:Zoom>100</w:Zoom>
            <w:DoNotOptimizeForBrowser/>
        </w:WordDocument>
    </xml>
    <![endif]-->
    <style>
        @page {{ size: 21cm 29.7cm; margin: 1.5cm; }}
        @page Section1 {{ size: 21cm 29.7cm; margin: 1.5cm; mso-page-orientation: portrait; }}
        div.Section1 {{ page: Section1; }}
        body {{ font-family: Calibri, Arial, sans-serif; font-size: 11pt; line-height: 1.4; color: #222; }}
        h1 {{ font-size: 20pt; color: #003366; }}
        h2 {{ font-size: 16pt; color: #003366; margin-top: 18pt; }}
        h3 {{ font-size: 13pt; }}
        h4 {{ font-size: 12pt; margin-bottom: 2pt; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th, td {{ border: 1px solid #999; padding: 5px; text-align: left; vertical-align: top; }}
        th {{ background-color: #e6e6e6; font-weight: bold; }}
    </style>
</head>
<body>
<div class="Section1">
{body_html}
</div>
</body>
</html>"#,
        title = escape_html(title),
        body_html = body_html,
    )
}

/// Generate an HTML table from headers and rows. A table without rows keeps
/// its header and an empty body.
///
/// Cell content is HTML-escaped.
pub fn generate_html_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut html = String::from("<table>\n<thead>\n<tr>\n");

    for header in headers {
        html.push_str(&format!("    <th>{}</th>\n", escape_html(header)));
    }
    html.push_str("</tr>\n</thead>\n<tbody>\n");

    for row in rows {
        html.push_str("<tr>\n");
        for cell in row {
            html.push_str(&format!("    <td>{}</td>\n", escape_html(cell)));
        }
        html.push_str("</tr>\n");
    }

    html.push_str("</tbody>\n</table>\n");
    html
}

pub fn heading(level: u8, text: &str) -> String {
    let level = level.clamp(1, 6);
    format!("<h{level}>{}</h{level}>\n", escape_html(text))
}

/// A paragraph; line breaks inside the text become `<br>`. Empty text
/// yields an empty `<p></p>`.
pub fn paragraph(text: &str) -> String {
    let body = text
        .lines()
        .map(escape_html)
        .collect::<Vec<_>>()
        .join("<br>");
    format!("<p>{body}</p>\n")
}

/// `<p><b>label:</b> value</p>`
pub fn labelled_paragraph(label: &str, value: &str) -> String {
    format!(
        "<p><b>{}:</b> {}</p>\n",
        escape_html(label),
        escape_html(value)
    )
}

pub fn bullet_list<S: AsRef<str>>(items: &[S]) -> String {
    let mut html = String::from("<ul>\n");
    for item in items {
        html.push_str(&format!("    <li>{}</li>\n", escape_html(item.as_ref())));
    }
    html.push_str("</ul>\n");
    html
}

/// Image referenced by URL with a caption underneath.
pub fn captioned_image(url: &str, caption: &str) -> String {
    format!(
        "<p><img src=\"{}\" alt=\"{caption}\" width=\"300\"></p>\n<p><i>{caption}</i></p>\n",
        escape_html(url),
        caption = escape_html(caption),
    )
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
