use anyhow::Result;
use serde_json::Value;

use crate::page::PageData;

/// A standalone HTML document showing the pet as pretty-printed JSON
pub fn render(data: &PageData) -> Result<String> {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>Pet {}</title>\n", data.pet_id));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>Pet {}</h1>\n", data.pet_id));
    html.push_str(&format!(
        "<p>Checked image: {} bytes</p>\n",
        data.image_size
    ));
    if let Some(upload) = &data.upload {
        html.push_str("<h2>Upload</h2>\n");
        html.push_str(&json_block(upload)?);
    }
    html.push_str(&json_block(&data.pet)?);
    html.push_str("</body>\n</html>\n");
    Ok(html)
}

fn json_block(value: &Value) -> Result<String> {
    let json = serde_json::to_string_pretty(value)?;
    Ok(format!("<pre>{}</pre>\n", html_escape::encode_text(&json)))
}
