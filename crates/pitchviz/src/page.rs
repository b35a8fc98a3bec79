use pitchviz_core::{AnalysisResult, UploadOutcome};

use crate::routes::UPLOAD_FIELD;

pub const PAGE_TITLE: &str = "Rotational Velocity Analysis";
/// Id of the element holding the chart, error message, or nothing.
pub const OUTPUT_SLOT_ID: &str = "velocity_plot";

const STYLE: &str = "body{background:#111;color:#eee;font-family:sans-serif;margin:2rem}\
.error{color:#ff6b6b}\
#velocity_plot svg{max-width:100%;height:auto}";

/// What the output slot shows after a recompute.
enum Slot<'a> {
    Empty,
    Chart(&'a str),
    Error(String),
}

impl<'a> Slot<'a> {
    fn from_outcome(outcome: Option<&'a UploadOutcome>) -> Self {
        let Some(outcome) = outcome else {
            return Slot::Empty;
        };

        match outcome {
            UploadOutcome::Analyzed {
                svg: Some(svg),
                result: AnalysisResult::Success(_),
            } => Slot::Chart(svg),
            other => other.message().map_or(Slot::Empty, Slot::Error),
        }
    }
}

pub fn render(outcome: Option<&UploadOutcome>) -> String {
    let slot = match Slot::from_outcome(outcome) {
        Slot::Empty => String::new(),
        Slot::Chart(svg) => svg.to_string(),
        Slot::Error(message) => format!("<p class=\"error\">{}</p>", escape(&message)),
    };

    format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\">\n\
<head>\n\
<meta charset=\"utf-8\">\n\
<title>{PAGE_TITLE}</title>\n\
<style>{STYLE}</style>\n\
</head>\n\
<body>\n\
<h2>{PAGE_TITLE}</h2>\n\
<form action=\"/upload\" method=\"post\" enctype=\"multipart/form-data\">\n\
<label for=\"{UPLOAD_FIELD}\">Upload CSV File</label>\n\
<input type=\"file\" id=\"{UPLOAD_FIELD}\" name=\"{UPLOAD_FIELD}\" accept=\".csv\" onchange=\"this.form.submit()\">\n\
<noscript><button type=\"submit\">Analyze</button></noscript>\n\
</form>\n\
<div id=\"{OUTPUT_SLOT_ID}\">{slot}</div>\n\
</body>\n\
</html>\n"
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
