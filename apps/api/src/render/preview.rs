use std::fmt::Write;

use crate::models::cv::CvDocument;

/// Shown in place of an empty name.
const NAME_PLACEHOLDER: &str = "Your Name";

const STYLE: &str = "\
body{margin:0;background:#0f172a;font-family:Helvetica,Arial,sans-serif;color:#f1f5f9}\
#cv-preview{padding:32px;max-width:820px;margin:0 auto}\
header{text-align:center;border-bottom:2px solid rgba(6,182,212,.2);padding-bottom:24px}\
h1{font-size:40px;margin:0;color:#67e8f9}\
.contact{margin-top:16px;font-size:14px;color:#94a3b8}\
.contact a,.contact span{margin:0 12px;color:inherit;text-decoration:none}\
.columns{display:flex;gap:32px;margin-top:24px}\
aside{flex:1}main{flex:2}\
.section-title{font-size:20px;font-weight:700;color:#a5f3fc;border-bottom:1px solid rgba(56,189,248,.2);padding-bottom:8px}\
.item{margin-top:12px}.item h3{margin:0;font-size:16px}\
.period{font-size:12px;color:#94a3b8}.company{font-size:14px;color:#67e8f9}\
.desc{font-size:14px;color:#cbd5e1;white-space:pre-line}\
.skill{display:inline-block;margin:4px;padding:4px 10px;border-radius:999px;font-size:12px;color:#67e8f9;border:1px solid rgba(6,182,212,.2)}";

/// Renders the whole document as a standalone HTML page. The root element has
/// id `cv-preview`. Every user-supplied string is escaped.
pub fn render_preview(doc: &CvDocument) -> String {
    let mut html = String::with_capacity(4096);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", escape(display_name(doc)));
    let _ = writeln!(html, "<style>{STYLE}</style>\n</head>\n<body>");
    html.push_str("<div id=\"cv-preview\">\n");

    render_header(&mut html, doc);

    html.push_str("<div class=\"columns\">\n<aside>\n");
    render_education(&mut html, doc);
    render_skills(&mut html, doc);
    html.push_str("</aside>\n<main>\n");
    render_summary(&mut html, doc);
    render_experience(&mut html, doc);
    render_projects(&mut html, doc);
    html.push_str("</main>\n</div>\n</div>\n</body>\n</html>\n");
    html
}

fn display_name(doc: &CvDocument) -> &str {
    if doc.name.is_empty() {
        NAME_PLACEHOLDER
    } else {
        &doc.name
    }
}

fn render_header(html: &mut String, doc: &CvDocument) {
    let _ = write!(
        html,
        "<header>\n<h1>{name}</h1>\n<div class=\"contact\">\
         <a href=\"mailto:{email}\">{email}</a>\
         <span>{phone}</span>\
         <a href=\"https://{linkedin}\">{linkedin}</a>\
         </div>\n</header>\n",
        name = escape(display_name(doc)),
        email = escape(&doc.email),
        phone = escape(&doc.phone),
        linkedin = escape(&doc.linkedin),
    );
}

fn render_education(html: &mut String, doc: &CvDocument) {
    html.push_str("<section>\n<h2 class=\"section-title\">Education</h2>\n");
    for edu in &doc.education {
        let _ = write!(
            html,
            "<div class=\"item\"><h3>{}</h3><p>{}</p><p class=\"period\">{} - {}</p></div>\n",
            escape(&edu.degree),
            escape(&edu.university),
            escape(&edu.start_date),
            escape(&edu.end_date),
        );
    }
    html.push_str("</section>\n");
}

fn render_skills(html: &mut String, doc: &CvDocument) {
    html.push_str("<section>\n<h2 class=\"section-title\">Skills</h2>\n<div>");
    for skill in doc.visible_skills() {
        let _ = write!(html, "<span class=\"skill\">{}</span>", escape(skill));
    }
    html.push_str("</div>\n</section>\n");
}

fn render_summary(html: &mut String, doc: &CvDocument) {
    let _ = write!(
        html,
        "<section>\n<h2 class=\"section-title\">Summary</h2>\n<p class=\"desc\">{}</p>\n</section>\n",
        escape(&doc.summary)
    );
}

fn render_experience(html: &mut String, doc: &CvDocument) {
    html.push_str("<section>\n<h2 class=\"section-title\">Experience</h2>\n");
    for exp in &doc.experience {
        let _ = write!(
            html,
            "<div class=\"item\"><h3>{}</h3><p class=\"period\">{} - {}</p>\
             <p class=\"company\">{}</p><p class=\"desc\">{}</p></div>\n",
            escape(&exp.title),
            escape(&exp.start_date),
            escape(&exp.end_date),
            escape(&exp.company),
            escape(&exp.description),
        );
    }
    html.push_str("</section>\n");
}

fn render_projects(html: &mut String, doc: &CvDocument) {
    html.push_str("<section>\n<h2 class=\"section-title\">Projects</h2>\n");
    for proj in &doc.projects {
        let _ = write!(html, "<div class=\"item\"><h3>{}", escape(&proj.name));
        if !proj.link.is_empty() {
            let _ = write!(
                html,
                " <a href=\"https://{link}\">{link}</a>",
                link = escape(&proj.link)
            );
        }
        let _ = write!(
            html,
            "</h3><p class=\"desc\">{}</p></div>\n",
            escape(&proj.description)
        );
    }
    html.push_str("</section>\n");
}

/// Minimal HTML text/attribute escaping.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
