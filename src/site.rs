//! Landing page content and rendering.
//!
//! The page is static apart from the placeholders the front-end script
//! fills in (visitor IP, country, chat terminal).

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

/// Content shipped with the binary.
const BUILTIN_CONTENT: &str = include_str!("../content/site.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    pub tagline: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallToAction {
    pub primary_text: String,
    pub primary_href: String,
    pub secondary_text: String,
    pub secondary_href: String,
}

/// Title + short text card, used for highlights and services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub desc: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_link")]
    pub link: String,
}

fn default_link() -> String {
    "#".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub brand: Brand,
    pub cta: CallToAction,
    #[serde(default)]
    pub highlights: Vec<Card>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub services: Vec<Card>,
}

impl SiteContent {
    /// The portfolio content compiled into the binary.
    pub fn builtin() -> anyhow::Result<Self> {
        serde_json::from_str(BUILTIN_CONTENT).context("built-in site content is invalid")
    }

    /// Load content from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read site content from {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse site content from {}", path.display()))
    }
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn write_cards(out: &mut String, id: &str, heading: &str, cards: &[Card]) {
    let _ = write!(
        out,
        "<section id=\"{}\" class=\"cards\">\n<h2>{}</h2>\n<div class=\"grid\">\n",
        id, heading
    );
    for card in cards {
        let _ = writeln!(
            out,
            "<article class=\"card\"><h3>{}</h3><p>{}</p></article>",
            escape_html(&card.title),
            escape_html(&card.text)
        );
    }
    out.push_str("</div>\n</section>\n");
}

/// Render the landing page.
pub fn render_home(site: &SiteContent) -> String {
    let brand = &site.brand;
    let cta = &site.cta;
    let mut out = String::with_capacity(8 * 1024);

    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{name}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/css/site.css\">\n\
         </head>\n<body>\n\
         <header class=\"hero\">\n<h1>{name}</h1>\n<p class=\"tagline\">{tagline}</p>\n\
         <p class=\"location\">{location}</p>\n\
         <nav class=\"cta\"><a class=\"primary\" href=\"{p_href}\">{p_text}</a> \
         <a class=\"secondary\" href=\"{s_href}\">{s_text}</a></nav>\n\
         <p class=\"visitor\">Visiting from <span id=\"visitor-ip\">…</span> \
         (<span id=\"visitor-country\">…</span>)</p>\n\
         </header>\n<main>\n",
        name = escape_html(&brand.name),
        tagline = escape_html(&brand.tagline),
        location = escape_html(&brand.location),
        p_href = escape_html(&cta.primary_href),
        p_text = escape_html(&cta.primary_text),
        s_href = escape_html(&cta.secondary_href),
        s_text = escape_html(&cta.secondary_text),
    );

    write_cards(&mut out, "highlights", "Highlights", &site.highlights);

    out.push_str("<section id=\"projects\" class=\"cards\">\n<h2>Projects</h2>\n<div class=\"grid\">\n");
    for project in &site.projects {
        let tags: String = project
            .tags
            .iter()
            .map(|t| format!("<li>{}</li>", escape_html(t)))
            .collect();
        let _ = writeln!(
            out,
            "<article class=\"card\"><h3><a href=\"{}\">{}</a></h3><p>{}</p><ul class=\"tags\">{}</ul></article>",
            escape_html(&project.link),
            escape_html(&project.title),
            escape_html(&project.desc),
            tags
        );
    }
    out.push_str("</div>\n</section>\n");

    write_cards(&mut out, "services", "Services", &site.services);

    out.push_str(
        "<section id=\"terminal\">\n<h2>Ask the terminal</h2>\n\
         <div id=\"gpt-output\" class=\"terminal\"></div>\n\
         <form id=\"gpt-form\"><input id=\"gpt-input\" maxlength=\"500\" autocomplete=\"off\" \
         placeholder=\"type a question\"><button type=\"submit\">Send</button></form>\n\
         </section>\n",
    );

    let _ = write!(
        out,
        "<section id=\"contact\">\n<h2>Contact</h2>\n<p>{} · {}</p>\n</section>\n\
         </main>\n<script src=\"/static/js/main.js\"></script>\n</body>\n</html>\n",
        escape_html(&brand.name),
        escape_html(&brand.location),
    );

    out
}
