//! HTML rendering for index, schema, and table pages.

use crate::{child_table, nesting_depth, slug::slug, Page};
use csl_ast::{Document, KeyId, TableType, TypeKind};
use csl_printer::{print_constraint, print_schema, type_label};
use serde_json::json;

/// Escapes text for HTML element and attribute contexts.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Display label for a key: wildcards render as a placeholder derived
/// from the parent segment (`services` → `<servicesKey>`).
fn key_label(name: &str, is_wildcard: bool, parent_segment: &str) -> String {
    if is_wildcard {
        format!("<{parent_segment}Key>")
    } else {
        name.to_string()
    }
}

fn page_title(document: &Document, page: &Page) -> String {
    let schema = &document.schemas[page.schema_index];
    if page.segments.is_empty() {
        schema.name.clone()
    } else {
        format!("{}.{}", schema.name, page.segments.join("."))
    }
}

fn html_shell(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title}</title>\n<link rel=\"stylesheet\" href=\"site.css\">\n</head>\n\
         <body>\n{body}\n<script src=\"site.js\"></script>\n</body>\n</html>\n",
        title = escape(title),
        body = body,
    )
}

/// Renders the landing page with one entry per schema.
pub(crate) fn render_index(document: &Document, pages: &[Page]) -> String {
    let mut body = String::from("<header class=\"site-header\"><h1>Schema Reference</h1></header>\n<main>\n<ul class=\"schema-list\">\n");
    for page in pages.iter().filter(|p| p.segments.is_empty()) {
        let schema = &document.schemas[page.schema_index];
        let table = document.root_table(schema);
        let key_count = table.map(|t| t.explicit_keys.len()).unwrap_or(0);
        body.push_str(&format!(
            "<li><a href=\"{file}\">{name}</a><span class=\"meta\">{count} keys</span></li>\n",
            file = escape(&page.file_name),
            name = escape(&schema.name),
            count = key_count,
        ));
    }
    body.push_str("</ul>\n</main>");
    html_shell("Schema Reference", &body)
}

/// Renders a schema or nested-table page.
pub(crate) fn render_page(document: &Document, pages: &[Page], page: &Page) -> String {
    let schema = &document.schemas[page.schema_index];
    let TypeKind::Table(table) = &document.arena.ty(page.table).kind else {
        return html_shell(&page_title(document, page), "<main></main>");
    };

    let mut body = String::new();
    body.push_str("<header class=\"site-header\">");
    body.push_str("<nav class=\"crumbs\"><a href=\"index.html\">Index</a>");
    // Breadcrumbs through the ancestor pages.
    for ancestor in pages.iter().filter(|p| {
        p.schema_index == page.schema_index
            && p.segments.len() < page.segments.len()
            && page.segments.starts_with(&p.segments)
    }) {
        body.push_str(&format!(
            " / <a href=\"{}\">{}</a>",
            escape(&ancestor.file_name),
            escape(&page_title(document, ancestor)),
        ));
    }
    body.push_str("</nav>");
    body.push_str(&format!("<h1>{}</h1></header>\n<main>\n", escape(&page_title(document, page))));

    if page.segments.is_empty() {
        body.push_str(&render_kpis(document, page, table));
    }
    body.push_str(&render_graph(document, pages, page));
    body.push_str(&render_keys_table(document, pages, page, table));
    body.push_str(&render_constraints(document, table));
    if page.segments.is_empty() {
        let source = print_schema(&document.arena, schema);
        body.push_str(&format!(
            "<section class=\"source\"><h2>Source</h2><pre><code>{}</code></pre></section>\n",
            escape(&source),
        ));
    }
    body.push_str("</main>");
    html_shell(&page_title(document, page), &body)
}

fn render_kpis(document: &Document, page: &Page, table: &TableType) -> String {
    format!(
        "<section class=\"kpis\">\
         <div class=\"kpi\"><span class=\"kpi-value\">{keys}</span><span class=\"kpi-label\">top-level keys</span></div>\
         <div class=\"kpi\"><span class=\"kpi-value\">{wildcard}</span><span class=\"kpi-label\">wildcard</span></div>\
         <div class=\"kpi\"><span class=\"kpi-value\">{depth}</span><span class=\"kpi-label\">max nesting depth</span></div>\
         </section>\n",
        keys = table.explicit_keys.len(),
        wildcard = if table.wildcard_key.is_some() { "yes" } else { "no" },
        depth = nesting_depth(document, page.table),
    )
}

/// The structure graph: all descendant pages on a schema page, immediate
/// children on a table page. Serialized into a data attribute and laid
/// out client-side.
fn render_graph(document: &Document, pages: &[Page], page: &Page) -> String {
    let descendants: Vec<&Page> = pages
        .iter()
        .filter(|p| {
            p.schema_index == page.schema_index
                && p.segments.len() > page.segments.len()
                && p.segments.starts_with(&page.segments)
                && (page.segments.is_empty() || p.segments.len() == page.segments.len() + 1)
        })
        .collect();

    let mut nodes = vec![json!({
        "id": page.file_name,
        "label": page_title(document, page),
        "href": page.file_name,
        "depth": 0,
        "parent": serde_json::Value::Null,
    })];
    for descendant in &descendants {
        let parent = pages
            .iter()
            .find(|p| {
                p.schema_index == page.schema_index
                    && p.segments.len() + 1 == descendant.segments.len()
                    && descendant.segments.starts_with(&p.segments)
            })
            .map(|p| p.file_name.clone());
        nodes.push(json!({
            "id": descendant.file_name,
            "label": descendant.segments.last().cloned().unwrap_or_default(),
            "href": descendant.file_name,
            "depth": descendant.segments.len() - page.segments.len(),
            "parent": parent,
        }));
    }
    let payload = serde_json::to_string(&json!({ "nodes": nodes })).unwrap_or_default();
    format!(
        "<section class=\"structure\"><h2>Structure</h2>\
         <div class=\"graph\" data-graph=\"{}\"></div></section>\n",
        escape(&payload),
    )
}

fn render_keys_table(
    document: &Document,
    pages: &[Page],
    page: &Page,
    table: &TableType,
) -> String {
    let mut body = String::from(
        "<section class=\"keys\"><h2>Keys</h2>\n<table class=\"keys-table\">\n\
         <thead><tr><th>Key</th><th>Type</th><th>Presence</th><th>Default</th>\
         <th>Annotations</th><th></th></tr></thead>\n<tbody>\n",
    );
    let key_ids = table.explicit_keys.iter().copied().chain(table.wildcard_key);
    for key_id in key_ids {
        body.push_str(&render_key_row(document, pages, page, key_id));
    }
    body.push_str("</tbody>\n</table>\n</section>\n");
    body
}

fn render_key_row(document: &Document, pages: &[Page], page: &Page, key_id: KeyId) -> String {
    let key = document.arena.key(key_id);
    let label = key_label(&key.name, key.is_wildcard, &page.parent_segment);
    let anchor = format!("k-{}", slug(if key.is_wildcard { "*" } else { &key.name }));

    // Copy-to-clipboard path from the schema root, placeholder included.
    let mut path_segments: Vec<String> = page
        .segments
        .iter()
        .map(|s| s.trim_end_matches("[]").to_string())
        .collect();
    path_segments.push(label.clone());
    let dotted_path = path_segments.join(".");

    let mut badges = String::new();
    let ty = &document.arena.ty(key.ty).kind;
    let enum_like = |members: &[csl_ast::TypeId]| {
        members.iter().any(|m| {
            matches!(&document.arena.ty(*m).kind,
                TypeKind::Primitive(p) if !p.allowed_values.is_empty())
        })
    };
    match ty {
        TypeKind::Union { members } => {
            badges.push_str("<span class=\"badge badge-union\">union</span>");
            if enum_like(members) {
                badges.push_str("<span class=\"badge badge-enum\">enum</span>");
            }
        }
        TypeKind::Primitive(p) if !p.allowed_values.is_empty() => {
            badges.push_str("<span class=\"badge badge-enum\">enum</span>");
        }
        TypeKind::AnyTable => {
            badges.push_str("<span class=\"badge badge-any\">any table</span>");
        }
        TypeKind::AnyArray => {
            badges.push_str("<span class=\"badge badge-any\">any array</span>");
        }
        _ => {}
    }

    // Link to the child page when the value type is a table, directly or
    // through an array.
    let child_link = child_table(document, key.ty).and_then(|_| {
        let mut child_segments = page.segments.clone();
        let segment = if key.is_wildcard {
            if matches!(ty, TypeKind::Array { .. }) {
                "*[]".to_string()
            } else {
                "*".to_string()
            }
        } else {
            key.name.clone()
        };
        child_segments.push(segment);
        pages
            .iter()
            .find(|p| p.schema_index == page.schema_index && p.segments == child_segments)
            .map(|p| {
                format!("<a class=\"child-link\" href=\"{}\">open</a>", escape(&p.file_name))
            })
    });

    let presence = if key.is_wildcard {
        "<span class=\"badge badge-dynamic\">dynamic</span>".to_string()
    } else if key.is_optional {
        "<span class=\"badge badge-optional\">optional</span>".to_string()
    } else {
        "<span class=\"badge badge-required\">required</span>".to_string()
    };

    let default = key
        .default_value
        .as_ref()
        .map(|d| format!("<code>{}</code>", escape(&d.text)))
        .unwrap_or_default();

    let mut annotations = String::new();
    let mut push_chip = |name: &str| {
        annotations.push_str(&format!("<span class=\"chip\">@{}</span>", escape(name)));
    };
    for annotation in &key.annotations {
        push_chip(&annotation.name);
    }
    if let TypeKind::Primitive(p) = ty {
        for annotation in &p.annotations {
            push_chip(&annotation.name);
        }
    }

    format!(
        "<tr id=\"{anchor}\"><td><code class=\"key-name\" data-path=\"{path}\">{label}</code></td>\
         <td><code>{ty_label}</code>{badges}</td><td>{presence}</td><td>{default}</td>\
         <td>{annotations}</td><td>{link}</td></tr>\n",
        anchor = escape(&anchor),
        path = escape(&dotted_path),
        label = escape(&label),
        ty_label = escape(&type_label(&document.arena, key.ty)),
        badges = badges,
        presence = presence,
        default = default,
        annotations = annotations,
        link = child_link.unwrap_or_default(),
    )
}

fn render_constraints(document: &Document, table: &TableType) -> String {
    if table.constraints.is_empty() {
        return String::new();
    }
    let key_names: Vec<String> = table
        .explicit_keys
        .iter()
        .map(|id| document.arena.key(*id).name.clone())
        .collect();

    let mut body =
        String::from("<section class=\"constraints\"><h2>Constraints</h2>\n<ul>\n");
    for constraint in &table.constraints {
        let text = print_constraint(&document.arena, constraint);
        body.push_str(&format!("<li><code>{}</code></li>\n", linkify(&text, &key_names)));
    }
    body.push_str("</ul>\n</section>\n");
    body
}

/// Escapes constraint text and wraps sibling key names in anchors to
/// their rows (`#k-<slug>`).
fn linkify(text: &str, key_names: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut word = String::new();
    let flush = |word: &mut String, out: &mut String| {
        if word.is_empty() {
            return;
        }
        if key_names.iter().any(|k| k == word) {
            out.push_str(&format!(
                "<a href=\"#k-{}\">{}</a>",
                slug(word),
                escape(word)
            ));
        } else {
            out.push_str(&escape(word));
        }
        word.clear();
    };
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            word.push(ch);
        } else {
            flush(&mut word, &mut out);
            out.push_str(&escape(&ch.to_string()));
        }
    }
    flush(&mut word, &mut out);
    out
}
