//! Multi-page HTML documentation generator for CSL schemas.
//!
//! Walks each schema's root table depth-first and plans one page per
//! reachable table (directly nested or behind an array), then renders an
//! `index.html`, one page per schema, one page per nested table, and the
//! static `site.css`/`site.js` assets. The result is an in-memory
//! path → content map; writing it to disk is the caller's concern.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod assets;
mod pages;
mod slug;

use csl_ast::{Document, TypeId, TypeKind};
use slug::slug;
use std::collections::{BTreeMap, HashSet};

/// One planned documentation page backed by a table type.
pub(crate) struct Page {
    pub(crate) schema_index: usize,
    /// Path segments from the schema root; empty for the schema page.
    pub(crate) segments: Vec<String>,
    pub(crate) file_name: String,
    pub(crate) table: TypeId,
    /// The key/schema name owning this table, used for wildcard
    /// placeholders and display titles.
    pub(crate) parent_segment: String,
}

/// Generates the whole documentation site.
///
/// Returns a deterministic map from relative file path to file content.
/// Missing data (a schema whose root failed to parse) yields pages with
/// empty sections rather than an error.
pub fn generate(document: &Document) -> BTreeMap<String, String> {
    let pages = plan_pages(document);
    let mut files = BTreeMap::new();

    files.insert("index.html".to_string(), pages::render_index(document, &pages));
    for page in &pages {
        files.insert(page.file_name.clone(), pages::render_page(document, &pages, page));
    }
    files.insert("site.css".to_string(), assets::SITE_CSS.to_string());
    files.insert("site.js".to_string(), assets::SITE_JS.to_string());
    files
}

/// Depth-first page planning over every schema.
///
/// File names concatenate the slugified schema name and path segments.
/// Collisions (schemas or paths that slugify identically) are
/// disambiguated deterministically with `-2`, `-3`, ... in planning order.
pub(crate) fn plan_pages(document: &Document) -> Vec<Page> {
    let mut pages = Vec::new();
    let mut used: HashSet<String> = HashSet::new();

    for (schema_index, schema) in document.schemas.iter().enumerate() {
        if !matches!(document.arena.ty(schema.root).kind, TypeKind::Table(_)) {
            continue;
        }
        let mut segments = Vec::new();
        plan_table(
            document,
            schema_index,
            schema.root,
            &schema.name,
            &mut segments,
            &mut pages,
            &mut used,
        );
    }
    pages
}

fn unique_file_name(base: &str, used: &mut HashSet<String>) -> String {
    let candidate = format!("{base}.html");
    if used.insert(candidate.clone()) {
        return candidate;
    }
    let mut counter = 2;
    loop {
        let candidate = format!("{base}-{counter}.html");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}

fn plan_table(
    document: &Document,
    schema_index: usize,
    table: TypeId,
    parent_segment: &str,
    segments: &mut Vec<String>,
    pages: &mut Vec<Page>,
    used: &mut HashSet<String>,
) {
    let schema = &document.schemas[schema_index];
    let mut base = format!("schema-{}", slug(&schema.name));
    for segment in segments.iter() {
        base.push('-');
        base.push_str(&slug(segment));
    }
    let file_name = unique_file_name(&base, used);
    pages.push(Page {
        schema_index,
        segments: segments.clone(),
        file_name,
        table,
        parent_segment: parent_segment.to_string(),
    });

    let TypeKind::Table(table_type) = &document.arena.ty(table).kind else { return };
    let key_ids = table_type.explicit_keys.iter().copied().chain(table_type.wildcard_key);
    for key_id in key_ids {
        let key = document.arena.key(key_id);
        let Some((child, through_array)) = child_table(document, key.ty) else { continue };
        let segment = match (key.is_wildcard, through_array) {
            (true, false) => "*".to_string(),
            (true, true) => "*[]".to_string(),
            (false, _) => key.name.clone(),
        };
        segments.push(segment);
        plan_table(document, schema_index, child, &key.name, segments, pages, used);
        segments.pop();
    }
}

/// A table directly behind a type, possibly through one array layer.
/// Returns the table's type id and whether an array was traversed.
pub(crate) fn child_table(document: &Document, ty: TypeId) -> Option<(TypeId, bool)> {
    match &document.arena.ty(ty).kind {
        TypeKind::Table(_) => Some((ty, false)),
        TypeKind::Array { element } => match document.arena.ty(*element).kind {
            TypeKind::Table(_) => Some((*element, true)),
            _ => None,
        },
        _ => None,
    }
}

/// Maximum table nesting depth under `ty` (a bare table counts as 1).
pub(crate) fn nesting_depth(document: &Document, ty: TypeId) -> usize {
    match &document.arena.ty(ty).kind {
        TypeKind::Table(table) => {
            let mut depth = 1;
            let key_ids = table.explicit_keys.iter().copied().chain(table.wildcard_key);
            for key_id in key_ids {
                let key = document.arena.key(key_id);
                depth = depth.max(1 + child_depth(document, key.ty));
            }
            depth
        }
        _ => 0,
    }
}

fn child_depth(document: &Document, ty: TypeId) -> usize {
    match &document.arena.ty(ty).kind {
        TypeKind::Table(_) => nesting_depth(document, ty),
        TypeKind::Array { element } => child_depth(document, *element),
        TypeKind::Union { members } => {
            members.iter().map(|m| child_depth(document, *m)).max().unwrap_or(0)
        }
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csl_parser::analyze;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plan_minimal() {
        let analysis = analyze("config App { x: string; }");
        let pages = plan_pages(&analysis.document);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].file_name, "schema-app.html");
        assert!(pages[0].segments.is_empty());
    }

    #[test]
    fn test_plan_nested_and_wildcard() {
        let analysis = analyze(
            "config App { services: { *: { port: number; }; }; jobs: { retry: { max: number; }; }[]; }",
        );
        let pages = plan_pages(&analysis.document);
        let names: Vec<&str> = pages.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "schema-app.html",
                "schema-app-services.html",
                "schema-app-services-wildcard.html",
                "schema-app-jobs.html",
                "schema-app-jobs-retry.html",
            ]
        );
    }

    #[test]
    fn test_wildcard_array_segment() {
        let analysis = analyze("config App { pools: { *: { size: number; }[]; }; }");
        let pages = plan_pages(&analysis.document);
        assert!(pages.iter().any(|p| p.file_name == "schema-app-pools-wildcard-array.html"));
        let wildcard_page = pages
            .iter()
            .find(|p| p.file_name == "schema-app-pools-wildcard-array.html")
            .unwrap();
        assert_eq!(wildcard_page.segments, vec!["pools".to_string(), "*[]".to_string()]);
    }

    #[test]
    fn test_duplicate_slugs_disambiguate() {
        let analysis = analyze("config App { x: string; } config APP { y: string; }");
        let pages = plan_pages(&analysis.document);
        let names: Vec<&str> = pages.iter().map(|p| p.file_name.as_str()).collect();
        assert_eq!(names, vec!["schema-app.html", "schema-app-2.html"]);
    }

    #[test]
    fn test_generate_contains_assets_and_index() {
        let analysis = analyze("config App { x: string; }");
        let files = generate(&analysis.document);
        assert!(files.contains_key("index.html"));
        assert!(files.contains_key("schema-app.html"));
        assert!(files.contains_key("site.css"));
        assert!(files.contains_key("site.js"));
    }

    #[test]
    fn test_nesting_depth() {
        let analysis = analyze("config App { a: { b: { c: string; }; }; }");
        let document = &analysis.document;
        let schema = &document.schemas[0];
        assert_eq!(nesting_depth(document, schema.root), 3);
    }
}
