//! Integration tests for on-disk content discovery

use std::fs;
use std::path::{Path, PathBuf};

use cmsync_content::Scanner;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn write_file(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// content/<type>/ base dir with an English file plus es/ and fr/ variants
fn seeded_tree() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("content").join("pages");

    write_file(
        &base.join("about.mdx"),
        "---\ntitle: About Us\n---\n\nWho we are.\n",
    );
    write_file(
        &temp.path().join("content/es/pages/sobre.mdx"),
        "---\ntitle: Sobre Nosotros\nlocalizes: about\n---\n\nQuienes somos.\n",
    );
    write_file(
        &temp.path().join("content/fr/pages/a-propos.mdx"),
        "---\ntitle: \u{c0} Propos\nlocalizes: about\n---\n\nQui nous sommes.\n",
    );

    (temp, base)
}

#[test]
fn test_scan_default_locale_files() {
    let (_temp, base) = seeded_tree();
    let scanner = Scanner::new("en");

    let files = scanner.scan(&base);
    let defaults: Vec<_> = files.iter().filter(|f| !f.is_localization).collect();

    assert_eq!(defaults.len(), 1);
    assert_eq!(defaults[0].slug, "about");
    assert_eq!(defaults[0].locale, "en");
    assert_eq!(defaults[0].localizes, None);
    assert_eq!(defaults[0].body, "Who we are.");
}

#[test]
fn test_scan_locale_variants() {
    let (_temp, base) = seeded_tree();
    let scanner = Scanner::new("en");

    let files = scanner.scan(&base);
    let mut variants: Vec<_> = files.iter().filter(|f| f.is_localization).collect();
    variants.sort_by(|a, b| a.locale.cmp(&b.locale));

    assert_eq!(variants.len(), 2);
    assert_eq!(variants[0].locale, "es");
    assert_eq!(variants[0].slug, "sobre");
    assert_eq!(variants[0].localizes.as_deref(), Some("about"));
    assert_eq!(variants[1].locale, "fr");
}

#[test]
fn test_frontmatter_locale_overrides_directory_name() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("content").join("pages");
    write_file(&base.join("home.mdx"), "---\ntitle: Home\n---\nhi\n");
    write_file(
        &temp.path().join("content/es/pages/inicio.mdx"),
        "---\ntitle: Inicio\nlocale: es-419\nlocalizes: home\n---\nhola\n",
    );

    let files = Scanner::new("en").scan(&base);
    let variant = files.iter().find(|f| f.is_localization).unwrap();
    assert_eq!(variant.locale, "es-419");
}

#[test]
fn test_missing_base_directory_yields_empty_list() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("content").join("nothing-here");

    assert!(Scanner::new("en").scan(&base).is_empty());
}

#[test]
fn test_unparseable_file_is_skipped_not_fatal() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("content").join("pages");
    write_file(&base.join("ok.mdx"), "---\ntitle: Fine\n---\nbody\n");
    write_file(&base.join("broken.mdx"), "---\ntitle: never closed\n");

    let files = Scanner::new("en").scan(&base);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].slug, "ok");
}

#[test]
fn test_non_content_extensions_ignored() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("content").join("pages");
    write_file(&base.join("about.mdx"), "---\ntitle: About\n---\nbody\n");
    write_file(&base.join("notes.txt"), "not content");
    write_file(&base.join("image.png"), "binary-ish");

    let files = Scanner::new("en").scan(&base);
    assert_eq!(files.len(), 1);
}

#[test]
fn test_date_prefixed_filenames_become_plain_slugs() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("content").join("blog");
    write_file(
        &base.join("2024-06-01-launch.mdx"),
        "---\ntitle: Launch\n---\nWe launched.\n",
    );

    let files = Scanner::new("en").scan(&base);
    assert_eq!(files[0].slug, "launch");
}

#[test]
fn test_locales_present_unions_across_content_types() {
    let temp = TempDir::new().unwrap();
    let pages = temp.path().join("content").join("pages");
    let blog = temp.path().join("content").join("blog");

    write_file(&pages.join("about.mdx"), "---\ntitle: About\n---\nx\n");
    write_file(&blog.join("post.mdx"), "---\ntitle: Post\n---\nx\n");
    // es/ only has pages, fr/ only has blog; both locales must be visible
    write_file(
        &temp.path().join("content/es/pages/sobre.mdx"),
        "---\ntitle: Sobre\n---\nx\n",
    );
    write_file(
        &temp.path().join("content/fr/blog/billet.mdx"),
        "---\ntitle: Billet\n---\nx\n",
    );

    let scanner = Scanner::new("en");
    let locales = scanner.locales_present(&[pages, blog]);

    let expected: Vec<&str> = vec!["en", "es", "fr"];
    assert_eq!(locales.iter().map(String::as_str).collect::<Vec<_>>(), expected);
}

#[test]
fn test_region_suffixed_locale_directories_reported_as_base_codes() {
    let temp = TempDir::new().unwrap();
    let base = temp.path().join("content").join("pages");
    write_file(&base.join("home.mdx"), "---\ntitle: Home\n---\nx\n");
    write_file(
        &temp.path().join("content/es-419/pages/inicio.mdx"),
        "---\ntitle: Inicio\n---\nx\n",
    );

    let locales = Scanner::new("en").locales_present(&[base]);
    assert!(locales.contains("es"));
    assert!(!locales.contains("es-419"));
}
