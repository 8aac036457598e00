use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

const LOCALE_DIR: &str = "crates/pdf-reader/locales";
const SOURCE_DIR: &str = "crates/pdf-reader/src";
const REFERENCE_LOCALE: &str = "en";

fn main() {
    let locales = match load_locales(Path::new(LOCALE_DIR)) {
        Ok(locales) => locales,
        Err(e) => {
            eprintln!("Failed to read {}: {}", LOCALE_DIR, e);
            std::process::exit(2);
        }
    };

    let Some(reference) = locales.get(REFERENCE_LOCALE) else {
        eprintln!("Missing {}/{}.yml", LOCALE_DIR, REFERENCE_LOCALE);
        std::process::exit(2);
    };

    let mut used_keys = BTreeSet::new();
    collect_used_keys(Path::new(SOURCE_DIR), &mut used_keys);

    println!("=== Localization Validation Report ===\n");

    let mut problems = 0;

    for (lang, keys) in &locales {
        let missing: Vec<_> = reference.difference(keys).collect();
        let extra: Vec<_> = keys.difference(reference).collect();
        let unknown: Vec<_> = used_keys.difference(keys).collect();

        for (label, list) in [
            ("Missing keys", &missing),
            ("Keys not in reference", &extra),
            ("Keys used in source but undefined", &unknown),
        ] {
            if list.is_empty() {
                continue;
            }
            problems += list.len();
            println!("✗ {} in {}.yml:", label, lang);
            for key in list {
                println!("  - {}", key);
            }
            println!();
        }
    }

    if problems == 0 {
        println!("✓ All locale files define the same keys.");
    }

    println!("\nSummary:");
    println!("  Keys used in source: {}", used_keys.len());
    for (lang, keys) in &locales {
        println!("  {}.yml keys: {}", lang, keys.len());
    }

    if problems > 0 {
        std::process::exit(1);
    }
}

fn load_locales(dir: &Path) -> std::io::Result<BTreeMap<String, BTreeSet<String>>> {
    let mut locales = BTreeMap::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none_or(|e| e != "yml") {
            continue;
        }
        let Some(lang) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };
        let content = fs::read_to_string(&path)?;
        locales.insert(lang, nested_keys(&content));
    }

    Ok(locales)
}

/// Dotted paths of every leaf key in a two-space indented YAML file.
fn nested_keys(content: &str) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    let mut parents: Vec<(usize, String)> = Vec::new();
    let mut block_indent: Option<usize> = None;

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let indent = line.len() - trimmed.len();

        if let Some(block) = block_indent {
            if indent > block {
                continue;
            }
            block_indent = None;
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            continue;
        };
        let key = key.trim().trim_matches('"');
        if key.starts_with('_') {
            continue;
        }

        while parents.last().is_some_and(|(level, _)| *level >= indent) {
            parents.pop();
        }

        let value = value.trim();
        if value.is_empty() {
            parents.push((indent, key.to_string()));
            continue;
        }

        let mut path: Vec<&str> = parents.iter().map(|(_, name)| name.as_str()).collect();
        path.push(key);
        keys.insert(path.join("."));

        if value.starts_with('|') || value.starts_with('>') {
            block_indent = Some(indent);
        }
    }

    keys
}

fn collect_used_keys(dir: &Path, keys: &mut BTreeSet<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_used_keys(&path, keys);
        } else if path.extension().is_some_and(|e| e == "rs")
            && let Ok(content) = fs::read_to_string(&path)
        {
            keys.extend(keys_in_source(&content));
        }
    }
}

fn keys_in_source(content: &str) -> Vec<String> {
    content
        .match_indices("t!(\"")
        .filter(|(start, _)| {
            content[..*start]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric() && c != '_')
        })
        .filter_map(|(start, pattern)| {
            let rest = &content[start + pattern.len()..];
            rest.find('"').map(|end| rest[..end].to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_keys_skip_block_scalars() {
        let yaml = "_version: 1\n\nmenu:\n  file: \"File\"\n  open: \"Open\"\ndialogs:\n  about_text: |\n    Line one\n    key: not a key\n  ok: \"OK\"\n";
        let keys = nested_keys(yaml);
        let expected: BTreeSet<String> = ["menu.file", "menu.open", "dialogs.about_text", "dialogs.ok"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_keys_in_source() {
        let source = r#"let a = t!("menu.file", locale = lang); let b = t!("hints.open"); format!("{}", a);"#;
        assert_eq!(keys_in_source(source), vec!["menu.file", "hints.open"]);
    }
}
