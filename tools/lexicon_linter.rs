//! Lexicon Linter: validates lexicon overlay files.
//!
//! Usage: lexicon_linter <file_or_dir> [--standalone]
//!
//! Overlays are checked merged onto the built-in French lexicon unless
//! `--standalone` is given.

use phrase_engine::core::lexicon::{GenderTable, Lexicon};
use phrase_engine::schema::verb::{Auxiliary, ConjugationGroup, VerbDescriptor};
use rustc_hash::FxHashSet;
use std::path::Path;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: lexicon_linter <file_or_dir> [--standalone]");
        process::exit(0);
    }

    let target = Path::new(&args[1]);
    let standalone = args[2..].iter().any(|a| a == "--standalone");

    let mut overlays = Vec::new();
    if target.is_file() {
        match Lexicon::load_from_ron(target) {
            Ok(lex) => overlays.push(lex),
            Err(e) => {
                eprintln!("ERROR: Failed to load lexicon file: {}", e);
                process::exit(1);
            }
        }
    } else if target.is_dir() {
        load_lexicons_recursive(target, &mut overlays);
    } else {
        eprintln!("ERROR: Path '{}' does not exist", args[1]);
        process::exit(1);
    }

    let mut lexicon = if standalone {
        Lexicon::default()
    } else {
        Lexicon::french()
    };
    for overlay in overlays {
        lexicon.merge(overlay);
    }

    println!(
        "Checking {} verbs, {} nouns, {} adjectives",
        lexicon.verbs.len() + lexicon.auxiliaries.len(),
        lexicon.nouns.masculine.len() + lexicon.nouns.feminine.len(),
        lexicon.adjectives.masculine.len() + lexicon.adjectives.feminine.len(),
    );

    let (errors, warnings) = lint_lexicon(&lexicon);

    println!("\n=== Lexicon Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if !errors.is_empty() {
        process::exit(1);
    }
}

fn load_lexicons_recursive(dir: &Path, overlays: &mut Vec<Lexicon>) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                load_lexicons_recursive(&path, overlays);
            } else if path.extension().and_then(|s| s.to_str()) == Some("ron") {
                match Lexicon::load_from_ron(&path) {
                    Ok(lex) => {
                        println!("  Loaded: {}", path.display());
                        overlays.push(lex);
                    }
                    Err(e) => {
                        eprintln!("  ERROR loading {}: {}", path.display(), e);
                    }
                }
            }
        }
    }
}

fn lint_lexicon(lexicon: &Lexicon) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Gendered tables must offer something to draw for both genders
    for (name, table) in [
        ("nouns", &lexicon.nouns),
        ("adjectives", &lexicon.adjectives),
        ("specifiers", &lexicon.specifiers),
    ] {
        lint_gender_table(name, table, &mut errors);
    }
    if lexicon.plural_specifiers.is_empty() {
        errors.push("Table 'plural_specifiers' is empty".to_string());
    }
    if lexicon.adverbs.is_empty() {
        warnings.push("Table 'adverbs' is empty; adverbial skeletons will fail".to_string());
    }
    if lexicon.locative_prepositions.is_empty() {
        warnings.push(
            "Table 'locative_prepositions' is empty; locative skeletons will fail".to_string(),
        );
    }

    for adjective in &lexicon.pre_nominal {
        let known = lexicon.adjectives.masculine.contains(adjective)
            || lexicon.adjectives.feminine.contains(adjective);
        if !known {
            errors.push(format!(
                "Pre-nominal adjective '{}' is not in the adjective table",
                adjective
            ));
        }
    }

    let auxiliaries: FxHashSet<&str> = lexicon
        .auxiliaries
        .iter()
        .map(|v| v.infinitive.as_str())
        .collect();
    for verb in &lexicon.verbs {
        if auxiliaries.contains(verb.infinitive.as_str()) {
            warnings.push(format!(
                "Verb '{}' is listed both as a drawable verb and as an auxiliary",
                verb.infinitive
            ));
        }
    }
    for verb in lexicon.verbs.iter().chain(lexicon.auxiliaries.iter()) {
        if verb.reflexive && verb.auxiliary == Auxiliary::Avoir {
            warnings.push(format!(
                "Reflexive verb '{}' declares auxiliary Avoir; it is conjugated with être",
                verb.infinitive
            ));
        }
        lint_verb(verb, &mut errors);
    }

    if !lexicon.verbs.iter().any(|v| v.transitive) {
        warnings.push("No transitive verb; object skeletons will fail".to_string());
    }
    for auxiliary in ["avoir", "être"] {
        if lexicon.verb(auxiliary).is_none() {
            errors.push(format!(
                "Auxiliary '{}' is missing; the compound past cannot be built",
                auxiliary
            ));
        }
    }

    (errors, warnings)
}

fn lint_gender_table(name: &str, table: &GenderTable, errors: &mut Vec<String>) {
    if table.masculine.is_empty() {
        errors.push(format!("Table '{}' has no masculine entries", name));
    }
    if table.feminine.is_empty() {
        errors.push(format!("Table '{}' has no feminine entries", name));
    }
}

fn lint_verb(verb: &VerbDescriptor, errors: &mut Vec<String>) {
    let name = &verb.infinitive;
    match verb.group {
        ConjugationGroup::First | ConjugationGroup::Second => {
            if verb.root.is_empty() {
                errors.push(format!("Regular verb '{}' has an empty root", name));
            }
        }
        ConjugationGroup::Third => {
            let Some(ref table) = verb.irregular else {
                errors.push(format!("Group 3 verb '{}' has no irregular table", name));
                return;
            };
            for (tense, forms) in [("present", &table.present), ("imperfect", &table.imperfect)] {
                match forms {
                    None => errors.push(format!("Verb '{}' has no {} forms", name, tense)),
                    Some(forms) if forms.len() != 6 => errors.push(format!(
                        "Verb '{}' has {} {} forms, expected 6",
                        name,
                        forms.len(),
                        tense
                    )),
                    Some(_) => {}
                }
            }
            if table.past_participle.is_none() {
                errors.push(format!("Verb '{}' has no past participle", name));
            }
        }
    }
}
