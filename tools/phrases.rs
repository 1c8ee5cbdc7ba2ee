//! Phrases: print random French sentences.
//!
//! Usage: phrases [--count <n>] [--seed <n>] [--lexicon <file.ron>]...
//!                [--config <file.ron>] [--json] [--pick <k>]
//!
//!   --count <n>     sentences to generate (default 100)
//!   --seed <n>      RNG seed (default: from config, else 0)
//!   --lexicon <f>   merge a lexicon overlay, may repeat
//!   --config <f>    engine configuration
//!   --json          print result metadata as JSON lines
//!   --pick <k>      print only k sentences picked at random from the batch

use phrase_engine::core::pipeline::PhraseEngine;
use phrase_engine::schema::request::{GenerationRequest, GenerationResult};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::process;

struct Options {
    count: usize,
    seed: Option<u64>,
    lexicons: Vec<String>,
    config: Option<String>,
    json: bool,
    pick: Option<usize>,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let options = parse_args(&args);

    let mut builder = PhraseEngine::builder();
    if let Some(seed) = options.seed {
        builder = builder.seed(seed);
    }
    for path in &options.lexicons {
        builder = builder.lexicon_file(path);
    }
    if let Some(ref path) = options.config {
        builder = builder.config_file(path);
    }
    let mut engine = match builder.build() {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let results = match engine.generate_batch(&GenerationRequest::new(), options.count) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            process::exit(1);
        }
    };

    let shown: Vec<&GenerationResult> = match options.pick {
        Some(k) => {
            let mut rng = StdRng::seed_from_u64(engine.seed());
            results.choose_multiple(&mut rng, k).collect()
        }
        None => results.iter().collect(),
    };

    for result in shown {
        if options.json {
            match serde_json::to_string(result) {
                Ok(line) => println!("{}", line),
                Err(e) => {
                    eprintln!("ERROR: {}", e);
                    process::exit(1);
                }
            }
        } else {
            println!("{}", engine.render(result));
        }
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        count: 100,
        seed: None,
        lexicons: Vec::new(),
        config: None,
        json: false,
        pick: None,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" if i + 1 < args.len() => {
                i += 1;
                options.count = parse_number(&args[i], "--count");
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                options.seed = Some(parse_number(&args[i], "--seed"));
            }
            "--lexicon" if i + 1 < args.len() => {
                i += 1;
                options.lexicons.push(args[i].clone());
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                options.config = Some(args[i].clone());
            }
            "--pick" if i + 1 < args.len() => {
                i += 1;
                options.pick = Some(parse_number(&args[i], "--pick"));
            }
            "--json" => options.json = true,
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn parse_number<T: std::str::FromStr>(value: &str, flag: &str) -> T {
    match value.parse() {
        Ok(n) => n,
        Err(_) => {
            eprintln!("ERROR: {} expects a number, got '{}'", flag, value);
            process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Usage: phrases [--count <n>] [--seed <n>] [--lexicon <file.ron>]...");
    println!("               [--config <file.ron>] [--json] [--pick <k>]");
}
