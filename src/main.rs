//! `versecheck` - command-line driver for the verse checking library.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use versecheck::bible::{self, curriculum, group_by_testament, sort_references};
use versecheck::config::{expand_path, Config};
use versecheck::content::VerseContent;
use versecheck::grading::DiffPart;
use versecheck::services::scripture::{JsonLibrary, VerseContentProvider};
use versecheck::transcript::{NormalizationRequest, TranscriptNormalizer};
use versecheck::{Error, RecitationChecker, RecitationReport};

fn main() {
    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let filter = EnvFilter::try_new(&config.log_filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!("{} {} starting", config.app_name(), config.app_version());

    if let Err(e) = run(&cli, &config) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    match &cli.command {
        Command::Parse { reference } => {
            let parsed = bible::parse(reference)?;
            if cli.json {
                print_json(&parsed)?;
            } else {
                println!("book:    {}", parsed.full_book_name);
                println!("chapter: {}", parsed.chapter);
                println!("verses:  {}-{} ({})", parsed.verse_start, parsed.verse_end, parsed.verse_count());
                if let Some(testament) = bible::testament_of(&parsed.full_book_name) {
                    println!("testament: {}", testament.label());
                }
            }
        }

        Command::Validate { reference } => match bible::validate(reference) {
            Ok(parsed) => {
                if cli.json {
                    print_json(&parsed)?;
                } else {
                    println!("{parsed} is valid");
                }
            }
            Err(issues) => {
                return Err(Error::Validation { reference: reference.clone(), issues }.into());
            }
        },

        Command::Sort { references, testament } => {
            if *testament {
                let parsed = references
                    .iter()
                    .map(|r| bible::parse(r))
                    .collect::<Result<Vec<_>, _>>()?;
                let groups = group_by_testament(parsed);
                if cli.json {
                    print_json(&groups)?;
                } else {
                    for (label, refs) in [("Old Testament", &groups.old), ("New Testament", &groups.new), ("Unknown", &groups.unknown)] {
                        if refs.is_empty() {
                            continue;
                        }
                        println!("{label}:");
                        for r in refs {
                            println!("  {r}");
                        }
                    }
                }
            } else {
                let sorted = sort_references(references)?;
                if cli.json {
                    print_json(&sorted)?;
                } else {
                    sorted.iter().for_each(|r| println!("{r}"));
                }
            }
        }

        Command::Normalize { reference, transcript } => {
            let request = NormalizationRequest::new(transcript.as_str(), reference.as_str(), "");
            let normalized = TranscriptNormalizer::new().normalize(&request);
            if cli.json {
                print_json(&normalized)?;
            } else {
                println!("{normalized}");
            }
        }

        Command::Grade { reference, text, library, transcript } => {
            let checker = RecitationChecker::new();
            let report = if let Some(text) = text {
                checker.check_text(reference, transcript, text)?
            } else {
                let content = library_content(reference, library.as_deref(), config)?;
                checker.check(reference, transcript, &content)?
            };
            if cli.json {
                print_json(&report)?;
            } else {
                print_report(&report);
            }
        }

        Command::Curriculum { set } => {
            let sets = match set {
                Some(id) => vec![curriculum::find(id).with_context(|| format!("no verse set named {id:?}"))?],
                None => curriculum::ALL.iter().collect(),
            };
            if cli.json {
                return print_json(&sets);
            }
            for set in sets {
                println!("{} ({})", set.title, set.id);
                for r in set.parsed()? {
                    println!("  {r}");
                }
            }
        }
    }
    Ok(())
}

fn library_content(reference: &str, library: Option<&std::path::Path>, config: &Config) -> Result<VerseContent> {
    let path = match library {
        Some(path) => expand_path(&path.to_string_lossy()),
        None => config.require_library()?.clone(),
    };
    let library = JsonLibrary::load(&path)?;
    let parsed = bible::parse(reference)?;
    Ok(library.content(&parsed)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_part(part: &DiffPart) -> String {
    if part.added {
        format!("[+{}+]", part.text)
    } else if part.removed {
        format!("[-{}-]", part.text)
    } else {
        part.text.clone()
    }
}

fn print_report(report: &RecitationReport) {
    let diff: Vec<String> = report.parts.iter().map(render_part).collect();
    println!("{}", diff.join(" "));
    println!();
    println!(
        "{} words, {} errors: {}% ({})",
        report.score.word_count, report.score.error_count, report.score.percentage, report.score.letter_grade
    );
}
