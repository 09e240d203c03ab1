//! CLI for wikimark - markdown-with-wiki-extensions to HTML renderer

use clap::Parser;
use std::path::PathBuf;
use wikimark::{InMemoryResolver, MarkdownToHtml};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input markdown file path
    input: PathBuf,

    /// Output HTML file path (optional, prints to stdout if not specified)
    output: Option<PathBuf>,

    /// Article index file with one `title=id` line per article, used to
    /// resolve wikilinks
    #[arg(long)]
    links: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let mut resolver = InMemoryResolver::new();
    if let Some(path) = &args.links {
        let index = match std::fs::read_to_string(path) {
            Ok(index) => index,
            Err(e) => {
                eprintln!("Error reading link index: {}", e);
                std::process::exit(1);
            }
        };
        for line in index.lines() {
            if let Some((title, id)) = line.split_once('=') {
                resolver.insert(title.trim(), id.trim());
            }
        }
    }

    let text = match std::fs::read_to_string(&args.input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error reading input: {}", e);
            std::process::exit(1);
        }
    };

    let renderer = MarkdownToHtml::new(&resolver);
    let html = renderer.render(&text);

    if let Some(output) = args.output {
        if let Err(e) = std::fs::write(&output, &html) {
            eprintln!("Error writing output: {}", e);
            std::process::exit(1);
        }
        println!("Successfully rendered to {:?}", output);
    } else {
        println!("{}", html);
    }
}
