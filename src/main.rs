use std::{process::exit, time::Instant};

use clap::{Parser, Subcommand};
use excellent::{
    display_error,
    lexer::lexer::tokenize,
    parser::parser::parse_with_options,
    template::template::{parse_template, TemplatePart},
    ParseOptions,
};
use log::info;

#[derive(Parser)]
#[command(name = "excellent")]
#[command(about = "Parses Excellent expressions and templates", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a single expression and print it back
    Parse {
        /// Expression source, e.g. `contact.age + 1`
        expression: String,

        /// Maximum expression nesting
        #[arg(long, default_value_t = ParseOptions::DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Do not limit nesting
        #[arg(long, conflicts_with = "max_depth")]
        unbounded: bool,

        /// Print the token stream
        #[arg(long)]
        tokens: bool,

        /// Print the tree structure
        #[arg(long)]
        debug: bool,
    },

    /// Split a template and parse each embedded expression
    Template {
        /// Template text, e.g. `Hi @contact.name`
        template: String,

        /// Allowed top-level identifier names (any when omitted)
        #[arg(long = "top-level")]
        top_levels: Vec<String>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let code = match cli.command {
        Commands::Parse {
            expression,
            max_depth,
            unbounded,
            tokens,
            debug,
        } => {
            let options = if unbounded {
                ParseOptions::unbounded()
            } else {
                ParseOptions::with_max_depth(max_depth)
            };
            cmd_parse(&expression, &options, tokens, debug)
        }
        Commands::Template {
            template,
            top_levels,
        } => cmd_template(&template, &top_levels),
    };

    exit(code);
}

fn cmd_parse(source: &str, options: &ParseOptions, print_tokens: bool, debug: bool) -> i32 {
    let start = Instant::now();

    let tokens = match tokenize(source) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprintln!("{}", display_error(&error, source, "<expression>"));
            return 1;
        }
    };

    info!("Tokenized in {:?}", start.elapsed());

    if print_tokens {
        for token in &tokens {
            println!("{}", token.debug());
        }
    }

    let parse_start = Instant::now();
    let expr = match parse_with_options(tokens, options) {
        Ok(expr) => expr,
        Err(error) => {
            eprintln!("{}", display_error(&error, source, "<expression>"));
            return 1;
        }
    };

    info!("Parsed in {:?}", parse_start.elapsed());

    if debug {
        println!("{:#?}", expr);
    }
    println!("{}", expr);

    0
}

fn cmd_template(template: &str, top_levels: &[String]) -> i32 {
    let start = Instant::now();

    let names: Vec<&str> = top_levels.iter().map(String::as_str).collect();
    let allowed = if names.is_empty() {
        None
    } else {
        Some(names.as_slice())
    };

    let parts = match parse_template(template, allowed, &ParseOptions::default()) {
        Ok(parts) => parts,
        Err(error) => {
            // Positions are relative to the failing expression, not the template
            eprintln!("{}", error);
            return 1;
        }
    };

    info!("Parsed template in {:?}", start.elapsed());

    for part in parts {
        match part {
            TemplatePart::Text(text) => println!("text  {:?}", text),
            TemplatePart::Expression { source, expr } => {
                println!("expr  {:?} => {}", source, expr)
            }
        }
    }

    0
}
