extern crate clap;
extern crate thiserror;

pub mod interpreter;
pub mod lexer;
pub mod optimizer;
pub mod parser;

use std::{
    collections::HashSet,
    io::{self},
    process::ExitCode,
    time::Instant,
};

use clap::{Parser, ValueEnum};
use colored::Colorize;

use crate::{
    interpreter::Machine,
    lexer::{lexer::Lexer, TokenKind},
    optimizer::{optimize, Optimization},
};

/// Peephole-optimizing interpreter for the eight-instruction tape language
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The program file to run
    #[arg()]
    file: Option<String>,

    /// Print pipeline stages instead of executing
    #[arg(value_enum)]
    commands: Vec<Commands>,

    /// Rewrite passes to apply (defaults to all of them)
    #[arg(short = 'O', long, value_enum)]
    optimizations: Vec<Optimization>,

    /// Disable every rewrite pass
    #[arg(long)]
    no_optimize: bool,

    /// Report stage timings on stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Hash, PartialEq, Eq)]
enum Commands {
    /// Output the token stream
    Tokens,
    /// Output the parsed instruction list
    Instructions,
    /// Output the optimized instruction list
    Optimized,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let Some(file) = args.file.as_deref() else {
        eprintln!("usage: bfpeep [OPTIONS] <FILE> [COMMANDS]...");
        return ExitCode::FAILURE;
    };

    let text = match std::fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("{}: {}: {}", "error".red(), file, e);
            return ExitCode::FAILURE;
        }
    };

    let commands: HashSet<Commands> = HashSet::from_iter(args.commands.iter().cloned());
    let passes = if args.no_optimize {
        HashSet::new()
    } else if args.optimizations.is_empty() {
        Optimization::all()
    } else {
        HashSet::from_iter(args.optimizations.iter().copied())
    };

    if args.verbose {
        eprintln!("{}", "Starting lexing".blue());
    }
    let mut now = Instant::now();
    let tokens = Lexer::new(&text).tokens();
    if args.verbose {
        eprintln!("{} {:.2?}", "Finished lexing in".green(), now.elapsed());
    }

    if commands.contains(&Commands::Tokens) {
        for token in &tokens {
            print!(
                "{}",
                match &token.kind {
                    TokenKind::MoveRight => ">",
                    TokenKind::MoveLeft => "<",
                    TokenKind::Increment => "+",
                    TokenKind::Decrement => "-",
                    TokenKind::Output => ".",
                    TokenKind::Input => ",",
                    TokenKind::LoopOpen => "[",
                    TokenKind::LoopClose => "]",
                    TokenKind::Comment(c) => c.as_str(),
                }
            );
        }
        println!();
    }

    if args.verbose {
        eprintln!("{}", "Starting parsing".blue());
    }
    now = Instant::now();
    let program = match parser::parser::Parser::new(&tokens).parse_program() {
        Ok(program) => program,
        Err(e) => {
            eprintln!("{}: {}", "error".red(), e);
            return ExitCode::FAILURE;
        }
    };
    if args.verbose {
        eprintln!("{} {:.2?}", "Finished parsing in".green(), now.elapsed());
    }

    if commands.contains(&Commands::Instructions) {
        println!("{:#?}", program.instructions);
    }

    if args.verbose {
        eprintln!("{} {:?}", "Starting optimizations".blue(), passes);
    }
    now = Instant::now();
    let program = optimize(&program, &passes);
    if args.verbose {
        eprintln!(
            "{} {} {} {:.2?}",
            "Optimized down to".green(),
            program.instructions.len(),
            "instructions in".green(),
            now.elapsed()
        );
    }

    if commands.contains(&Commands::Optimized) {
        println!("{:#?}", program.instructions);
    }

    // dump-only invocations stop before execution
    if !commands.is_empty() {
        return ExitCode::SUCCESS;
    }

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut machine = Machine::new(stdin.lock(), stdout.lock());

    now = Instant::now();
    if let Err(e) = machine.run(&program) {
        eprintln!("{}: {}", "error".red(), e);
        return ExitCode::FAILURE;
    }
    if args.verbose {
        eprintln!("{} {:.2?}", "Finished run in".green(), now.elapsed());
    }

    ExitCode::SUCCESS
}
