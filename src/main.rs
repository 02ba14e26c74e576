use std::{
    env,
    fs::read_to_string,
    io::{self, BufRead, Write},
    path::{Path, PathBuf},
    process::ExitCode,
    time::Instant,
};

use log::info;
use pcl::{config::FrontendLimits, errors::errors::Diagnostic, run_frontend, FrontendOutput};

#[derive(Default)]
struct Options {
    show_tokens: bool,
    show_ast: bool,
    file: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("pcl");

    let mut options = Options::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--tokens" => options.show_tokens = true,
            "--ast" => options.show_ast = true,
            "-h" | "--help" => {
                print_usage(program_name);
                return ExitCode::SUCCESS;
            }
            _ if options.file.is_none() && !arg.starts_with("--") => {
                options.file = Some(PathBuf::from(arg))
            }
            _ => {
                print_usage(program_name);
                return ExitCode::FAILURE;
            }
        }
    }

    if !options.show_tokens && !options.show_ast {
        options.show_ast = true;
    }

    let limits = FrontendLimits::default();

    match options.file.clone() {
        Some(file) => run_file(&file, &options, &limits),
        None => repl(&options, &limits),
    }
}

fn print_usage(program_name: &str) {
    eprintln!("usage: {} [--tokens] [--ast] [source_file]", program_name);
    eprintln!("       without a file, starts an interactive session ('exit' quits)");
}

fn run_file(file: &Path, options: &Options, limits: &FrontendLimits) -> ExitCode {
    let file_contents = match read_to_string(file) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("Could not read file {}: {}", file.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let start = Instant::now();
    let file_name = file.to_string_lossy();
    let diagnostics = process_source(&file_contents, &file_name, options, limits);
    info!("processed {} in {:?}", file_name, start.elapsed());

    if diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn repl(options: &Options, limits: &FrontendLimits) -> ExitCode {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("pcl > ");
        if io::stdout().flush().is_err() {
            return ExitCode::FAILURE;
        }

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(err)) => {
                eprintln!("input error: {}", err);
                return ExitCode::FAILURE;
            }
            None => break,
        };

        if line.trim() == "exit" {
            break;
        }

        process_source(&line, "shell", options, limits);
    }

    ExitCode::SUCCESS
}

/// Prints what the front end made of `source` and returns its diagnostics.
fn process_source(
    source: &str,
    file_name: &str,
    options: &Options,
    limits: &FrontendLimits,
) -> Vec<Diagnostic> {
    let FrontendOutput {
        tokens,
        program,
        diagnostics,
    } = run_frontend(source, limits);

    if options.show_tokens {
        for token in &tokens {
            println!("{}", token.debug());
        }
    }

    if options.show_ast {
        print!("{}", program.pretty());
    }

    for diagnostic in &diagnostics {
        eprint!("{}", diagnostic.render(source, file_name));
    }

    diagnostics
}
