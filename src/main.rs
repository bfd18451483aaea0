use std::path::Path;

use course_grid::config::{CONFIG_FILE, Config};
use course_grid::core::fetcher::CourseDataFetcher;
use course_grid::core::grid::{COLUMNS, ROWS};
use course_grid::core::session::Session;
use course_grid::error::{ErrorKind, SchedulerError};
use course_grid::utils::input::{input_trim, split_command};

const HELP: &str = "\
Commands:
  departments        list department files in the data directory
  dept <name>        load a department
  add <crn>          select a CRN
  rm <crn>           remove a selected CRN
  list               show selected CRNs
  show               print the weekly grid
  cell <row> <col>   course details for a cell (row 0-9, col 0-4)
  export <file>      save the chart to a text file
  quit               save the selection and exit";

#[tokio::main]
async fn main() -> Result<(), SchedulerError> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::load(Path::new(CONFIG_FILE))?;

    match std::env::args().nth(1).as_deref() {
        Some("fetch") => fetch(config).await,
        Some(other) => {
            eprintln!("unknown command: {}\nusage: course-grid [fetch]", other);
            Ok(())
        }
        None => {
            shell(&config);
            Ok(())
        }
    }
}

async fn fetch(config: Config) -> Result<(), SchedulerError> {
    let fetcher = CourseDataFetcher::new(config)?;
    let summary = fetcher.run().await?;
    println!(
        "{} departments saved, {} failed",
        summary.saved.len(),
        summary.failed.len()
    );
    if !summary.failed.is_empty() {
        println!("failed: {}", summary.failed.join(", "));
    }
    Ok(())
}

fn shell(config: &Config) {
    let mut session = Session::from_config(config);

    match session.list_departments() {
        Ok(names) if !names.is_empty() => println!("Departments: {}", names.join(" ")),
        Ok(_) => println!(
            "No department files in {}, run `course-grid fetch` first",
            config.data_dir.display()
        ),
        Err(err) => eprintln!("{}", err),
    }
    if !session.selection().is_empty() {
        println!("Selected CRNs: {}", session.selected_labels().join(", "));
    }
    println!("{}", HELP);

    while let Some(line) = input_trim("> ") {
        let (command, arg) = split_command(&line);
        match command {
            "" => {}
            "help" | "?" => println!("{}", HELP),
            "departments" => match session.list_departments() {
                Ok(names) => println!("{}", names.join(" ")),
                Err(err) => eprintln!("{}", err),
            },
            "dept" => {
                if let Err(err) = session.load_department(arg) {
                    eprintln!("Error: {}", err);
                }
                print!("{}", session.render());
            }
            "add" => match session.add_crn(arg) {
                Ok(Some(label)) => {
                    println!("added {}", label);
                    print!("{}", session.render());
                }
                Ok(None) => println!("{} is already selected", arg),
                Err(err) if err.kind == ErrorKind::InvalidInput => {
                    println!("Invalid Input: {}", err.message)
                }
                Err(err) => eprintln!("Error: {}", err),
            },
            "rm" => {
                if session.remove_crn(arg) {
                    print!("{}", session.render());
                } else {
                    println!("{} is not selected", arg);
                }
            }
            "list" => {
                for label in session.selected_labels() {
                    println!("{}", label);
                }
            }
            "show" => print!("{}", session.render()),
            "cell" => match parse_cell(arg) {
                Some((row, column)) => match session.cell_details(row, column) {
                    Some(details) => println!("Course Details:\n{}", details),
                    None => println!("empty cell"),
                },
                None => println!("usage: cell <row 0-{}> <col 0-{}>", ROWS - 1, COLUMNS - 1),
            },
            "export" if !arg.is_empty() => {
                if let Err(err) = session.export_chart(Path::new(arg)) {
                    eprintln!("Error: {}", err);
                }
            }
            "export" => println!("usage: export <file>"),
            "quit" | "exit" => break,
            _ => println!("unknown command, type `help`"),
        }
    }
    // session is dropped here and saves the selection
}

fn parse_cell(arg: &str) -> Option<(usize, usize)> {
    let mut parts = arg.split_whitespace();
    let row = parts.next()?.parse().ok()?;
    let column = parts.next()?.parse().ok()?;
    Some((row, column)).filter(|(row, column)| *row < ROWS && *column < COLUMNS)
}
