use clap::{Parser as ClapParser, Subcommand};
use graphql_tag::cli::{self, CliError, Command, Options, Outcome};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "gqlt")]
#[command(about = "gqlt - check, format and resolve tagged query templates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print the output
    #[arg(short, long, global = true)]
    pretty: bool,

    /// Maximum field nesting depth
    #[arg(long, global = true)]
    max_depth: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate query syntax
    Check {
        /// The query (reads from stdin if not provided)
        query: Option<String>,
    },

    /// Print the parsed AST as JSON
    Ast {
        /// The query (reads from stdin if not provided)
        query: Option<String>,
    },

    /// Print the query in canonical form
    Fmt {
        /// The query (reads from stdin if not provided)
        query: Option<String>,
    },

    /// Resolve parameters and positional references to JSON
    Resolve {
        /// The query (reads from stdin if not provided)
        query: Option<String>,

        /// Named variables as a JSON object
        #[arg(long)]
        vars: Option<String>,

        /// Positional values as a JSON array
        #[arg(long)]
        args: Option<String>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let (query, command) = match cli.command {
        Commands::Check { query } => (query, Command::Check),
        Commands::Ast { query } => (query, Command::Ast),
        Commands::Fmt { query } => (query, Command::Fmt),
        Commands::Resolve { query, vars, args } => (
            query,
            Command::Resolve {
                variables: vars,
                arguments: args,
            },
        ),
    };

    if let Err(e) = run(query, command, cli.pretty, cli.max_depth) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(
    query: Option<String>,
    command: Command,
    pretty: bool,
    max_depth: Option<u32>,
) -> Result<(), CliError> {
    let query = match query {
        Some(q) => q,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let options = Options {
        query,
        command,
        pretty,
        max_depth,
    };

    match cli::execute(&options)? {
        Outcome::SyntaxValid => println!("Syntax is valid"),
        Outcome::Source(source) => println!("{}", source),
        Outcome::Json(output) => {
            let json = if pretty {
                serde_json::to_string_pretty(&output)?
            } else {
                serde_json::to_string(&output)?
            };
            println!("{}", json);
        }
    }
    Ok(())
}
