use clap::Parser;
use log::{error, info, LevelFilter};
use ranged_tree::{Entry, Error, RangedTree};
use simple_logger::SimpleLogger;




#[derive(Debug, Parser)]
#[clap(version = "1.0")]
struct Opts {
    /// Character class body, e.g. "a-z0-9_"
    #[clap(short = 'c', long, default_value = "a-zA-Z0-9_")]
    class: String,

    /// Log each insertion and structural rebuild
    #[clap(short = 'v', long)]
    verbose: bool,

    /// Strings to test against the class
    inputs: Vec<String>,
}




/**
 * Split a character class body into entries. A `-` between two characters
 * makes a range; a leading or trailing `-` is a literal.
 */
fn parse_class(class: &str) -> Result<Vec<Entry<char>>, Error> {
    let chars: Vec<char> = class.chars().collect();
    let mut entries = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        if i + 2 < chars.len() && chars[i + 1] == '-' {
            entries.push(Entry::ranged(chars[i], chars[i + 2])?);
            i += 3;
        } else {
            entries.push(Entry::single(chars[i]));
            i += 1;
        }
    }
    Ok(entries)
}




fn main() {
    let opts = Opts::parse();
    let level = if opts.verbose { LevelFilter::Trace } else { LevelFilter::Info };

    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("{}", e);
    }

    let entries = match parse_class(&opts.class) {
        Ok(entries) => entries,
        Err(e) => {
            error!("[{}]: {}", opts.class, e);
            std::process::exit(1)
        }
    };
    let tree: RangedTree<char> = entries.into_iter().collect();

    info!("[{}] built with {} nodes, height {}", opts.class, tree.len(), tree.height());

    for input in &opts.inputs {
        let marks: String = input.chars().map(|c| if tree[c] { '^' } else { ' ' }).collect();
        println!("{}", input);
        println!("{}", marks);
    }
}
