//! Print the truth table of a formula.
//!
//! Run with: `cargo run --example truth_table -- "p -> (q \/ ~p)"`

use clap::{Parser, ValueEnum};
use color_eyre::eyre::bail;
use num_bigint::BigUint;

use truthtable_rs::ast::Notation;
use truthtable_rs::compile;
use truthtable_rs::table::{row_count, TruthTable};

#[derive(Debug, Copy, Clone, ValueEnum)]
enum Style {
    Unicode,
    Ascii,
    Latex,
}

impl From<Style> for Notation {
    fn from(style: Style) -> Self {
        match style {
            Style::Unicode => Notation::Unicode,
            Style::Ascii => Notation::Ascii,
            Style::Latex => Notation::Latex,
        }
    }
}

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Formula to tabulate.
    #[arg(value_name = "FORMULA")]
    formula: String,

    /// Notation used to echo the parsed formula.
    #[arg(long, value_enum, default_value = "unicode")]
    notation: Style,

    /// Print the formula tree in DOT format instead of the table.
    #[arg(long)]
    dot: bool,

    /// Refuse formulas with more variables than this.
    #[arg(long, value_name = "INT", default_value = "16")]
    max_vars: usize,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();
    log::debug!("args = {:?}", args);

    let formula = match compile(&args.formula) {
        Ok(formula) => formula,
        Err(err) => {
            eprintln!("{}", args.formula);
            eprintln!("{}{}", " ".repeat(err.start()), "^".repeat(err.span().len().max(1)));
            bail!("{}", err);
        }
    };

    if args.dot {
        print!("{}", formula.expr.to_dot(&formula.variables)?);
        return Ok(());
    }

    let rows: BigUint = row_count(formula.num_vars());
    if formula.num_vars() > args.max_vars {
        bail!(
            "{} variables give {} rows; raise --max-vars to allow more than {}",
            formula.num_vars(),
            rows,
            args.max_vars
        );
    }

    println!(
        "Formula: {}",
        formula.expr.display(&formula.variables).notation(args.notation.into())
    );
    println!("Rows: {}", rows);
    println!();

    let time_total = std::time::Instant::now();
    let table = TruthTable::new(&formula);
    print!("{}", table);
    println!();
    println!("Models: {} ({})", table.count_models(), table.classify());
    log::info!("Tabulated in {:.3}ms", time_total.elapsed().as_secs_f64() * 1000.0);

    Ok(())
}
