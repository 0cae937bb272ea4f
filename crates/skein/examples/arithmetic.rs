//! Parse arithmetic expressions with a small PEG and print the tree.
//!
//! ```sh
//! cargo run --example arithmetic -- "195 + (186 * 32) - 14 / 9"
//! ```

use skein::Grammar;

const GRAMMAR: &str = concat!(
    "Expr' -> Term ((\"\\+\"|\"\\-\") Term)*\n",
    "Term -> Factor ((\"\\*\"|\"/\") Factor)*\n",
    "Factor -> \"\\(\" Expr \"\\)\" | \"\\d+\"\n",
);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "195 + (186 * 32) - 14 / 9".to_string());

    let grammar = Grammar::from_source(GRAMMAR)?;
    match grammar.parse(&input) {
        Some(ast) => print!("{}", ast.pretty()),
        None => {
            eprintln!("input does not match the arithmetic grammar");
            std::process::exit(1);
        }
    }
    Ok(())
}
