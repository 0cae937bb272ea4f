//! The classic ordered-choice demo: palindromes over {a, b}.
//!
//! ```sh
//! cargo run --example palindrome -- abba
//! ```

use skein::Grammar;

const GRAMMAR: &str = "Pal' -> \"a\" Pal \"a\" | \"b\" Pal \"b\" | \"a\" | \"b\" | \"\"\n";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let input = std::env::args().nth(1).unwrap_or_else(|| "abba".to_string());

    let grammar = Grammar::from_source(GRAMMAR)?;
    match grammar.parse(&input) {
        Some(ast) => {
            println!("palindrome!");
            print!("{}", ast.pretty());
        }
        None => println!("not a palindrome over {{a, b}}"),
    }
    Ok(())
}
