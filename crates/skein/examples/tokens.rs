//! Drive the scanner's typed readers over a mixed token stream.
//!
//! ```sh
//! cargo run --example tokens
//! ```

use skein::{Regex, Scanner};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut scanner = Scanner::new("temp 21.5 count -3 flag x");

    let label = scanner.next_word()?;
    let temp = scanner.next_double()?;
    println!("{label} = {temp}");

    let label = scanner.next_word()?;
    let count = scanner.next_int()?;
    println!("{label} = {count}");

    let label = scanner.next_word()?;
    let flag = scanner.next_char()?;
    println!("{label} = {flag}");

    // Checkpoints rewind the stream, line/column bookkeeping included.
    let mut scanner = Scanner::new("alpha beta");
    let here = scanner.save_checkpoint();
    let first = scanner.next_word()?;
    scanner.restore_to(here);
    let again = scanner.next_word()?;
    assert_eq!(first, again);
    println!("rewound and re-read {again:?}");

    // Arbitrary patterns work too.
    let hex = Regex::new("0x[\\d\\a]+")?;
    let mut scanner = Scanner::new("0xbeef rest");
    println!("hex token: {}", scanner.next(&hex)?);

    Ok(())
}
