//! Interactive Menu
//!
//! Line-oriented add/retrieve/remove/print/exit loop over an unsynchronized
//! cache. Input and output are generic so the loop runs against stdin/stdout
//! in the binary and against in-memory buffers in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use tracing::info;

use crate::cache::SplayTreeCache;

const MENU: &str = "\nSelect an option:\n\
1. Add an entry\n\
2. Retrieve an entry\n\
3. Remove an entry\n\
4. Print cache contents\n\
5. Exit\n";

// == Token Reader ==
/// Whitespace-separated tokens pulled from a line reader on demand.
struct Tokens<R> {
    input: R,
    pending: VecDeque<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(input: R) -> Self {
        Self {
            input,
            pending: VecDeque::new(),
        }
    }

    /// Next token, or `None` at end of input.
    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}

fn prompt<R: BufRead, W: Write>(
    tokens: &mut Tokens<R>,
    output: &mut W,
    label: &str,
) -> io::Result<Option<String>> {
    write!(output, "{}", label)?;
    output.flush()?;
    tokens.next_token()
}

// == Menu Loop ==
/// Runs the menu until the user picks `5` or input ends.
pub fn run_menu<R: BufRead, W: Write>(
    cache: &mut SplayTreeCache,
    input: R,
    output: &mut W,
) -> io::Result<()> {
    let mut tokens = Tokens::new(input);

    loop {
        write!(output, "{}", MENU)?;
        let Some(choice) = prompt(&mut tokens, output, "Enter your choice: ")? else {
            break;
        };

        match choice.chars().next() {
            Some('1') => {
                let Some(key) = prompt(&mut tokens, output, "Enter key: ")? else {
                    break;
                };
                let Some(value) = prompt(&mut tokens, output, "Enter value: ")? else {
                    break;
                };
                if let Some(evicted) = cache.put(key, value) {
                    info!(%evicted, "Cache full, evicted entry");
                }
            }
            Some('2') => {
                let Some(key) = prompt(&mut tokens, output, "Enter key: ")? else {
                    break;
                };
                match cache.get(&key) {
                    Some(value) => writeln!(output, "Value: {}", value)?,
                    None => writeln!(output, "Entry not found in cache.")?,
                }
            }
            Some('3') => {
                let Some(key) = prompt(&mut tokens, output, "Enter key: ")? else {
                    break;
                };
                cache.remove(&key);
                writeln!(output, "Entry removed from cache.")?;
            }
            Some('4') => {
                writeln!(output, "{}", cache.snapshot())?;
            }
            Some('5') => break,
            _ => writeln!(output, "Invalid choice. Please try again.")?,
        }
    }

    writeln!(output, "Exiting program.")?;
    output.flush()
}
