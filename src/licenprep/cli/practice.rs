//! Interactive practice loop.
//!
//! Reads one line per action from the input:
//!
//! - an option id (`a`, `b`, ...) answers the current question, in any case
//! - `n` / `next` (or an empty line once answered) moves on
//! - `x` / `explain` shows or hides the explanation
//! - `r` / `reset` starts over from the first question
//! - `q` / `quit` (or end of input) leaves
//!
//! Option ids win over commands, so a question with an option `n` can still
//! be answered; use `next` in that case.

use super::print::{print_messages, print_question};
use colored::Colorize;
use licenprep::api::LicenPrepApi;
use licenprep::error::Result;
use licenprep::generation::QuestionGenerator;
use licenprep::store::StateBackend;
use std::io::{BufRead, Write};

#[derive(Debug, PartialEq, Eq)]
enum Input {
    Answer(String),
    Next,
    Explain,
    Reset,
    Quit,
    Unknown(String),
}

fn parse_input(line: &str, options: &[&str], answered: bool) -> Input {
    let line = line.trim();
    let option = options
        .iter()
        .find(|o| **o == line)
        .or_else(|| options.iter().find(|o| o.eq_ignore_ascii_case(line)));
    if let Some(id) = option {
        return Input::Answer(id.to_string());
    }
    match line.to_ascii_lowercase().as_str() {
        "" if answered => Input::Next,
        "n" | "next" => Input::Next,
        "x" | "explain" => Input::Explain,
        "r" | "reset" => Input::Reset,
        "q" | "quit" | "exit" => Input::Quit,
        _ => Input::Unknown(line.to_string()),
    }
}

pub(super) fn run_practice<B, G, R>(api: &mut LicenPrepApi<B, G>, input: R) -> Result<()>
where
    B: StateBackend,
    G: QuestionGenerator,
    R: BufRead,
{
    let mut lines = input.lines();

    loop {
        let total = api.state().mcqs().len();
        let Some(mcq) = api.current_question() else {
            println!("No question available. Generate a quiz first.");
            return Ok(());
        };
        let session = api.state().practice();
        print_question(mcq, session.current_question_index(), total, session);

        let options: Vec<String> = mcq.answers.iter().map(|a| a.id.clone()).collect();
        let answered = session.is_answered();

        print!("{} ", ">".bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        let line = line?;
        let option_refs: Vec<&str> = options.iter().map(String::as_str).collect();

        match parse_input(&line, &option_refs, answered) {
            Input::Answer(id) => {
                let result = api.answer(&id);
                print_messages(&result.messages);
            }
            Input::Next => api.next_question(),
            Input::Explain => api.toggle_explanation(),
            Input::Reset => api.reset_practice(),
            Input::Quit => return Ok(()),
            Input::Unknown(other) => println!(
                "{}",
                format!(
                    "Unknown input \"{}\". Options: {}, n(ext), x (explain), r(eset), q(uit)",
                    other,
                    options.join("/")
                )
                .yellow()
            ),
        }
    }
}
