//! Interactive section selection

use prd_model::{Suggestion, SuggestionSection};
use std::io::{self, BufRead, Write};

fn question(section: SuggestionSection) -> &'static str {
    match section {
        SuggestionSection::Summary => "Apply summary? (y/n) ",
        SuggestionSection::Requirements => "Apply requirements? (y/n) ",
        SuggestionSection::CriticalUserJourneys => "Apply CUJs? (y/n) ",
        SuggestionSection::MarketResearch => "Apply market research? (y/n) ",
        SuggestionSection::CompetitiveLandscape => "Apply competitive landscape? (y/n) ",
    }
}

/// Ask once per populated section; `all` accepts everything unasked
pub(crate) fn select_sections<R: BufRead, W: Write>(
    suggestion: &Suggestion,
    all: bool,
    input: &mut R,
    out: &mut W,
) -> io::Result<Vec<SuggestionSection>> {
    let sections = suggestion.sections();
    if all {
        return Ok(sections);
    }

    let mut chosen = Vec::with_capacity(sections.len());
    for section in sections {
        if confirm(input, out, question(section))? {
            chosen.push(section);
        }
    }
    Ok(chosen)
}

/// Repeat `prompt` until the answer is yes or no
fn confirm<R: BufRead, W: Write>(input: &mut R, out: &mut W, prompt: &str) -> io::Result<bool> {
    loop {
        write!(out, "{prompt}")?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer",
            ));
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => writeln!(out, "Please answer y or n.")?,
        }
    }
}
