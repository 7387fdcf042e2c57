//! Recognition of special commands that bypass the matcher
//!
//! The surrounding shell dispatches these before consulting the knowledge
//! base: a book lookup goes to the external reference collaborator, exit
//! keywords end the session, and everything else is matched as an ordinary
//! utterance. The collaborators themselves are not this crate's concern.

/// Prefix that requests an external book lookup.
pub const BOOK_LOOKUP_PREFIX: &str = "book review";

/// Whole-input keywords that end a chat session.
pub const EXIT_KEYWORDS: [&str; 3] = ["quit", "bye", "exit"];

/// How a raw input line should be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// Look up a title with the external reference collaborator. The title
    /// is empty when the user typed only the prefix; the shell should then
    /// prompt for one.
    BookLookup { title: &'a str },
    /// End the session.
    Exit,
    /// Plain chat input for the matcher (or a generative collaborator).
    Utterance(&'a str),
}

/// Classify a raw input line.
///
/// Prefix and keyword checks are case-insensitive; the returned title and
/// utterance keep their original casing.
pub fn parse_command(input: &str) -> Command<'_> {
    let trimmed = input.trim();
    if let Some(head) = trimmed.get(..BOOK_LOOKUP_PREFIX.len()) {
        if head.eq_ignore_ascii_case(BOOK_LOOKUP_PREFIX) {
            let title = trimmed[BOOK_LOOKUP_PREFIX.len()..].trim();
            return Command::BookLookup { title };
        }
    }
    if EXIT_KEYWORDS
        .iter()
        .any(|keyword| trimmed.eq_ignore_ascii_case(keyword))
    {
        return Command::Exit;
    }
    Command::Utterance(trimmed)
}
