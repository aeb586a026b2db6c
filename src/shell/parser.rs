#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRedirect {
    pub path: String,
    pub append: bool,
}

/// One input line after expansion and tokenizing. Built fresh per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCommand {
    pub argv: Vec<String>,
    pub input: Option<String>,
    pub output: Option<OutputRedirect>,
    pub background: bool,
}

impl ParsedCommand {
    pub fn name(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

/// Splits an expanded line on whitespace and pulls out `<`, `>`, `>>` and
/// a trailing `&`.
///
/// Once any redirection operator has been seen, later plain words are
/// dropped rather than added to `argv`, so redirections must come after
/// every real argument. `&` ends the scan; anything after it is ignored.
pub fn parse_line(line: &str) -> ParsedCommand {
    let mut parsed = ParsedCommand::default();
    let mut tokens = line.split_whitespace();
    let mut parsing_redirections = false;

    while let Some(token) = tokens.next() {
        match token {
            "&" => {
                parsed.background = true;
                break;
            }
            ">" | ">>" => {
                parsing_redirections = true;
                if let Some(path) = tokens.next() {
                    parsed.output = Some(OutputRedirect {
                        path: path.to_string(),
                        append: token == ">>",
                    });
                }
            }
            "<" => {
                parsing_redirections = true;
                if let Some(path) = tokens.next() {
                    parsed.input = Some(path.to_string());
                }
            }
            word if !parsing_redirections => parsed.argv.push(word.to_string()),
            _ => {}
        }
    }

    tracing::debug!(?parsed, "parsed line");
    parsed
}
