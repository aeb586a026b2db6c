use inksac::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colors the directory part of a `<cwd>$ ` prompt.
    pub fn highlight_prompt(&self, prompt: &str) -> String {
        if !self.enabled() {
            return prompt.to_string();
        }

        let Some(dir) = prompt.strip_suffix("$ ") else {
            return prompt.to_string();
        };

        let dir_style = Style::builder().foreground(Color::Green).bold().build();
        format!("{}$ ", dir.style(dir_style))
    }

    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() {
            return input.to_string();
        }

        let mut parts: Vec<String> = input.split(' ').map(String::from).collect();
        let Some(first) = parts.iter().position(|part| !part.is_empty()) else {
            return input.to_string();
        };

        // Highlight command name in cyan
        let command_style = Style::builder().foreground(Color::Cyan).bold().build();
        parts[first] = parts[first].clone().style(command_style).to_string();

        // Redirections and the background marker in yellow
        for part in parts.iter_mut().skip(first + 1) {
            if matches!(part.as_str(), "<" | ">" | ">>" | "&") {
                let operator_style = Style::builder().foreground(Color::Yellow).build();
                *part = part.clone().style(operator_style).to_string();
            }
        }

        parts.join(" ")
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();
        error.style(error_style).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_passthrough() {
        let highlighter = SyntaxHighlighter {
            color_support: ColorSupport::NoColor,
        };
        assert_eq!(highlighter.highlight_prompt("/tmp$ "), "/tmp$ ");
        assert_eq!(highlighter.highlight_command("ls > out"), "ls > out");
        assert_eq!(highlighter.highlight_error("boom"), "boom");
    }

    #[test]
    fn test_colored_prompt_keeps_text() {
        let highlighter = SyntaxHighlighter {
            color_support: ColorSupport::Basic,
        };
        let prompt = highlighter.highlight_prompt("/tmp$ ");
        assert!(prompt.contains("/tmp"));
        assert!(prompt.ends_with("$ "));
        assert_ne!(prompt, "/tmp$ ");
    }

    #[test]
    fn test_colored_command_preserves_spacing() {
        let highlighter = SyntaxHighlighter {
            color_support: ColorSupport::Basic,
        };
        let line = "  echo  hi >> log";
        let colored = highlighter.highlight_command(line);
        assert!(colored.contains("echo"));
        assert!(colored.starts_with("  "));
        assert!(colored.contains("log"));
    }
}
