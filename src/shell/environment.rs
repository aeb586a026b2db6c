use std::env;

pub(crate) trait EnvironmentHandler {
    fn expand_env_vars(&self, input: &str) -> String;
}

impl EnvironmentHandler for super::Shell {
    fn expand_env_vars(&self, input: &str) -> String {
        expand_variables(
            input,
            self.state.last_status,
            nix::unistd::getpid().as_raw(),
        )
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Substitutes `$?`, `$$` and `$NAME` in a single pass. Substituted text is
/// never rescanned, and a `$` that does not start one of these forms is kept.
pub fn expand_variables(input: &str, last_status: i32, pid: i32) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(dollar_pos) = rest.find('$') {
        result.push_str(&rest[..dollar_pos]);
        let after = &rest[dollar_pos + 1..];

        match after.chars().next() {
            Some('?') => {
                result.push_str(&last_status.to_string());
                rest = &after[1..];
            }
            Some('$') => {
                result.push_str(&pid.to_string());
                rest = &after[1..];
            }
            Some(c) if is_name_char(c) => {
                let name_end = after.find(|c: char| !is_name_char(c)).unwrap_or(after.len());
                let name = &after[..name_end];
                if let Ok(value) = env::var(name) {
                    result.push_str(&value);
                }
                rest = &after[name_end..];
            }
            _ => {
                result.push('$');
                rest = after;
            }
        }
    }

    result.push_str(rest);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_status_and_pid() {
        assert_eq!(expand_variables("echo $?", 0, 42), "echo 0");
        assert_eq!(expand_variables("echo $?", 127, 42), "echo 127");
        assert_eq!(expand_variables("echo $$", 0, 42), "echo 42");
        assert_eq!(expand_variables("$$$?", 3, 7), "73");
    }

    #[test]
    fn test_named_variable() {
        env::set_var("HUSK_EXPAND_NAME", "world");
        assert_eq!(
            expand_variables("hello $HUSK_EXPAND_NAME!", 0, 1),
            "hello world!"
        );
        assert_eq!(
            expand_variables("x$HUSK_EXPAND_NAME/y", 0, 1),
            "xworld/y"
        );
    }

    #[test]
    fn test_unset_variable_is_empty() {
        env::remove_var("HUSK_EXPAND_UNSET");
        assert_eq!(expand_variables("a $HUSK_EXPAND_UNSET b", 0, 1), "a  b");
    }

    #[test]
    fn test_literal_dollar() {
        assert_eq!(expand_variables("cost $", 0, 1), "cost $");
        assert_eq!(expand_variables("a $ b", 0, 1), "a $ b");
        assert_eq!(expand_variables("$-x", 0, 1), "$-x");
        assert_eq!(expand_variables("no dollars", 0, 1), "no dollars");
    }

    #[test]
    fn test_no_rescan() {
        env::set_var("HUSK_EXPAND_NESTED", "$HUSK_EXPAND_INNER");
        env::set_var("HUSK_EXPAND_INNER", "oops");
        assert_eq!(
            expand_variables("$HUSK_EXPAND_NESTED", 0, 1),
            "$HUSK_EXPAND_INNER"
        );
    }

    #[test]
    fn test_multibyte_neighbours() {
        env::set_var("HUSK_EXPAND_UTF", "v");
        assert_eq!(expand_variables("é$HUSK_EXPAND_UTF€", 0, 1), "év€");
    }
}
