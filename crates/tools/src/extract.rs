//! Turns the backend's free text into lookup commands.

use docscout_core::LookupCommand;

/// Keeps only lines of the form `<tool> <verb> <args...>`.
#[derive(Debug, Clone)]
pub struct CommandExtractor {
    tool: String,
    verb: String,
}

impl CommandExtractor {
    pub fn new(tool: impl Into<String>) -> Self {
        Self {
            tool: tool.into(),
            verb: "doc".into(),
        }
    }

    /// The prefix every accepted line starts with, e.g. `go doc `.
    pub fn prefix(&self) -> String {
        format!("{} {} ", self.tool, self.verb)
    }

    /// Extract commands in the order they appear. Never fails; an answer
    /// without usable lines yields an empty list.
    ///
    /// A scope flag the backend wrote itself (`-C dir`, `-C=dir`, `--C dir`,
    /// `--C=dir`, anywhere on the line) is discarded: scoping is decided by
    /// the runner from the discovered root.
    pub fn extract(&self, response_text: &str) -> Vec<LookupCommand> {
        let prefix = self.prefix();

        response_text
            .lines()
            .map(str::trim)
            .filter_map(|line| line.strip_prefix(prefix.as_str()))
            .filter_map(|rest| {
                let args = strip_scope(rest.split_whitespace());
                if args.is_empty() {
                    None
                } else {
                    Some(LookupCommand::new(&self.tool, &self.verb, args))
                }
            })
            .collect()
    }
}

fn strip_scope<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut args = Vec::new();
    while let Some(token) = tokens.next() {
        match token.strip_prefix("--").or_else(|| token.strip_prefix('-')) {
            Some("C") => {
                tokens.next();
            }
            Some(flag) if flag.starts_with("C=") => {}
            _ => args.push(token.to_string()),
        }
    }
    args
}

impl Default for CommandExtractor {
    fn default() -> Self {
        Self::new("go")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(commands: &[LookupCommand]) -> Vec<String> {
        commands.iter().map(|c| c.args.join(" ")).collect()
    }

    #[test]
    fn keeps_matching_lines_in_order() {
        let text = "\
go doc github.com/spf13/cobra.Command
Here are the commands you asked for:
  go doc go.uber.org/zap.Logger.Sugar
```
go doc github.com/google/uuid.New
";
        let commands = CommandExtractor::default().extract(text);
        assert_eq!(commands.len(), 3);
        assert_eq!(
            symbols(&commands),
            vec![
                "github.com/spf13/cobra.Command",
                "go.uber.org/zap.Logger.Sugar",
                "github.com/google/uuid.New",
            ]
        );
        assert!(commands.iter().all(|c| c.tool == "go" && c.verb == "doc" && !c.is_scoped()));
    }

    #[test]
    fn no_matching_lines_yields_empty() {
        let text = "I could not find any external dependencies.\n\n- fmt.Println is stdlib";
        assert!(CommandExtractor::default().extract(text).is_empty());
        assert!(CommandExtractor::default().extract("").is_empty());
    }

    #[test]
    fn rejects_near_misses() {
        let text = "\
go docs github.com/x/y
`go doc github.com/x/y`
1. go doc github.com/x/y
go doc
go doc
gofmt doc x
";
        assert!(CommandExtractor::default().extract(text).is_empty());
    }

    #[test]
    fn keeps_flags_written_by_the_backend() {
        let commands = CommandExtractor::default().extract("go doc -all github.com/x/y");
        assert_eq!(commands[0].args, vec!["-all", "github.com/x/y"]);
    }

    #[test]
    fn strips_backend_supplied_scope() {
        let commands = CommandExtractor::default().extract("go doc -C /elsewhere pkg.Func\ngo doc -C /only");
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].args, vec!["pkg.Func"]);
        assert!(!commands[0].is_scoped());
    }

    #[test]
    fn strips_every_scope_spelling() {
        let text = "\
go doc -C=/elsewhere pkg.A
go doc --C /elsewhere pkg.B
go doc --C=/elsewhere pkg.C
go doc -all -C /elsewhere pkg.D
go doc -C=/only
";
        let commands = CommandExtractor::default().extract(text);
        assert_eq!(
            commands.iter().map(|c| c.args.clone()).collect::<Vec<_>>(),
            vec![
                vec!["pkg.A".to_string()],
                vec!["pkg.B".to_string()],
                vec!["pkg.C".to_string()],
                vec!["-all".to_string(), "pkg.D".to_string()],
            ]
        );

        let scoped = commands[0].clone().scoped("/root");
        assert_eq!(scoped.to_string(), "go doc -C /root pkg.A");
    }

    #[test]
    fn counts_k_of_k_plus_m_lines() {
        let good: Vec<String> = (0..5).map(|i| format!("go doc example.com/p{i}.F")).collect();
        let bad: Vec<String> = (0..7).map(|i| format!("note {i}")).collect();
        let mut lines = Vec::new();
        for (g, b) in good.iter().zip(bad.iter()) {
            lines.push(b.clone());
            lines.push(g.clone());
        }
        lines.extend(bad[5..].iter().cloned());

        let commands = CommandExtractor::default().extract(&lines.join("\n"));
        assert_eq!(commands.len(), 5);
        assert_eq!(commands[4].args, vec!["example.com/p4.F"]);
    }

    #[test]
    fn handles_crlf() {
        let commands = CommandExtractor::default().extract("go doc a.B\r\ngo doc c.D\r\n");
        assert_eq!(symbols(&commands), vec!["a.B", "c.D"]);
    }

    #[test]
    fn prefix_follows_tool_name() {
        assert_eq!(CommandExtractor::new("go1.22").prefix(), "go1.22 doc ");
    }
}
