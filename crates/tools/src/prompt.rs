//! Prompt construction for the lookup-proposal request.

/// Instructions placed before the source file.
const LOOKUP_INSTRUCTIONS: &str = r#"You are helping a developer read a Go source file. Propose `go doc` commands that retrieve documentation for the symbols this file depends on.

COMMAND GRAMMAR (one command per line):
  go doc <package>                        package overview
  go doc <package>.<Function>             function
  go doc <package>.<Type>                 type
  go doc <package>.<Type>.<Method>        method on a type
  go doc <package>.<Var or Const>         variable or constant

For symbols declared in the same module, use the package path relative to the module (or the bare symbol for the current package):
  go doc ./internal/store.Open
  go doc Server.Start

For external dependencies, use the fully-qualified import path:
  go doc github.com/spf13/cobra.Command
  go doc github.com/spf13/cobra.Command.Execute
  go doc go.uber.org/zap.NewProduction
  go doc github.com/google/uuid.Nil

PRIORITIES:
- Focus on third-party dependencies imported by the file; they are the hardest for a reader to look up.
- Skip standard library packages (fmt, strings, net/http, context, ...) and builtins unless nothing else is used.
- Include a command only for symbols the file actually references.

OUTPUT RULES:
- Output ONLY the commands, one per line, each starting with `go doc `.
- No numbering, bullets, code fences, explanations, or blank commentary.

SOURCE FILE:
"#;

/// Build the prompt for a source file. The contents are embedded verbatim.
pub fn build_prompt(file_contents: &str) -> String {
    let mut prompt = String::with_capacity(LOOKUP_INSTRUCTIONS.len() + file_contents.len() + 16);
    prompt.push_str(LOOKUP_INSTRUCTIONS);
    prompt.push_str("<<<\n");
    prompt.push_str(file_contents);
    if !file_contents.ends_with('\n') {
        prompt.push('\n');
    }
    prompt.push_str(">>>\n");
    prompt
}
