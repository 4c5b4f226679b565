//! Starter programs for "write application"
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Path separators stripped from generated file names
//! - 1.0.0: Built-in calculator, todo and editor launcher templates

use std::path::Path;

/// Longest stem used for placeholder file names
const MAX_STEM_CHARS: usize = 50;

const CALCULATOR: &str = r#"# Simple calculator
def add(a, b): return a + b
def sub(a, b): return a - b
def mul(a, b): return a * b
def div(a, b): return a / b if b != 0 else None

if __name__ == '__main__':
    print('Calculator - enter "exit" to quit')
    while True:
        expr = input('Enter expression: ')
        if expr.strip().lower() == 'exit':
            break
        try:
            print(eval(expr))
        except Exception as e:
            print('Error:', e)
"#;

const TODO: &str = r#"# Simple TODO app
tasks = []
while True:
    cmd = input('add/show/exit: ').strip().lower()
    if cmd == 'add':
        tasks.append(input('Task: '))
    elif cmd == 'show':
        for i, t in enumerate(tasks, 1):
            print(i, t)
    elif cmd == 'exit':
        break
"#;

/// A program ready to be written out
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub filename: String,
    pub content: String,
}

fn editor_launcher(editor_path: &Path) -> String {
    format!(
        "# VS Code launcher\nimport subprocess\nsubprocess.Popen([r'{}'])\n",
        editor_path.display()
    )
}

/// Template for an application title
///
/// The first built-in key (`calculator`, `todo`, `vs code`) contained in the
/// title wins; anything else gets a placeholder program named after the title.
pub fn template_for_title(title: &str, editor_path: &Path) -> Template {
    let key = title.trim().to_lowercase();

    let builtins = [
        ("calculator", CALCULATOR.to_string()),
        ("todo", TODO.to_string()),
        ("vs code", editor_launcher(editor_path)),
    ];
    if let Some((name, content)) = builtins.into_iter().find(|(name, _)| key.contains(name)) {
        return Template {
            filename: format!("{name}_template.py"),
            content,
        };
    }

    Template {
        filename: format!("{}.py", placeholder_stem(&key)),
        content: format!(
            "# Application: {title}\nprint('This is a placeholder for {title}')\n",
            title = title.trim()
        ),
    }
}

fn placeholder_stem(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_STEM_CHARS)
        .collect();
    if stem.is_empty() {
        "application".to_string()
    } else {
        stem
    }
}
