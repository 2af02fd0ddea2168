use std::io::{self, Write};

use serde_json::Value;

use crate::append_shell_log;

fn render_argument(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Renders arguments the way a console line would print them.
pub(crate) fn format_process_message(args: &[Value]) -> String {
    args.iter()
        .map(render_argument)
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn relay_process_message<W: Write>(out: &mut W, args: &[Value]) -> io::Result<()> {
    writeln!(out, "{}", format_process_message(args))?;
    out.flush()
}

#[tauri::command]
pub(crate) fn process_message(args: Vec<Value>) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(error) = relay_process_message(&mut handle, &args) {
        append_shell_log(&format!("failed to relay process message: {error}"));
    }
}
