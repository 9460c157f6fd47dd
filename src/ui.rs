use anstyle::{AnsiColor, Style};
use is_terminal::IsTerminal;
use std::io::{self, Write};

const STATUS_WIDTH: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatusKind {
    Plain,
    Success,
    Info,
    Warn,
}

fn is_stderr(kind: StatusKind) -> bool {
    kind == StatusKind::Warn
}

fn supports_color(stderr: bool) -> bool {
    let terminal = if stderr {
        io::stderr().is_terminal()
    } else {
        io::stdout().is_terminal()
    };
    terminal && std::env::var_os("NO_COLOR").is_none()
}

fn style_for(kind: StatusKind) -> Style {
    let style = Style::new().bold();
    match kind {
        StatusKind::Plain => style,
        StatusKind::Success => style.fg_color(Some(AnsiColor::Green.into())),
        StatusKind::Info => style.fg_color(Some(AnsiColor::Blue.into())),
        StatusKind::Warn => style.fg_color(Some(AnsiColor::Yellow.into())),
    }
}

/// Render a status line into `handle`: a right-aligned label followed by the
/// message, with continuation lines indented under the message.
fn render(handle: &mut dyn Write, kind: StatusKind, label: &str, message: &str, color: bool) {
    let (prefix, suffix) = if color {
        let style = style_for(kind);
        (style.render().to_string(), style.render_reset().to_string())
    } else {
        (String::new(), String::new())
    };

    if kind == StatusKind::Plain && label.is_empty() {
        for line in message.split('\n') {
            let _ = writeln!(handle, "{line}");
        }
        return;
    }

    let padded_label = format!("{:>width$}", label, width = STATUS_WIDTH);
    for (idx, line) in message.split('\n').enumerate() {
        if idx == 0 {
            let _ = writeln!(handle, "{prefix}{padded_label}{suffix} {line}");
        } else {
            let _ = writeln!(handle, "{:>width$} {line}", "", width = STATUS_WIDTH);
        }
    }
}

pub(crate) fn write_status(kind: StatusKind, label: &str, message: &str) {
    let stderr = is_stderr(kind);
    let use_color = supports_color(stderr);

    if stderr {
        let mut handle = io::stderr().lock();
        render(&mut handle, kind, label, message, use_color);
        let _ = handle.flush();
    } else {
        let mut handle = io::stdout().lock();
        render(&mut handle, kind, label, message, use_color);
        let _ = handle.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(kind: StatusKind, label: &str, message: &str) -> String {
        let mut buffer = Vec::new();
        render(&mut buffer, kind, label, message, false);
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn labels_are_right_aligned() {
        assert_eq!(
            rendered(StatusKind::Success, "Added", "folder"),
            "       Added folder\n"
        );
    }

    #[test]
    fn continuation_lines_are_indented() {
        assert_eq!(
            rendered(StatusKind::Info, "Info", "one\ntwo"),
            "        Info one\n             two\n"
        );
    }

    #[test]
    fn plain_lines_have_no_label_column() {
        assert_eq!(rendered(StatusKind::Plain, "", "  Links for /app"), "  Links for /app\n");
    }

    #[test]
    fn warnings_go_to_stderr() {
        assert!(is_stderr(StatusKind::Warn));
        assert!(!is_stderr(StatusKind::Info));
        assert!(!is_stderr(StatusKind::Success));
    }
}
