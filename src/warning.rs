use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    text::Line,
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;

/// A pop-up describing a startup problem that the game can carry on past,
/// such as an unreadable configuration file
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
}

impl Warning {
    /// Longer messages are cut off with an ellipsis line
    const MAX_LINES: usize = 14;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    pub(crate) fn handle_command(&self, cmd: Command) -> Option<WarningOutcome> {
        match cmd {
            Command::Primary => Some(WarningOutcome::Dismissed),
            Command::Quit => Some(WarningOutcome::Quit),
            _ => None,
        }
    }

    /// Lay out an error message followed by its chain of causes
    fn from_messages(mut msgs: Vec<String>) -> Warning {
        let mut lines = Vec::new();
        if msgs.is_empty() {
            msgs.push(String::from("Something went wrong."));
        }
        let causes = msgs.split_off(1);
        for m in msgs {
            wrap_into(&mut lines, &m, "", "");
        }
        match causes.len() {
            0 => (),
            1 => {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
                for m in causes {
                    wrap_into(&mut lines, &m, "    ", "    ");
                }
            }
            _ => {
                lines.push(String::new());
                lines.push(String::from("Caused by:"));
                for (i, m) in causes.into_iter().enumerate() {
                    wrap_into(&mut lines, &m, &format!("{i:>5}: "), "       ");
                }
            }
        }
        if lines.len() > Self::MAX_LINES {
            lines.truncate(Self::MAX_LINES - 1);
            lines.push(String::from("…"));
        }
        Warning { lines }
    }
}

fn wrap_into(lines: &mut Vec<String>, text: &str, initial_indent: &str, subsequent_indent: &str) {
    let opts = textwrap::Options::new(usize::from(Warning::TEXT_WIDTH))
        .break_words(true)
        .initial_indent(initial_indent)
        .subsequent_indent(subsequent_indent);
    lines.extend(textwrap::wrap(text, opts).into_iter().map(Cow::into_owned));
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl From<anyhow::Error> for Warning {
    fn from(e: anyhow::Error) -> Warning {
        Warning::from_messages(e.chain().map(ToString::to_string).collect())
    }
}

impl Widget for &Warning {
    // `area` is the whole display area, not just the pop-up's.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text_height = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height: text_height.saturating_add(4),
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(block_area);
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        for (line, row) in self.lines.iter().zip(inner.rows()) {
            Line::from(line.as_str()).render(row, buf);
        }
        if let Some(ok_row) = inner.rows().last() {
            Line::from("[OK]").centered().render(ok_row, buf);
        }
    }
}
