use super::phase::PrimaryAction;
use crate::consts;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A pop-up shown over the board whenever the snake is not moving, telling
/// the player where they are and what Space will do
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Overlay {
    title: String,
    subtitle: String,
    action: PrimaryAction,
}

impl Overlay {
    /// Number of text lines inside the border
    const LINES: u16 = 6;

    pub(crate) fn new(title: String, subtitle: String, action: PrimaryAction) -> Overlay {
        Overlay {
            title,
            subtitle,
            action,
        }
    }

    fn lines(&self) -> [Line<'_>; 6] {
        [
            Line::from(self.subtitle.as_str()),
            Line::default(),
            Line::from("Controls: Arrow Keys or WASD"),
            Line::from_iter([
                Span::raw("Press "),
                Span::styled("Space", consts::KEY_STYLE),
                Span::raw(format!(" to {}. Press ", self.action.hint())),
                Span::styled("R", consts::KEY_STYLE),
                Span::raw(" to Restart Game."),
            ]),
            Line::default(),
            Line::from(Span::styled(
                format!("[{}]", self.action.label()),
                consts::BUTTON_STYLE,
            )),
        ]
    }

    /// The size of the whole pop-up, border included
    fn size(&self) -> Size {
        let text_width = self
            .lines()
            .iter()
            .map(Line::width)
            .chain(std::iter::once(Line::from(self.title.as_str()).width() + 2))
            .max()
            .unwrap_or_default();
        Size {
            width: u16::try_from(text_width)
                .unwrap_or(u16::MAX)
                .saturating_add(4),
            height: Self::LINES + 2,
        }
    }
}

impl Widget for &Overlay {
    /*
     * ┌────────────────────── Round 1 ───────────────────────┐
     * │               Eat 10 apples to advance               │
     * │                                                      │
     * │             Controls: Arrow Keys or WASD             │
     * │ Press Space to Start Round. Press R to Restart Game. │
     * │                                                      │
     * │                [Start Round (Space)]                 │
     * └──────────────────────────────────────────────────────┘
     */

    /// Draws the pop-up centered in `area`, which should be the display area
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = center_rect(area, self.size());
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        block.render(area, buf);
        for (line, row) in self.lines().into_iter().zip(inner.rows()) {
            line.centered().render(row, buf);
        }
    }
}
