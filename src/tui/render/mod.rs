//! Dialog rendering

mod colors;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::config::Config;
use crate::dialog::{GoToCommitDialog, RefCombo};
use crate::selector::Source;

/// Where to read about revision syntax
pub const REV_PARSE_DOCS_URL: &str =
    "https://git-scm.com/docs/git-rev-parse#_specifying_revisions";

const LABEL_WIDTH: usize = 19;

/// Create a centered rect with percentage width and absolute height
#[must_use]
pub fn centered_rect_absolute(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical_padding = area.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_padding),
            Constraint::Length(height),
            Constraint::Length(vertical_padding),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Draw the dialog centered in the frame
pub fn render(frame: &mut Frame<'_>, dialog: &GoToCommitDialog, config: &Config) {
    let lines = dialog_lines(dialog, config);
    let height = u16::try_from(lines.len())
        .unwrap_or(u16::MAX)
        .saturating_add(2);
    let area = centered_rect_absolute(80, height, frame.area());

    let block = Block::default()
        .title(" Go to commit ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(colors::MODAL_BG));

    frame.render_widget(Clear, area);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn dialog_lines<'a>(dialog: &'a GoToCommitDialog, config: &Config) -> Vec<Line<'a>> {
    let focus = dialog.focus();
    let mut lines = vec![
        Line::from(Span::styled(
            "Type a revision expression, or pick a tag or branch",
            Style::default().fg(colors::TEXT_DIM),
        )),
        Line::from(""),
    ];

    let expression_style = if dialog.expression_selected() {
        Style::default()
            .fg(colors::TEXT_PRIMARY)
            .bg(colors::SURFACE_HIGHLIGHT)
    } else {
        Style::default().fg(colors::TEXT_PRIMARY).bg(colors::INPUT_BG)
    };
    lines.push(field_line(
        Source::ExpressionField,
        focus,
        vec![Span::styled(dialog.expression(), expression_style)],
    ));

    for source in Source::ALL {
        // The expression field has no list
        let Some(combo) = dialog.combo(source) else {
            continue;
        };
        let matched = match source {
            Source::TagSelector => dialog.selector().selected_tag().is_some(),
            _ => dialog.selector().selected_branch().is_some(),
        };
        lines.push(field_line(source, focus, combo_spans(combo, matched)));
        if focus == source {
            lines.extend(list_lines(combo, source, config.max_visible_entries));
        }
    }

    lines.push(Line::from(""));
    let candidate = dialog.candidate();
    lines.push(Line::from(vec![
        Span::styled(
            format!("{:<LABEL_WIDTH$}", "  Go to:"),
            Style::default().fg(colors::TEXT_DIM),
        ),
        if candidate.is_empty() {
            Span::styled("(nothing selected)", Style::default().fg(colors::TEXT_MUTED))
        } else {
            Span::styled(
                candidate,
                Style::default()
                    .fg(colors::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            )
        },
    ]));

    if let Some(error) = dialog.error() {
        lines.push(Line::from(Span::styled(
            format!("  {error}"),
            Style::default().fg(colors::ACCENT_NEGATIVE),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Enter go · Tab next field · ↑/↓ choose · Ctrl+U clear · Esc cancel",
        Style::default().fg(colors::TEXT_DIM),
    )));
    lines.push(Line::from(Span::styled(
        format!("Revision syntax: {REV_PARSE_DOCS_URL}"),
        Style::default().fg(colors::TEXT_MUTED),
    )));

    lines
}

fn field_line(source: Source, focus: Source, mut value: Vec<Span<'_>>) -> Line<'_> {
    let focused = source == focus;
    let label_style = if focused {
        Style::default()
            .fg(colors::SELECTED)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::TEXT_DIM)
    };
    let marker = if focused { "▶ " } else { "  " };

    let mut spans = vec![Span::styled(
        format!("{marker}{:<width$}", format!("{}:", source.label()), width = LABEL_WIDTH - 2),
        label_style,
    )];
    spans.append(&mut value);
    if focused {
        spans.push(Span::styled("_", Style::default().fg(colors::SELECTED)));
    }
    Line::from(spans)
}

fn combo_spans(combo: &RefCombo, matched: bool) -> Vec<Span<'_>> {
    if combo.is_loading() && combo.text().is_empty() {
        return vec![Span::styled(
            "Loading...",
            Style::default().fg(colors::ACCENT_WARNING),
        )];
    }

    let mut spans = vec![Span::styled(
        combo.text(),
        Style::default().fg(colors::TEXT_PRIMARY).bg(colors::INPUT_BG),
    )];
    if matched {
        spans.push(Span::styled(
            " ✓",
            Style::default().fg(colors::ACCENT_POSITIVE),
        ));
    }
    if let Some(error) = combo.load_error() {
        spans.push(Span::styled(
            format!("  ({error})"),
            Style::default().fg(colors::TEXT_MUTED),
        ));
    }
    spans
}

fn list_lines(combo: &RefCombo, source: Source, max_visible: usize) -> Vec<Line<'static>> {
    let indent = " ".repeat(LABEL_WIDTH);
    if combo.is_loading() {
        return vec![Line::from(Span::styled(
            format!("{indent}Loading..."),
            Style::default().fg(colors::TEXT_MUTED),
        ))];
    }

    let visible = combo.visible();
    if visible.is_empty() {
        let what = if source == Source::TagSelector {
            "tags"
        } else {
            "branches"
        };
        return vec![Line::from(Span::styled(
            format!("{indent}No matching {what}"),
            Style::default().fg(colors::TEXT_MUTED),
        ))];
    }

    let max_visible = max_visible.max(1);
    let selected = combo.highlighted();
    // Keep the highlighted entry on screen
    let scroll_offset = match selected {
        Some(idx) if idx >= max_visible => idx - max_visible + 1,
        _ => 0,
    };

    let mut lines = Vec::new();
    for (idx, entry) in visible
        .iter()
        .enumerate()
        .skip(scroll_offset)
        .take(max_visible)
    {
        let is_selected = selected == Some(idx);
        let style = if is_selected {
            Style::default()
                .fg(colors::TEXT_PRIMARY)
                .bg(colors::SURFACE_HIGHLIGHT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::TEXT_PRIMARY)
        };
        let prefix = if is_selected { "▶ " } else { "  " };
        let date = entry
            .commit_time
            .map(|time| time.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(format!("{prefix}{}", entry.name), style),
            Span::styled(
                format!("  {} {date}", entry.short_id()),
                Style::default().fg(colors::TEXT_MUTED),
            ),
        ]));
    }

    let hidden_above = scroll_offset;
    let hidden_below = visible.len().saturating_sub(scroll_offset + max_visible);
    let indicator = match (hidden_above > 0, hidden_below > 0) {
        (true, true) => format!("↑{hidden_above} more above, ↓{hidden_below} more below"),
        (true, false) => format!("↑{hidden_above} more above"),
        (false, true) => format!("↓{hidden_below} more below"),
        (false, false) => String::new(),
    };
    if !indicator.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{indent}  {indicator}"),
            Style::default().fg(colors::TEXT_MUTED),
        )));
    }

    lines
}
