use crate::application::{App, AppMode, Side};
use crate::domain::{Grid, GREEK_LETTERS, MAX_DIM};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
    Frame,
};

const INPUT_CELL_WIDTH: u16 = 6;
// The result grid holds rendered products, which run longer than inputs.
const RESULT_CELL_WIDTH: u16 = 14;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(7),
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);
    render_matrices(f, app, chunks[1]);
    render_palette(f, app, chunks[2]);
    render_error_line(f, app, chunks[3]);
    render_status_bar(f, app, chunks[4]);

    if matches!(app.mode, AppMode::Help) {
        render_help_popup(f, app.help_scroll);
    }
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let side = match app.side {
        Side::Left => "Left",
        Side::Right => "Right",
    };
    let header = Paragraph::new(format!(
        "tsmat - Terminal Matrix Multiplier | {} cell ({},{})",
        side,
        app.selected_row + 1,
        app.selected_col + 1
    ))
    .style(Style::default().fg(Color::Cyan));
    f.render_widget(header, area);
}

fn grid_width(cell_width: u16) -> u16 {
    // Borders plus five cells plus four column gaps.
    2 + MAX_DIM as u16 * cell_width + (MAX_DIM as u16 - 1)
}

fn render_matrices(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(grid_width(INPUT_CELL_WIDTH)),
            Constraint::Length(3),
            Constraint::Length(grid_width(INPUT_CELL_WIDTH)),
            Constraint::Length(3),
            Constraint::Length(grid_width(RESULT_CELL_WIDTH)),
            Constraint::Min(0),
        ])
        .split(area);

    render_grid(f, app, chunks[0], &app.left, "Left", Some(Side::Left), INPUT_CELL_WIDTH);
    render_separator(f, chunks[1], "x");
    render_grid(f, app, chunks[2], &app.right, "Right", Some(Side::Right), INPUT_CELL_WIDTH);
    render_separator(f, chunks[3], "=");
    render_grid(f, app, chunks[4], &app.result, "Result", None, RESULT_CELL_WIDTH);
}

fn render_separator(f: &mut Frame, area: Rect, label: &str) {
    if area.height == 0 {
        return;
    }
    let centered = Rect {
        x: area.x,
        y: area.y + area.height / 2,
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(label).alignment(Alignment::Center);
    f.render_widget(paragraph, centered);
}

fn render_grid(
    f: &mut Frame,
    app: &App,
    area: Rect,
    grid: &Grid,
    title: &str,
    side: Option<Side>,
    cell_width: u16,
) {
    let mut rows = Vec::new();
    for row in 0..MAX_DIM {
        let mut cells = Vec::new();
        for col in 0..MAX_DIM {
            let selected = side
                .map(|s| s == app.side && row == app.selected_row && col == app.selected_col)
                .unwrap_or(false);
            let editing = selected && matches!(app.mode, AppMode::Editing);

            let text = if editing {
                app.input.clone()
            } else {
                grid.get_cell(row, col).to_string()
            };
            let display = if text.is_empty() { " ".to_string() } else { text };

            let style = if editing {
                Style::default().bg(Color::Green).fg(Color::Black)
            } else if selected {
                Style::default().bg(Color::Blue).fg(Color::White)
            } else {
                Style::default()
            };

            cells.push(Cell::from(display).style(style));
        }
        rows.push(Row::new(cells).height(1));
    }

    let widths = vec![Constraint::Length(cell_width); MAX_DIM];
    let table = Table::new(rows, widths)
        .block(Block::default().borders(Borders::ALL).title(title))
        .column_spacing(1);

    f.render_widget(table, area);
}

fn render_palette(f: &mut Frame, app: &App, area: Rect) {
    let mut lines = [String::new(), String::new()];
    for (index, (letter, _)) in GREEK_LETTERS.iter().enumerate() {
        let key = char::from(b'a' + index as u8);
        let target = &mut lines[index / 12];
        if !target.is_empty() {
            target.push(' ');
        }
        target.push_str(&format!("{}:{}", key, letter));
    }

    let style = if matches!(app.mode, AppMode::GreekPicker) {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let palette = Paragraph::new(format!("{}\n{}", lines[0], lines[1]))
        .block(Block::default().borders(Borders::ALL).title("Greek (g, then key)"))
        .style(style);
    f.render_widget(palette, area);
}

fn render_error_line(f: &mut Frame, app: &App, area: Rect) {
    let error = Paragraph::new(app.error_message.clone())
        .style(Style::default().fg(Color::Red))
        .alignment(Alignment::Center);
    f.render_widget(error, area);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let input_text = match app.mode {
        AppMode::Normal => {
            if let Some(ref status) = app.status_message {
                status.clone()
            } else {
                "Tab: switch matrix | Enter: edit | c: compute | r: reset | \
                 m: copy MATLAB | t: copy LaTeX | g: greek | F1/?: help | q: quit"
                    .to_string()
            }
        }
        AppMode::Editing => format!("Editing: {} (Enter to save, Esc to cancel)", app.input),
        AppMode::GreekPicker => "Press a-x to insert a Greek letter, Esc to cancel".to_string(),
        AppMode::Help => "↑↓/jk: scroll | PgUp/PgDn: fast scroll | Home: top | Esc/q: close help".to_string(),
    };

    let input = Paragraph::new(input_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Editing => Style::default().fg(Color::Green),
            AppMode::GreekPicker => Style::default().fg(Color::Yellow),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(input, area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_text = get_help_text();
    let help_lines: Vec<&str> = help_text.lines().collect();
    let visible_height = popup_area.height.saturating_sub(2) as usize;

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("tsmat Help (Line {}/{})", start_line + 1, help_lines.len()))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

fn get_help_text() -> String {
    r#"TSMAT REFERENCE

=== BASIC CONCEPTS ===
• Fill the Left and Right grids with matrix entries, top-left anchored
• A matrix may be anything from 1x1 up to 5x5, with no holes
• Entries are algebraic expressions, not just numbers: 2, 3.5, x, 2*α+1
• Compute writes Left * Right into the read-only Result grid

=== ENTRY SYNTAX ===
+ - * /         Arithmetic                  2*x + 1, a/b
^ or **         Exponentiation              x^2, 2**10
( )             Grouping                    (a + b)*c
Numbers         Integers or decimals, kept exact (3.5 is 7/2)
Variables       Latin or Greek names        x, y_1, α, ω

=== DIMENSIONS ===
Multiplication requires Left rows = Right columns AND
Left columns = Right rows. Anything else reports
"Invalid Matrix Dimensions!".

=== EXPORTS ===
m               Copy MATLAB code to the clipboard. Each computation
                appends a block:
                  M_L = [1 2; 3 4];
                  M_R = [5 6; 7 8];
                  M_Res = M_L * M_R
t               Copy LaTeX code: Left, Right, and Result as matrix
                environments joined by $\times$ and $=$
r               Reset clears the grids and both export buffers

=== NAVIGATION SHORTCUTS ===
Arrow keys      Move between cells (hjkl also work)
Tab             Switch between the Left and Right grid
Enter/F2        Edit the selected cell
Backspace/Del   Clear the selected cell
g               Open the Greek palette, then a-x picks α-ω
c               Compute
F1 or ?         Show this help (scroll with ↑↓, PgUp/PgDn, Home)
q               Quit application

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/?/q      Close this help window"#
        .to_string()
}
