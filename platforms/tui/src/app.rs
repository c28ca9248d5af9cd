use action::Action;
use complement::{Step, TransitionTable, TuringMachine, TuringMachineError};
use keymap::{Config, KeyMapConfig};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Cell, Padding, Paragraph, Row, Table, Wrap},
    Frame,
};

const BLOCK_PADDING: Padding = Padding::new(1, 1, 0, 0);

pub struct App {
    machine: TuringMachine,
    input: String,
    // Input the current machine was built from, used to detect edits before stepping.
    loaded_input: String,
    output: Option<String>,
    auto_play: bool,
    message: String,
    show_help: bool,
    pub(crate) keymap: Config<Action>,
}

impl App {
    /// Creates the app with `input` in the input field. A non-empty input must be valid.
    pub fn new(input: &str) -> Result<Self, String> {
        let input = input.trim().to_string();
        let machine = TuringMachine::from_input(&input).map_err(|e| e.to_string())?;

        Ok(Self {
            machine,
            loaded_input: input.clone(),
            input,
            output: None,
            auto_play: false,
            message: "Type a binary string and press Enter. Press F1 for help.".to_string(),
            show_help: false,
            keymap: Action::keymap_config(),
        })
    }

    pub fn render(&mut self, f: &mut Frame) {
        let inner_area = f.area().inner(Margin::new(1, 0));

        // Header, input, output, middle (table + machine), status
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(3),
            ])
            .split(inner_area);

        self.render_header(f, main_chunks[0]);
        self.render_input(f, main_chunks[1]);
        self.render_output(f, main_chunks[2]);

        let middle_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(50),
                Constraint::Length(1),
                Constraint::Percentage(50),
            ])
            .split(main_chunks[3]);

        self.render_transition_table(f, middle_chunks[0]);

        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(middle_chunks[2]);

        self.render_machine_state(f, right_chunks[0]);

        if self.show_help {
            self.render_help(f, right_chunks[1]);
        } else {
            self.render_tape(f, right_chunks[1]);
        }

        self.render_status(f, main_chunks[4]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let paragraph = Paragraph::new(Line::from(vec![
            Span::styled("Rules: ", Style::default().fg(Color::Yellow)),
            Span::raw(self.machine.table().len().to_string()),
            Span::styled(" | States: ", Style::default().fg(Color::Yellow)),
            Span::raw(self.machine.table().states().len().to_string()),
        ]))
        .block(block("Complement - One's Complement Turing Machine").title_alignment(Alignment::Center));

        f.render_widget(paragraph, area);
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled("Enter Binary String: ", Style::default().fg(Color::Yellow)),
            Span::raw(self.input.as_str()),
            Span::styled("█", Style::default().fg(Color::Gray)),
        ]);

        f.render_widget(section("Input", vec![line]), area);
    }

    fn render_output(&self, f: &mut Frame, area: Rect) {
        let line = match &self.output {
            Some(output) => Line::from(vec![
                Span::styled("One's Complement: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    output.as_str(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            None => Line::from(Span::styled(
                "One's Complement: -",
                Style::default().fg(Color::DarkGray),
            )),
        };

        f.render_widget(section("Output", vec![line]), area);
    }

    fn render_transition_table(&self, f: &mut Frame, area: Rect) {
        let table = self.machine.table();
        let next = self.machine.transition().copied();

        let header = Row::new(TransitionTable::headers().map(Cell::from)).style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

        let rows = table
            .rules()
            .iter()
            .zip(table.rows())
            .map(|(rule, cells)| {
                let style = if Some(*rule) == next {
                    Style::default().bg(Color::Yellow).fg(Color::Black)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                Row::new(cells.map(Cell::from)).style(style)
            });

        let widths = [
            Constraint::Percentage(24),
            Constraint::Percentage(18),
            Constraint::Percentage(22),
            Constraint::Percentage(18),
            Constraint::Percentage(18),
        ];

        let widget = Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .block(block("Transition Table"));

        f.render_widget(widget, area);
    }

    fn render_tape(&self, f: &mut Frame, area: Rect) {
        let head = self.machine.head();

        let tape_spans: Vec<Span> = self
            .machine
            .tape()
            .iter()
            .enumerate()
            .map(|(i, symbol)| {
                let text = format!(" {} ", symbol.display_char());
                if i == head {
                    Span::styled(
                        text,
                        Style::default()
                            .bg(Color::Yellow)
                            .fg(Color::Black)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::raw(text)
                }
            })
            .collect();

        let text_lines = vec![
            Line::from(tape_spans),
            Line::from(Span::styled(
                format!(
                    "Head at position: {} (symbol: '{}')",
                    head,
                    self.machine.symbol().display_char()
                ),
                Style::default().fg(Color::Cyan),
            )),
        ];

        let paragraph = section("Tape", text_lines).wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_machine_state(&self, f: &mut Frame, area: Rect) {
        let step_count = self.machine.step_count();

        let (status_text, status_color) = if self.machine.is_halted() {
            ("HALTED", Color::Red)
        } else if step_count == 0 {
            ("READY", Color::Blue)
        } else {
            ("RUNNING", Color::Green)
        };

        let text = vec![
            Line::from(vec![
                Span::styled("Current State: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    self.machine.state().name(),
                    Style::default()
                        .fg(status_color)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" | Steps: ", Style::default().fg(Color::Yellow)),
                Span::raw(step_count.to_string()),
                Span::styled(" | Status: ", Style::default().fg(Color::Yellow)),
                Span::styled(status_text, Style::default().fg(status_color)),
            ]),
            Line::from(vec![
                Span::styled("Current Symbol: ", Style::default().fg(Color::Cyan)),
                Span::raw(format!("'{}'", self.machine.symbol().display_char())),
            ]),
        ];

        f.render_widget(section("Machine State", text), area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from("Controls:"),
            Line::from("  0 / 1     - Edit the input"),
            Line::from("  Backspace - Delete last character"),
            Line::from("  Ctrl-U    - Clear the input"),
            Line::from("  Enter     - Process (run to halt)"),
            Line::from("  Ctrl-S    - Step forward"),
            Line::from("  Ctrl-R    - Reset machine"),
            Line::from("  Ctrl-P    - Toggle auto-play"),
            Line::from("  F1        - Toggle this help"),
            Line::from("  Esc       - Quit"),
            Line::from(""),
            Line::from("  The highlighted rule is the one the next step applies."),
            Line::from("  '_' marks the blank symbol on the tape."),
        ];

        f.render_widget(section("Help", help_text), area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let auto_play_status = if self.auto_play { "ON" } else { "OFF" };
        let status = Text::from(Line::from(vec![
            Span::raw("Auto-play: "),
            Span::styled(auto_play_status, Style::default().fg(Color::Yellow)),
            Span::raw(format!(" | {}", self.message)),
        ]));

        f.render_widget(Paragraph::new(status).block(block("Status")), area);
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
    }

    pub fn delete_char(&mut self) {
        self.input.pop();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
    }

    /// Validates the input field, runs the machine to halt and shows the result.
    pub fn process_input(&mut self) {
        if !self.load_input() {
            return;
        }

        match self.machine.run() {
            Ok(output) => {
                self.message = format!("Halted after {} steps", self.machine.step_count());
                self.output = Some(output);
            }
            Err(e) => self.fail(e),
        }
        self.auto_play = false;
    }

    pub fn step_machine(&mut self) {
        if self.input.trim() != self.loaded_input && !self.load_input() {
            return;
        }

        match self.machine.step() {
            Ok(Step::Continue) => {
                self.message = format!("Step {} completed", self.machine.step_count());
            }
            Ok(Step::Halt) => {
                self.output = Some(self.machine.output());
                self.message = "Machine is halted. Press Ctrl-R to reset.".to_string();
                self.auto_play = false;
            }
            Err(e) => self.fail(e),
        }
    }

    pub fn reset_machine(&mut self) {
        self.machine.reset();
        self.output = None;
        self.message = "Machine reset".to_string();
        self.auto_play = false;
    }

    /// Starts or stops auto-play. Starting picks up an edited input first and refuses
    /// to start on a halted machine.
    pub fn toggle_auto_play(&mut self) {
        if self.auto_play {
            self.auto_play = false;
            self.message = "Auto-play disabled".to_string();
            return;
        }

        if self.input.trim() != self.loaded_input && !self.load_input() {
            return;
        }

        if self.machine.is_halted() {
            self.message = "Machine is halted. Press Ctrl-R to reset.".to_string();
            return;
        }

        self.auto_play = true;
        self.message = "Auto-play enabled".to_string();
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_play && !self.machine.is_halted()
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Rebuilds the machine from the input field. Invalid input leaves the machine untouched.
    fn load_input(&mut self) -> bool {
        let input = self.input.trim().to_string();
        match TuringMachine::from_input(&input) {
            Ok(machine) => {
                self.machine = machine;
                self.loaded_input = input;
                self.output = None;
                true
            }
            Err(e) => {
                self.fail(e);
                false
            }
        }
    }

    fn fail(&mut self, error: TuringMachineError) {
        self.message = error.to_string();
        self.output = None;
        self.auto_play = false;
    }
}

fn section<'a>(title: &'a str, content: Vec<Line<'a>>) -> Paragraph<'a> {
    Paragraph::new(content).block(block(title))
}

fn block(title: &str) -> Block {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "))
        .padding(BLOCK_PADDING)
}
