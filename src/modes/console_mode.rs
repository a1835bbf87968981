use crossterm::{
    cursor::{self, Hide, Show},
    event::{poll, read, Event, KeyCode, KeyEventKind},
    queue,
    style::{Attribute, Color, Print, SetAttribute, Stylize},
    terminal::{
        disable_raw_mode, enable_raw_mode, size, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use std::io::{self, stdout, Stdout, Write};
use std::time::Duration;

use crate::{
    data::{delta::Delta, set_log_enabled, Command, Program},
    error::Result,
    graphics::{blend::grayb, Argb, Canvas, Pixel},
    modes::Mode,
};

pub type Flusher = fn(&Canvas, (u16, u16), &mut Stdout) -> io::Result<()>;

const ERROR: u8 = 6;
const CHARSET_OPAC_EXP: &[u8] = b" `.-':_,^=;><+!rc*/z?sLTv)J7(|Fi{C}fI31tlu[neoZ\
    5Yxjya]2ESwqkP6h9d4VpOGbUAKXHm8RD#$Bg0MNWQ%&@";

impl Mode {
    pub fn get_flusher(&self) -> Flusher {
        match *self {
            Mode::ConAscii => print_ascii,
            Mode::ConBrail => print_brail,
            _ => print_block,
        }
    }

    /// Canvas pixels covered by one terminal cell.
    pub fn cell_pixels(&self) -> (usize, usize) {
        match *self {
            Mode::ConBrail => (2, 4),
            _ => (1, 2),
        }
    }
}

/// Largest size with the canvas' aspect ratio that fits in a terminal of
/// `term` cells, in cell pixels.
pub fn fit(term: (u16, u16), canvas: (usize, usize), mode: Mode) -> (usize, usize) {
    let (sx, sy) = mode.cell_pixels();
    let (gw, gh) = (term.0 as usize * sx, term.1 as usize * sy);
    let (cw, ch) = (canvas.0.max(1), canvas.1.max(1));

    let h = (gw * ch + cw / 2) / cw;

    let (w, h) = if h <= gh {
        (gw, h)
    } else {
        ((gh * cw + ch / 2) / ch, gh)
    };

    (w.max(1), h.max(1))
}

/// Terminal-side state: the downsampled canvas, its placement and the
/// renderer that prints it.
pub struct ConsoleProps {
    pub width: u16,
    pub height: u16,
    pub cells: Canvas,
    pub flusher: Flusher,
    origin: (u16, u16),
}

impl ConsoleProps {
    pub fn new(term: (u16, u16), prog: &Program) -> Self {
        let mut props = Self {
            width: 0,
            height: 0,
            cells: Canvas::new(0, 0),
            flusher: prog.mode().get_flusher(),
            origin: (0, 0),
        };

        props.set_size(term, prog);
        props
    }

    pub fn set_size(&mut self, term: (u16, u16), prog: &Program) {
        self.width = term.0;
        self.height = term.1;
        self.flusher = prog.mode().get_flusher();

        let (w, h) = fit(term, (prog.pix.width(), prog.pix.height()), prog.mode());
        self.cells.resize(w, h);

        let (sx, sy) = prog.mode().cell_pixels();
        self.origin = (
            self.width.saturating_sub(w.div_ceil(sx) as u16) / 2,
            self.height.saturating_sub(h.div_ceil(sy) as u16) / 2,
        );
    }

    pub fn draw(&mut self, prog: &Program, stdout: &mut Stdout) -> io::Result<()> {
        prog.pix.shrink_max_to(&mut self.cells);
        (self.flusher)(&self.cells, self.origin, stdout)
    }
}

struct ColoredString {
    pub string: String,
    pub fg: Argb,
    pub bg: Argb,
    error: u8,
}

fn close_enough(a: Argb, b: Argb, error: u8) -> bool {
    let [_, r, g, b1] = a.decompose();
    let [_, nr, ng, nb] = b.decompose();

    r.abs_diff(nr) <= error && g.abs_diff(ng) <= error && b1.abs_diff(nb) <= error
}

impl ColoredString {
    pub fn new(ch: char, fg: Argb, bg: Argb, error: u8) -> Self {
        Self {
            string: ch.to_string(),
            fg,
            bg,
            error,
        }
    }

    pub fn append(&mut self, ch: char, fg: Argb, bg: Argb) -> bool {
        if close_enough(self.fg, fg, self.error) && close_enough(self.bg, bg, self.error) {
            self.string.push(ch);
            return true;
        }

        false
    }
}

/// Compress similar pixels into one string with the same
/// color. Hopefully this reduces IO performance cost.
#[derive(Default)]
struct StyledLine(Vec<ColoredString>);

impl StyledLine {
    fn push_pixel(&mut self, ch: char, fg: Argb) {
        self.push_pixel_bg(ch, fg, Argb::black());
    }

    fn push_pixel_bg(&mut self, ch: char, fg: Argb, bg: Argb) {
        if let Some(last) = self.0.last_mut() {
            if last.append(ch, fg, bg) {
                return;
            }
        }

        self.0.push(ColoredString::new(ch, fg, bg, ERROR));
    }

    fn queue_print(&mut self, stdout: &mut Stdout) -> io::Result<()> {
        for ColoredString { string, fg, bg, .. } in self.0.drain(..) {
            let [_, r, g, b] = fg.decompose();
            let [_, br, bgg, bb] = bg.decompose();

            queue!(
                stdout,
                Print(
                    string
                        .with(Color::Rgb { r, g, b })
                        .on(Color::Rgb { r: br, g: bgg, b: bb })
                )
            )?;
        }

        Ok(())
    }
}

pub fn print_ascii(pix: &Canvas, origin: (u16, u16), stdout: &mut Stdout) -> io::Result<()> {
    let mut line = StyledLine::default();

    for y in (0..pix.height()).step_by(2) {
        queue!(stdout, cursor::MoveTo(origin.0, origin.1 + y as u16 / 2))?;

        for x in 0..pix.width() {
            let base = pix.width() * y + x;

            let [_, mut r, mut g, mut b] = pix.pixel(base).decompose();
            let [_, nr, ng, nb] = pix.pixel(base + pix.width()).decompose();

            r = r.max(nr);
            g = g.max(ng);
            b = b.max(nb);

            let lum = grayb(r, g, b);

            let alpha_char = to_ascii_art(CHARSET_OPAC_EXP, lum as usize);

            line.push_pixel(alpha_char, Argb::compose([0, r, g, b]));
        }

        line.queue_print(stdout)?;
    }

    Ok(())
}

pub fn print_block(pix: &Canvas, origin: (u16, u16), stdout: &mut Stdout) -> io::Result<()> {
    let mut line = StyledLine::default();

    for y_base in (0..pix.height()).step_by(2) {
        queue!(stdout, cursor::MoveTo(origin.0, origin.1 + y_base as u16 / 2))?;

        for x_base in 0..pix.width() {
            let idx_base = y_base * pix.width() + x_base;
            let [_, mut r, mut g, mut b] = pix.pixel(idx_base).decompose();

            let mut bg = Argb::black();

            let bx = (0..2).fold(0, |acc, i| {
                let idx = idx_base + i * pix.width();
                let [_, pr, pg, pb] = pix.pixel(idx).decompose();

                match grayb(pr, pg, pb) {
                    48.. => {
                        r = r.max(pr);
                        g = g.max(pg);
                        b = b.max(pb);

                        return acc | (1 << (1 - i));
                    }

                    // Dim halves still tint the cell background.
                    32..=47 => {
                        bg = Argb::compose([0, pr, pg, pb]);
                    }

                    _ => {}
                }

                acc
            });

            let block_char = [' ', '▄', '▀', '█'][bx as usize];

            line.push_pixel_bg(block_char, Argb::compose([0, r, g, b]), bg);
        }

        line.queue_print(stdout)?;
    }

    Ok(())
}

pub fn print_brail(pix: &Canvas, origin: (u16, u16), stdout: &mut Stdout) -> io::Result<()> {
    let mut line = StyledLine::default();

    for y_base in (0..pix.height()).step_by(4) {
        queue!(stdout, cursor::MoveTo(origin.0, origin.1 + y_base as u16 / 4))?;

        for x_base in (0..pix.width()).step_by(2) {
            let idx_base = y_base * pix.width() + x_base;

            let [_, mut r, mut g, mut b] = pix.pixel(idx_base).decompose();

            // Dots 1-6 fill the left then right column of the top three
            // rows; dots 7 and 8 are the bottom row.
            let bits = (0..8).fold(0u8, |acc, i| {
                let (dx, dy) = if i < 6 { (i / 3, i % 3) } else { (i & 1, 3) };

                if x_base + dx >= pix.width() {
                    return acc;
                }

                let [_, pr, pg, pb] = pix.pixel(idx_base + dx + dy * pix.width()).decompose();

                r = r.max(pr);
                g = g.max(pg);
                b = b.max(pb);

                acc | (((grayb(pr, pg, pb) > 36) as u8) << i)
            });

            line.push_pixel(braille_char(bits), Argb::compose([0, r, g, b]));
        }

        line.queue_print(stdout)?;
    }

    Ok(())
}

fn braille_char(bits: u8) -> char {
    char::from_u32('⠀' as u32 + bits as u32).unwrap_or(' ')
}

fn to_ascii_art(table: &[u8], x: usize) -> char {
    table[(x * table.len()) >> 8] as char
}

fn read_command(event: Event) -> Option<Command> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(Command::Close),
            KeyCode::Char(' ') => Some(Command::TogglePause),
            KeyCode::Char('r') => Some(Command::Reset),
            KeyCode::Char('.') => Some(Command::SwitchConMode),
            _ => None,
        },
        _ => None,
    }
}

pub fn control_key_events_con(
    prog: &mut Program,
    props: &mut ConsoleProps,
    stdout: &mut Stdout,
    exit: &mut bool,
) -> io::Result<()> {
    while poll(Duration::ZERO)? {
        let event = read()?;

        if let Event::Resize(w, h) = event {
            props.set_size((w, h), prog);
            queue!(stdout, Clear(ClearType::All))?;
            continue;
        }

        let Some(cmd) = read_command(event) else {
            continue;
        };

        if cmd.is_close_requested() {
            *exit = true;
            return Ok(());
        }

        if prog.eval_command(cmd) {
            props.set_size((props.width, props.height), prog);
            queue!(stdout, Clear(ClearType::All))?;
        }
    }

    Ok(())
}

fn run(prog: &mut Program, stdout: &mut Stdout) -> io::Result<()> {
    let mut props = ConsoleProps::new(size()?, prog);
    let mut clock = fps_clock::FpsClock::new(prog.fps());
    let mut delta = Delta::new();
    let mut exit = false;

    queue!(stdout, EnterAlternateScreen, Hide, SetAttribute(Attribute::Bold))?;

    while !exit {
        control_key_events_con(prog, &mut props, stdout, &mut exit)?;

        prog.render(delta.tick());
        props.draw(prog, stdout)?;

        stdout.flush()?;
        clock.tick();
    }

    Ok(())
}

pub fn con_main(mut prog: Program) -> Result<()> {
    prog.print_startup_info();

    // Log lines would tear the alternate screen.
    set_log_enabled(false);

    let mut stdout = stdout();
    enable_raw_mode()?;

    let result = run(&mut prog, &mut stdout);

    let _ = queue!(stdout, SetAttribute(Attribute::Reset), LeaveAlternateScreen, Show);
    let _ = stdout.flush();
    let _ = disable_raw_mode();

    set_log_enabled(!prog.is_quiet());
    prog.print_summary();

    Ok(result?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_keeps_aspect_in_block_cells() {
        assert_eq!(fit((80, 24), (800, 600), Mode::ConBlock), (64, 48));
        assert_eq!(fit((200, 24), (800, 600), Mode::ConAscii), (64, 48));
    }

    #[test]
    fn fit_braille_uses_denser_grid() {
        assert_eq!(fit((80, 24), (800, 600), Mode::ConBrail), (128, 96));
    }

    #[test]
    fn fit_wide_terminal_is_height_bound_and_tall_canvas_width_bound() {
        assert_eq!(fit((40, 100), (800, 600), Mode::ConBlock), (40, 30));
        assert_eq!(fit((80, 24), (100, 1000), Mode::ConAscii), (5, 48));
    }

    #[test]
    fn fit_never_returns_zero() {
        assert_eq!(fit((0, 0), (800, 600), Mode::ConBlock), (1, 1));
        assert_eq!(fit((1, 1), (10_000, 1), Mode::ConAscii), (1, 1));
    }

    #[test]
    fn ascii_ramp_ends() {
        assert_eq!(to_ascii_art(CHARSET_OPAC_EXP, 0), ' ');
        assert_eq!(to_ascii_art(CHARSET_OPAC_EXP, 255), '@');
    }

    #[test]
    fn braille_dots() {
        assert_eq!(braille_char(0), '⠀');
        assert_eq!(braille_char(0xFF), '⣿');
        assert_eq!(braille_char(0b0000_0001), '⠁');
    }

    #[test]
    fn styled_line_merges_similar_colors() {
        let mut line = StyledLine::default();
        line.push_pixel('a', 0x00_80_80_80);
        line.push_pixel('b', 0x00_82_7E_80);
        line.push_pixel('c', 0x00_FF_00_00);

        assert_eq!(line.0.len(), 2);
        assert_eq!(line.0[0].string, "ab");
        assert_eq!(line.0[1].string, "c");
    }
}
