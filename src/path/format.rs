use super::{CommandKind, Path, Segment};

impl Path {
    /// Serializes the path to path data.
    ///
    /// The plain form writes every letter, pairs as `x,y` and commands
    /// separated by spaces. The minified form merges runs of the same command
    /// into one letter, relies on the implicit lineto after a moveto, strips
    /// leading zeros and only emits separators the grammar needs.
    #[must_use]
    pub fn to_path_data(&self, minify: bool) -> String {
        if minify {
            self.minified()
        } else {
            self.commands()
                .iter()
                .map(|c| {
                    let params = plain_params(c.segment());
                    format!("{}{params}", c.letter())
                })
                .collect::<Vec<_>>()
                .join(" ")
        }
    }

    fn minified(&self) -> String {
        let mut writer = MinifiedWriter::default();
        // The command a letterless parameter group would be read as.
        let mut implicit: Option<(CommandKind, bool)> = None;
        for cmd in self.commands() {
            let key = (cmd.kind(), cmd.is_relative());
            let repeats = !matches!(key.0, CommandKind::Move | CommandKind::Close)
                && implicit == Some(key);
            if !repeats {
                writer.letter(cmd.letter());
            }
            for value in cmd.segment().params() {
                writer.number(value);
            }
            implicit = match key.0 {
                CommandKind::Move => Some((CommandKind::Line, key.1)),
                CommandKind::Close => None,
                kind => Some((kind, key.1)),
            };
        }
        writer.out
    }
}

/// Formats a coordinate; negative zero prints as `0`.
pub(crate) fn format_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

fn pair(p: &crate::math::Point2) -> String {
    format!("{},{}", format_number(p.x), format_number(p.y))
}

fn plain_params(segment: &Segment) -> String {
    match segment {
        Segment::Move(p) | Segment::Line(p) | Segment::SmoothQuadCurve(p) => pair(p),
        Segment::HLine(v) | Segment::VLine(v) => format_number(*v),
        Segment::CubicCurve { ctrl1, ctrl2, to } => {
            format!("{} {} {}", pair(ctrl1), pair(ctrl2), pair(to))
        }
        Segment::SmoothCubicCurve { ctrl2: c, to } | Segment::QuadCurve { ctrl: c, to } => {
            format!("{} {}", pair(c), pair(to))
        }
        Segment::Arc(a) => format!(
            "{},{} {} {},{} {}",
            format_number(a.rx),
            format_number(a.ry),
            format_number(a.x_rotation),
            u8::from(a.large_arc),
            u8::from(a.sweep),
            pair(&a.to)
        ),
        Segment::Close => String::new(),
    }
}

#[derive(Default)]
struct MinifiedWriter {
    out: String,
    /// Whether the last emitted token was a number containing a dot.
    last_number: Option<bool>,
}

impl MinifiedWriter {
    fn letter(&mut self, letter: char) {
        self.out.push(letter);
        self.last_number = None;
    }

    fn number(&mut self, value: f64) {
        let text = format_number(value);
        let text = if let Some(rest) = text.strip_prefix("0.") {
            format!(".{rest}")
        } else if let Some(rest) = text.strip_prefix("-0.") {
            format!("-.{rest}")
        } else {
            text
        };
        if let Some(had_dot) = self.last_number {
            let self_delimiting = text.starts_with('-') || (had_dot && text.starts_with('.'));
            if !self_delimiting {
                self.out.push(' ');
            }
        }
        self.last_number = Some(text.contains('.'));
        self.out.push_str(&text);
    }
}
