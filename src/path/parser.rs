use regex::Regex;

/// Drawing commands this crate understands. Anything else that can appear in
/// SVG path data (`A`, `S`, `T`, ...) is inert: the tokenizer drops the whole
/// command run without erroring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathOp {
    Move,
    Line,
    Horizontal,
    Vertical,
    Cubic,
    Quadratic,
    Close,
}

impl PathOp {
    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'M' => Some(Self::Move),
            'L' => Some(Self::Line),
            'H' => Some(Self::Horizontal),
            'V' => Some(Self::Vertical),
            'C' => Some(Self::Cubic),
            'Q' => Some(Self::Quadratic),
            'Z' => Some(Self::Close),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathCommand {
    pub op: PathOp,
    pub relative: bool,
    pub args: Vec<f64>,
}

fn command_run_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-zA-Z][^a-zA-Z]*").expect("valid regex"))
}

/// Compact SVG number grammar: a sign or a fresh decimal point starts a new
/// token even without a separator, so `1.5-2.3` splits as `1.5, -2.3` and
/// `1.5.3` as `1.5, .3`. Exponential notation is a known non-feature of this
/// grammar (`1e-5` tokenizes as `1, -5`), matching minified path data in the
/// wild closely enough for line art.
fn number_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[-+]?(?:\d*\.\d+|\d+)").expect("valid regex"))
}

/// Tokenize a path `d` string into recognized commands with resolved operands.
///
/// Runs led by an unsupported letter are skipped silently; malformed operand
/// text simply yields fewer operands. This never fails: worst case is an empty
/// command list.
pub fn parse_path_data(d: &str) -> Vec<PathCommand> {
    let mut commands = Vec::new();

    for run in command_run_regex().find_iter(d) {
        let run = run.as_str();
        let letter = match run.chars().next() {
            Some(c) => c,
            None => continue,
        };
        let Some(op) = PathOp::from_letter(letter) else {
            tracing::trace!(letter = %letter, "skipping unsupported path command");
            continue;
        };

        let args = number_regex()
            .find_iter(&run[1..])
            .filter_map(|m| m.as_str().parse::<f64>().ok())
            .collect();

        commands.push(PathCommand {
            op,
            relative: letter.is_ascii_lowercase(),
            args,
        });
    }

    commands
}
