//! printf-style message templates.
//!
//! Arguments are anything `Display`, so a directive can only judge an argument
//! by its rendered text: `%d` accepts text that parses as an integer, `%f` text
//! that parses as a float, and so on. Anything that doesn't fit is written back
//! inline as a `%!verb(text)` marker instead of failing.

use std::fmt::Display;
use std::fmt::Write;
use std::iter::Peekable;
use std::str::Chars;


const BAD_DISPLAY: &str = "BADDISPLAY";

/// Largest width or precision honored; anything above renders as
/// `%!(BADWIDTH)` or `%!(BADPREC)` and is otherwise ignored.
const MAX_ARG: usize = 1_000_000;

/// Fills the directives in `template` with `args`, in order.
///
/// Supported directives take the form `%[flags][width][.precision]verb` with
/// flags from `-+# 0`. `%%` is a literal percent sign. Missing arguments become
/// `%!d(MISSING)`, a trailing `%` becomes `%!(NOVERB)` and unused arguments
/// are listed at the end as `%!(EXTRA a, b)`. Widths or precisions too large
/// to honor are marked with `%!(BADWIDTH)` or `%!(BADPREC)` and dropped.
pub fn sprintf(template: &str, args: &[&dyn Display]) -> String {
    let mut res = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '%' {
            res.push(c);
            continue;
        }

        let directive = match Directive::parse(&mut chars) {
            Some(d) => d,
            None => {
                res.push_str("%!(NOVERB)");
                break;
            }
        };

        if directive.bad_width {
            res.push_str("%!(BADWIDTH)");
        }
        if directive.bad_precision {
            res.push_str("%!(BADPREC)");
        }

        if directive.verb == '%' {
            res.push('%');
            continue;
        }

        match args.next() {
            Some(arg) => res.push_str(&directive.render(*arg)),
            None => {
                let _ = write!(res, "%!{}(MISSING)", directive.verb);
            }
        }
    }

    let extra = args
        .map(|arg| display(*arg).unwrap_or_else(|| format!("%!v({})", BAD_DISPLAY)))
        .collect::<Vec<_>>();
    if !extra.is_empty() {
        let _ = write!(res, "%!(EXTRA {})", extra.join(", "));
    }

    res
}

fn display(arg: &dyn Display) -> Option<String> {
    let mut s = String::new();
    write!(s, "{}", arg).ok().map(|_| s)
}

#[derive(Debug, Default, PartialEq)]
struct Directive {
    minus: bool,
    plus: bool,
    sharp: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
    bad_width: bool,
    bad_precision: bool,
    verb: char,
}

impl Directive {
    /// Parses everything after a `%`. `None` if the template ends first.
    fn parse(chars: &mut Peekable<Chars>) -> Option<Directive> {
        let mut d = Directive::default();

        while let Some(&c) = chars.peek() {
            match c {
                '-' => d.minus = true,
                '+' => d.plus = true,
                '#' => d.sharp = true,
                '0' => d.zero = true,
                ' ' => d.space = true,
                _ => break,
            }
            chars.next();
        }

        d.width = parse_number(chars);

        if chars.peek() == Some(&'.') {
            chars.next();
            d.precision = Some(parse_number(chars).unwrap_or(0));
        }

        d.verb = chars.next()?;

        if d.width.map_or(false, |w| w > MAX_ARG) {
            d.width = None;
            d.bad_width = true;
        }

        let max_precision = if d.is_float() { u16::MAX as usize } else { MAX_ARG };
        if d.precision.map_or(false, |p| p > max_precision) {
            d.precision = None;
            d.bad_precision = true;
        }

        Some(d)
    }

    fn render(&self, arg: &dyn Display) -> String {
        let text = match display(arg) {
            Some(text) => text,
            None => return format!("%!{}({})", self.verb, BAD_DISPLAY),
        };

        match self.convert(&text) {
            Some(s) => self.pad(s),
            None => format!("%!{}({})", self.verb, text),
        }
    }

    fn convert(&self, text: &str) -> Option<String> {
        match self.verb {
            'v' => Some(text.to_string()),
            's' => Some(match self.precision {
                Some(p) => text.chars().take(p).collect(),
                None => text.to_string(),
            }),
            'q' => Some(format!("{:?}", text)),
            't' => match text {
                "true" | "false" => Some(text.to_string()),
                _ => None,
            },
            'd' => integer(text).map(|n| self.signed(n, n.unsigned_abs().to_string())),
            'x' | 'X' => {
                let s = match integer(text) {
                    Some(n) => {
                        let digits = format!("{:x}", n.unsigned_abs());
                        let digits = if self.sharp { format!("0x{}", digits) } else { digits };
                        self.signed(n, digits)
                    }
                    None => text.bytes().map(|b| format!("{:02x}", b)).collect(),
                };
                Some(if self.verb == 'X' { s.to_uppercase() } else { s })
            }
            'o' => integer(text).map(|n| {
                let prefix = if self.sharp { "0" } else { "" };
                self.signed(n, format!("{}{:o}", prefix, n.unsigned_abs()))
            }),
            'b' => integer(text).map(|n| self.signed(n, format!("{:b}", n.unsigned_abs()))),
            'c' => integer(text)
                .filter(|n| *n >= 0 && *n <= u32::MAX as i128)
                .and_then(|n| std::char::from_u32(n as u32))
                .map(|c| c.to_string()),
            'U' => integer(text)
                .filter(|n| *n >= 0)
                .map(|n| format!("U+{:04X}", n)),
            'f' | 'F' => float(text).map(|f| {
                let s = format!("{:.*}", self.precision.unwrap_or(6), f);
                self.float_sign(s)
            }),
            'e' | 'E' => float(text).map(|f| {
                let s = exponent(&format!("{:.*e}", self.precision.unwrap_or(6), f));
                let s = self.float_sign(s);
                if self.verb == 'E' { s.to_uppercase() } else { s }
            }),
            'g' | 'G' => float(text).map(|f| {
                let s = match self.precision {
                    Some(p) => format!("{:.*}", p, f),
                    None => f.to_string(),
                };
                let s = self.float_sign(s);
                if self.verb == 'G' { s.to_uppercase() } else { s }
            }),
            _ => None,
        }
    }

    fn signed(&self, n: i128, digits: String) -> String {
        if n < 0 {
            format!("-{}", digits)
        } else if self.plus {
            format!("+{}", digits)
        } else if self.space {
            format!(" {}", digits)
        } else {
            digits
        }
    }

    fn float_sign(&self, s: String) -> String {
        if s.starts_with('-') {
            s
        } else if self.plus {
            format!("+{}", s)
        } else if self.space {
            format!(" {}", s)
        } else {
            s
        }
    }

    fn pad(&self, s: String) -> String {
        let len = s.chars().count();
        let width = match self.width {
            Some(w) if w > len => w,
            _ => return s,
        };
        let fill = width - len;

        if self.minus {
            return format!("{}{}", s, " ".repeat(fill));
        }

        if self.zero && self.is_numeric() {
            let sign_len = if s.starts_with(|c: char| c == '-' || c == '+' || c == ' ') { 1 } else { 0 };
            let (sign, digits) = s.split_at(sign_len);
            return format!("{}{}{}", sign, "0".repeat(fill), digits);
        }

        format!("{}{}", " ".repeat(fill), s)
    }

    fn is_numeric(&self) -> bool {
        match self.verb {
            'd' | 'x' | 'X' | 'o' | 'b' => true,
            _ => self.is_float(),
        }
    }

    /// Float verbs hand their precision to `format!`, which caps it at `u16::MAX`.
    fn is_float(&self) -> bool {
        match self.verb {
            'f' | 'F' | 'e' | 'E' | 'g' | 'G' => true,
            _ => false,
        }
    }
}

fn parse_number(chars: &mut Peekable<Chars>) -> Option<usize> {
    let mut res: Option<usize> = None;

    while let Some(d) = chars.peek().and_then(|c| c.to_digit(10)) {
        res = Some(res.unwrap_or(0).saturating_mul(10).saturating_add(d as usize));
        chars.next();
    }

    res
}

fn integer(text: &str) -> Option<i128> {
    text.parse().ok()
}

fn float(text: &str) -> Option<f64> {
    text.parse().ok()
}

/// Rewrites Rust's `1.5e-7` exponent form as `1.5e-07`, with an explicit sign
/// and at least two digits.
fn exponent(s: &str) -> String {
    let split = s.find('e');
    let (mantissa, exp) = match split {
        Some(i) => (&s[..i], &s[i + 1..]),
        None => return s.to_string(),
    };

    match exp.parse::<i32>() {
        Ok(e) => format!("{}e{}{:02}", mantissa, if e < 0 { '-' } else { '+' }, e.abs()),
        Err(_) => s.to_string(),
    }
}
